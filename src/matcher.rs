use crate::aggregate::AmountField;
use crate::loader::{Ledger, TransactionRecord};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

/// The four declared field pairs a detail comparison can run over.
///
/// The "reversed" directions compare the same economic event from the other
/// party's books; iteration is always over ledger A's rows, the direction
/// only selects which field each side contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    ASaleVsBPurchase,
    ACollectionVsBPayment,
    BSaleVsAPurchase,
    BCollectionVsAPayment,
}

impl Direction {
    /// Resolves to (field read from ledger A, field read from ledger B).
    pub fn fields(self) -> (AmountField, AmountField) {
        match self {
            Direction::ASaleVsBPurchase => (AmountField::Sale, AmountField::Purchase),
            Direction::ACollectionVsBPayment => (AmountField::Collection, AmountField::Payment),
            Direction::BSaleVsAPurchase => (AmountField::Purchase, AmountField::Sale),
            Direction::BCollectionVsAPayment => (AmountField::Payment, AmountField::Collection),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    All,
    MatchedOnly,
    /// Mismatched or Unmatched.
    NonMatched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Matched,
    Mismatched,
    Unmatched,
}

impl MatchStatus {
    /// Sort priority: exceptions surface before clean matches.
    fn priority(self) -> u8 {
        match self {
            MatchStatus::Mismatched => 0,
            MatchStatus::Unmatched => 1,
            MatchStatus::Matched => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchStatus::Matched => "matched",
            MatchStatus::Mismatched => "mismatched",
            MatchStatus::Unmatched => "unmatched",
        }
    }
}

/// One reconciled or leftover transaction row. A side with no counterpart
/// carries description `"-"` and amount `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 1-based position in the final filtered, sorted output.
    pub match_id: usize,
    pub description_a: String,
    pub amount_a: f64,
    pub description_b: String,
    pub amount_b: f64,
    pub status: MatchStatus,
}

const EMPTY_SIDE: &str = "-";

/// Reconciles the two ledgers' rows on one date by greedy amount matching.
///
/// Each ledger-A row, in load order, is matched against every ledger-B row
/// on the date whose declared field equals its own exactly. All equal B rows
/// produce a result row (a single A row fans out when several B rows share
/// its amount - amount, not description, is the matching key) and are marked
/// consumed. The search runs over the full filtered B set each time, so a
/// later A row with the same amount re-emits already-consumed B rows.
/// B rows never consumed come out as leftover unmatched rows after the A
/// pass. Matching is exact f64 equality with no tolerance; zero-amount rows
/// therefore match other zero-amount rows.
pub fn match_transactions(
    ledger_a: &Ledger,
    ledger_b: &Ledger,
    date: NaiveDate,
    direction: Direction,
    filter: StatusFilter,
) -> Vec<MatchResult> {
    let (field_a, field_b) = direction.fields();

    let rows_a: Vec<&TransactionRecord> = ledger_a.records_on(date);
    let rows_b: Vec<&TransactionRecord> = ledger_b.records_on(date);
    let mut consumed = vec![false; rows_b.len()];

    let mut results: Vec<MatchResult> = Vec::new();

    for row_a in &rows_a {
        let amount_a = field_a.of(row_a);
        let mut found = false;

        for (j, row_b) in rows_b.iter().enumerate() {
            let amount_b = field_b.of(row_b);
            if amount_b != amount_a {
                continue;
            }
            found = true;
            consumed[j] = true;
            results.push(MatchResult {
                match_id: results.len() + 1,
                description_a: row_a.description.clone(),
                amount_a,
                description_b: row_b.description.clone(),
                amount_b,
                status: if amount_a == amount_b {
                    MatchStatus::Matched
                } else {
                    MatchStatus::Mismatched
                },
            });
        }

        if !found {
            results.push(MatchResult {
                match_id: results.len() + 1,
                description_a: row_a.description.clone(),
                amount_a,
                description_b: EMPTY_SIDE.to_string(),
                amount_b: 0.0,
                status: MatchStatus::Unmatched,
            });
        }
    }

    for (j, row_b) in rows_b.iter().enumerate() {
        if consumed[j] {
            continue;
        }
        results.push(MatchResult {
            match_id: results.len() + 1,
            description_a: EMPTY_SIDE.to_string(),
            amount_a: 0.0,
            description_b: row_b.description.clone(),
            amount_b: field_b.of(row_b),
            status: MatchStatus::Unmatched,
        });
    }

    results.retain(|r| match filter {
        StatusFilter::All => true,
        StatusFilter::MatchedOnly => r.status == MatchStatus::Matched,
        StatusFilter::NonMatched => r.status != MatchStatus::Matched,
    });

    // Stable sort keeps insertion order within each status.
    results.sort_by_key(|r| r.status.priority());
    for (i, result) in results.iter_mut().enumerate() {
        result.match_id = i + 1;
    }

    debug!(
        "Matched {} vs {} on {} ({:?}): {} result rows",
        ledger_a.perspective,
        ledger_b.perspective,
        date,
        direction,
        results.len()
    );

    results
}
