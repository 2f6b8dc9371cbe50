use crate::loader::{Ledger, TransactionRecord};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The five amount columns a comparison can be declared over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountField {
    Sale,
    Collection,
    Purchase,
    Payment,
    Balance,
}

impl AmountField {
    pub fn of(self, record: &TransactionRecord) -> f64 {
        match self {
            AmountField::Sale => record.sale_amount,
            AmountField::Collection => record.collection_amount,
            AmountField::Purchase => record.purchase_amount,
            AmountField::Payment => record.payment_amount,
            AmountField::Balance => record.balance,
        }
    }
}

/// Per-date comparison of the two ledgers' declared fields. Derived on
/// demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateComparisonRow {
    pub date: NaiveDate,
    pub amount_a: f64,
    pub amount_b: f64,
    pub difference: f64,
    pub is_match: bool,
}

/// Groups each ledger by date over its declared field and full-outer-joins
/// the sums: every date seen on either side appears exactly once, with `0.0`
/// for a side that has no records on that date.
///
/// Match flags use exact float equality on purpose - the variance a user
/// acts on is the same number the flag is derived from.
pub fn compare_by_date(
    ledger_a: &Ledger,
    field_a: AmountField,
    ledger_b: &Ledger,
    field_b: AmountField,
) -> Vec<DateComparisonRow> {
    let sums_a = sum_by_date(ledger_a, field_a);
    let sums_b = sum_by_date(ledger_b, field_b);

    let mut joined: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for (date, sum) in sums_a {
        joined.entry(date).or_insert((0.0, 0.0)).0 = sum;
    }
    for (date, sum) in sums_b {
        joined.entry(date).or_insert((0.0, 0.0)).1 = sum;
    }

    let rows: Vec<DateComparisonRow> = joined
        .into_iter()
        .map(|(date, (amount_a, amount_b))| {
            let difference = amount_a - amount_b;
            DateComparisonRow {
                date,
                amount_a,
                amount_b,
                difference,
                is_match: difference == 0.0,
            }
        })
        .collect();

    debug!(
        "Compared {:?} ({}) against {:?} ({}): {} dates, {} mismatched",
        field_a,
        ledger_a.perspective,
        field_b,
        ledger_b.perspective,
        rows.len(),
        rows.iter().filter(|r| !r.is_match).count()
    );

    rows
}

fn sum_by_date(ledger: &Ledger, field: AmountField) -> BTreeMap<NaiveDate, f64> {
    let mut sums = BTreeMap::new();
    for record in &ledger.records {
        *sums.entry(record.date).or_insert(0.0) += field.of(record);
    }
    sums
}

/// Keeps only the rows where the two sides disagree.
pub fn mismatches_only(rows: &[DateComparisonRow]) -> Vec<DateComparisonRow> {
    rows.iter().filter(|r| !r.is_match).cloned().collect()
}

/// Ledger-level totals shown on the original dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_sale: f64,
    pub total_collection: f64,
    pub total_purchase: f64,
    pub total_payment: f64,
    pub uncollected: f64,
    pub unpaid: f64,
}

impl SummaryStats {
    pub fn for_ledger(ledger: &Ledger) -> Self {
        SummaryStats {
            total_sale: ledger.total(AmountField::Sale),
            total_collection: ledger.total(AmountField::Collection),
            total_purchase: ledger.total(AmountField::Purchase),
            total_payment: ledger.total(AmountField::Payment),
            uncollected: ledger.uncollected(),
            unpaid: ledger.unpaid(),
        }
    }
}
