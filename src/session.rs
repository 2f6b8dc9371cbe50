use crate::aggregate::{compare_by_date, DateComparisonRow, SummaryStats};
use crate::error::{ReconcileError, Result};
use crate::loader::Ledger;
use crate::matcher::{match_transactions, Direction, MatchResult, StatusFilter};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

/// The two ledgers under comparison. Always installed and replaced as a
/// pair, never one at a time, so queries can't observe half-loaded state.
#[derive(Debug, Clone)]
pub struct LedgerPair {
    pub ledger_a: Ledger,
    pub ledger_b: Ledger,
}

/// The active detail-analysis selection: match date, declared field pair,
/// and match-state filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub date: Option<NaiveDate>,
    pub direction: Direction,
    pub status_filter: StatusFilter,
}

impl Default for FilterSelection {
    fn default() -> Self {
        FilterSelection {
            date: None,
            direction: Direction::ASaleVsBPurchase,
            status_filter: StatusFilter::All,
        }
    }
}

/// Session state for one reconciliation: owns the loaded ledger pair and
/// the current filter selection.
///
/// Loading replaces the whole pair; every query reads the installed pair
/// without mutating it. The host is expected to serialize requests per
/// session, so there is no internal locking.
#[derive(Debug, Default)]
pub struct ReconcileSession {
    ledgers: Option<LedgerPair>,
    pub selection: FilterSelection,
}

impl ReconcileSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a freshly loaded ledger pair, replacing any previous one.
    pub fn load(&mut self, ledger_a: Ledger, ledger_b: Ledger) {
        info!(
            "Session loaded: '{}' ({} records) vs '{}' ({} records)",
            ledger_a.perspective,
            ledger_a.len(),
            ledger_b.perspective,
            ledger_b.len()
        );
        self.ledgers = Some(LedgerPair { ledger_a, ledger_b });
        self.selection = FilterSelection::default();
    }

    pub fn is_loaded(&self) -> bool {
        self.ledgers.is_some()
    }

    pub fn ledgers(&self) -> Result<&LedgerPair> {
        self.ledgers.as_ref().ok_or(ReconcileError::LedgersNotLoaded)
    }

    /// Runs one directional per-date comparison over the loaded pair.
    pub fn compare(&self, direction: Direction) -> Result<Vec<DateComparisonRow>> {
        let pair = self.ledgers()?;
        let (field_a, field_b) = direction.fields();
        Ok(compare_by_date(
            &pair.ledger_a,
            field_a,
            &pair.ledger_b,
            field_b,
        ))
    }

    /// Row-level matching for an explicit date/direction/filter combination.
    pub fn match_on(
        &self,
        date: NaiveDate,
        direction: Direction,
        filter: StatusFilter,
    ) -> Result<Vec<MatchResult>> {
        let pair = self.ledgers()?;
        Ok(match_transactions(
            &pair.ledger_a,
            &pair.ledger_b,
            date,
            direction,
            filter,
        ))
    }

    /// Row-level matching using the stored filter selection.
    pub fn match_selected(&self) -> Result<Vec<MatchResult>> {
        let date = self.selection.date.ok_or(ReconcileError::NoDateSelected)?;
        self.match_on(date, self.selection.direction, self.selection.status_filter)
    }

    /// Dashboard totals for ledger A's perspective.
    pub fn summary(&self) -> Result<SummaryStats> {
        Ok(SummaryStats::for_ledger(&self.ledgers()?.ledger_a))
    }

    /// Dates offered by the detail-analysis date picker (ledger A's dates,
    /// as in the original).
    pub fn available_dates(&self) -> Result<Vec<NaiveDate>> {
        Ok(self.ledgers()?.ledger_a.dates())
    }
}
