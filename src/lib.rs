//! # Ledger Reconciler
//!
//! A library for reconciling two independently maintained ledgers of the
//! same trade relationship, each recorded from one counterparty's point of
//! view, and surfacing the mismatches between them.
//!
//! ## Core Concepts
//!
//! - **Perspective**: a caller-supplied label naming which counterparty a
//!   ledger represents (e.g. the seller vs. the buyer).
//! - **Declared field pair**: the amount columns being compared — one
//!   party's sales should mirror the other's purchases, and one party's
//!   collections should mirror the other's payments.
//! - **Date comparison**: both ledgers are grouped by calendar date over the
//!   declared fields and full-outer-joined, flagging dates whose totals
//!   disagree.
//! - **Detail matching**: on a chosen date, individual rows are greedily
//!   paired by exact amount and classified Matched / Mismatched / Unmatched.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ledger_reconciler::*;
//!
//! let mut session = ReconcileSession::new();
//! let sonic = Ledger::from_csv_reader("Sonic", sonic_csv.as_bytes())?;
//! let jam = Ledger::from_csv_reader("Jam", jam_csv.as_bytes())?;
//! session.load(sonic, jam);
//!
//! for row in session.compare(Direction::ASaleVsBPurchase)? {
//!     if !row.is_match {
//!         let detail = session.match_on(
//!             row.date,
//!             Direction::ASaleVsBPurchase,
//!             StatusFilter::NonMatched,
//!         )?;
//!         // render detail rows...
//!     }
//! }
//! ```

pub mod aggregate;
pub mod error;
pub mod export;
pub mod loader;
pub mod matcher;
pub mod normalize;
pub mod session;

pub use aggregate::{compare_by_date, mismatches_only, AmountField, DateComparisonRow, SummaryStats};
pub use error::{ReconcileError, Result};
pub use loader::{Ledger, RawRow, TransactionRecord, HEADER_ROWS};
pub use matcher::{match_transactions, Direction, MatchResult, MatchStatus, StatusFilter};
pub use normalize::{clean_amount, extract_date, format_currency, format_difference};
pub use session::{FilterSelection, LedgerPair, ReconcileSession};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sonic_csv() -> &'static str {
        "Transaction Ledger,,,,,,\n\
         Sonic Value Co.,,,,,,\n\
         Date,Description,Sale,Collection,Purchase,Payment,Balance\n\
         2022/01/03 -1,Widget shipment,\"500,000\",,,,\"500,000\"\n\
         ,carried detail,,,,,\n\
         2022/01/03 -2,Add-on order,\"300,000\",,,,\"800,000\"\n\
         2022/01/05,Wire received,,\"500,000\",,,\"300,000\"\n"
    }

    fn jam_csv() -> &'static str {
        "Transaction Ledger,,,,,,\n\
         Jam Music Co.,,,,,,\n\
         Date,Description,Sale,Collection,Purchase,Payment,Balance\n\
         2022/01/03,Widget purchase,,,\"500,000\",,\"500,000\"\n\
         2022/01/05,Payment sent,,,,\"500,000\",0\n"
    }

    #[test]
    fn test_end_to_end_matched_date() {
        let mut session = ReconcileSession::new();
        session.load(
            Ledger::from_csv_reader("Sonic", sonic_csv().as_bytes()).unwrap(),
            Ledger::from_csv_reader("Jam", jam_csv().as_bytes()).unwrap(),
        );

        let rows = session.compare(Direction::ASaleVsBPurchase).unwrap();
        // Both transaction dates appear; 2022/01/05 sums to 0 vs 0.
        assert_eq!(rows.len(), 2);

        let jan3 = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        let row = rows.iter().find(|r| r.date == jan3).unwrap();
        assert_eq!(row.amount_a, 800_000.0);
        assert_eq!(row.amount_b, 500_000.0);
        assert_eq!(row.difference, 300_000.0);
        assert!(!row.is_match);

        let detail = session
            .match_on(jan3, Direction::ASaleVsBPurchase, StatusFilter::All)
            .unwrap();
        assert_eq!(detail.len(), 2);
        // The unmatched add-on order surfaces before the clean match.
        assert_eq!(detail[0].status, MatchStatus::Unmatched);
        assert_eq!(detail[0].description_a, "Add-on order");
        assert_eq!(detail[1].status, MatchStatus::Matched);
        assert_eq!(detail[1].description_a, "Widget shipment");
        assert_eq!(detail[1].description_b, "Widget purchase");
    }

    #[test]
    fn test_end_to_end_collection_vs_payment() {
        let mut session = ReconcileSession::new();
        session.load(
            Ledger::from_csv_reader("Sonic", sonic_csv().as_bytes()).unwrap(),
            Ledger::from_csv_reader("Jam", jam_csv().as_bytes()).unwrap(),
        );

        let rows = session.compare(Direction::ACollectionVsBPayment).unwrap();
        let jan5 = NaiveDate::from_ymd_opt(2022, 1, 5).unwrap();
        let row = rows.iter().find(|r| r.date == jan5).unwrap();
        assert!(row.is_match);

        let detail = session
            .match_on(jan5, Direction::ACollectionVsBPayment, StatusFilter::All)
            .unwrap();
        assert_eq!(detail[0].status, MatchStatus::Matched);
        assert_eq!(detail[0].amount_a, 500_000.0);
    }
}
