use crate::aggregate::AmountField;
use crate::error::Result;
use crate::normalize::{clean_amount, extract_date};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Number of leading title/header rows in the source format. This is a
/// property of the export layout, not something we try to auto-detect.
pub const HEADER_ROWS: usize = 3;

/// One raw row of the uploaded table. Cells are positional:
/// date, description, sale, collection, purchase, payment, balance.
/// Rows may carry fewer cells; missing trailing cells behave as blanks.
pub type RawRow = Vec<String>;

/// A normalized ledger entry. Created once during loading, immutable after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub description: String,
    pub sale_amount: f64,
    pub collection_amount: f64,
    pub purchase_amount: f64,
    pub payment_amount: f64,
    pub balance: f64,
}

/// One party's normalized transaction history, tagged with the perspective
/// label naming which counterparty it represents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub perspective: String,
    pub records: Vec<TransactionRecord>,
}

impl Ledger {
    /// Builds a ledger from raw positional rows.
    ///
    /// Skips the fixed header rows, then normalizes each remaining row:
    /// rows whose date cell fails to parse are dropped (this is what strips
    /// detail/subtotal rows embedded in the export), and unparsable amount
    /// cells become `0.0`.
    pub fn from_rows<I>(perspective: impl Into<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = RawRow>,
    {
        let perspective = perspective.into();
        let mut records = Vec::new();
        let mut dropped = 0usize;

        for row in rows.into_iter().skip(HEADER_ROWS) {
            let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

            let Some(date) = extract_date(cell(0)) else {
                dropped += 1;
                continue;
            };

            records.push(TransactionRecord {
                date,
                description: cell(1).to_string(),
                sale_amount: clean_amount(cell(2)),
                collection_amount: clean_amount(cell(3)),
                purchase_amount: clean_amount(cell(4)),
                payment_amount: clean_amount(cell(5)),
                balance: clean_amount(cell(6)),
            });
        }

        debug!(
            "Normalized ledger '{}': {} records kept, {} undated rows dropped",
            perspective,
            records.len(),
            dropped
        );

        Ledger {
            perspective,
            records,
        }
    }

    /// Reads a CSV source into a ledger. A source that cannot be read at all
    /// surfaces as an error; no partial ledger is produced in that case.
    pub fn from_csv_reader<R: Read>(perspective: impl Into<String>, reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows: Vec<RawRow> = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        let ledger = Self::from_rows(perspective, rows);
        info!(
            "Loaded {} transactions for perspective '{}'",
            ledger.records.len(),
            ledger.perspective
        );
        Ok(ledger)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of one amount field across the whole ledger.
    pub fn total(&self, field: AmountField) -> f64 {
        self.records.iter().map(|r| field.of(r)).sum()
    }

    /// Outstanding receivables: total sales not yet collected.
    pub fn uncollected(&self) -> f64 {
        self.total(AmountField::Sale) - self.total(AmountField::Collection)
    }

    /// Outstanding payables: total purchases not yet paid.
    pub fn unpaid(&self) -> f64 {
        self.total(AmountField::Purchase) - self.total(AmountField::Payment)
    }

    /// Records on one calendar date, in original load order.
    pub fn records_on(&self, date: NaiveDate) -> Vec<&TransactionRecord> {
        self.records.iter().filter(|r| r.date == date).collect()
    }

    /// Sorted distinct transaction dates.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.records.iter().map(|r| r.date).collect();
        dates.sort();
        dates.dedup();
        dates
    }
}
