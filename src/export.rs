//! Rendering of result tables for the presentation shell: CSV downloads in
//! the same shape the original dashboard offered, plus JSON for programmatic
//! consumers. Amounts use the comma-grouped integer display format; the
//! underlying floats are untouched.

use crate::aggregate::DateComparisonRow;
use crate::error::{ReconcileError, Result};
use crate::loader::Ledger;
use crate::matcher::MatchResult;
use crate::normalize::{format_currency, format_difference};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y/%m/%d";

/// One directional per-date comparison as CSV, with perspective-labeled
/// amount columns.
pub fn comparison_csv(
    rows: &[DateComparisonRow],
    label_a: &str,
    label_b: &str,
) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["date", label_a, label_b, "difference", "match"])?;

    for row in rows {
        writer.write_record([
            row.date.format(DATE_FORMAT).to_string(),
            format_currency(row.amount_a),
            format_currency(row.amount_b),
            format_difference(row.difference),
            if row.is_match { "match" } else { "mismatch" }.to_string(),
        ])?;
    }

    finish(writer)
}

/// A detail matching run as CSV, with perspective-labeled description and
/// amount column pairs.
pub fn match_results_csv(
    results: &[MatchResult],
    label_a: &str,
    label_b: &str,
) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id".to_string(),
        format!("{label_a}_description"),
        format!("{label_a}_amount"),
        format!("{label_b}_description"),
        format!("{label_b}_amount"),
        "status".to_string(),
    ])?;

    for result in results {
        writer.write_record([
            result.match_id.to_string(),
            result.description_a.clone(),
            format_currency(result.amount_a),
            result.description_b.clone(),
            format_currency(result.amount_b),
            result.status.label().to_string(),
        ])?;
    }

    finish(writer)
}

/// One perspective's records for a single day as CSV (the per-perspective
/// download in the original; the balance column is not shown there).
pub fn ledger_day_csv(ledger: &Ledger, date: NaiveDate) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["date", "description", "sale", "collection", "purchase", "payment"])?;

    for record in ledger.records_on(date) {
        writer.write_record([
            record.date.format(DATE_FORMAT).to_string(),
            record.description.clone(),
            format_currency(record.sale_amount),
            format_currency(record.collection_amount),
            format_currency(record.purchase_amount),
            format_currency(record.payment_amount),
        ])?;
    }

    finish(writer)
}

pub fn comparison_json(rows: &[DateComparisonRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

pub fn match_results_json(results: &[MatchResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ReconcileError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReconcileError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::TransactionRecord;
    use crate::matcher::MatchStatus;

    fn comparison_rows() -> Vec<DateComparisonRow> {
        vec![
            DateComparisonRow {
                date: NaiveDate::from_ymd_opt(2022, 1, 3).unwrap(),
                amount_a: 500_000.0,
                amount_b: 500_000.0,
                difference: 0.0,
                is_match: true,
            },
            DateComparisonRow {
                date: NaiveDate::from_ymd_opt(2022, 1, 4).unwrap(),
                amount_a: 100_000.0,
                amount_b: 300_000.0,
                difference: -200_000.0,
                is_match: false,
            },
        ]
    }

    #[test]
    fn test_comparison_csv() {
        let csv = comparison_csv(&comparison_rows(), "Sonic_sale", "Jam_purchase").unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,Sonic_sale,Jam_purchase,difference,match"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2022/01/03,\"500,000\",\"500,000\",0,match"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2022/01/04,\"100,000\",\"300,000\",\"(200,000)\",mismatch"
        );
    }

    #[test]
    fn test_match_results_csv() {
        let results = vec![MatchResult {
            match_id: 1,
            description_a: "widgets".to_string(),
            amount_a: 500_000.0,
            description_b: "-".to_string(),
            amount_b: 0.0,
            status: MatchStatus::Unmatched,
        }];

        let csv = match_results_csv(&results, "Sonic", "Jam").unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,Sonic_description,Sonic_amount,Jam_description,Jam_amount,status"
        );
        assert_eq!(lines.next().unwrap(), "1,widgets,\"500,000\",-,0,unmatched");
    }

    #[test]
    fn test_ledger_day_csv_excludes_other_dates() {
        let ledger = Ledger {
            perspective: "Sonic".to_string(),
            records: vec![
                TransactionRecord {
                    date: NaiveDate::from_ymd_opt(2022, 1, 3).unwrap(),
                    description: "widgets".to_string(),
                    sale_amount: 1_234.0,
                    collection_amount: 0.0,
                    purchase_amount: 0.0,
                    payment_amount: 0.0,
                    balance: 1_234.0,
                },
                TransactionRecord {
                    date: NaiveDate::from_ymd_opt(2022, 1, 4).unwrap(),
                    description: "gadgets".to_string(),
                    sale_amount: 99.0,
                    collection_amount: 0.0,
                    purchase_amount: 0.0,
                    payment_amount: 0.0,
                    balance: 1_333.0,
                },
            ],
        };

        let csv = ledger_day_csv(&ledger, NaiveDate::from_ymd_opt(2022, 1, 3).unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,description,sale,collection,purchase,payment"
        );
        assert_eq!(lines.next().unwrap(), "2022/01/03,widgets,\"1,234\",0,0,0");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_comparison_json_round_trips() {
        let rows = comparison_rows();
        let json = comparison_json(&rows).unwrap();
        let parsed: Vec<DateComparisonRow> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rows);
    }
}
