//! Loads two small in-memory ledgers, prints the directional date
//! comparison, and drills into the first mismatched date.
//!
//! Run with: `cargo run --example reconcile_demo`

use anyhow::Result;
use ledger_reconciler::*;

const SELLER_CSV: &str = "\
Trade Ledger 2022,,,,,,
Sonic Value Co.,,,,,,
Date,Description,Sale,Collection,Purchase,Payment,Balance
2022/01/03 -1,January widget order,\"500,000\",,,,\"500,000\"
2022/01/03 -2,Rush surcharge,\"300,000\",,,,\"800,000\"
2022/01/10,Wire from Jam Music,,\"500,000\",,,\"300,000\"
";

const BUYER_CSV: &str = "\
Trade Ledger 2022,,,,,,
Jam Music Co.,,,,,,
Date,Description,Sale,Collection,Purchase,Payment,Balance
2022/01/03,Widget order received,,,\"500,000\",,\"500,000\"
2022/01/10,Payment for widgets,,,,\"500,000\",0
";

fn main() -> Result<()> {
    let mut session = ReconcileSession::new();
    session.load(
        Ledger::from_csv_reader("Sonic", SELLER_CSV.as_bytes())?,
        Ledger::from_csv_reader("Jam", BUYER_CSV.as_bytes())?,
    );

    let stats = session.summary()?;
    println!(
        "Sonic totals: sale {} | collection {} | uncollected {}",
        format_currency(stats.total_sale),
        format_currency(stats.total_collection),
        format_currency(stats.uncollected),
    );
    println!();

    let rows = session.compare(Direction::ASaleVsBPurchase)?;
    println!("{:<12} {:>12} {:>12} {:>12}  match", "date", "Sonic_sale", "Jam_purchase", "diff");
    for row in &rows {
        println!(
            "{:<12} {:>12} {:>12} {:>12}  {}",
            row.date.format("%Y/%m/%d"),
            format_currency(row.amount_a),
            format_currency(row.amount_b),
            format_difference(row.difference),
            if row.is_match { "yes" } else { "NO" },
        );
    }

    if let Some(disputed) = rows.iter().find(|r| !r.is_match) {
        println!();
        println!("Detail for {}:", disputed.date.format("%Y/%m/%d"));
        let detail = session.match_on(
            disputed.date,
            Direction::ASaleVsBPurchase,
            StatusFilter::All,
        )?;
        print!("{}", export::match_results_csv(&detail, "Sonic", "Jam")?);
    }

    Ok(())
}
