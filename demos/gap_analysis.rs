//! Unmatched gap analysis example

use bank_reco_core::{reconcile, GapAnalyzer, MatchConfig, TransactionRecord};
use bigdecimal::BigDecimal;
use std::str::FromStr;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    println!("🔍 Bank Reco Core - Gap Analysis Example\n");

    let bank = vec![
        TransactionRecord::new(BigDecimal::from(5000), "2024-02-03").with_description("Customer deposit"),
        TransactionRecord::new(BigDecimal::from_str("-118.00")?, "2024-02-29").with_description("SMS charges"),
        TransactionRecord::new(BigDecimal::from(1500), "2024-02-10").with_reference("UTR4471"),
    ];
    let books = vec![
        TransactionRecord::new(BigDecimal::from(1500), "2024-02-09").with_reference("utr4471"),
        TransactionRecord::new(BigDecimal::from(200), "2024-02-27").with_description("Cheque deposited"),
    ];

    let outcome = reconcile(&bank, &books, &MatchConfig::default());
    let report = GapAnalyzer::new().analyze(&outcome);

    for (label, side) in [
        ("Bank", &report.unmatched_bank_analysis),
        ("Books", &report.unmatched_books_analysis),
    ] {
        println!("📒 Unmatched {}:", label);
        println!("  Count:    {}", side.count);
        println!("  Total:    ₹{}", side.total_amount);
        println!("  Inflows:  ₹{}", side.positive_amount);
        println!("  Outflows: ₹{}", side.negative_amount);
        println!("  Average:  ₹{}", side.average_amount);
        println!();
    }

    println!("⚖️  Net difference:     ₹{}", report.summary.net_difference);
    println!("⚖️  Reconciliation gap: ₹{}", report.summary.reconciliation_gap);
    println!();

    println!("💡 Recommendations:");
    for recommendation in &report.recommendations {
        println!("  - {}", recommendation);
    }

    Ok(())
}
