//! Bank reconciliation example: matching a statement against the cash book

use bank_reco_core::{BankMatcher, MatchConfig, ReconciliationRequest};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🏦 Bank Reco Core - Bank Reconciliation Example\n");

    // 1. Request as received from the dispatch layer
    let request = ReconciliationRequest::from_json(&json!({
        "bank_statement": [
            {"amount": 500, "date": "2024-01-10", "description": "NEFT ABC Traders"},
            {"amount": -12000, "date": "01/01/2024", "description": "Rent January", "reference": "CHQ-1001"},
            {"amount": "2500.00", "date": "05-01-2024", "narration": "UPI collection counter sales"},
            {"amount": 75.5, "date": "2024-01-31", "description": "Interest credit"}
        ],
        "books_entries": [
            {"amount": 12000, "date": "2024-01-02", "description": "Office rent", "reference": "chq-1001"},
            {"amount": 500, "date": "2024-01-10", "description": "NEFT ABC Traders"},
            {"amount": 2500, "date": "2024-01-08", "narration": "Counter sales collection"},
            {"amount": 9999, "date": "2024-01-20", "description": "Cheque issued not presented"}
        ],
        "date_tolerance_days": 5
    }))?;

    println!("📋 Matching Parameters:");
    println!("  Amount tolerance:  ₹{}", request.config.amount_tolerance);
    println!("  Date tolerance:    {} days", request.config.date_tolerance_days);
    println!("  Fuzzy threshold:   {}", request.config.fuzzy_threshold);
    println!("  Sign reversal:     {}", request.config.enable_sign_reversal);
    println!();

    // 2. Match
    let matcher = BankMatcher::try_new(request.config.clone())?;
    let outcome = matcher.reconcile_request(&request);

    println!("✅ Matched Entries:");
    for result in &outcome.matched {
        println!(
            "  bank #{} ↔ book #{}  ₹{:<10} score {:.2} ({})",
            result.bank_index,
            result.book_index,
            result.bank_entry.amount,
            result.match_score,
            result.match_confidence
        );
        let reasons: Vec<String> = result.match_reasons.iter().map(|r| r.to_string()).collect();
        println!("      reasons: {}", reasons.join(", "));
    }
    println!();

    println!("❓ Unmatched:");
    for entry in &outcome.unmatched_bank {
        println!("  bank  ₹{:<10} {} {}", entry.amount, entry.date, entry.combined_description());
    }
    for entry in &outcome.unmatched_books {
        println!("  books ₹{:<10} {} {}", entry.amount, entry.date, entry.combined_description());
    }
    println!();

    // 3. Summary
    println!("📊 Summary:");
    println!("  Match rate:  {:.0}%", outcome.match_rate * 100.0);
    println!("  Status:      {}", outcome.reconciliation_status);
    println!(
        "  Confidence:  high {} / medium {} / low {}",
        outcome.confidence_distribution.high,
        outcome.confidence_distribution.medium,
        outcome.confidence_distribution.low
    );

    // 4. Stricter run from a TOML profile
    let strict = MatchConfig::from_toml_str(
        r#"
        date_tolerance_days = 0
        enable_sign_reversal = false
        "#,
    )?;
    let strict_outcome = BankMatcher::new(strict).reconcile_request(&request);
    println!();
    println!("🔒 Strict profile matched {} of {}", strict_outcome.match_count, strict_outcome.total_bank_entries);

    Ok(())
}
