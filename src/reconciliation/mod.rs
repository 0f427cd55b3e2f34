//! Reconciliation of bank statements against the books
//!
//! [`BankMatcher`] pairs statement entries with book entries and
//! [`GapAnalyzer`] summarises whatever was left over.

pub mod config;
pub mod gap;
pub mod matcher;
pub mod request;
pub mod transaction;

pub use config::*;
pub use gap::*;
pub use matcher::*;
pub use request::*;
pub use transaction::*;

/// Match bank entries against book entries with the given parameters
pub fn reconcile(
    bank_entries: &[TransactionRecord],
    book_entries: &[TransactionRecord],
    config: &MatchConfig,
) -> ReconciliationOutcome {
    BankMatcher::new(config.clone()).reconcile(bank_entries, book_entries)
}

/// Run a parsed request with its own matching parameters
pub fn reconcile_request(request: &ReconciliationRequest) -> ReconciliationOutcome {
    BankMatcher::new(request.config.clone()).reconcile_request(request)
}

/// Analyze the unmatched sets of a matcher outcome with the standard threshold
pub fn analyze_gap(outcome: &ReconciliationOutcome) -> GapReport {
    GapAnalyzer::new().analyze(outcome)
}
