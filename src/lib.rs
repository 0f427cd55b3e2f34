//! # Bank Reco Core
//!
//! Bank reconciliation for bank statements against books of account:
//! pairs statement lines with ledger entries under amount, date and
//! description heuristics, and analyses what is left unmatched.
//!
//! ## Features
//!
//! - **Amount gate**: tolerance-based amount matching with optional sign reversal
//! - **Date scoring**: exact and within-tolerance dates across common Indian and ISO layouts
//! - **Description scoring**: fuzzy similarity with a shared-keyword fallback
//! - **Reference scoring**: case-insensitive cheque/UTR reference comparison
//! - **Gap analysis**: per-side totals, net difference and reviewer recommendations
//!
//! ## Quick Start
//!
//! ```rust
//! use bank_reco_core::{reconcile, analyze_gap, MatchConfig, TransactionRecord};
//! use bigdecimal::BigDecimal;
//!
//! let bank = vec![TransactionRecord::new(BigDecimal::from(500), "2024-01-10")
//!     .with_description("NEFT ABC Traders")];
//! let books = vec![TransactionRecord::new(BigDecimal::from(500), "10/01/2024")
//!     .with_description("NEFT ABC Traders")];
//!
//! let outcome = reconcile(&bank, &books, &MatchConfig::default());
//! assert_eq!(outcome.match_count, 1);
//!
//! let gap = analyze_gap(&outcome);
//! assert!(!gap.summary.requires_review);
//! ```

pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use reconciliation::*;
pub use traits::*;
pub use types::*;
