//! Traits for plugging custom behaviour into the matcher

use crate::reconciliation::MatchConfig;
use crate::types::*;

/// Text similarity used to score descriptions against each other.
///
/// Implementations must return a ratio in `[0.0, 1.0]`, give `1.0` for
/// identical strings and `0.0` for strings with nothing in common, and
/// ignore case. The matcher only calls this with both strings non-empty.
pub trait TextSimilarity: Send + Sync {
    /// Similarity ratio between two descriptions
    fn similarity(&self, left: &str, right: &str) -> f64;
}

/// Trait for implementing custom configuration rules on top of the defaults
pub trait ConfigValidator: Send + Sync {
    /// Validate a matching configuration before a run
    fn validate_config(&self, config: &MatchConfig) -> ReconResult<()>;
}

/// Default validator: tolerances must be non-negative and the fuzzy
/// threshold must be a ratio
pub struct DefaultConfigValidator;

impl ConfigValidator for DefaultConfigValidator {
    fn validate_config(&self, config: &MatchConfig) -> ReconResult<()> {
        crate::utils::validate_amount_tolerance(&config.amount_tolerance)?;
        crate::utils::validate_date_tolerance(config.date_tolerance_days)?;
        crate::utils::validate_fuzzy_threshold(config.fuzzy_threshold)?;
        Ok(())
    }
}
