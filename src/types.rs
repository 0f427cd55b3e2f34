//! Core types shared by the matcher and the gap analyzer

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Confidence band derived from a composite match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchConfidence {
    /// Score of 0.8 or above
    High,
    /// Score of 0.6 or above
    Medium,
    /// Anything that cleared the acceptance threshold but nothing more
    Low,
}

impl MatchConfidence {
    /// Score at or above which a match is reported as high confidence
    pub const HIGH_THRESHOLD: f64 = 0.8;
    /// Score at or above which a match is reported as medium confidence
    pub const MEDIUM_THRESHOLD: f64 = 0.6;

    /// Band a composite score
    pub fn from_score(score: f64) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            MatchConfidence::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            MatchConfidence::Medium
        } else {
            MatchConfidence::Low
        }
    }

    /// Lowercase label, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchConfidence::High => "high",
            MatchConfidence::Medium => "medium",
            MatchConfidence::Low => "low",
        }
    }
}

impl fmt::Display for MatchConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall state of a reconciliation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationStatus {
    /// Every bank entry and every book entry was paired
    Complete,
    /// At least one entry on either side is still open
    Pending,
}

impl ReconciliationStatus {
    /// Complete only when neither side has an unmatched entry left
    pub fn from_unmatched(unmatched_bank: usize, unmatched_books: usize) -> Self {
        if unmatched_bank == 0 && unmatched_books == 0 {
            ReconciliationStatus::Complete
        } else {
            ReconciliationStatus::Pending
        }
    }
}

impl fmt::Display for ReconciliationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconciliationStatus::Complete => f.write_str("complete"),
            ReconciliationStatus::Pending => f.write_str("pending"),
        }
    }
}

/// Signal that contributed to a pair's composite score.
///
/// Rendered as the flat reason tags callers see in `match_reasons`,
/// e.g. `date_within_tolerance_3_days` or `description_fuzzy_0.87`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchReason {
    AmountExact,
    /// Debit on one side recorded as a credit on the other
    AmountSignReversed,
    DateExact,
    /// Dates differ by the given number of days, within tolerance
    DateWithinTolerance(i64),
    /// At least one date did not parse but the raw texts are equal
    DateStringMatch,
    /// Description similarity at or above the fuzzy threshold
    DescriptionFuzzy(f64),
    /// Two or more meaningful words in common
    DescriptionPartial,
    ReferenceMatch,
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchReason::AmountExact => f.write_str("amount_exact"),
            MatchReason::AmountSignReversed => f.write_str("amount_sign_reversed"),
            MatchReason::DateExact => f.write_str("date_exact"),
            MatchReason::DateWithinTolerance(days) => {
                write!(f, "date_within_tolerance_{}_days", days)
            }
            MatchReason::DateStringMatch => f.write_str("date_string_match"),
            MatchReason::DescriptionFuzzy(similarity) => {
                write!(f, "description_fuzzy_{:.2}", similarity)
            }
            MatchReason::DescriptionPartial => f.write_str("description_partial"),
            MatchReason::ReferenceMatch => f.write_str("reference_match"),
        }
    }
}

impl Serialize for MatchReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Errors raised while building a reconciliation run.
///
/// Matching and gap analysis themselves never fail; only configuration
/// and request parsing can.
#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<toml::de::Error> for ReconError {
    fn from(err: toml::de::Error) -> Self {
        ReconError::ConfigParse(err.to_string())
    }
}

impl From<serde_json::Error> for ReconError {
    fn from(err: serde_json::Error) -> Self {
        ReconError::ConfigParse(err.to_string())
    }
}

/// Result type for reconciliation setup
pub type ReconResult<T> = Result<T, ReconError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bands() {
        assert_eq!(MatchConfidence::from_score(0.9), MatchConfidence::High);
        assert_eq!(MatchConfidence::from_score(0.8), MatchConfidence::High);
        assert_eq!(MatchConfidence::from_score(0.65), MatchConfidence::Medium);
        assert_eq!(MatchConfidence::from_score(0.6), MatchConfidence::Medium);
        assert_eq!(MatchConfidence::from_score(0.5), MatchConfidence::Low);
    }

    #[test]
    fn test_reason_tags() {
        assert_eq!(MatchReason::AmountExact.to_string(), "amount_exact");
        assert_eq!(
            MatchReason::DateWithinTolerance(3).to_string(),
            "date_within_tolerance_3_days"
        );
        assert_eq!(
            MatchReason::DescriptionFuzzy(0.875).to_string(),
            "description_fuzzy_0.88"
        );
        assert_eq!(
            serde_json::to_value(MatchReason::ReferenceMatch).unwrap(),
            serde_json::json!("reference_match")
        );
    }

    #[test]
    fn test_status_from_unmatched() {
        assert_eq!(
            ReconciliationStatus::from_unmatched(0, 0),
            ReconciliationStatus::Complete
        );
        assert_eq!(
            ReconciliationStatus::from_unmatched(0, 2),
            ReconciliationStatus::Pending
        );
        assert_eq!(
            serde_json::to_value(ReconciliationStatus::Pending).unwrap(),
            serde_json::json!("pending")
        );
    }
}
