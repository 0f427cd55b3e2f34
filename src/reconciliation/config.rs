//! Matching parameters for a reconciliation run

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::traits::{ConfigValidator, DefaultConfigValidator};
use crate::types::*;

/// Tunable matching parameters.
///
/// Built once by the caller and handed to the matcher; every field has a
/// default so partial TOML or JSON documents load cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Largest absolute amount difference still treated as equal
    #[serde(deserialize_with = "crate::utils::decimal_param")]
    pub amount_tolerance: BigDecimal,
    /// Largest date gap, in days, that still earns a date score
    pub date_tolerance_days: i64,
    /// Minimum description similarity for a fuzzy description score
    pub fuzzy_threshold: f64,
    /// Accept a debit on one side against a credit on the other
    pub enable_sign_reversal: bool,
    /// Fall back to shared-keyword scoring when descriptions are not similar
    pub enable_partial_match: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            amount_tolerance: default_amount_tolerance(),
            date_tolerance_days: 7,
            fuzzy_threshold: 0.6,
            enable_sign_reversal: true,
            enable_partial_match: true,
        }
    }
}

fn default_amount_tolerance() -> BigDecimal {
    BigDecimal::from_str("0.01").unwrap_or_else(|_| BigDecimal::from(0))
}

impl MatchConfig {
    /// Keys recognised in a flat request mapping
    pub const KEYS: [&'static str; 5] = [
        "amount_tolerance",
        "date_tolerance_days",
        "fuzzy_threshold",
        "enable_sign_reversal",
        "enable_partial_match",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount_tolerance(mut self, tolerance: BigDecimal) -> Self {
        self.amount_tolerance = tolerance;
        self
    }

    pub fn date_tolerance_days(mut self, days: i64) -> Self {
        self.date_tolerance_days = days;
        self
    }

    pub fn fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn sign_reversal(mut self, enabled: bool) -> Self {
        self.enable_sign_reversal = enabled;
        self
    }

    pub fn partial_match(mut self, enabled: bool) -> Self {
        self.enable_partial_match = enabled;
        self
    }

    /// Check the configuration with the default rules
    pub fn validate(&self) -> ReconResult<()> {
        DefaultConfigValidator.validate_config(self)
    }

    /// Load and validate a configuration from a TOML document
    pub fn from_toml_str(source: &str) -> ReconResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Pick the matching parameters out of a flat JSON mapping.
    ///
    /// Keys that are absent keep their defaults; other keys are ignored.
    /// A present key with the wrong type is an error for the caller to
    /// surface.
    pub fn from_json_value(value: &serde_json::Value) -> ReconResult<Self> {
        let Some(fields) = value.as_object() else {
            return Ok(Self::default());
        };

        let picked: serde_json::Map<String, serde_json::Value> = fields
            .iter()
            .filter(|(key, value)| Self::KEYS.contains(&key.as_str()) && !value.is_null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let config: Self = serde_json::from_value(serde_json::Value::Object(picked))?;
        config.validate()?;
        Ok(config)
    }
}
