//! Validation utilities

use bigdecimal::BigDecimal;

use crate::types::*;

/// Validate that an amount tolerance is not negative
pub fn validate_amount_tolerance(tolerance: &BigDecimal) -> ReconResult<()> {
    if *tolerance < BigDecimal::from(0) {
        Err(ReconError::InvalidConfig(format!(
            "amount_tolerance cannot be negative: {}",
            tolerance
        )))
    } else {
        Ok(())
    }
}

/// Validate that a date tolerance is not negative
pub fn validate_date_tolerance(days: i64) -> ReconResult<()> {
    if days < 0 {
        return Err(ReconError::InvalidConfig(format!(
            "date_tolerance_days cannot be negative: {}",
            days
        )));
    }

    Ok(())
}

/// Validate that a fuzzy threshold is a ratio between 0 and 1
pub fn validate_fuzzy_threshold(threshold: f64) -> ReconResult<()> {
    if !threshold.is_finite() {
        return Err(ReconError::InvalidConfig(
            "fuzzy_threshold must be a finite number".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&threshold) {
        return Err(ReconError::InvalidConfig(format!(
            "fuzzy_threshold must be between 0 and 1: {}",
            threshold
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_amount_tolerance() {
        assert!(validate_amount_tolerance(&BigDecimal::from(0)).is_ok());
        assert!(validate_amount_tolerance(&BigDecimal::from_str("0.01").unwrap()).is_ok());
        assert!(validate_amount_tolerance(&BigDecimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn test_date_tolerance() {
        assert!(validate_date_tolerance(0).is_ok());
        assert!(validate_date_tolerance(30).is_ok());
        assert!(matches!(
            validate_date_tolerance(-1),
            Err(ReconError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_fuzzy_threshold() {
        assert!(validate_fuzzy_threshold(0.0).is_ok());
        assert!(validate_fuzzy_threshold(0.6).is_ok());
        assert!(validate_fuzzy_threshold(1.0).is_ok());
        assert!(validate_fuzzy_threshold(1.5).is_err());
        assert!(validate_fuzzy_threshold(-0.1).is_err());
        assert!(validate_fuzzy_threshold(f64::NAN).is_err());
    }
}
