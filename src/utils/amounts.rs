//! Lenient coercion of loosely typed record fields

use bigdecimal::BigDecimal;
use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Any scalar a record field may arrive as
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    Other(IgnoredAny),
}

/// Parse an amount from text, falling back to zero
pub fn coerce_amount(text: &str) -> BigDecimal {
    BigDecimal::from_str(text.trim()).unwrap_or_else(|_| BigDecimal::from(0))
}

/// Deserialize an amount from a number or numeric string; anything else is zero
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Loose::deserialize(deserializer)? {
        Loose::Text(text) => coerce_amount(&text),
        Loose::Integer(value) => BigDecimal::from(value),
        Loose::Float(value) if value.is_finite() => coerce_amount(&value.to_string()),
        Loose::Float(_) | Loose::Flag(_) | Loose::Other(_) => BigDecimal::from(0),
    };
    Ok(amount)
}

/// Deserialize a decimal parameter from a number or numeric string.
///
/// Floats go through their shortest decimal form, so `0.3` reads as `0.3`
/// exactly, the same way record amounts do. Other shapes are an error.
pub fn decimal_param<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    match Loose::deserialize(deserializer)? {
        Loose::Text(text) => BigDecimal::from_str(text.trim())
            .map_err(|_| de::Error::custom(format!("invalid decimal: {text:?}"))),
        Loose::Integer(value) => Ok(BigDecimal::from(value)),
        Loose::Float(value) if value.is_finite() => BigDecimal::from_str(&value.to_string())
            .map_err(|_| de::Error::custom(format!("invalid decimal: {value}"))),
        Loose::Float(value) => Err(de::Error::custom(format!("non-finite decimal: {value}"))),
        Loose::Flag(_) | Loose::Other(_) => Err(de::Error::custom("expected a number")),
    }
}

/// Deserialize a text field from a string or number; anything else is empty
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Loose::deserialize(deserializer)? {
        Loose::Text(text) => text,
        Loose::Integer(value) => value.to_string(),
        Loose::Float(value) => value.to_string(),
        Loose::Flag(value) => value.to_string(),
        Loose::Other(_) => String::new(),
    };
    Ok(text)
}
