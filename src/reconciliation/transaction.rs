//! Transaction records as they arrive from a bank statement or the books

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::{lenient_amount, lenient_text, parse_date};

/// One bank-side or book-side transaction.
///
/// Fields are defaulted once at ingestion: a missing or non-numeric amount
/// is zero, missing text is empty, and the date is parsed up front so
/// scoring never has to look at the raw value again except as a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRecord")]
pub struct TransactionRecord {
    /// Signed amount; debits and credits may use opposite signs per source
    pub amount: BigDecimal,
    /// Date exactly as supplied
    pub date: String,
    /// Date parsed from `date`, if it matched a known layout
    #[serde(skip_serializing)]
    pub parsed_date: Option<NaiveDate>,
    /// Cheque number, UTR or any other free-text identifier
    pub reference: String,
    pub description: String,
    pub narration: String,
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(default, deserialize_with = "lenient_amount")]
    amount: BigDecimal,
    #[serde(default, deserialize_with = "lenient_text")]
    date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    reference: String,
    #[serde(default, deserialize_with = "lenient_text")]
    description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    narration: String,
}

impl From<RawRecord> for TransactionRecord {
    fn from(raw: RawRecord) -> Self {
        Self {
            parsed_date: parse_date(&raw.date),
            amount: raw.amount,
            date: raw.date,
            reference: raw.reference,
            description: raw.description,
            narration: raw.narration,
        }
    }
}

impl Default for TransactionRecord {
    fn default() -> Self {
        Self::new(BigDecimal::from(0), "")
    }
}

impl TransactionRecord {
    /// Create a record with an amount and a date in any accepted layout
    pub fn new(amount: BigDecimal, date: impl Into<String>) -> Self {
        let date = date.into();
        Self {
            parsed_date: parse_date(&date),
            amount,
            date,
            reference: String::new(),
            description: String::new(),
            narration: String::new(),
        }
    }

    /// Set the reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the narration
    pub fn with_narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = narration.into();
        self
    }

    /// Build a record from a JSON value, degrading anything that is not an
    /// object to an empty zero-amount record
    pub fn from_json(value: &serde_json::Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Build records from a JSON value expected to be a list; anything else
    /// yields no records
    pub fn list_from_json(value: Option<&serde_json::Value>) -> Vec<Self> {
        value
            .and_then(serde_json::Value::as_array)
            .map(|items| items.iter().map(Self::from_json).collect())
            .unwrap_or_default()
    }

    /// Description and narration joined, lower-cased and trimmed
    pub fn combined_description(&self) -> String {
        format!("{} {}", self.description, self.narration)
            .to_lowercase()
            .trim()
            .to_string()
    }
}
