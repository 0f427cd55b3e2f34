//! Flat request mapping handed over by the dispatch layer

use serde::Serialize;

use crate::reconciliation::{MatchConfig, TransactionRecord};
use crate::types::*;

const BANK_KEYS: [&str; 2] = ["bank_statement", "bank_entries"];
const BOOK_KEYS: [&str; 3] = ["books_entries", "book_entries", "ledger_entries"];

/// Bank and book lists plus matching parameters for one run
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReconciliationRequest {
    pub bank_statement: Vec<TransactionRecord>,
    pub books_entries: Vec<TransactionRecord>,
    pub config: MatchConfig,
    /// Advisory flags raised before this run, carried into the outcome
    pub flags: Vec<String>,
}

impl ReconciliationRequest {
    pub fn new(bank_statement: Vec<TransactionRecord>, books_entries: Vec<TransactionRecord>) -> Self {
        Self {
            bank_statement,
            books_entries,
            config: MatchConfig::default(),
            flags: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse a request mapping.
    ///
    /// Missing or non-list entry collections degrade to empty lists and
    /// non-object entries to empty records. Only a malformed matching
    /// parameter is reported as an error.
    pub fn from_json(value: &serde_json::Value) -> ReconResult<Self> {
        if !value.is_object() && !value.is_null() {
            return Err(ReconError::InvalidInput(
                "reconciliation request must be a mapping".to_string(),
            ));
        }

        let flags = value
            .get("flags")
            .and_then(serde_json::Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bank_statement: TransactionRecord::list_from_json(first_list(value, &BANK_KEYS)),
            books_entries: TransactionRecord::list_from_json(first_list(value, &BOOK_KEYS)),
            config: MatchConfig::from_json_value(value)?,
            flags,
        })
    }
}

/// First key holding a non-empty list, else the first key present at all
fn first_list<'a>(value: &'a serde_json::Value, keys: &[&str]) -> Option<&'a serde_json::Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|candidate| candidate.as_array().is_some_and(|items| !items.is_empty()))
        .or_else(|| keys.iter().find_map(|key| value.get(*key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use serde_json::json;

    #[test]
    fn test_request_from_json() {
        let request = ReconciliationRequest::from_json(&json!({
            "bank_statement": [{"amount": 500, "date": "2024-01-10"}],
            "books_entries": [{"amount": 500}, {"amount": 75}],
            "date_tolerance_days": 3,
            "flags": ["Imported from statement.csv", 7]
        }))
        .unwrap();

        assert_eq!(request.bank_statement.len(), 1);
        assert_eq!(request.books_entries.len(), 2);
        assert_eq!(request.config.date_tolerance_days, 3);
        assert_eq!(request.flags, vec!["Imported from statement.csv".to_string()]);
    }

    #[test]
    fn test_request_key_aliases() {
        let request = ReconciliationRequest::from_json(&json!({
            "bank_statement": [],
            "bank_entries": [{"amount": 1}],
            "ledger_entries": [{"amount": 2}]
        }))
        .unwrap();

        assert_eq!(request.bank_statement[0].amount, BigDecimal::from(1));
        assert_eq!(request.books_entries[0].amount, BigDecimal::from(2));
    }

    #[test]
    fn test_request_shape_defects_degrade() {
        let request = ReconciliationRequest::from_json(&json!({
            "bank_statement": "oops",
            "books_entries": {"amount": 5},
            "flags": "not a list"
        }))
        .unwrap();

        assert!(request.bank_statement.is_empty());
        assert!(request.books_entries.is_empty());
        assert!(request.flags.is_empty());

        let request = ReconciliationRequest::from_json(&serde_json::Value::Null).unwrap();
        assert_eq!(request, ReconciliationRequest::default());
    }

    #[test]
    fn test_request_bad_config_is_error() {
        let result = ReconciliationRequest::from_json(&json!({
            "bank_statement": [],
            "amount_tolerance": "loose"
        }));
        assert!(result.is_err());

        assert!(matches!(
            ReconciliationRequest::from_json(&json!([1, 2, 3])),
            Err(ReconError::InvalidInput(_))
        ));
    }
}
