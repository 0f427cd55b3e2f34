//! Analysis of entries left unmatched after a reconciliation run

use bigdecimal::{BigDecimal, Signed};
use serde::Serialize;

use crate::reconciliation::{ReconciliationOutcome, TransactionRecord};

/// Gap above which a reconciliation is flagged for investigation
pub const MATERIALITY_THRESHOLD: i64 = 1000;

pub const UNMATCHED_BANK_RECOMMENDATION: &str =
    "Review unmatched bank entries - may require manual matching or represent new transactions";
pub const UNMATCHED_BOOKS_RECOMMENDATION: &str =
    "Review unmatched books entries - may represent pending transactions or errors";
pub const SIGNIFICANT_GAP_RECOMMENDATION: &str =
    "Significant reconciliation gap detected - investigate potential missing entries or errors";

/// Totals for one side's unmatched entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedAnalysis {
    pub count: usize,
    /// Signed sum of all amounts
    pub total_amount: BigDecimal,
    pub positive_amount: BigDecimal,
    /// Sum of the negative amounts (itself negative or zero)
    pub negative_amount: BigDecimal,
    /// Arithmetic mean amount; zero for an empty side
    pub average_amount: BigDecimal,
    pub entries: Vec<TransactionRecord>,
}

impl UnmatchedAnalysis {
    /// Summarise a list of unmatched entries
    pub fn from_entries(entries: &[TransactionRecord]) -> Self {
        let zero = BigDecimal::from(0);

        let total_amount: BigDecimal = entries.iter().map(|e| &e.amount).sum();
        let positive_amount: BigDecimal = entries
            .iter()
            .map(|e| &e.amount)
            .filter(|amount| amount.is_positive())
            .sum();
        let negative_amount: BigDecimal = entries
            .iter()
            .map(|e| &e.amount)
            .filter(|amount| amount.is_negative())
            .sum();

        let average_amount = if entries.is_empty() {
            zero
        } else {
            &total_amount / BigDecimal::from(entries.len() as u64)
        };

        Self {
            count: entries.len(),
            total_amount,
            positive_amount,
            negative_amount,
            average_amount,
            entries: entries.to_vec(),
        }
    }
}

/// Cross-side figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapSummary {
    pub unmatched_bank_count: usize,
    pub unmatched_books_count: usize,
    pub unmatched_bank_total: BigDecimal,
    pub unmatched_books_total: BigDecimal,
    /// Unmatched bank total minus unmatched books total
    pub net_difference: BigDecimal,
    /// Absolute value of `net_difference`
    pub reconciliation_gap: BigDecimal,
    pub requires_review: bool,
}

/// Result of analysing what a reconciliation run left open
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapReport {
    pub unmatched_bank_analysis: UnmatchedAnalysis,
    pub unmatched_books_analysis: UnmatchedAnalysis,
    pub summary: GapSummary,
    /// Advisory text for a reviewer
    pub recommendations: Vec<String>,
}

impl GapReport {
    /// Whether the gap crossed the materiality threshold
    pub fn has_significant_gap(&self) -> bool {
        self.recommendations
            .iter()
            .any(|r| r == SIGNIFICANT_GAP_RECOMMENDATION)
    }
}

/// Analyzer for unmatched bank and book entries
#[derive(Debug, Clone)]
pub struct GapAnalyzer {
    materiality_threshold: BigDecimal,
}

impl Default for GapAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl GapAnalyzer {
    /// Create an analyzer with the standard materiality threshold
    pub fn new() -> Self {
        Self {
            materiality_threshold: BigDecimal::from(MATERIALITY_THRESHOLD),
        }
    }

    /// Create an analyzer with a custom materiality threshold
    pub fn with_materiality_threshold(threshold: BigDecimal) -> Self {
        Self {
            materiality_threshold: threshold,
        }
    }

    pub fn materiality_threshold(&self) -> &BigDecimal {
        &self.materiality_threshold
    }

    /// Analyze the unmatched sets of a matcher outcome
    pub fn analyze(&self, outcome: &ReconciliationOutcome) -> GapReport {
        self.analyze_unmatched(&outcome.unmatched_bank, &outcome.unmatched_books)
    }

    /// Analyze raw unmatched lists
    #[tracing::instrument(
        skip_all,
        fields(unmatched_bank = unmatched_bank.len(), unmatched_books = unmatched_books.len())
    )]
    pub fn analyze_unmatched(
        &self,
        unmatched_bank: &[TransactionRecord],
        unmatched_books: &[TransactionRecord],
    ) -> GapReport {
        let bank = UnmatchedAnalysis::from_entries(unmatched_bank);
        let books = UnmatchedAnalysis::from_entries(unmatched_books);

        let net_difference = &bank.total_amount - &books.total_amount;
        let reconciliation_gap = net_difference.abs();

        let mut recommendations = Vec::new();
        if bank.count > 0 {
            recommendations.push(UNMATCHED_BANK_RECOMMENDATION.to_string());
        }
        if books.count > 0 {
            recommendations.push(UNMATCHED_BOOKS_RECOMMENDATION.to_string());
        }
        if reconciliation_gap > self.materiality_threshold {
            recommendations.push(SIGNIFICANT_GAP_RECOMMENDATION.to_string());
        }

        let summary = GapSummary {
            unmatched_bank_count: bank.count,
            unmatched_books_count: books.count,
            unmatched_bank_total: bank.total_amount.clone(),
            unmatched_books_total: books.total_amount.clone(),
            requires_review: bank.count > 0 || books.count > 0,
            net_difference,
            reconciliation_gap,
        };

        tracing::info!(
            unmatched_bank_total = %summary.unmatched_bank_total,
            unmatched_books_total = %summary.unmatched_books_total,
            reconciliation_gap = %summary.reconciliation_gap,
            requires_review = summary.requires_review,
            "Unmatched entries analyzed"
        );

        GapReport {
            unmatched_bank_analysis: bank,
            unmatched_books_analysis: books,
            summary,
            recommendations,
        }
    }

    /// Analyze a loosely shaped mapping.
    ///
    /// Accepts `{unmatched_bank, unmatched_books}` directly or nested under
    /// `micro`, as a serialized outcome would be when wrapped upstream.
    /// Missing or malformed lists count as empty.
    pub fn analyze_json(&self, value: &serde_json::Value) -> GapReport {
        let source = value.get("micro").filter(|micro| micro.is_object()).unwrap_or(value);

        let unmatched_bank = TransactionRecord::list_from_json(source.get("unmatched_bank"));
        let unmatched_books = TransactionRecord::list_from_json(source.get("unmatched_books"));

        self.analyze_unmatched(&unmatched_bank, &unmatched_books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn entry(amount: &str) -> TransactionRecord {
        TransactionRecord::new(BigDecimal::from_str(amount).unwrap(), "2024-01-10")
    }

    #[test]
    fn test_side_analysis() {
        let analysis =
            UnmatchedAnalysis::from_entries(&[entry("1200"), entry("-300"), entry("100.50")]);

        assert_eq!(analysis.count, 3);
        assert_eq!(analysis.total_amount, BigDecimal::from_str("1000.50").unwrap());
        assert_eq!(analysis.positive_amount, BigDecimal::from_str("1300.50").unwrap());
        assert_eq!(analysis.negative_amount, BigDecimal::from(-300));
        assert_eq!(analysis.average_amount, BigDecimal::from_str("333.50").unwrap());
    }

    #[test]
    fn test_average_is_not_rounded() {
        let analysis = UnmatchedAnalysis::from_entries(&[entry("10.01"), entry("10.02")]);
        assert_eq!(analysis.average_amount, BigDecimal::from_str("10.015").unwrap());
    }

    #[test]
    fn test_empty_side_analysis() {
        let analysis = UnmatchedAnalysis::from_entries(&[]);
        assert_eq!(analysis.count, 0);
        assert_eq!(analysis.total_amount, BigDecimal::from(0));
        assert_eq!(analysis.average_amount, BigDecimal::from(0));
    }

    #[test]
    fn test_gap_and_recommendations() {
        let analyzer = GapAnalyzer::new();
        let report = analyzer.analyze_unmatched(&[entry("5000")], &[entry("200")]);

        assert_eq!(report.summary.net_difference, BigDecimal::from(4800));
        assert_eq!(report.summary.reconciliation_gap, BigDecimal::from(4800));
        assert!(report.summary.requires_review);
        assert_eq!(report.recommendations.len(), 3);
        assert!(report.has_significant_gap());
    }

    #[test]
    fn test_gap_at_threshold_not_significant() {
        let analyzer = GapAnalyzer::new();
        let report = analyzer.analyze_unmatched(&[], &[entry("-1000")]);

        assert_eq!(report.summary.net_difference, BigDecimal::from(1000));
        assert_eq!(
            report.recommendations,
            vec![UNMATCHED_BOOKS_RECOMMENDATION.to_string()]
        );
    }

    #[test]
    fn test_nothing_unmatched() {
        let report = GapAnalyzer::default().analyze_unmatched(&[], &[]);
        assert!(!report.summary.requires_review);
        assert!(report.recommendations.is_empty());
        assert_eq!(report.summary.reconciliation_gap, BigDecimal::from(0));
    }

    #[test]
    fn test_custom_threshold() {
        let analyzer = GapAnalyzer::with_materiality_threshold(BigDecimal::from(100));
        let report = analyzer.analyze_unmatched(&[entry("150")], &[]);
        assert!(report.has_significant_gap());
    }

    #[test]
    fn test_analyze_json_shapes() {
        let analyzer = GapAnalyzer::new();

        let flat = analyzer.analyze_json(&json!({
            "unmatched_bank": [{"amount": 5000}],
            "unmatched_books": [{"amount": "200"}]
        }));
        let nested = analyzer.analyze_json(&json!({
            "micro": {
                "unmatched_bank": [{"amount": 5000}],
                "unmatched_books": [{"amount": 200}]
            }
        }));

        assert_eq!(flat.summary, nested.summary);
        assert_eq!(flat.summary.reconciliation_gap, BigDecimal::from(4800));

        let malformed = analyzer.analyze_json(&json!({"unmatched_bank": 12}));
        assert_eq!(malformed.summary.unmatched_bank_count, 0);
        assert!(malformed.recommendations.is_empty());
    }
}
