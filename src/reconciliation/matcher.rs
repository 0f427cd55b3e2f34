//! Greedy best-match pairing of bank statement entries against book entries

use bigdecimal::{BigDecimal, Signed, Zero};
use serde::Serialize;
use std::collections::HashSet;

use crate::reconciliation::{MatchConfig, ReconciliationRequest, TransactionRecord};
use crate::traits::{ConfigValidator, DefaultConfigValidator, TextSimilarity};
use crate::types::*;
use crate::utils::{days_apart, has_partial_match, SequenceRatio};

/// Lowest composite score accepted as a match
pub const ACCEPTANCE_THRESHOLD: f64 = 0.5;

// Score weights in thousandths, so fixed contributions add up exactly.
const AMOUNT_EXACT_POINTS: u32 = 400;
const AMOUNT_SIGN_REVERSED_POINTS: u32 = 350;
const DATE_EXACT_POINTS: u32 = 300;
const DATE_WITHIN_TOLERANCE_POINTS: u32 = 200;
const DESCRIPTION_FUZZY_POINTS: f64 = 200.0;
const DESCRIPTION_PARTIAL_POINTS: u32 = 100;
const REFERENCE_POINTS: u32 = 100;
const POINTS_PER_UNIT: f64 = 1000.0;

/// A scored bank × book pairing that passed the amount gate
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate<'a> {
    pub bank_entry: &'a TransactionRecord,
    pub book_entry: &'a TransactionRecord,
    /// Composite score in `[0, 1]`
    pub score: f64,
    /// Signals that contributed, in scoring order
    pub reasons: Vec<MatchReason>,
    /// Absolute difference of the amount check that let the pair through
    pub amount_diff: BigDecimal,
    /// Days between the two dates, when both parsed
    pub date_diff_days: Option<i64>,
}

/// An accepted pairing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Position of the bank entry in the bank list
    pub bank_index: usize,
    /// Position of the book entry in the book list
    pub book_index: usize,
    pub bank_entry: TransactionRecord,
    pub book_entry: TransactionRecord,
    pub match_score: f64,
    pub match_reasons: Vec<MatchReason>,
    pub match_confidence: MatchConfidence,
    pub amount_diff: BigDecimal,
    pub date_diff_days: Option<i64>,
}

impl MatchResult {
    fn from_candidate(bank_index: usize, book_index: usize, candidate: MatchCandidate<'_>) -> Self {
        Self {
            bank_index,
            book_index,
            bank_entry: candidate.bank_entry.clone(),
            book_entry: candidate.book_entry.clone(),
            match_confidence: MatchConfidence::from_score(candidate.score),
            match_score: candidate.score,
            match_reasons: candidate.reasons,
            amount_diff: candidate.amount_diff,
            date_diff_days: candidate.date_diff_days,
        }
    }
}

/// Count of matches per confidence band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ConfidenceDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl ConfidenceDistribution {
    fn from_matches(matched: &[MatchResult]) -> Self {
        matched
            .iter()
            .fold(Self::default(), |mut counts, result| {
                match result.match_confidence {
                    MatchConfidence::High => counts.high += 1,
                    MatchConfidence::Medium => counts.medium += 1,
                    MatchConfidence::Low => counts.low += 1,
                }
                counts
            })
    }
}

/// Everything one matching run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationOutcome {
    pub matched: Vec<MatchResult>,
    pub unmatched_bank: Vec<TransactionRecord>,
    pub unmatched_books: Vec<TransactionRecord>,
    pub total_bank_entries: usize,
    pub total_books_entries: usize,
    pub match_count: usize,
    pub unmatched_bank_count: usize,
    pub unmatched_books_count: usize,
    /// Matched share of bank entries; 0.0 with no bank entries
    pub match_rate: f64,
    pub reconciliation_status: ReconciliationStatus,
    pub confidence_distribution: ConfidenceDistribution,
    /// Parameters the run was made with
    pub matching_parameters: MatchConfig,
    /// Advisory notes about the inputs; never errors
    pub flags: Vec<String>,
}

impl ReconciliationOutcome {
    fn new(
        matched: Vec<MatchResult>,
        unmatched_bank: Vec<TransactionRecord>,
        unmatched_books: Vec<TransactionRecord>,
        config: &MatchConfig,
        flags: Vec<String>,
    ) -> Self {
        let total_bank_entries = matched.len() + unmatched_bank.len();
        let total_books_entries = matched.len() + unmatched_books.len();
        let match_rate = if total_bank_entries == 0 {
            0.0
        } else {
            matched.len() as f64 / total_bank_entries as f64
        };

        Self {
            total_bank_entries,
            total_books_entries,
            match_count: matched.len(),
            unmatched_bank_count: unmatched_bank.len(),
            unmatched_books_count: unmatched_books.len(),
            match_rate,
            reconciliation_status: ReconciliationStatus::from_unmatched(
                unmatched_bank.len(),
                unmatched_books.len(),
            ),
            confidence_distribution: ConfidenceDistribution::from_matches(&matched),
            matching_parameters: config.clone(),
            flags,
            matched,
            unmatched_bank,
            unmatched_books,
        }
    }

    /// Whether every entry on both sides found a partner
    pub fn is_complete(&self) -> bool {
        self.reconciliation_status == ReconciliationStatus::Complete
    }

    /// Render the result mapping
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Bank reconciliation matcher.
///
/// For each bank entry, in input order, every book entry not yet taken is
/// scored and the best one at or above [`ACCEPTANCE_THRESHOLD`] is taken.
/// This is a greedy assignment, not a globally optimal one, so when several
/// book entries could serve one bank entry the input order decides.
///
/// With sign reversal enabled, any pair of opposite signs that offsets within
/// tolerance is scored as a reversal (0.35) rather than an exact amount (0.4),
/// including a positive bank amount against a negative book amount. Such a
/// pair needs more supporting evidence to reach the acceptance threshold.
pub struct BankMatcher {
    config: MatchConfig,
    similarity: Box<dyn TextSimilarity>,
}

impl BankMatcher {
    /// Create a matcher with the default description similarity
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            similarity: Box::new(SequenceRatio),
        }
    }

    /// Create a matcher after checking the configuration
    pub fn try_new(config: MatchConfig) -> ReconResult<Self> {
        if let Err(err) = DefaultConfigValidator.validate_config(&config) {
            tracing::warn!(error = %err, "Rejected matching configuration");
            return Err(err);
        }
        Ok(Self::new(config))
    }

    /// Create a matcher with a custom description similarity
    pub fn with_similarity(config: MatchConfig, similarity: Box<dyn TextSimilarity>) -> Self {
        Self { config, similarity }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Pair bank entries with book entries
    pub fn reconcile(
        &self,
        bank_entries: &[TransactionRecord],
        book_entries: &[TransactionRecord],
    ) -> ReconciliationOutcome {
        self.reconcile_with_flags(bank_entries, book_entries, Vec::new())
    }

    /// Run a parsed request, carrying its flags forward
    pub fn reconcile_request(&self, request: &ReconciliationRequest) -> ReconciliationOutcome {
        self.reconcile_with_flags(
            &request.bank_statement,
            &request.books_entries,
            request.flags.clone(),
        )
    }

    #[tracing::instrument(
        skip_all,
        fields(bank_entries = bank_entries.len(), book_entries = book_entries.len())
    )]
    fn reconcile_with_flags(
        &self,
        bank_entries: &[TransactionRecord],
        book_entries: &[TransactionRecord],
        mut flags: Vec<String>,
    ) -> ReconciliationOutcome {
        flags.extend(input_flags(bank_entries, book_entries));

        let mut used_books: HashSet<usize> = HashSet::new();
        let mut matched = Vec::new();
        let mut unmatched_bank = Vec::new();

        for (bank_index, bank_entry) in bank_entries.iter().enumerate() {
            match self.best_candidate(bank_entry, book_entries, &used_books) {
                Some((book_index, candidate)) => {
                    tracing::debug!(
                        bank_index,
                        book_index,
                        score = candidate.score,
                        reasons = ?candidate.reasons,
                        "Matched bank entry"
                    );
                    used_books.insert(book_index);
                    matched.push(MatchResult::from_candidate(bank_index, book_index, candidate));
                }
                None => unmatched_bank.push(bank_entry.clone()),
            }
        }

        let unmatched_books: Vec<TransactionRecord> = book_entries
            .iter()
            .enumerate()
            .filter(|(index, _)| !used_books.contains(index))
            .map(|(_, entry)| entry.clone())
            .collect();

        let outcome =
            ReconciliationOutcome::new(matched, unmatched_bank, unmatched_books, &self.config, flags);

        tracing::info!(
            match_count = outcome.match_count,
            unmatched_bank_count = outcome.unmatched_bank_count,
            unmatched_books_count = outcome.unmatched_books_count,
            match_rate = outcome.match_rate,
            status = %outcome.reconciliation_status,
            "Bank reconciliation finished"
        );

        outcome
    }

    /// Highest-scoring qualifying book entry for one bank entry.
    ///
    /// Ties keep the earliest book entry.
    pub fn best_candidate<'a>(
        &self,
        bank_entry: &'a TransactionRecord,
        book_entries: &'a [TransactionRecord],
        used_books: &HashSet<usize>,
    ) -> Option<(usize, MatchCandidate<'a>)> {
        let mut best: Option<(usize, MatchCandidate<'a>)> = None;

        for (book_index, book_entry) in book_entries.iter().enumerate() {
            if used_books.contains(&book_index) {
                continue;
            }
            let Some(candidate) = self.score_pair(bank_entry, book_entry) else {
                continue;
            };
            if candidate.score < ACCEPTANCE_THRESHOLD {
                continue;
            }
            let best_score = best.as_ref().map_or(0.0, |(_, current)| current.score);
            if candidate.score > best_score {
                best = Some((book_index, candidate));
            }
        }

        best
    }

    /// Score a single pair; `None` when the amounts are not compatible
    pub fn score_pair<'a>(
        &self,
        bank_entry: &'a TransactionRecord,
        book_entry: &'a TransactionRecord,
    ) -> Option<MatchCandidate<'a>> {
        let mut points: u32 = 0;
        let mut description_points: f64 = 0.0;
        let mut reasons = Vec::new();

        let (amount_reason, amount_diff) = self.amount_check(&bank_entry.amount, &book_entry.amount)?;
        points += match amount_reason {
            MatchReason::AmountSignReversed => AMOUNT_SIGN_REVERSED_POINTS,
            _ => AMOUNT_EXACT_POINTS,
        };
        reasons.push(amount_reason);

        let date_diff_days = match (bank_entry.parsed_date, book_entry.parsed_date) {
            (Some(bank_date), Some(book_date)) => {
                let days = days_apart(bank_date, book_date);
                if days <= self.config.date_tolerance_days {
                    if days == 0 {
                        points += DATE_EXACT_POINTS;
                        reasons.push(MatchReason::DateExact);
                    } else {
                        points += DATE_WITHIN_TOLERANCE_POINTS;
                        reasons.push(MatchReason::DateWithinTolerance(days));
                    }
                }
                Some(days)
            }
            _ => {
                if bank_entry.date == book_entry.date {
                    points += DATE_EXACT_POINTS;
                    reasons.push(MatchReason::DateStringMatch);
                }
                None
            }
        };

        let bank_description = bank_entry.combined_description();
        let book_description = book_entry.combined_description();
        if !bank_description.is_empty() && !book_description.is_empty() {
            let similarity = self
                .similarity
                .similarity(&bank_description, &book_description)
                .clamp(0.0, 1.0);
            if similarity >= self.config.fuzzy_threshold {
                description_points = DESCRIPTION_FUZZY_POINTS * similarity;
                reasons.push(MatchReason::DescriptionFuzzy(similarity));
            } else if self.config.enable_partial_match
                && has_partial_match(&bank_description, &book_description)
            {
                points += DESCRIPTION_PARTIAL_POINTS;
                reasons.push(MatchReason::DescriptionPartial);
            }
        }

        if !bank_entry.reference.is_empty()
            && !book_entry.reference.is_empty()
            && bank_entry.reference.to_lowercase() == book_entry.reference.to_lowercase()
        {
            points += REFERENCE_POINTS;
            reasons.push(MatchReason::ReferenceMatch);
        }

        Some(MatchCandidate {
            bank_entry,
            book_entry,
            score: (points as f64 + description_points) / POINTS_PER_UNIT,
            reasons,
            amount_diff,
            date_diff_days,
        })
    }

    /// Amount gate.
    ///
    /// The bank amount is compared with the magnitude of the book amount.
    /// With sign reversal enabled, a pair of opposite signs whose sum is
    /// within tolerance is reported as reversed rather than exact.
    fn amount_check(&self, bank: &BigDecimal, book: &BigDecimal) -> Option<(MatchReason, BigDecimal)> {
        let tolerance = &self.config.amount_tolerance;
        let direct_diff = (bank - book.abs()).abs();
        let reversed_diff = (bank + book).abs();
        let opposite_signs = !bank.is_zero() && !book.is_zero() && bank.is_positive() != book.is_positive();

        if self.config.enable_sign_reversal && opposite_signs && reversed_diff <= *tolerance {
            Some((MatchReason::AmountSignReversed, reversed_diff))
        } else if direct_diff <= *tolerance {
            Some((MatchReason::AmountExact, direct_diff))
        } else if self.config.enable_sign_reversal && reversed_diff <= *tolerance {
            Some((MatchReason::AmountSignReversed, reversed_diff))
        } else {
            None
        }
    }
}

impl Default for BankMatcher {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

/// Advisory flags for empty inputs
fn input_flags(bank_entries: &[TransactionRecord], book_entries: &[TransactionRecord]) -> Vec<String> {
    let mut flags = Vec::new();

    if bank_entries.is_empty() {
        flags.push("Warning: bank_statement is empty - no entries to match".to_string());
    }
    if book_entries.is_empty() {
        flags.push("Warning: books_entries is empty - no entries to match".to_string());
    }
    if bank_entries.is_empty() && book_entries.is_empty() {
        flags.push("Error: Both bank_statement and books_entries are empty".to_string());
    }

    for flag in &flags {
        tracing::warn!(flag = %flag, "Reconciliation input flagged");
    }

    flags
}
