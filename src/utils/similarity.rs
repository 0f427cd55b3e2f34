//! Description similarity helpers

use std::collections::{BTreeSet, HashMap};

use crate::traits::TextSimilarity;

/// Gestalt pattern matching ratio (Ratcliff/Obershelp).
///
/// Finds the longest common block, recurses on both sides of it, and
/// reports `2 * matched / (len(a) + len(b))`. Lower-cases both inputs
/// before comparing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceRatio;

impl TextSimilarity for SequenceRatio {
    fn similarity(&self, left: &str, right: &str) -> f64 {
        sequence_ratio(left, right)
    }
}

/// Similarity ratio in `[0.0, 1.0]`; `0.0` when either side is empty
pub fn sequence_ratio(left: &str, right: &str) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let a: Vec<char> = left.to_lowercase().chars().collect();
    let b: Vec<char> = right.to_lowercase().chars().collect();

    let matched = matching_characters(&a, &b);
    (2 * matched) as f64 / (a.len() + b.len()) as f64
}

/// Total size of all matching blocks between `a` and `b`
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b_index.entry(*c).or_default().push(j);
    }

    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &b_index, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        total += size;
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    total
}

/// Longest block `a[i..i+size] == b[j..j+size]` inside the given windows.
///
/// Ties resolve to the earliest start in `a`, then the earliest in `b`.
fn longest_match(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    // run length of the match ending at b[j], for the previous row of a
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next_runs: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b_index.get(c) {
            for &j in positions {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }
                let run = if j > 0 {
                    run_lengths.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                next_runs.insert(j, run);
                if run > best_size {
                    best_i = i + 1 - run;
                    best_j = j + 1 - run;
                    best_size = run;
                }
            }
        }
        run_lengths = next_runs;
    }

    (best_i, best_j, best_size)
}

/// Words of four or more word characters, lower-cased
pub fn meaningful_words(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() >= 4)
        .map(str::to_string)
        .collect()
}

/// Whether two descriptions share at least two meaningful words
pub fn has_partial_match(left: &str, right: &str) -> bool {
    let left_words = meaningful_words(left);
    let right_words = meaningful_words(right);

    left_words.intersection(&right_words).take(2).count() >= 2
}
