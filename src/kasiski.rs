//! Kasiski examination of a ciphertext
//!
//! Repeated substrings of a repeating-key cipher tend to sit a multiple of the
//! key length apart. Distances between consecutive repeats are collected, their
//! divisors in the plausible key-length range are tallied, and each tally is
//! weighted towards longer lengths. Decoys break repeats, so the result is a
//! diagnostic and never feeds the detector.

use crate::alphabet::Symbol;
use std::collections::{BTreeMap, BTreeSet};

/// Shortest repeated substring considered
pub const MIN_SUBSTRING: usize = 3;
/// Longest repeated substring considered, also the longest key length scored
pub const MAX_SUBSTRING: usize = 24;

/// Scored key-length guess
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct KeyLengthScore {
    pub length: usize,
    pub score: f64,
}

/// Start offsets of non-overlapping occurrences of `needle`
fn occurrences(haystack: &[Symbol], needle: &[Symbol]) -> Vec<usize> {
    let mut found = Vec::new();
    let mut pos = 0;
    while pos + needle.len() <= haystack.len() {
        if &haystack[pos..pos + needle.len()] == needle {
            found.push(pos);
            pos += needle.len();
        } else {
            pos += 1;
        }
    }
    found
}

/// Distances between consecutive occurrences of every repeated substring
pub fn repeat_distances(ciphertext: &[Symbol]) -> BTreeSet<usize> {
    let mut seen: BTreeSet<&[Symbol]> = BTreeSet::new();
    let mut distances = BTreeSet::new();

    for len in MIN_SUBSTRING..=MAX_SUBSTRING {
        for substring in ciphertext.windows(len) {
            if !seen.insert(substring) {
                continue;
            }
            let found = occurrences(ciphertext, substring);
            distances.extend(found.windows(2).map(|pair| pair[1] - pair[0]));
        }
    }
    distances
}

/// Proper divisors of `n` within `[MIN_SUBSTRING, MAX_SUBSTRING]`
///
/// The distance itself is not a divisor here.
fn key_length_divisors(n: usize) -> impl Iterator<Item = usize> {
    (MIN_SUBSTRING..=MAX_SUBSTRING.min(n.saturating_sub(1))).filter(move |d| n % d == 0)
}

/// All scored key lengths, best first
///
/// A length divides `count` repeat distances and scores
/// `count * (1 + ln(length - 2))`. Equal scores keep ascending length order.
pub fn score_key_lengths(ciphertext: &[Symbol]) -> Vec<KeyLengthScore> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for distance in repeat_distances(ciphertext) {
        for length in key_length_divisors(distance) {
            *counts.entry(length).or_default() += 1;
        }
    }

    let mut scores: Vec<KeyLengthScore> = counts
        .into_iter()
        .map(|(length, count)| KeyLengthScore {
            length,
            score: count as f64 * (1.0 + ((length - 2) as f64).ln()),
        })
        .collect();
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));

    tracing::debug!(?scores, "kasiski key-length scores");
    scores
}

/// The `n` best-scored key lengths
///
/// # Example
/// ```
/// use cribador::kasiski::likely_key_lengths;
///
/// let periodic: Vec<u8> = (0..6).cycle().take(60).collect();
/// assert_eq!(likely_key_lengths(&periodic, 3)[0].length, 6);
/// ```
pub fn likely_key_lengths(ciphertext: &[Symbol], n: usize) -> Vec<KeyLengthScore> {
    score_key_lengths(ciphertext).into_iter().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus;
    use crate::generator::CipherGenerator;

    #[test]
    fn test_occurrences_do_not_overlap() {
        assert_eq!(occurrences(&[1, 1, 1, 1, 1], &[1, 1]), vec![0, 2]);
        assert_eq!(occurrences(&[1, 2, 3], &[4]), Vec::<usize>::new());
        assert!(occurrences(&[1], &[1, 1]).is_empty());
    }

    #[test]
    fn test_repeat_distances_of_periodic_stream() {
        let periodic: Vec<Symbol> = (0..6).cycle().take(60).collect();
        let distances: Vec<usize> = repeat_distances(&periodic).into_iter().collect();
        assert_eq!(distances, vec![6, 12, 18, 24]);
    }

    #[test]
    fn test_periodic_stream_ranking() {
        // distances 6, 12, 18, 24 count 3 four times, 6 three times, 4 twice
        let periodic: Vec<Symbol> = (0..6).cycle().take(60).collect();
        let lengths: Vec<usize> = likely_key_lengths(&periodic, 3)
            .iter()
            .map(|s| s.length)
            .collect();
        assert_eq!(lengths, vec![6, 3, 4]);
    }

    #[test]
    fn test_scores_sorted_descending() {
        let cipher = CipherGenerator::new(vec![4, 19, 2, 8, 11], 0.0)
            .unwrap()
            .encrypt_with_decoys(&corpus::encoded()[1], &[])
            .ciphertext;
        let scores = score_key_lengths(&cipher);
        assert!(!scores.is_empty());
        assert!(scores.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(scores
            .iter()
            .all(|s| (MIN_SUBSTRING..=MAX_SUBSTRING).contains(&s.length)));
    }

    #[test]
    fn test_short_input_has_no_guess() {
        assert!(likely_key_lengths(&[1, 2], 3).is_empty());
        assert!(likely_key_lengths(&[1, 2, 3, 4, 5], 3).is_empty());
    }

    #[test]
    fn test_divisors_in_range() {
        let divisors: Vec<usize> = key_length_divisors(24).collect();
        assert_eq!(divisors, vec![3, 4, 6, 8, 12]);
        assert_eq!(key_length_divisors(2).count(), 0);
        assert_eq!(key_length_divisors(5).count(), 0);
        assert_eq!(key_length_divisors(48).last(), Some(24));
    }
}
