//! Shannon entropy of symbol streams
//!
//! Natural logarithm throughout: every detector threshold is calibrated in nats.

use crate::alphabet::Symbol;
use crate::kernel::{self, Histogram};

/// Entropy of a histogram, skipping zero-count symbols
///
/// Terms are summed in ascending count order, so histograms that are
/// permutations of each other score bit-identically and entropy deltas between
/// them are exactly zero.
pub fn entropy_of_counts(counts: &Histogram) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let mut sorted = *counts;
    sorted.sort_unstable();

    let total = total as f64;
    -sorted
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            p * p.ln()
        })
        .sum::<f64>()
}

/// Shannon entropy (nats) of the symbol distribution of `stream`
///
/// A constant stream scores 0, a stream uniform over `k` symbols scores `ln(k)`,
/// and an empty stream scores 0.
///
/// # Example
/// ```
/// use cribador::entropy::entropy;
///
/// assert_eq!(entropy(&[4, 4, 4]), 0.0);
/// assert!((entropy(&[1, 2, 3, 4]) - 4.0_f64.ln()).abs() < 1e-12);
/// ```
pub fn entropy(stream: &[Symbol]) -> f64 {
    entropy_of_counts(&kernel::bincount(stream))
}

/// Running entropy as a difference stream grows
///
/// The first value covers the first `start` symbols; each following value adds
/// one more symbol. Streams shorter than `start` yield a single value.
pub fn entropy_trend(stream: &[Symbol], start: usize) -> Vec<f64> {
    let start = start.min(stream.len());
    let mut counts = kernel::bincount(&stream[..start]);

    let mut trend = Vec::with_capacity(stream.len() - start + 1);
    trend.push(entropy_of_counts(&counts));
    for &s in &stream[start..] {
        counts[s as usize % counts.len()] += 1;
        trend.push(entropy_of_counts(&counts));
    }
    trend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_stream_zero() {
        assert_eq!(entropy(&[7; 30]), 0.0);
    }

    #[test]
    fn test_empty_stream_zero() {
        assert_eq!(entropy(&[]), 0.0);
    }

    #[test]
    fn test_uniform_stream_ln_k() {
        for k in 1..=27u8 {
            let stream: Vec<Symbol> = (0..k).cycle().take(k as usize * 3).collect();
            assert!((entropy(&stream) - (k as f64).ln()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_entropy_non_negative() {
        assert!(entropy(&[0, 0, 0, 1]) > 0.0);
    }

    #[test]
    fn test_entropy_uses_natural_log() {
        // Two equiprobable symbols: ln 2, not 1 bit
        assert!((entropy(&[3, 9]) - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn test_permuted_histograms_score_identically() {
        let a = entropy(&[1, 1, 1, 2, 2, 3, 4, 4, 4, 4]);
        let b = entropy(&[9, 9, 9, 9, 0, 0, 0, 26, 5, 5]);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_trend_length_and_endpoints() {
        let stream = [1, 1, 2, 3, 4, 5];
        let trend = entropy_trend(&stream, 2);
        assert_eq!(trend.len(), 5);
        assert_eq!(trend[0], 0.0);
        assert!((trend[4] - entropy(&stream)).abs() < 1e-12);
    }

    #[test]
    fn test_trend_short_stream() {
        assert_eq!(entropy_trend(&[1, 2], 8).len(), 1);
    }
}
