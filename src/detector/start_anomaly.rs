// Start-of-stream entropy anomaly
//
// With the correct plaintext and no decoys in the prefix, the difference stream
// collapses to the repeating key, so its entropy sits well below the four
// wrong candidates. A wide spread of candidate scores flags that outlier.

use crate::alphabet::Symbol;
use crate::detector::config::StartAnomalyConfig;
use crate::entropy::entropy;
use crate::kernel::{self, Summary};
use crate::stream::diff;

/// Candidate scores at the stream start
#[derive(Debug, Clone, PartialEq)]
pub struct StartScores {
    /// Entropy of the prefix difference per candidate, in corpus order
    pub entropies: Vec<f64>,
    /// Mean and population std-dev of `entropies`
    pub summary: Summary,
}

impl StartScores {
    /// Index of the lowest-entropy candidate (first on ties)
    pub fn minimum(&self) -> Option<usize> {
        kernel::argmin(&self.entropies)
    }
}

/// Score every candidate plaintext on the first `prefix_len` symbols
pub fn score_start(
    ciphertext: &[Symbol],
    candidates: &[Vec<Symbol>],
    prefix_len: usize,
) -> StartScores {
    let cipher_prefix = &ciphertext[..prefix_len.min(ciphertext.len())];

    let entropies: Vec<f64> = candidates
        .iter()
        .map(|plain| {
            let plain_prefix = &plain[..prefix_len.min(plain.len())];
            entropy(&diff(cipher_prefix, plain_prefix))
        })
        .collect();
    let summary = kernel::summarize(&entropies);

    StartScores { entropies, summary }
}

/// Detect a low-entropy outlier among the candidates
///
/// Returns the matching candidate index when the score spread exceeds the
/// threshold, or unconditionally the minimum when `pick_min` is set.
pub fn detect_start_anomaly(
    ciphertext: &[Symbol],
    candidates: &[Vec<Symbol>],
    config: &StartAnomalyConfig,
    pick_min: bool,
) -> Option<usize> {
    let scores = score_start(ciphertext, candidates, config.prefix_len);

    tracing::debug!(
        prefix_len = config.prefix_len,
        stddev = scores.summary.stddev,
        entropies = ?scores.entropies,
        "start anomaly scores"
    );

    if pick_min || scores.summary.stddev > config.std_threshold {
        return scores.minimum();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus;

    fn keyed(plain: &[Symbol], key: &[Symbol]) -> Vec<Symbol> {
        plain
            .iter()
            .enumerate()
            .map(|(i, &p)| (p + key[i % key.len()]) % 27)
            .collect()
    }

    #[test]
    fn test_constant_key_selects_source() {
        let candidates = corpus::encoded();
        for (i, plain) in candidates.iter().enumerate() {
            let cipher = keyed(plain, &[11]);
            let found =
                detect_start_anomaly(&cipher, candidates, &StartAnomalyConfig::default(), false);
            assert_eq!(found, Some(i));
        }
    }

    #[test]
    fn test_true_candidate_scores_zero_with_constant_key() {
        let candidates = corpus::encoded();
        let cipher = keyed(&candidates[3], &[4]);
        let scores = score_start(&cipher, candidates, 30);
        assert_eq!(scores.entropies[3], 0.0);
        assert_eq!(scores.minimum(), Some(3));
    }

    #[test]
    fn test_identical_candidates_no_anomaly() {
        let plain: Vec<Symbol> = (0..40).map(|i| (i * 7 % 27) as Symbol).collect();
        let candidates = vec![plain.clone(); 5];
        let cipher: Vec<Symbol> = (0..40).map(|i| (i * 5 % 27) as Symbol).collect();
        let found =
            detect_start_anomaly(&cipher, &candidates, &StartAnomalyConfig::default(), false);
        assert_eq!(found, None);
    }

    #[test]
    fn test_pick_min_always_answers() {
        let plain: Vec<Symbol> = (0..40).map(|i| (i * 7 % 27) as Symbol).collect();
        let candidates = vec![plain; 5];
        let cipher: Vec<Symbol> = (0..40).map(|i| (i * 5 % 27) as Symbol).collect();
        let found =
            detect_start_anomaly(&cipher, &candidates, &StartAnomalyConfig::default(), true);
        assert_eq!(found, Some(0));
    }

    #[test]
    fn test_short_ciphertext_truncates() {
        let candidates = corpus::encoded();
        let cipher = keyed(&candidates[1][..10], &[2]);
        let scores = score_start(&cipher, candidates, 30);
        assert_eq!(scores.entropies.len(), 5);
        assert_eq!(scores.entropies[1], 0.0);
    }
}
