// Multi-removal combinatorial search
//
// Several decoys in the prefix defeat the single-position scan. Every subset of
// 2..=4 positions is scored by entropy, statistical low-entropy outliers are
// kept, and those are confirmed with the spectral test.
//
// Scoring reuses five shifted difference arrays: between the j-th and (j+1)-th
// removed positions the realigned stream equals the plain difference with j+1
// leading ciphertext symbols dropped, so each subset is spliced in O(N).

use crate::alphabet::Symbol;
use crate::detector::combinations::Combinations;
use crate::detector::config::{MultiRemovalConfig, SpectralConfig};
use crate::detector::spectral::{BinQuota, SpectralTest};
use crate::entropy::entropy;
use crate::kernel::{self, SpectrumAnalyzer};
use crate::stream::{diff, remove_positions};
use rayon::prelude::*;

/// Confirmed multi-position removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiRemovalFit {
    /// Absolute ciphertext indices of the decoys, ascending
    pub removed: Vec<usize>,
    /// Window length at which periodicity appeared
    pub window: usize,
}

/// Difference streams of the prefix with `k` leading ciphertext symbols dropped
#[derive(Debug, Clone)]
pub struct ShiftedDiffs {
    prefix_len: usize,
    shifted: Vec<Vec<Symbol>>,
}

impl ShiftedDiffs {
    /// Build shifts `0..=max_shift`
    ///
    /// Returns `None` when either stream is too short to fill every shift
    /// without padding.
    pub fn new(
        ciphertext: &[Symbol],
        plaintext: &[Symbol],
        prefix_len: usize,
        max_shift: usize,
    ) -> Option<Self> {
        if ciphertext.len() < prefix_len + max_shift || plaintext.len() < prefix_len {
            return None;
        }

        let plain_prefix = &plaintext[..prefix_len];
        let shifted = (0..=max_shift)
            .map(|k| diff(&ciphertext[k..k + prefix_len], plain_prefix))
            .collect();

        Some(Self {
            prefix_len,
            shifted,
        })
    }

    /// Write the realigned difference stream for `indices` into `out`
    ///
    /// `indices` must be strictly increasing, below `prefix_len`, and no longer
    /// than the largest shift.
    pub fn splice_into(&self, indices: &[usize], out: &mut Vec<Symbol>) {
        out.clear();
        let n = indices.len();
        let Some((&first, &last)) = indices.first().zip(indices.last()) else {
            out.extend_from_slice(&self.shifted[0]);
            return;
        };

        out.extend_from_slice(&self.shifted[0][..first]);
        for (j, pair) in indices.windows(2).enumerate() {
            let (start, stop) = (pair[0], pair[1]);
            out.extend_from_slice(&self.shifted[j + 1][start - j..stop - j - 1]);
        }
        out.extend_from_slice(&self.shifted[n][last + 1 - n..]);

        debug_assert_eq!(out.len(), self.prefix_len);
    }

    /// Realigned difference stream for `indices`
    pub fn splice(&self, indices: &[usize]) -> Vec<Symbol> {
        let mut out = Vec::with_capacity(self.prefix_len);
        self.splice_into(indices, &mut out);
        out
    }
}

/// Entropy of every `size`-subset of `0..prefix_len`, in enumeration order
///
/// Returns the flattened subsets (stride `size`) and their scores. `size`
/// must be at least 1.
pub fn score_subsets(shifted: &ShiftedDiffs, size: usize) -> (Vec<usize>, Vec<f64>) {
    let flat: Vec<usize> = Combinations::new(shifted.prefix_len, size)
        .flatten()
        .collect();

    let scores: Vec<f64> = flat
        .par_chunks(size)
        .map_init(
            || Vec::with_capacity(shifted.prefix_len),
            |buf, indices| {
                shifted.splice_into(indices, buf);
                entropy(buf)
            },
        )
        .collect();

    (flat, scores)
}

/// Search for 2..=4 decoy positions in the ciphertext prefix
///
/// Sizes are tried smallest first; within a size, low-entropy outliers are
/// confirmed in enumeration order and the first confirmed subset wins, which
/// keeps the parallel search identical to a sequential scan.
pub fn search_multi_removal(
    ciphertext: &[Symbol],
    plaintext: &[Symbol],
    config: &MultiRemovalConfig,
    spectral: &SpectralConfig,
) -> Option<MultiRemovalFit> {
    let prefix_len = config.prefix_len;
    let Some(shifted) = ShiftedDiffs::new(ciphertext, plaintext, prefix_len, config.max_subset)
    else {
        tracing::debug!(
            cipher_len = ciphertext.len(),
            prefix_len,
            "ciphertext too short for multi-removal search"
        );
        return None;
    };

    let plain_prefix = &plaintext[..prefix_len];
    let test = SpectralTest {
        min_window: config.min_window,
        max_window: prefix_len,
        quota: BinQuota::FloorDivisor(4),
        epsilon: spectral.epsilon,
    };

    for size in config.min_subset.max(1)..=config.max_subset {
        let (flat, scores) = score_subsets(&shifted, size);
        let summary = kernel::summarize(&scores);
        let cutoff = summary.mean - config.std_multiplier * summary.stddev;

        tracing::debug!(
            size,
            subsets = scores.len(),
            retained = scores.iter().filter(|&&s| s < cutoff).count(),
            mean = summary.mean,
            stddev = summary.stddev,
            "multi-removal entropy outliers"
        );

        let found = flat
            .par_chunks(size)
            .zip(scores.par_iter())
            .filter(|(_, &score)| score < cutoff)
            .find_map_first(|(indices, _)| {
                let realigned = remove_positions(ciphertext, indices, prefix_len);
                let diffs = diff(&realigned, plain_prefix);
                let mut analyzer = SpectrumAnalyzer::new();
                test.first_periodic_window(&mut analyzer, &diffs)
                    .map(|window| MultiRemovalFit {
                        removed: indices.to_vec(),
                        window,
                    })
            });

        if found.is_some() {
            return found;
        }
    }

    None
}
