// Spectral periodicity test
//
// A difference stream that equals a repeating key has a sparse spectrum: when
// the window length is a multiple of the key period, only bins at multiples of
// `window / period` carry energy. Counting near-zero bins over the
// non-negative half of the DFT turns that into a cheap yes/no test.

use crate::alphabet::Symbol;
use crate::kernel::SpectrumAnalyzer;
use crate::stream::{diff, remove_at};

/// How many near-zero bins a window needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinQuota {
    /// `zeros >= ratio * bins`
    Ratio(f64),
    /// `zeros >= floor(bins / divisor)`
    FloorDivisor(usize),
}

impl BinQuota {
    fn is_met(&self, zeros: usize, bins: usize) -> bool {
        match *self {
            BinQuota::Ratio(ratio) => zeros as f64 >= bins as f64 * ratio,
            BinQuota::FloorDivisor(divisor) => zeros >= bins / divisor.max(1),
        }
    }
}

/// Window-growing spectral test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralTest {
    /// First window length tried
    pub min_window: usize,
    /// Window lengths stop before this value
    pub max_window: usize,
    pub quota: BinQuota,
    pub epsilon: f64,
}

/// A successful single-position fit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectralFit {
    /// Window length at which periodicity appeared
    pub window: usize,
    /// Ciphertext index whose removal restored periodicity
    pub removed: usize,
}

impl SpectralTest {
    /// Whether one window of a difference stream looks key-periodic
    pub fn is_periodic(&self, analyzer: &mut SpectrumAnalyzer, window: &[Symbol]) -> bool {
        let (zeros, bins) = analyzer.near_zero_bins(window, self.epsilon);
        self.quota.is_met(zeros, bins)
    }

    /// Smallest window length in range at which `diffs[..M]` is periodic
    ///
    /// Window lengths past the end of `diffs` are not tested.
    pub fn first_periodic_window(
        &self,
        analyzer: &mut SpectrumAnalyzer,
        diffs: &[Symbol],
    ) -> Option<usize> {
        (self.min_window..self.max_window.min(diffs.len() + 1))
            .find(|&m| self.is_periodic(analyzer, &diffs[..m]))
    }

    /// Test single-position removal hypotheses
    ///
    /// Window lengths are the outer loop and hypotheses the inner loop, so the
    /// shortest periodic window wins and hypotheses break ties in given order.
    pub fn search_single(
        &self,
        ciphertext: &[Symbol],
        plaintext: &[Symbol],
        candidates: &[usize],
    ) -> Option<SpectralFit> {
        if candidates.is_empty() {
            return None;
        }

        let mut analyzer = SpectrumAnalyzer::new();
        let hypotheses: Vec<(usize, Vec<Symbol>)> = candidates
            .iter()
            .map(|&ci| {
                let limit = self.max_window.min(ciphertext.len());
                let removed = remove_at(&ciphertext[..(limit + 1).min(ciphertext.len())], ci);
                (ci, diff(&removed, plaintext))
            })
            .collect();

        for window in self.min_window..self.max_window {
            for (ci, diffs) in &hypotheses {
                let end = window.min(diffs.len());
                if self.is_periodic(&mut analyzer, &diffs[..end]) {
                    return Some(SpectralFit {
                        window,
                        removed: *ci,
                    });
                }
            }
        }
        None
    }
}
