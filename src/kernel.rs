//! Numeric kernel
//!
//! Thin layer over the numeric libraries so the detection logic never touches
//! them directly:
//! - frequency counting and modular subtraction over symbol streams
//! - summary statistics accumulated in f64
//! - DFT magnitudes via rustfft

use crate::alphabet::{Symbol, ALPHABET_SIZE};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Per-symbol occurrence counts
pub type Histogram = [usize; ALPHABET_SIZE];

/// Count occurrences of each symbol
///
/// Values outside the alphabet are folded modulo 27; difference streams never
/// produce them.
pub fn bincount(values: &[Symbol]) -> Histogram {
    let mut counts = [0usize; ALPHABET_SIZE];
    for &v in values {
        counts[v as usize % ALPHABET_SIZE] += 1;
    }
    counts
}

/// Elementwise `(a - b) mod 27` over the common prefix of both slices
pub fn mod_sub(a: &[Symbol], b: &[Symbol]) -> Vec<Symbol> {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = x as i16 - y as i16;
            if d < 0 {
                (d + ALPHABET_SIZE as i16) as Symbol
            } else {
                d as Symbol
            }
        })
        .collect()
}

/// Elementwise `(a + c) mod 27`
pub fn mod_add_scalar(a: &[Symbol], c: Symbol) -> Vec<Symbol> {
    a.iter()
        .map(|&x| ((x as usize + c as usize) % ALPHABET_SIZE) as Symbol)
        .collect()
}

/// Mean and population standard deviation of a score vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub stddev: f64,
}

/// Compute mean and population standard deviation
///
/// Two passes in f64; the multi-removal cutoff compares against these values
/// directly. Empty input yields zeros.
pub fn summarize(values: &[f64]) -> Summary {
    if values.is_empty() {
        return Summary {
            mean: 0.0,
            stddev: 0.0,
        };
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / n;

    Summary {
        mean,
        stddev: variance.sqrt(),
    }
}

/// Index of the first minimum value
pub fn argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// DFT magnitude analyzer
///
/// Caches FFT plans across window lengths, so keep one per worker.
pub struct SpectrumAnalyzer {
    planner: FftPlanner<f64>,
    buffer: Vec<Complex<f64>>,
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectrumAnalyzer {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            buffer: Vec::new(),
        }
    }

    /// Magnitudes of the non-negative frequency bins (`floor(len/2)` bins)
    pub fn half_magnitudes(&mut self, signal: &[Symbol]) -> Vec<f64> {
        if signal.is_empty() {
            return Vec::new();
        }

        self.buffer.clear();
        self.buffer
            .extend(signal.iter().map(|&s| Complex::new(s as f64, 0.0)));

        let fft = self.planner.plan_fft_forward(signal.len());
        fft.process(&mut self.buffer);

        self.buffer[..signal.len() / 2]
            .iter()
            .map(|c| c.norm())
            .collect()
    }

    /// Count of non-negative frequency bins with magnitude below `epsilon`
    ///
    /// Returns `(near_zero, total_bins)`.
    pub fn near_zero_bins(&mut self, signal: &[Symbol], epsilon: f64) -> (usize, usize) {
        let mags = self.half_magnitudes(signal);
        let zeros = mags.iter().filter(|&&m| m < epsilon).count();
        (zeros, mags.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bincount_counts_each_symbol() {
        let counts = bincount(&[0, 1, 1, 26, 26, 26]);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[1], 2);
        assert_eq!(counts[26], 3);
        assert_eq!(counts.iter().sum::<usize>(), 6);
    }

    #[test]
    fn test_mod_sub_wraps_negative() {
        assert_eq!(mod_sub(&[0, 5, 26], &[1, 5, 0]), vec![26, 0, 26]);
    }

    #[test]
    fn test_mod_sub_truncates() {
        assert_eq!(mod_sub(&[3, 4, 5], &[1]), vec![2]);
    }

    #[test]
    fn test_mod_add_scalar_wraps() {
        assert_eq!(mod_add_scalar(&[25, 26, 0], 2), vec![0, 1, 2]);
    }

    #[test]
    fn test_summarize_population_stddev() {
        // mean=5, population variance = 20/4 = 5
        let s = summarize(&[2.0, 4.0, 6.0, 8.0]);
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.stddev - 5.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_empty() {
        let s = summarize(&[]);
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.stddev, 0.0);
    }

    #[test]
    fn test_argmin_prefers_first() {
        assert_eq!(argmin(&[3.0, 1.0, 2.0, 1.0]), Some(1));
        assert_eq!(argmin(&[]), None);
    }

    #[test]
    fn test_half_magnitudes_length() {
        let mut analyzer = SpectrumAnalyzer::new();
        assert_eq!(analyzer.half_magnitudes(&[1; 15]).len(), 7);
        assert_eq!(analyzer.half_magnitudes(&[1; 16]).len(), 8);
        assert!(analyzer.half_magnitudes(&[]).is_empty());
    }

    #[test]
    fn test_constant_signal_only_dc() {
        let mut analyzer = SpectrumAnalyzer::new();
        let mags = analyzer.half_magnitudes(&[4; 12]);
        assert!((mags[0] - 48.0).abs() < 1e-9);
        assert!(mags[1..].iter().all(|&m| m < 1e-9));
    }

    #[test]
    fn test_periodic_signal_sparse_spectrum() {
        // Period 3 over 15 samples: only bins 0 and 5 are non-zero
        let signal: Vec<Symbol> = [3, 7, 1].iter().cycle().take(15).copied().collect();
        let mut analyzer = SpectrumAnalyzer::new();
        let (zeros, bins) = analyzer.near_zero_bins(&signal, 1e-5);
        assert_eq!(bins, 7);
        assert_eq!(zeros, 5);
    }
}
