// Decision pipeline
//
// Stages run in increasing cost order and the first success wins:
// start anomaly -> single removal + spectral fit -> multi-removal search ->
// forced minimum-entropy guess. The last stage always answers.

use crate::alphabet::{self, AlphabetError, Symbol};
use crate::corpus;
use crate::detector::config::DetectorConfig;
use crate::detector::multi_removal::{search_multi_removal, MultiRemovalFit};
use crate::detector::single_removal::select_removal_window;
use crate::detector::spectral::{BinQuota, SpectralFit, SpectralTest};
use crate::detector::start_anomaly::detect_start_anomaly;
use crate::profiling::{ProfilingCategory, ProfilingContext};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Rejected candidate sets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CandidateError {
    #[error("candidate set is empty")]
    Empty,
}

/// Which stage produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    StartAnomaly,
    Optim,
    FftManyChars,
    LastGuess,
}

impl Reason {
    /// Tag printed on the first output line
    pub fn tag(&self) -> &'static str {
        match self {
            Reason::StartAnomaly => "start anomaly",
            Reason::Optim => "optim",
            Reason::FftManyChars => "fft many chars",
            Reason::LastGuess => "last guess: minimum entropy",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Supporting detail for a verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    /// Entropy-only decision
    Entropy,
    /// Single decoy confirmed spectrally
    SingleRemoval(SpectralFit),
    /// Several decoys confirmed spectrally
    MultiRemoval(MultiRemovalFit),
}

/// Decision for one ciphertext
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Index into the candidate set
    pub index: usize,
    pub reason: Reason,
    pub evidence: Evidence,
}

impl Verdict {
    /// The two-line text report: reason tag, then index
    pub fn to_text(&self) -> String {
        format!("{}\n{}", self.reason, self.index)
    }
}

/// Decoy-aware plaintext identifier
///
/// # Example
/// ```
/// use cribador::detector::{Detector, Reason};
///
/// let detector = Detector::default();
/// let plain = cribador::corpus::PLAINTEXTS[1];
/// let verdict = detector.decrypt(&plain[..100]).unwrap();
/// assert_eq!(verdict.index, 1);
/// assert_eq!(verdict.reason, Reason::StartAnomaly);
/// ```
#[derive(Debug, Clone)]
pub struct Detector {
    config: DetectorConfig,
    candidates: Vec<Vec<Symbol>>,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl Detector {
    /// Detector over the reference corpus
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            candidates: corpus::encoded().to_vec(),
        }
    }

    /// Detector over an arbitrary candidate set
    ///
    /// Every stage, the forced last guess included, answers with an index
    /// into `candidates`, so the set must not be empty.
    pub fn with_candidates(
        config: DetectorConfig,
        candidates: Vec<Vec<Symbol>>,
    ) -> Result<Self, CandidateError> {
        if candidates.is_empty() {
            return Err(CandidateError::Empty);
        }
        Ok(Self { config, candidates })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn candidates(&self) -> &[Vec<Symbol>] {
        &self.candidates
    }

    /// Identify the plaintext behind `ciphertext`
    ///
    /// Fails only when the text contains a character outside the alphabet.
    pub fn decrypt(&self, ciphertext: &str) -> Result<Verdict, AlphabetError> {
        self.decrypt_profiled(ciphertext, &mut ProfilingContext::disabled())
    }

    /// [`Detector::decrypt`] with per-stage timing
    pub fn decrypt_profiled(
        &self,
        ciphertext: &str,
        profiler: &mut ProfilingContext,
    ) -> Result<Verdict, AlphabetError> {
        let symbols = profiler.measure(ProfilingCategory::Encoding, || {
            alphabet::encode(ciphertext)
        })?;
        Ok(self.run(&symbols, profiler))
    }

    /// Run all stages over an encoded ciphertext
    pub fn run(&self, cipher: &[Symbol], profiler: &mut ProfilingContext) -> Verdict {
        let config = &self.config;

        let anomaly = profiler.measure(ProfilingCategory::StartAnomaly, || {
            detect_start_anomaly(cipher, &self.candidates, &config.start, false)
        });
        if let Some(index) = anomaly {
            tracing::info!(index, "start anomaly");
            return Verdict {
                index,
                reason: Reason::StartAnomaly,
                evidence: Evidence::Entropy,
            };
        }

        let single_test = SpectralTest {
            min_window: config.single.min_window,
            max_window: config.single.search_space,
            quota: BinQuota::Ratio(config.single.zero_ratio),
            epsilon: config.spectral.epsilon,
        };
        for (index, plain) in self.candidates.iter().enumerate() {
            let window = profiler.measure(ProfilingCategory::SingleRemoval, || {
                select_removal_window(cipher, plain, &config.single)
            });
            let candidates: Vec<usize> = window.collect();
            tracing::debug!(index, ?candidates, "single-removal window");

            let fit = profiler.measure(ProfilingCategory::SpectralFit, || {
                single_test.search_single(cipher, plain, &candidates)
            });
            if let Some(fit) = fit {
                tracing::info!(index, window = fit.window, removed = fit.removed, "optim");
                return Verdict {
                    index,
                    reason: Reason::Optim,
                    evidence: Evidence::SingleRemoval(fit),
                };
            }
        }

        for (index, plain) in self.candidates.iter().enumerate() {
            let fit = profiler.measure(ProfilingCategory::MultiRemoval, || {
                search_multi_removal(cipher, plain, &config.multi, &config.spectral)
            });
            if let Some(fit) = fit {
                tracing::info!(index, removed = ?fit.removed, "fft many chars");
                return Verdict {
                    index,
                    reason: Reason::FftManyChars,
                    evidence: Evidence::MultiRemoval(fit),
                };
            }
        }

        let index = profiler
            .measure(ProfilingCategory::Fallback, || {
                detect_start_anomaly(
                    cipher,
                    &self.candidates,
                    &config.fallback.as_start_anomaly(),
                    true,
                )
            })
            .unwrap_or(0);
        tracing::info!(index, "last guess");
        Verdict {
            index,
            reason: Reason::LastGuess,
            evidence: Evidence::Entropy,
        }
    }
}

/// Identify the plaintext behind `ciphertext` with the default configuration
pub fn decrypt(ciphertext: &str) -> Result<Verdict, AlphabetError> {
    Detector::default().decrypt(ciphertext)
}
