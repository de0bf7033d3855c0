// Detector thresholds
//
// Every constant of the decision pipeline lives here so it can be tuned from a
// TOML file without recompiling. Defaults reproduce the calibrated pipeline.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be > 0, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be >= {min}, got {value}")]
    TooSmall {
        field: &'static str,
        min: usize,
        value: usize,
    },

    #[error("multi.min_subset ({min}) must not exceed multi.max_subset ({max})")]
    SubsetRange { min: usize, max: usize },

    #[error("multi.min_window ({window}) must be below multi.prefix_len ({prefix})")]
    WindowRange { window: usize, prefix: usize },

    #[error("spectral zero ratio must be in (0, 1], got {0}")]
    ZeroRatio(f64),
}

/// Start-of-stream entropy anomaly parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartAnomalyConfig {
    /// Prefix length scored against each candidate
    pub prefix_len: usize,
    /// Population std-dev of the candidate scores above which the minimum is an outlier
    pub std_threshold: f64,
}

impl Default for StartAnomalyConfig {
    fn default() -> Self {
        Self {
            prefix_len: 30,
            std_threshold: 0.186,
        }
    }
}

/// Relaxed start-anomaly parameters of the final minimum-entropy guess
///
/// Same shape as [`StartAnomalyConfig`] with its own defaults, so a partial
/// `[fallback]` table keeps the 60-symbol prefix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub prefix_len: usize,
    pub std_threshold: f64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            prefix_len: 60,
            std_threshold: 0.11,
        }
    }
}

impl FallbackConfig {
    /// Parameters for the start-anomaly test run in forced mode
    pub fn as_start_anomaly(&self) -> StartAnomalyConfig {
        StartAnomalyConfig {
            prefix_len: self.prefix_len,
            std_threshold: self.std_threshold,
        }
    }
}

/// Single-removal entropy-slope scan parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleRemovalConfig {
    /// Number of leading positions scanned
    pub search_space: usize,
    /// `E1 > ratio * E0` tolerates an initial entropy rise
    pub allow_increase_ratio: f64,
    /// Percent entropy increase that triggers a candidate window
    pub trigger_percent: f64,
    /// Positions before the trigger included in the window
    pub window_back: usize,
    /// Smallest spectral window tested
    pub min_window: usize,
    /// Fraction of near-zero bins required
    pub zero_ratio: f64,
}

impl Default for SingleRemovalConfig {
    fn default() -> Self {
        Self {
            search_space: 30,
            allow_increase_ratio: 1.02,
            trigger_percent: 1.2,
            window_back: 4,
            min_window: 8,
            zero_ratio: 0.4,
        }
    }
}

/// Multi-removal combinatorial search parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiRemovalConfig {
    /// Prefix length the combinations are drawn from
    pub prefix_len: usize,
    /// Smallest number of removed positions
    pub min_subset: usize,
    /// Largest number of removed positions
    pub max_subset: usize,
    /// Combinations below `mean - std_multiplier * std` are confirmed spectrally
    pub std_multiplier: f64,
    /// Smallest spectral window tested
    pub min_window: usize,
}

impl Default for MultiRemovalConfig {
    fn default() -> Self {
        Self {
            prefix_len: 48,
            min_subset: 2,
            max_subset: 4,
            std_multiplier: 3.0,
            min_window: 14,
        }
    }
}

/// Spectral test parameters shared by both removal stages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralConfig {
    /// Magnitude below which a bin counts as zero
    pub epsilon: f64,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self { epsilon: 1e-5 }
    }
}

/// Complete detector configuration
///
/// # Example
/// ```
/// use cribador::detector::DetectorConfig;
///
/// let config = DetectorConfig::default();
/// assert_eq!(config.start.prefix_len, 30);
/// assert_eq!(config.multi.prefix_len, 48);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub start: StartAnomalyConfig,
    pub single: SingleRemovalConfig,
    pub multi: MultiRemovalConfig,
    pub fallback: FallbackConfig,
    pub spectral: SpectralConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            start: StartAnomalyConfig::default(),
            single: SingleRemovalConfig::default(),
            multi: MultiRemovalConfig::default(),
            fallback: FallbackConfig::default(),
            spectral: SpectralConfig::default(),
        }
    }
}

impl DetectorConfig {
    /// Load a configuration from a TOML file
    ///
    /// Missing sections and fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Load a configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (field, value) in [
            ("start.prefix_len", self.start.prefix_len),
            ("fallback.prefix_len", self.fallback.prefix_len),
            ("single.search_space", self.single.search_space),
        ] {
            if value == 0 {
                return Err(ConfigError::NotPositive {
                    field,
                    value: value as f64,
                });
            }
        }

        if self.spectral.epsilon <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "spectral.epsilon",
                value: self.spectral.epsilon,
            });
        }

        if self.single.min_window < 2 {
            return Err(ConfigError::TooSmall {
                field: "single.min_window",
                min: 2,
                value: self.single.min_window,
            });
        }

        if !(self.single.zero_ratio > 0.0 && self.single.zero_ratio <= 1.0) {
            return Err(ConfigError::ZeroRatio(self.single.zero_ratio));
        }

        if self.multi.min_subset < 1 {
            return Err(ConfigError::TooSmall {
                field: "multi.min_subset",
                min: 1,
                value: self.multi.min_subset,
            });
        }

        if self.multi.min_subset > self.multi.max_subset {
            return Err(ConfigError::SubsetRange {
                min: self.multi.min_subset,
                max: self.multi.max_subset,
            });
        }

        if self.multi.min_window < 2 {
            return Err(ConfigError::TooSmall {
                field: "multi.min_window",
                min: 2,
                value: self.multi.min_window,
            });
        }

        if self.multi.min_window >= self.multi.prefix_len {
            return Err(ConfigError::WindowRange {
                window: self.multi.min_window,
                prefix: self.multi.prefix_len,
            });
        }

        Ok(())
    }
}
