// Decoy-aware plaintext detection
//
// Identifies which reference plaintext produced a ciphertext from an additive
// stream cipher that injects random decoy symbols, and where the decoys sit.
//
// Stages, in increasing cost:
// - start_anomaly: entropy outlier among candidates at the stream start
// - single_removal + spectral: one decoy located by entropy slope, confirmed
//   by a sparse DFT of the realigned difference stream
// - multi_removal: 2-4 decoys found by combinatorial entropy ranking,
//   confirmed spectrally
// - fallback: minimum-entropy guess over a longer prefix
//
// Key insight: with the right candidate and every decoy removed, the difference
// stream is the repeating key itself, which is both low-entropy and periodic.

mod combinations;
mod config;
mod multi_removal;
mod pipeline;
mod single_removal;
mod spectral;
mod start_anomaly;

pub use combinations::Combinations;
pub use config::{
    ConfigError, DetectorConfig, FallbackConfig, MultiRemovalConfig, SingleRemovalConfig,
    SpectralConfig, StartAnomalyConfig,
};
pub use multi_removal::{score_subsets, search_multi_removal, MultiRemovalFit, ShiftedDiffs};
pub use pipeline::{decrypt, CandidateError, Detector, Evidence, Reason, Verdict};
pub use single_removal::select_removal_window;
pub use spectral::{BinQuota, SpectralFit, SpectralTest};
pub use start_anomaly::{detect_start_anomaly, score_start, StartScores};
