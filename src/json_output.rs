//! JSON output format for verdicts
//!
//! `--format json` prints one object per run.

use crate::detector::{Evidence, Reason, Verdict};
use crate::kasiski::KeyLengthScore;
use serde::Serialize;

/// Root JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonVerdict {
    /// Crate version that produced the report
    pub version: String,
    /// Format name
    pub format: String,
    /// Human-readable reason tag, identical to the first text line
    pub reason: String,
    /// Index of the identified plaintext
    pub index: usize,
    /// Stage identifier (`start_anomaly`, `optim`, `fft_many_chars`, `last_guess`)
    pub stage: Reason,
    /// Ciphertext positions judged to be decoys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_positions: Option<Vec<usize>>,
    /// Difference-stream length that passed the spectral test
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_window: Option<usize>,
    /// Kasiski key-length scores (if --kasiski enabled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_lengths: Option<Vec<KeyLengthScore>>,
}

impl JsonVerdict {
    pub fn new(verdict: &Verdict) -> Self {
        let (removed_positions, fit_window) = match &verdict.evidence {
            Evidence::Entropy => (None, None),
            Evidence::SingleRemoval(fit) => (Some(vec![fit.removed]), Some(fit.window)),
            Evidence::MultiRemoval(fit) => (Some(fit.removed.clone()), Some(fit.window)),
        };

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "cribador-json-v1".to_string(),
            reason: verdict.reason.tag().to_string(),
            index: verdict.index,
            stage: verdict.reason,
            removed_positions,
            fit_window,
            key_lengths: None,
        }
    }

    /// Attach Kasiski key-length scores
    pub fn set_key_lengths(&mut self, scores: Vec<KeyLengthScore>) {
        self.key_lengths = Some(scores);
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{MultiRemovalFit, SpectralFit};

    fn verdict(reason: Reason, evidence: Evidence) -> Verdict {
        Verdict {
            index: 2,
            reason,
            evidence,
        }
    }

    #[test]
    fn test_entropy_verdict_omits_fit_fields() {
        let json = JsonVerdict::new(&verdict(Reason::StartAnomaly, Evidence::Entropy))
            .to_json()
            .unwrap();
        assert!(json.contains("\"reason\": \"start anomaly\""));
        assert!(json.contains("\"stage\": \"start_anomaly\""));
        assert!(json.contains("\"index\": 2"));
        assert!(json.contains("\"format\": \"cribador-json-v1\""));
        assert!(!json.contains("removed_positions"));
        assert!(!json.contains("fit_window"));
        assert!(!json.contains("key_lengths"));
    }

    #[test]
    fn test_single_removal_fields() {
        let output = JsonVerdict::new(&verdict(
            Reason::Optim,
            Evidence::SingleRemoval(SpectralFit {
                window: 9,
                removed: 9,
            }),
        ));
        assert_eq!(output.removed_positions, Some(vec![9]));
        assert_eq!(output.fit_window, Some(9));
    }

    #[test]
    fn test_multi_removal_round_trips_through_serde_json() {
        let output = JsonVerdict::new(&verdict(
            Reason::FftManyChars,
            Evidence::MultiRemoval(MultiRemovalFit {
                removed: vec![2, 9, 17],
                window: 20,
            }),
        ));
        let value: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();
        assert_eq!(value["stage"], "fft_many_chars");
        assert_eq!(value["reason"], "fft many chars");
        assert_eq!(value["removed_positions"], serde_json::json!([2, 9, 17]));
        assert_eq!(value["fit_window"], 20);
    }

    #[test]
    fn test_key_lengths_attached() {
        let mut output = JsonVerdict::new(&verdict(Reason::LastGuess, Evidence::Entropy));
        output.set_key_lengths(vec![KeyLengthScore {
            length: 6,
            score: 4.0,
        }]);
        let value: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();
        assert_eq!(value["key_lengths"][0]["length"], 6);
        assert_eq!(value["stage"], "last_guess");
    }
}
