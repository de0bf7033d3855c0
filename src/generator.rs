//! Reference cipher generator
//!
//! Ground-truth generative model the detector is validated against: an additive
//! cipher over the 27-symbol alphabet with a repeating integer key that, at
//! every output position, independently emits a uniformly random decoy with a
//! fixed probability. Decoy positions are tracked so detections can be checked.

use crate::alphabet::{Symbol, ALPHABET_SIZE};
use rand::Rng;
use thiserror::Error;

/// Decoy probability of the reference model
pub const DEFAULT_DECOY_RATE: f64 = 0.05;

/// Errors for generator construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Key must contain at least one value")]
    EmptyKey,

    #[error("Key value {0} out of range: must be in [0, 26]")]
    KeyOutOfRange(i64),

    #[error("Invalid key token {0:?}: expected an integer")]
    InvalidKeyToken(String),

    #[error("Decoy rate must be in [0, 1), got {0}")]
    DecoyRate(f64),
}

/// Which pointer selects the key element for a keyed symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeySchedule {
    /// `key[i mod len]` with `i` the plaintext position; decoys do not advance
    /// the key, so removing them leaves a purely periodic difference stream
    #[default]
    PlaintextPosition,
    /// `key[j mod len]` with `j` the ciphertext position; every decoy shifts
    /// the key phase of the remainder
    CiphertextPosition,
}

/// Ciphertext plus the positions of every injected decoy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encryption {
    pub ciphertext: Vec<Symbol>,
    /// Ciphertext indices holding decoys, ascending
    pub decoy_positions: Vec<usize>,
}

/// Parse a whitespace-separated key such as `"1 12 3"`
pub fn parse_key(text: &str) -> Result<Vec<Symbol>, GeneratorError> {
    let key = text
        .split_whitespace()
        .map(|token| {
            let value: i64 = token
                .parse()
                .map_err(|_| GeneratorError::InvalidKeyToken(token.to_string()))?;
            if (0..ALPHABET_SIZE as i64).contains(&value) {
                Ok(value as Symbol)
            } else {
                Err(GeneratorError::KeyOutOfRange(value))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if key.is_empty() {
        return Err(GeneratorError::EmptyKey);
    }
    Ok(key)
}

/// Keyed additive cipher with random decoy injection
#[derive(Debug, Clone)]
pub struct CipherGenerator {
    key: Vec<Symbol>,
    decoy_rate: f64,
    schedule: KeySchedule,
}

impl CipherGenerator {
    pub fn new(key: Vec<Symbol>, decoy_rate: f64) -> Result<Self, GeneratorError> {
        if key.is_empty() {
            return Err(GeneratorError::EmptyKey);
        }
        if let Some(&bad) = key.iter().find(|&&k| k as usize >= ALPHABET_SIZE) {
            return Err(GeneratorError::KeyOutOfRange(bad as i64));
        }
        if !(0.0..1.0).contains(&decoy_rate) {
            return Err(GeneratorError::DecoyRate(decoy_rate));
        }

        Ok(Self {
            key,
            decoy_rate,
            schedule: KeySchedule::default(),
        })
    }

    pub fn with_schedule(mut self, schedule: KeySchedule) -> Self {
        self.schedule = schedule;
        self
    }

    fn keyed(&self, plain: Symbol, plain_pos: usize, cipher_pos: usize) -> Symbol {
        let j = match self.schedule {
            KeySchedule::PlaintextPosition => plain_pos,
            KeySchedule::CiphertextPosition => cipher_pos,
        };
        ((plain as usize + self.key[j % self.key.len()] as usize) % ALPHABET_SIZE) as Symbol
    }

    /// Encrypt with independent per-position decoy draws
    pub fn encrypt<R: Rng>(&self, plaintext: &[Symbol], rng: &mut R) -> Encryption {
        let mut ciphertext = Vec::with_capacity(plaintext.len() + plaintext.len() / 8);
        let mut decoy_positions = Vec::new();
        let mut i = 0;

        while i < plaintext.len() {
            if rng.gen_bool(self.decoy_rate) {
                decoy_positions.push(ciphertext.len());
                ciphertext.push(rng.gen_range(0..ALPHABET_SIZE as Symbol));
            } else {
                ciphertext.push(self.keyed(plaintext[i], i, ciphertext.len()));
                i += 1;
            }
        }

        tracing::debug!(
            plain_len = plaintext.len(),
            decoys = decoy_positions.len(),
            "generated ciphertext"
        );

        Encryption {
            ciphertext,
            decoy_positions,
        }
    }

    /// Encrypt with decoys at fixed ciphertext positions
    ///
    /// `decoys` pairs a ciphertext index with the decoy symbol placed there.
    /// Positions past the end of the produced ciphertext are ignored.
    pub fn encrypt_with_decoys(
        &self,
        plaintext: &[Symbol],
        decoys: &[(usize, Symbol)],
    ) -> Encryption {
        let mut ciphertext = Vec::with_capacity(plaintext.len() + decoys.len());
        let mut decoy_positions = Vec::new();
        let mut i = 0;

        while i < plaintext.len() {
            let pos = ciphertext.len();
            if let Some(&(_, symbol)) = decoys.iter().find(|(at, _)| *at == pos) {
                decoy_positions.push(pos);
                ciphertext.push(symbol % ALPHABET_SIZE as Symbol);
            } else {
                ciphertext.push(self.keyed(plaintext[i], i, pos));
                i += 1;
            }
        }

        Encryption {
            ciphertext,
            decoy_positions,
        }
    }
}
