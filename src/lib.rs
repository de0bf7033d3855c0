//! Cribador - decoy-aware plaintext identification for additive stream ciphers
//!
//! Given a ciphertext produced by adding a short repeating key to one of a
//! fixed set of reference plaintexts over the 27-symbol alphabet `[ a-z]`,
//! with random decoy symbols injected along the way, this library decides
//! which plaintext was encrypted. Detection combines Shannon entropy of the
//! ciphertext/plaintext difference stream with DFT periodicity tests.

pub mod alphabet;
pub mod cli;
pub mod corpus;
pub mod detector;
pub mod entropy;
pub mod generator;
pub mod json_output;
pub mod kasiski;
pub mod kernel;
pub mod profiling;
pub mod stream;
