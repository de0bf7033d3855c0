//! CLI argument parsing for Cribador

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for verdicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Two lines: reason tag, then plaintext index (default)
    Text,
    /// JSON object for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "cribador")]
#[command(version)]
#[command(
    about = "Identify which reference plaintext produced a decoy-laden additive-cipher ciphertext",
    long_about = None
)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Ciphertext over [a-z ] (read from stdin when omitted)
    #[arg(value_name = "CIPHERTEXT")]
    pub ciphertext: Option<String>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print a per-stage timing breakdown to stderr
    #[arg(long = "profile")]
    pub profile: bool,

    /// Print the most likely key lengths (Kasiski examination) to stderr
    #[arg(long = "kasiski")]
    pub kasiski: bool,

    /// Print each candidate's entropy trend over the start prefix to stderr
    #[arg(long = "trend")]
    pub trend: bool,

    /// Load detector thresholds from a TOML file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encrypt a reference plaintext with random decoys
    Encrypt(EncryptArgs),
}

#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// Reference plaintext index
    #[arg(long = "plaintext", value_name = "INDEX", value_parser = clap::value_parser!(u8).range(0..5))]
    pub plaintext: u8,

    /// Whitespace-separated key values in [0, 26], e.g. "3 7 1"
    #[arg(long = "key", value_name = "KEY")]
    pub key: String,

    /// Probability of a decoy at each output position
    #[arg(long = "decoy-rate", value_name = "RATE", default_value = "0.05")]
    pub decoy_rate: f64,

    /// RNG seed for reproducible output
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Index the key by ciphertext position instead of plaintext position
    #[arg(long = "ciphertext-schedule")]
    pub ciphertext_schedule: bool,
}
