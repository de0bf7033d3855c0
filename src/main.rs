use anyhow::{Context, Result};
use clap::Parser;
use cribador::alphabet::{self, Symbol};
use cribador::cli::{Cli, Command, EncryptArgs, OutputFormat};
use cribador::detector::{Detector, DetectorConfig};
use cribador::entropy::entropy_trend;
use cribador::generator::{parse_key, CipherGenerator, KeySchedule};
use cribador::json_output::JsonVerdict;
use cribador::profiling::ProfilingContext;
use cribador::{corpus, kasiski, stream};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Read one ciphertext line from stdin after prompting on stderr
fn read_ciphertext() -> Result<String> {
    eprintln!("Input ciphertext:");
    io::stderr().flush().ok();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read ciphertext from stdin")?;

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Print the entropy trend of every candidate alignment over the start prefix
fn print_trends(cipher: &[Symbol], detector: &Detector) {
    let prefix_len = detector.config().start.prefix_len;
    let prefix = &cipher[..prefix_len.min(cipher.len())];

    eprintln!("=== Entropy trend (first {} symbols) ===", prefix.len());
    for (index, plain) in detector.candidates().iter().enumerate() {
        let trend = entropy_trend(&stream::diff(prefix, plain), 1);
        let values: Vec<String> = trend.iter().map(|e| format!("{:.3}", e)).collect();
        eprintln!("{}: {}", index, values.join(" "));
    }
}

fn print_key_lengths(scores: &[kasiski::KeyLengthScore]) {
    eprintln!("=== Kasiski key-length candidates ===");
    if scores.is_empty() {
        eprintln!("no repeated substrings");
    }
    for score in scores {
        eprintln!("{:>3} {:.3}", score.length, score.score);
    }
}

/// Encrypt a reference plaintext with random decoys
fn run_encrypt(args: &EncryptArgs) -> Result<()> {
    let plain = corpus::plaintext(args.plaintext as usize)
        .with_context(|| format!("No reference plaintext {}", args.plaintext))?;
    let key = parse_key(&args.key).context("Invalid --key")?;
    let schedule = if args.ciphertext_schedule {
        KeySchedule::CiphertextPosition
    } else {
        KeySchedule::PlaintextPosition
    };
    let generator = CipherGenerator::new(key, args.decoy_rate)
        .context("Invalid generator parameters")?
        .with_schedule(schedule);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let encryption = generator.encrypt(plain, &mut rng);

    println!("{}", alphabet::decode(&encryption.ciphertext)?);
    eprintln!("decoy positions: {:?}", encryption.decoy_positions);
    Ok(())
}

/// Identify the plaintext behind a ciphertext and report the verdict
fn run_detect(args: &Cli) -> Result<()> {
    let config = match &args.config {
        Some(path) => DetectorConfig::from_file(path)?,
        None => DetectorConfig::default(),
    };
    let detector = Detector::new(config);

    let ciphertext = match &args.ciphertext {
        Some(text) => text.clone(),
        None => read_ciphertext()?,
    };

    let mut profiler = if args.profile {
        ProfilingContext::new()
    } else {
        ProfilingContext::disabled()
    };
    let verdict = detector
        .decrypt_profiled(&ciphertext, &mut profiler)
        .context("Invalid ciphertext")?;

    let symbols = alphabet::encode(&ciphertext)?;
    if args.trend {
        print_trends(&symbols, &detector);
    }
    let key_lengths = if args.kasiski {
        let scores = kasiski::likely_key_lengths(&symbols, 3);
        print_key_lengths(&scores);
        Some(scores)
    } else {
        None
    };

    match args.format {
        OutputFormat::Text => println!("{}", verdict.to_text()),
        OutputFormat::Json => {
            let mut output = JsonVerdict::new(&verdict);
            if let Some(scores) = key_lengths {
                output.set_key_lengths(scores);
            }
            println!("{}", output.to_json()?);
        }
    }

    if args.profile {
        profiler.print_summary();
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    match &args.command {
        Some(Command::Encrypt(encrypt)) => run_encrypt(encrypt),
        None => run_detect(&args),
    }
}
