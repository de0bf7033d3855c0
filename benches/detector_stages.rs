//! Detector stage benchmarks
//!
//! Measures the cost of each pipeline stage on reference ciphertexts:
//!
//! 1. Prefix entropy scoring
//! 2. Start-anomaly test over all candidates
//! 3. Spectral confirmation of a single-removal window
//! 4. Combinatorial multi-removal search (the dominant cost)
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench detector_stages
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cribador::alphabet::{self, Symbol};
use cribador::corpus;
use cribador::detector::{
    detect_start_anomaly, search_multi_removal, select_removal_window, BinQuota, Detector,
    DetectorConfig, SpectralTest,
};
use cribador::entropy::entropy;
use cribador::generator::CipherGenerator;
use cribador::stream::diff;

fn ciphertext(plain_index: usize, decoys: &[(usize, Symbol)]) -> Vec<Symbol> {
    CipherGenerator::new(vec![3, 7, 1], 0.0)
        .map(|g| {
            g.encrypt_with_decoys(&corpus::encoded()[plain_index], decoys)
                .ciphertext
        })
        .unwrap_or_default()
}

fn bench_entropy(c: &mut Criterion) {
    let cipher = ciphertext(0, &[]);
    let plain = &corpus::encoded()[1];
    let mut group = c.benchmark_group("entropy");

    for len in [30, 60, 600] {
        let d = diff(&cipher[..len], &plain[..len]);
        group.bench_with_input(BenchmarkId::from_parameter(len), &d, |b, d| {
            b.iter(|| entropy(black_box(d)));
        });
    }
    group.finish();
}

fn bench_start_anomaly(c: &mut Criterion) {
    let cipher = ciphertext(2, &[]);
    let config = DetectorConfig::default();

    c.bench_function("start_anomaly", |b| {
        b.iter(|| {
            detect_start_anomaly(
                black_box(&cipher),
                corpus::encoded(),
                &config.start,
                false,
            )
        });
    });
}

fn bench_single_removal(c: &mut Criterion) {
    let cipher = ciphertext(2, &[(10, 13)]);
    let plain = &corpus::encoded()[2];
    let config = DetectorConfig::default();
    let test = SpectralTest {
        min_window: config.single.min_window,
        max_window: config.single.search_space,
        quota: BinQuota::Ratio(config.single.zero_ratio),
        epsilon: config.spectral.epsilon,
    };

    c.bench_function("single_removal_with_fit", |b| {
        b.iter(|| {
            let window: Vec<usize> =
                select_removal_window(black_box(&cipher), plain, &config.single).collect();
            test.search_single(&cipher, plain, &window)
        });
    });
}

fn bench_multi_removal(c: &mut Criterion) {
    let cipher = ciphertext(0, &[(2, 5), (9, 20), (17, 11)]);
    let plain = &corpus::encoded()[0];
    let config = DetectorConfig::default();

    let mut group = c.benchmark_group("multi_removal");
    group.sample_size(10);
    group.bench_function("three_decoys", |b| {
        b.iter(|| search_multi_removal(black_box(&cipher), plain, &config.multi, &config.spectral));
    });
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let detector = Detector::default();
    let text = alphabet::decode(&ciphertext(2, &[(10, 13)])).unwrap_or_default();

    c.bench_function("decrypt_single_decoy", |b| {
        b.iter(|| detector.decrypt(black_box(&text)));
    });
}

criterion_group!(
    benches,
    bench_entropy,
    bench_start_anomaly,
    bench_single_removal,
    bench_multi_removal,
    bench_full_pipeline
);
criterion_main!(benches);
