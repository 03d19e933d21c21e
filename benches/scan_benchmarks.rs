/// Performance benchmarks for the window scan
///
/// Run with: cargo bench
use ash_scan::batch::{scan_pairs, SequencePair};
use ash_scan::WindowScanner;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};

const AMINO_ACIDS: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

/// Generate a reproducible random protein and a copy with ~20% substitutions
fn generate_pair(length: usize, seed: u64) -> (Vec<u8>, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let first: Vec<u8> = (0..length)
        .map(|_| AMINO_ACIDS[rng.gen_range(0..AMINO_ACIDS.len())])
        .collect();
    let second = first
        .iter()
        .map(|&aa| {
            if rng.gen_bool(0.2) {
                AMINO_ACIDS[rng.gen_range(0..AMINO_ACIDS.len())]
            } else {
                aa
            }
        })
        .collect();
    (first, second)
}

/// Benchmark: single scan over growing sequence lengths
fn bench_single_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_scan");
    let scanner = WindowScanner::new(15);

    for size in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        let (first, second) = generate_pair(*size, 42);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| scanner.scan(black_box(&first), black_box(&second)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark: window length scaling
fn bench_window_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_length");
    let (first, second) = generate_pair(5_000, 7);

    for window in [5, 15, 50, 200].iter() {
        let scanner = WindowScanner::new(*window);
        group.bench_with_input(BenchmarkId::from_parameter(window), window, |b, _| {
            b.iter(|| scanner.scan(black_box(&first), black_box(&second)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark: parallel batch of pairs
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_scan");
    group.sample_size(10);
    let scanner = WindowScanner::new(15);

    for count in [16, 128].iter() {
        let pairs: Vec<SequencePair> = (0..*count)
            .map(|i| {
                let (first, second) = generate_pair(2_000, i as u64);
                SequencePair::new(format!("pair{i}"), first, second)
            })
            .collect();

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| scan_pairs(&scanner, black_box(&pairs)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_scan, bench_window_length, bench_batch);

criterion_main!(benches);
