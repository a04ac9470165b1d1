//! Performance benchmarks for reactive-config.
//!
//! - Live value read and clone latency
//! - Concurrent readers
//! - Existence checks, raw reads and path resolution

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use reactive_config::files::{ConfigurationFileStore, PathResolver};
use reactive_config::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Barrier};
use std::thread;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct BenchConfig {
    value: i32,
    name: String,
    flag: bool,
    items: Vec<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            value: 42,
            name: "benchmark".to_string(),
            flag: true,
            items: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        }
    }
}

impl Configured for BenchConfig {}

/// Benchmark single-threaded read latency
fn benchmark_read_latency(c: &mut Criterion) {
    let config = LiveConfig::fixed(BenchConfig::default());

    let mut group = c.benchmark_group("read_latency");
    group.bench_function("single_read", |b| {
        b.iter(|| {
            let cfg = config.get();
            black_box(&cfg.value);
        });
    });
    group.finish();
}

/// Benchmark clone performance
fn benchmark_clone(c: &mut Criterion) {
    let config = LiveConfig::fixed(BenchConfig::default());

    let mut group = c.benchmark_group("clone");
    group.bench_function("live_config_clone", |b| {
        b.iter(|| {
            let cloned = config.clone();
            black_box(cloned);
        });
    });
    group.finish();
}

/// Benchmark concurrent reads with varying thread counts
fn benchmark_concurrent_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_reads");

    for threads in [1, 2, 4, 8] {
        group.throughput(Throughput::Elements(threads as u64 * 1000));
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            let config = LiveConfig::fixed(BenchConfig::default());
            b.iter(|| {
                let barrier = Arc::new(Barrier::new(threads));
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let config = config.clone();
                        let barrier = Arc::clone(&barrier);
                        thread::spawn(move || {
                            barrier.wait();
                            for _ in 0..1000 {
                                black_box(config.get().value);
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }
    group.finish();
}

/// Benchmark the per-poll file work
fn benchmark_file_access(c: &mut Criterion) {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let resolver = PathResolver::new(temp_dir.path());
    let store = ConfigurationFileStore::new();
    let path = resolver.resolve("bench.config");
    let raw = serde_json::to_vec_pretty(&BenchConfig::default()).unwrap();
    store.write(&path, &raw).unwrap();

    let mut group = c.benchmark_group("file_access");
    group.bench_function("resolve", |b| {
        b.iter(|| black_box(resolver.resolve(black_box("bench.config"))));
    });
    group.bench_function("exists", |b| {
        b.iter(|| black_box(store.exists(&path)));
    });
    group.bench_function("read", |b| {
        b.iter(|| black_box(store.read(&path).unwrap()));
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_read_latency,
    benchmark_clone,
    benchmark_concurrent_reads,
    benchmark_file_access
);
criterion_main!(benches);
