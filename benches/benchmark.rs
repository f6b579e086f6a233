//! Performance benchmarks for vcf-purity
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use log::LevelFilter;
use std::io::Cursor;
use vcf_purity::core::{percentiles, PERCENTILES};
use vcf_purity::{estimate_vcf, PurityConfig};

/// Deterministic pseudo-random AFs in [0, 1)
fn synthetic_afs(n: usize) -> Vec<f64> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % 10_000) as f64 / 10_000.0
        })
        .collect()
}

/// Tumour/normal VCF text with `n` records
fn synthetic_vcf(n: usize) -> String {
    let mut text = String::from(
        "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNORMAL\tTUMOR\n",
    );
    for (i, af) in synthetic_afs(n).into_iter().enumerate() {
        let filter = if i % 7 == 0 { "weak_evidence" } else { "PASS" };
        text.push_str(&format!(
            "chr1\t{}\t.\tC\tT\t.\t{}\tDP=60\tGT:AF:DP\t0/0:{:.3}:30\t0/1:{:.3}:30\n",
            i + 1,
            filter,
            af / 2.0,
            af
        ));
    }
    text
}

/// Benchmark percentile computation over growing samples
fn bench_percentiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("percentiles");

    for size in [1_000, 10_000, 100_000] {
        let afs = synthetic_afs(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &afs, |b, afs| {
            b.iter(|| black_box(percentiles(black_box(afs), &PERCENTILES)))
        });
    }

    group.finish();
}

/// Benchmark the full read-filter-estimate pipeline
fn bench_pipeline(c: &mut Criterion) {
    let logger = env_logger::Builder::new()
        .filter_level(LevelFilter::Off)
        .build();
    let mut config = PurityConfig::new("TUMOR");
    config.pass_only = true;
    config.filter_germline_het = true;
    config.min_dp = 10.0;

    let mut group = c.benchmark_group("pipeline");

    for size in [1_000, 50_000] {
        let text = synthetic_vcf(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let result = estimate_vcf(Cursor::new(text.as_bytes()), &config, &logger).unwrap();
                black_box(result)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_percentiles, bench_pipeline);
criterion_main!(benches);
