//! Vector kernel benchmarks: SIMD backend against the scalar reference and
//! an `ndarray` baseline, across OFDM-sized and cache-sized buffers.

use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use phy_kernels::{Backend, Complex16};

/// One OFDM symbol up to about an L2 cache worth of samples.
const VECTOR_SIZES: &[usize] = &[64, 1_024, 16_384, 262_144];

const BACKENDS: [(&str, Backend); 2] = [("simd", Backend::Simd), ("scalar", Backend::Scalar)];

fn generate_samples(len: usize, seed: u64) -> Vec<Complex16> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| Complex16::new(rng.random_range(-1000..1000), rng.random_range(-1000..1000)))
        .collect()
}

fn benchmark_add(c: &mut Criterion) {
    for &size in VECTOR_SIZES {
        let mut group = c.benchmark_group(format!("add_i16_{}", size));
        group.throughput(Throughput::Elements(size as u64));

        let a: Vec<i16> = generate_samples(size, 1).iter().map(|s| s.re).collect();
        let b: Vec<i16> = generate_samples(size, 2).iter().map(|s| s.im).collect();
        let mut out = vec![0i16; size];

        for (name, backend) in BACKENDS {
            group.bench_with_input(BenchmarkId::new(name, size), &(&a, &b), |bencher, (a, b)| {
                bencher.iter(|| backend.add(black_box(&mut out), black_box(a), black_box(b)))
            });
        }

        let a_ndarray = Array1::from_vec(a.clone());
        let b_ndarray = Array1::from_vec(b.clone());
        group.bench_with_input(
            BenchmarkId::new("ndarray", size),
            &(&a_ndarray, &b_ndarray),
            |bencher, (a, b)| bencher.iter(|| black_box(*a + *b)),
        );

        group.finish();
    }
}

fn benchmark_complex(c: &mut Criterion) {
    for &size in VECTOR_SIZES {
        let mut group = c.benchmark_group(format!("complex_{}", size));
        group.throughput(Throughput::Elements(size as u64));

        let x = generate_samples(size, 3);
        let y = generate_samples(size, 4);
        let mut out = vec![Complex16::default(); size];

        for (name, backend) in BACKENDS {
            group.bench_with_input(BenchmarkId::new(format!("multiply_{}", name), size), &(&x, &y), |bencher, (x, y)| {
                bencher.iter(|| backend.multiply(black_box(&mut out), black_box(x), black_box(y), 15))
            });
            group.bench_with_input(
                BenchmarkId::new(format!("conj_multiply_{}", name), size),
                &(&x, &y),
                |bencher, (x, y)| bencher.iter(|| backend.conj_multiply(black_box(&mut out), black_box(x), black_box(y), 15)),
            );
        }

        group.finish();
    }
}

fn all_benchmarks(c: &mut Criterion) {
    println!("Vector kernels on {}", Backend::instruction_set());
    let start_time = Instant::now();

    benchmark_add(c);
    benchmark_complex(c);

    println!("Vector benchmarks completed in {:.2} seconds", start_time.elapsed().as_secs_f64());
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(30)
        .measurement_time(std::time::Duration::from_secs(3))
        .warm_up_time(std::time::Duration::from_secs(1));
    targets = all_benchmarks
}

criterion_main!(benches);
