//! Criterion comparison of the three reduction kernels.
//!
//! Sizes straddle the lane width (N % 4 == 0 and != 0) so the padding
//! group shows up in the numbers. Throughput is reported as 2·N³ flops.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lanemul::Matrix;
use lanemul::harness::{Kernel, Operands};
use lanemul::matrix::transpose::transpose_in_place;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

const SIZES: &[usize] = &[64, 127, 256, 513];

fn bench_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul_f32x4");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(3));

    let mut rng = StdRng::seed_from_u64(0);
    for &n in SIZES {
        let a = Matrix::random(n, &mut rng);
        let mut bt = Matrix::random(n, &mut rng);
        transpose_in_place(&mut bt);
        let ops = Operands::prepare(&a, &bt);

        group.throughput(Throughput::Elements(2 * (n as u64).pow(3)));
        let mut out = Matrix::zeros(n);
        for kernel in Kernel::ALL {
            group.bench_with_input(BenchmarkId::new(kernel.label(), n), &kernel, |b, &k| {
                b.iter(|| {
                    ops.multiply(black_box(k), &mut out).unwrap();
                    black_box(&out);
                })
            });
        }
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let n = 513;
    let a = Matrix::random(n, &mut StdRng::seed_from_u64(1));

    group.bench_function("transpose_in_place", |b| {
        let mut m = a.clone();
        b.iter(|| transpose_in_place(black_box(&mut m)))
    });
    group.bench_function("pack_and_materialize", |b| {
        b.iter(|| Operands::prepare(black_box(&a), black_box(&a)))
    });
    group.finish();
}

criterion_group!(benches, bench_kernels, bench_layout);
criterion_main!(benches);
