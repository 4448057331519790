use criterion::{black_box, criterion_group, criterion_main, Criterion};

use planewarp_linalg::{gaussian_elimination, inverse_3x3, matmul, Matrix};

fn bench_gaussian_elimination(c: &mut Criterion) {
    let mut group = c.benchmark_group("GaussianElimination");

    // the 8x9 system built by the 4-point homography solver
    let a = Matrix::from_rows(&[
        [-10.0, -20.0, -1.0, 0.0, 0.0, 0.0, 120.0, 240.0, 12.0],
        [0.0, 0.0, 0.0, -10.0, -20.0, -1.0, 230.0, 460.0, 23.0],
        [-300.0, -25.0, -1.0, 0.0, 0.0, 0.0, 93000.0, 7750.0, 310.0],
        [0.0, 0.0, 0.0, -300.0, -25.0, -1.0, 10500.0, 875.0, 35.0],
        [-280.0, -190.0, -1.0, 0.0, 0.0, 0.0, 81200.0, 55100.0, 290.0],
        [0.0, 0.0, 0.0, -280.0, -190.0, -1.0, 57400.0, 38950.0, 205.0],
        [-15.0, -210.0, -1.0, 0.0, 0.0, 0.0, 300.0, 4200.0, 20.0],
        [0.0, 0.0, 0.0, -15.0, -210.0, -1.0, 3300.0, 46200.0, 220.0],
    ]);

    group.bench_function("8x9", |b| b.iter(|| gaussian_elimination(black_box(&a))));
    group.finish();
}

fn bench_small_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("SmallOps");

    let m = Matrix::from_rows(&[[4.0, 7.0, 2.0], [3.0, 6.0, 1.0], [2.0, 5.0, 3.0]]);

    group.bench_function("inverse_3x3", |b| b.iter(|| inverse_3x3(black_box(&m))));
    group.bench_function("matmul_3x3", |b| {
        b.iter(|| matmul(black_box(&m), black_box(&m)))
    });
    group.finish();
}

criterion_group!(benches, bench_gaussian_elimination, bench_small_ops);
criterion_main!(benches);
