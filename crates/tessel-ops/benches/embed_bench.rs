//! Benchmarks for operator embedding and composition
//!
//! Run with: cargo bench -p tessel-ops

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{array, Array1};
use num_complex::Complex64;
use std::sync::Arc;
use tessel_ops::{embed, ComposedOp, EvoType, LinearOperator, OpHandle, SimMode, StaticDenseOp};

fn x_op() -> OpHandle {
    let z = Complex64::new(0.0, 0.0);
    let o = Complex64::new(1.0, 0.0);
    let m = array![[z, o], [o, z]];
    Arc::new(StaticDenseOp::new(m, EvoType::StateVector).unwrap())
}

fn ramp_state(dim: usize) -> Array1<Complex64> {
    Array1::from_iter((0..dim).map(|i| Complex64::new(i as f64, 0.0)))
}

/// Benchmark applying an embedded single-qubit gate in both modes.
fn bench_embedded_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("embedded_apply");

    for n_qubits in &[4usize, 8, 12] {
        let state = ramp_state(1 << n_qubits);

        let lazy = embed(x_op(), &[n_qubits / 2], *n_qubits, SimMode::Map).unwrap();
        group.bench_with_input(BenchmarkId::new("map", n_qubits), n_qubits, |b, _| {
            b.iter(|| black_box(lazy.apply(state.view())));
        });

        if *n_qubits <= 8 {
            let dense = embed(x_op(), &[n_qubits / 2], *n_qubits, SimMode::Matrix).unwrap();
            group.bench_with_input(BenchmarkId::new("matrix", n_qubits), n_qubits, |b, _| {
                b.iter(|| black_box(dense.apply(state.view())));
            });
        }
    }

    group.finish();
}

/// Benchmark building the embedding index tables.
fn bench_embed_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("embed_construction");

    for n_qubits in &[4usize, 8, 12] {
        group.bench_with_input(BenchmarkId::new("one_of_n", n_qubits), n_qubits, |b, &n| {
            b.iter(|| black_box(embed(x_op(), &[n / 2], n, SimMode::Map).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark composed-operator application as the factor count grows.
fn bench_composed_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("composed_apply");

    for n_factors in &[1usize, 4, 16] {
        let composed =
            ComposedOp::from_factors((0..*n_factors).map(|_| x_op()).collect()).unwrap();
        let state = ramp_state(2);
        group.bench_with_input(
            BenchmarkId::new("factors", n_factors),
            n_factors,
            |b, _| {
                b.iter(|| black_box(composed.apply(state.view())));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_embedded_apply,
    bench_embed_construction,
    bench_composed_apply,
);

criterion_main!(benches);
