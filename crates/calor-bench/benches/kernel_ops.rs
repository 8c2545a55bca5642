//! Criterion micro-benchmarks for the numerical building blocks.

use std::hint::black_box;

use calor_bench::{reference_profile, stress_profile};
use calor_propagators::{enforce_dirichlet, FieldInitializer, GaussianPulse, StabilityPolicy};
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: one FTCS step on the 101x101 reference grid.
fn bench_ftcs_step_101(c: &mut Criterion) {
    let profile = reference_profile();
    let kernel = profile.kernel();
    let prev = profile.initial.clone();
    let mut next = profile.grid.zeros();

    c.bench_function("ftcs_step_101x101", |b| {
        b.iter(|| {
            kernel.step_into(black_box(&prev), &mut next).unwrap();
            black_box(&next);
        });
    });
}

/// Benchmark: one FTCS step on the 501x501 stress grid.
fn bench_ftcs_step_501(c: &mut Criterion) {
    let profile = stress_profile();
    let kernel = profile.kernel();
    let prev = profile.initial.clone();
    let mut next = profile.grid.zeros();

    c.bench_function("ftcs_step_501x501", |b| {
        b.iter(|| {
            kernel.step_into(black_box(&prev), &mut next).unwrap();
            black_box(&next);
        });
    });
}

/// Benchmark: Gaussian initialization including normalization.
fn bench_gaussian_init_101(c: &mut Criterion) {
    let profile = reference_profile();
    let pulse = GaussianPulse::default();

    c.bench_function("gaussian_init_101x101", |b| {
        b.iter(|| black_box(pulse.initialize(black_box(&profile.grid)).unwrap()));
    });
}

/// Benchmark: boundary re-enforcement alone.
fn bench_enforce_dirichlet_501(c: &mut Criterion) {
    let profile = stress_profile();
    let mut field = profile.initial.clone();

    c.bench_function("enforce_dirichlet_501x501", |b| {
        b.iter(|| {
            enforce_dirichlet(black_box(&mut field), 0.0);
        });
    });
}

/// Benchmark: time-step selection.
fn bench_time_step(c: &mut Criterion) {
    let policy = StabilityPolicy::default();
    c.bench_function("stability_time_step", |b| {
        b.iter(|| policy.time_step(black_box(1.0), black_box(0.01), black_box(0.01)));
    });
}

criterion_group!(
    benches,
    bench_ftcs_step_101,
    bench_ftcs_step_501,
    bench_gaussian_init_101,
    bench_enforce_dirichlet_501,
    bench_time_step
);
criterion_main!(benches);
