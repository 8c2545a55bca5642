//! Test fixtures and property-test strategies for Calor development.
//!
//! Provides small grids and fields with known shapes ([`fixtures`]),
//! `proptest` strategies for random interiors ([`strategies`]), and a
//! tolerance assertion used across the workspace's tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod strategies;

pub use fixtures::{interior_ramp, pulse_field, spike_field, unit_grid};

/// Assert `|actual - expected| <= tol`, printing both values on failure.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual} (diff {})",
        (actual - expected).abs()
    );
}

/// Assert every boundary point of `field` is exactly zero.
#[track_caller]
pub fn assert_zero_boundary(field: &calor_core::Field) {
    for (i, j, v) in field.boundary_values() {
        assert!(v == 0.0, "boundary point ({i}, {j}) = {v}");
    }
}
