//! Property tests over whole runs.

use calor_core::Field;
use calor_engine::{CollectingSampler, Simulator};
use calor_propagators::{FieldInitializer, GaussianPulse, StabilityPolicy};
use calor_test_utils::strategies::{grid_and_field, safety};
use calor_test_utils::{assert_zero_boundary, unit_grid};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sample_count_follows_cadence(
        (grid, u0) in grid_and_field(1.0),
        steps in 0u64..40,
        every in 1u64..8,
    ) {
        let dt = StabilityPolicy::default().time_step_for(1.0, &grid).unwrap();
        let mut sim = Simulator::new(u0, 1.0, dt, &grid).unwrap();
        let mut samples = CollectingSampler::new();
        // Half a step past the target keeps t_end positive when steps == 0.
        let t_end = (steps as f64 + 0.5) * dt;
        let (last, report) = sim.run(t_end, every, &mut samples).unwrap();

        prop_assert_eq!(report.steps, steps);
        prop_assert_eq!(report.samples, 1 + steps / every);
        prop_assert_eq!(samples.states().len() as u64, report.samples);
        prop_assert_eq!(last.step.0, steps);
        for s in samples.states() {
            prop_assert_eq!(s.step.0 % every, 0);
            assert_zero_boundary(&s.field);
        }
    }

    #[test]
    fn stable_runs_stay_finite_and_bounded(
        (grid, u0) in grid_and_field(100.0),
        s in safety(),
        k in 0.01f64..5.0,
    ) {
        let dt = StabilityPolicy::new(s).unwrap().time_step_for(k, &grid).unwrap();
        let peak = u0.max();
        let mut sim = Simulator::new(u0, k, dt, &grid).unwrap();
        let (last, _) = sim.run(25.0 * dt, 5, &mut CollectingSampler::new()).unwrap();

        prop_assert!(last.field.first_non_finite().is_none());
        prop_assert!(last.max() <= peak * (1.0 + 1e-12));
        prop_assert!(last.field.min() >= -1e-12 * peak.max(1.0));
    }

    #[test]
    fn pulse_mass_is_one_then_decays(sigma in 0.05f64..0.3, n in 11usize..41) {
        let grid = unit_grid(n);
        let u0 = GaussianPulse::new(0.5, 0.5, sigma).unwrap().initialize(&grid).unwrap();
        let dt = StabilityPolicy::default().time_step_for(1.0, &grid).unwrap();
        let mut sim = Simulator::new(u0, 1.0, dt, &grid).unwrap();
        prop_assert!((sim.mass() - 1.0).abs() < 1e-9);

        let mut prev = sim.mass();
        for _ in 0..10 {
            sim.step_once().unwrap();
            prop_assert!(sim.mass() <= prev + 1e-12);
            prev = sim.mass();
        }
    }
}

#[test]
fn final_state_matches_manual_kernel_loop() {
    let grid = unit_grid(15);
    let u0 = GaussianPulse::new(0.3, 0.6, 0.12)
        .unwrap()
        .initialize(&grid)
        .unwrap();
    let dt = StabilityPolicy::default().time_step_for(2.0, &grid).unwrap();

    let mut manual: Field = u0.clone();
    let kernel = calor_propagators::FtcsKernel::new(2.0, dt, &grid).unwrap();
    for _ in 0..12 {
        manual = kernel.step(&manual).unwrap();
    }

    let mut sim = Simulator::new(u0, 2.0, dt, &grid).unwrap();
    let (last, _) = sim.run(12.0 * dt, 12, &mut CollectingSampler::new()).unwrap();
    assert_eq!(last.field, manual);
}
