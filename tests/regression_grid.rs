mod common;

use blossum::ble::{VelocityGrid, generate_curve};
use common::{all_shields, impact};

#[test]
fn every_model_is_finite_and_non_negative_over_the_default_sweep() {
    let grid = VelocityGrid::default();
    for shield in all_shields() {
        for angle in [0.0, 15.0, 45.0, 60.0, 80.0] {
            let points = generate_curve(&shield, &impact(grid.start_km_s, angle), &grid)
                .unwrap_or_else(|err| panic!("{} at {angle}°: {err}", shield.name()));
            assert_eq!(points.len(), grid.samples);
            for point in points {
                assert!(
                    point.critical_diameter_cm.is_finite() && point.critical_diameter_cm >= 0.0,
                    "{} at {angle}°, {} km/s: {}",
                    shield.name(),
                    point.velocity_km_s,
                    point.critical_diameter_cm
                );
            }
        }
    }
}

#[test]
fn sweeps_are_restartable() {
    let grid = VelocityGrid {
        start_km_s: 1.0,
        end_km_s: 12.0,
        samples: 23,
    };
    for shield in all_shields() {
        let first = generate_curve(&shield, &impact(1.0, 30.0), &grid).expect("first");
        let second = generate_curve(&shield, &impact(1.0, 30.0), &grid).expect("second");
        assert_eq!(first, second, "{}", shield.name());
    }
}

#[test]
fn sweep_reports_the_failing_sample() {
    let shield = common::regime_shields().remove(0);
    let results: Vec<_> =
        blossum::ble::sweep(&shield, &impact(1.0, 0.0), [1.0, 5.0, -2.0, 9.0]).collect();
    assert!(results[0].is_ok() && results[1].is_ok() && results[3].is_ok());
    let err = results[2].as_ref().expect_err("negative velocity");
    assert_eq!(err.index, 2);
    assert_eq!(err.velocity_km_s, -2.0);
}
