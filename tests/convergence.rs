mod common;

use blossum::ble::{
    BleError, JscVariant, JscWhipple, Layer, Reimerdes, Shield, VelocityGrid, WhippleShield,
    generate_curve, sweep,
};
use blossum::solver::SolverError;
use common::impact;

fn shield(bumper_cm: f64, wall_cm: f64, standoff_cm: f64) -> WhippleShield {
    WhippleShield::new(
        Layer::new("AA6061-T6", bumper_cm, 2.71),
        Layer::new("AA2024-T3", wall_cm, 2.78).with_yield_ksi(40.0),
        standoff_cm,
    )
}

fn is_boundary_minimum(err: &BleError) -> bool {
    matches!(
        err,
        BleError::Convergence {
            source: SolverError::BoundaryMinimum { .. },
            ..
        }
    )
}

#[test]
fn reimerdes_unmatched_transition_reaches_the_caller() {
    let shield: Shield = Reimerdes {
        shield: shield(1e-4, 100.0, 10.0),
    }
    .into();
    for velocity in [1.0, 5.0, 12.0] {
        let err = shield
            .critical_diameter(&impact(velocity, 0.0))
            .expect_err("transition stuck on the window edge");
        assert!(is_boundary_minimum(&err), "{velocity} km/s: {err}");
    }
    let err = shield
        .transition_velocities(&impact(5.0, 0.0))
        .expect_err("no transition to report");
    assert!(is_boundary_minimum(&err), "{err}");
}

#[test]
fn jsc_crossing_below_the_window_reaches_the_caller() {
    let shield: Shield = JscWhipple::new(shield(1.0, 0.01, 10.0), JscVariant::Standard).into();
    let err = shield
        .critical_diameter(&impact(7.0, 0.0))
        .expect_err("crossing below the window");
    assert!(is_boundary_minimum(&err), "{err}");
}

#[test]
fn derating_jump_fails_the_sweep_at_the_first_affected_sample() {
    // tb/S = 0.22/30 puts the S/dp = 30 step of F2* inside tb/dp in [0.20, 0.25),
    // so somewhere between 7 and 15 km/s the implicit equation has no root.
    let shield: Shield = JscWhipple::new(shield(0.22, 0.676, 30.0), JscVariant::Standard).into();
    let grid = VelocityGrid {
        start_km_s: 7.0,
        end_km_s: 15.0,
        samples: 81,
    };
    let start = impact(grid.start_km_s, 0.0);

    let err = generate_curve(&shield, &start, &grid).expect_err("sweep crosses the jump");
    assert!(err.index > 0, "first sample already failed: {err}");
    let expected_velocity = grid.velocities().nth(err.index).expect("index inside grid");
    assert_eq!(err.velocity_km_s, expected_velocity);
    assert!(
        matches!(
            err.source,
            BleError::Convergence {
                source: SolverError::Discontinuity { .. },
                ..
            }
        ),
        "{err}"
    );

    let before: Vec<_> = sweep(&shield, &start, grid.velocities())
        .take(err.index)
        .collect();
    assert!(before.iter().all(Result::is_ok));
    assert!(err.to_string().contains(&format!("sample {}", err.index)));
}
