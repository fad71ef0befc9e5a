mod common;

use blossum::ble::{Regime, evaluate_with_regime};
use common::{assert_close, impact, regime_shields};

const ANGLES: [f64; 4] = [0.0, 30.0, 60.0, 80.0];

#[test]
fn branches_meet_at_transition_velocities() {
    for shield in regime_shields() {
        let model = shield.regime_model().expect("regime model");
        for angle in ANGLES {
            let (v_low, v_high) = shield
                .transition_velocities(&impact(7.0, angle))
                .expect("transitions")
                .expect("regime shield has transitions");
            if v_low >= v_high {
                continue;
            }
            let what = format!("{} at {angle}°", shield.name());

            let (at_low, regime) =
                evaluate_with_regime(model, &impact(v_low, angle)).expect("at vLV");
            assert_eq!(regime, Regime::LowVelocity, "{what}");
            let (above_low, regime) =
                evaluate_with_regime(model, &impact(v_low * (1.0 + 1e-10), angle))
                    .expect("above vLV");
            assert_eq!(regime, Regime::Shatter, "{what}");
            assert_close(above_low, at_low, 1e-6, &format!("{what}, vLV = {v_low}"));

            let (at_high, regime) =
                evaluate_with_regime(model, &impact(v_high, angle)).expect("at vHV");
            assert_eq!(regime, Regime::Hypervelocity, "{what}");
            let (below_high, regime) =
                evaluate_with_regime(model, &impact(v_high * (1.0 - 1e-10), angle))
                    .expect("below vHV");
            assert_eq!(regime, Regime::Shatter, "{what}");
            assert_close(below_high, at_high, 1e-6, &format!("{what}, vHV = {v_high}"));
        }
    }
}

#[test]
fn shatter_regime_is_monotonic_between_endpoints() {
    for shield in regime_shields() {
        let model = shield.regime_model().expect("regime model");
        let (v_low, v_high) = shield
            .transition_velocities(&impact(7.0, 0.0))
            .expect("transitions")
            .expect("regime shield has transitions");
        if v_low >= v_high {
            continue;
        }
        let samples: Vec<f64> = (0..=20)
            .map(|i| v_low + (v_high - v_low) * i as f64 / 20.0)
            .map(|v| {
                evaluate_with_regime(model, &impact(v, 0.0))
                    .expect("shatter sample")
                    .0
            })
            .collect();
        let increasing = samples.windows(2).all(|w| w[1] >= w[0] - 1e-12);
        let decreasing = samples.windows(2).all(|w| w[1] <= w[0] + 1e-12);
        assert!(
            increasing || decreasing,
            "{}: shatter samples not monotonic: {samples:?}",
            shield.name()
        );
    }
}
