//! Shared low-velocity / shatter / hypervelocity driver.
//!
//! Every multi-regime equation supplies its transition velocities and the two
//! closed-form branches through [`RegimeModel`]; [`evaluate`] owns the obliquity
//! clamp, the regime selection and the shatter interpolation.

use blossum_core::geometry::Obliquity;

use crate::error::BleError;
use crate::inputs::ImpactCondition;

/// Velocity that a model compares against its transition velocities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocityBasis {
    /// The impact velocity itself.
    Impact,
    /// The normal component `v·cosθ`.
    Normal,
}

/// Regime boundaries of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transitions {
    pub low_km_s: f64,
    pub high_km_s: f64,
    pub basis: VelocityBasis,
}

impl Transitions {
    pub fn impact(low_km_s: f64, high_km_s: f64) -> Self {
        Self {
            low_km_s,
            high_km_s,
            basis: VelocityBasis::Impact,
        }
    }

    pub fn normal(low_km_s: f64, high_km_s: f64) -> Self {
        Self {
            low_km_s,
            high_km_s,
            basis: VelocityBasis::Normal,
        }
    }

    /// Reject a low-velocity transition above the hypervelocity one.
    ///
    /// Used by equations whose `vLV` comes from a numerical match; fixed-constant
    /// transitions may cross at grazing incidence and are evaluated as they are.
    pub fn ordered(self) -> Result<Self, BleError> {
        if self.low_km_s > self.high_km_s {
            Err(BleError::InvertedRegime {
                low_km_s: self.low_km_s,
                high_km_s: self.high_km_s,
            })
        } else {
            Ok(self)
        }
    }

    /// Both boundaries expressed as impact velocities.
    pub fn in_impact_terms(&self, obliquity: &Obliquity) -> (f64, f64) {
        match self.basis {
            VelocityBasis::Impact => (self.low_km_s, self.high_km_s),
            VelocityBasis::Normal => (self.low_km_s / obliquity.cos, self.high_km_s / obliquity.cos),
        }
    }
}

/// Velocity-independent part of an impact, after the model's obliquity clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incidence {
    pub projectile_density: f64,
    pub obliquity: Obliquity,
    /// Requested angle before clamping; a few equations switch constants on it.
    pub angle_deg: f64,
}

impl Incidence {
    pub fn new(impact: &ImpactCondition, ceiling_deg: Option<f64>) -> Self {
        Self {
            projectile_density: impact.projectile.density_g_cm3,
            obliquity: Obliquity::clamped(impact.angle_deg, ceiling_deg),
            angle_deg: impact.angle_deg,
        }
    }

    #[inline]
    pub fn cos(&self) -> f64 {
        self.obliquity.cos
    }
}

/// Which branch produced a critical diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    LowVelocity,
    Shatter,
    Hypervelocity,
}

/// A three-regime ballistic limit equation.
///
/// Branch formulas receive the impact velocity (not the normal component);
/// models working in the normal basis project it themselves.
pub trait RegimeModel {
    fn name(&self) -> &'static str;

    /// Obliquity beyond which the equation is evaluated at the ceiling instead.
    fn obliquity_ceiling_deg(&self) -> Option<f64> {
        Some(65.0)
    }

    /// Check the shield inputs this equation depends on.
    fn validate(&self) -> Result<(), BleError>;

    fn transitions(&self, incidence: &Incidence) -> Result<Transitions, BleError>;

    fn low_velocity(&self, incidence: &Incidence, velocity_km_s: f64) -> Result<f64, BleError>;

    fn hypervelocity(&self, incidence: &Incidence, velocity_km_s: f64) -> Result<f64, BleError>;

    /// Constant added to the hypervelocity branch (and to its shatter endpoint).
    fn hypervelocity_offset(&self, _incidence: &Incidence) -> f64 {
        0.0
    }
}

/// Critical diameter of `model` for one impact, with the regime that produced it.
pub fn evaluate_with_regime<M: RegimeModel + ?Sized>(
    model: &M,
    impact: &ImpactCondition,
) -> Result<(f64, Regime), BleError> {
    impact.validate()?;
    model.validate()?;

    let incidence = Incidence::new(impact, model.obliquity_ceiling_deg());
    if incidence.obliquity.degrees < impact.angle_deg {
        log::debug!(
            "{}: impact angle {}° clamped to {}°",
            model.name(),
            impact.angle_deg,
            incidence.obliquity.degrees
        );
    }

    let transitions = model.transitions(&incidence)?;
    let (v_low, v_high) = transitions.in_impact_terms(&incidence.obliquity);
    if (v_high - v_low).abs() <= f64::EPSILON * v_high.abs().max(1.0) {
        return Err(BleError::DegenerateRegime(v_low));
    }

    let v = impact.velocity_km_s;
    let (dc, regime) = if v <= v_low {
        (model.low_velocity(&incidence, v)?, Regime::LowVelocity)
    } else if v >= v_high {
        let dc = model.hypervelocity(&incidence, v)? + model.hypervelocity_offset(&incidence);
        (dc, Regime::Hypervelocity)
    } else {
        let dc_low = model.low_velocity(&incidence, v_low)?;
        let dc_high =
            model.hypervelocity(&incidence, v_high)? + model.hypervelocity_offset(&incidence);
        let dc = dc_low + (dc_high - dc_low) / (v_high - v_low) * (v - v_low);
        (dc, Regime::Shatter)
    };

    log::trace!(
        "{}: v = {v} km/s, vLV = {v_low}, vHV = {v_high}, {regime:?} -> dc = {dc}",
        model.name()
    );

    if !dc.is_finite() || dc < 0.0 {
        return Err(BleError::NonPhysical {
            model: model.name(),
            velocity_km_s: v,
            value: dc,
        });
    }
    Ok((dc, regime))
}

/// Critical diameter of `model` for one impact.
pub fn evaluate<M: RegimeModel + ?Sized>(
    model: &M,
    impact: &ImpactCondition,
) -> Result<f64, BleError> {
    evaluate_with_regime(model, impact).map(|(dc, _)| dc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::Projectile;

    /// Linear branches with fixed boundaries at 3 and 7 km/s.
    struct Ramp {
        basis: VelocityBasis,
        offset: f64,
    }

    impl RegimeModel for Ramp {
        fn name(&self) -> &'static str {
            "ramp"
        }

        fn validate(&self) -> Result<(), BleError> {
            Ok(())
        }

        fn transitions(&self, _incidence: &Incidence) -> Result<Transitions, BleError> {
            Ok(Transitions {
                low_km_s: 3.0,
                high_km_s: 7.0,
                basis: self.basis,
            })
        }

        fn low_velocity(&self, _incidence: &Incidence, v: f64) -> Result<f64, BleError> {
            Ok(1.0 / v)
        }

        fn hypervelocity(&self, _incidence: &Incidence, v: f64) -> Result<f64, BleError> {
            Ok(2.0 / v)
        }

        fn hypervelocity_offset(&self, _incidence: &Incidence) -> f64 {
            self.offset
        }
    }

    fn impact(v: f64, angle: f64) -> ImpactCondition {
        ImpactCondition::new(Projectile::aluminium(), v, angle)
    }

    #[test]
    fn shatter_is_linear_between_boundaries() {
        let model = Ramp {
            basis: VelocityBasis::Impact,
            offset: 0.1,
        };
        let (dc, regime) = evaluate_with_regime(&model, &impact(5.0, 0.0)).expect("evaluates");
        assert_eq!(regime, Regime::Shatter);
        let expected = 1.0 / 3.0 + (2.0 / 7.0 + 0.1 - 1.0 / 3.0) * 0.5;
        assert!((dc - expected).abs() < 1e-12, "dc = {dc}");
    }

    #[test]
    fn boundaries_belong_to_closed_form_branches() {
        let model = Ramp {
            basis: VelocityBasis::Impact,
            offset: 0.0,
        };
        let (_, regime) = evaluate_with_regime(&model, &impact(3.0, 0.0)).expect("evaluates");
        assert_eq!(regime, Regime::LowVelocity);
        let (_, regime) = evaluate_with_regime(&model, &impact(7.0, 0.0)).expect("evaluates");
        assert_eq!(regime, Regime::Hypervelocity);
    }

    #[test]
    fn normal_basis_scales_boundaries() {
        let model = Ramp {
            basis: VelocityBasis::Normal,
            offset: 0.0,
        };
        // 60° halves the normal velocity: 5.5 km/s impact is 2.75 normal.
        let (_, regime) = evaluate_with_regime(&model, &impact(5.5, 60.0)).expect("evaluates");
        assert_eq!(regime, Regime::LowVelocity);
        let (_, regime) = evaluate_with_regime(&model, &impact(6.5, 60.0)).expect("evaluates");
        assert_eq!(regime, Regime::Shatter);
        let (_, regime) = evaluate_with_regime(&model, &impact(14.5, 60.0)).expect("evaluates");
        assert_eq!(regime, Regime::Hypervelocity);
    }

    #[test]
    fn ordered_rejects_inverted_boundaries() {
        assert!(Transitions::normal(2.6, 7.0).ordered().is_ok());
        assert_eq!(
            Transitions::impact(9.0, 7.0).ordered(),
            Err(BleError::InvertedRegime {
                low_km_s: 9.0,
                high_km_s: 7.0
            })
        );
    }

    #[test]
    fn equal_boundaries_are_rejected() {
        struct Flat;
        impl RegimeModel for Flat {
            fn name(&self) -> &'static str {
                "flat"
            }
            fn validate(&self) -> Result<(), BleError> {
                Ok(())
            }
            fn transitions(&self, _incidence: &Incidence) -> Result<Transitions, BleError> {
                Ok(Transitions::impact(5.0, 5.0))
            }
            fn low_velocity(&self, _incidence: &Incidence, _v: f64) -> Result<f64, BleError> {
                Ok(1.0)
            }
            fn hypervelocity(&self, _incidence: &Incidence, _v: f64) -> Result<f64, BleError> {
                Ok(1.0)
            }
        }
        assert_eq!(
            evaluate(&Flat, &impact(4.0, 0.0)),
            Err(BleError::DegenerateRegime(5.0))
        );
    }

    #[test]
    fn negative_result_is_non_physical() {
        let model = Ramp {
            basis: VelocityBasis::Impact,
            offset: -5.0,
        };
        let err = evaluate(&model, &impact(9.0, 0.0)).expect_err("negative diameter");
        assert!(matches!(err, BleError::NonPhysical { model: "ramp", .. }));
    }
}
