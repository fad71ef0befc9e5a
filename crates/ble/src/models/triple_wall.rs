//! Triple-wall SRL equation (Schäfer et al. 2008).

use blossum_core::constants::REFERENCE_DENSITY_G_CM3;

use crate::error::{BleError, require_non_negative, require_positive};
use crate::inputs::{Layer, external_mli_thickness};
use crate::models::sandwich::{BumperClass, srl_obliquity_exponent};
use crate::regime::{Incidence, RegimeModel, Transitions};

/// Outer bumper, inner bumper and rear wall.
#[derive(Debug, Clone, PartialEq)]
pub struct TripleWall {
    pub outer_bumper: Layer,
    pub outer_class: BumperClass,
    pub inner_bumper: Layer,
    pub inner_class: BumperClass,
    /// Rear wall; yield strength required.
    pub wall: Layer,
    /// Outer bumper to inner bumper.
    pub outer_standoff_cm: f64,
    /// Inner bumper to rear wall.
    pub inner_standoff_cm: f64,
    pub mli_areal_density: f64,
}

/// Outer-bumper-dependent constants.
struct OuterTerms {
    thickness: f64,
    low: f64,
    high: f64,
    k3s: f64,
    ks2: f64,
    ktw: f64,
    beta: f64,
    delta: f64,
    epsilon: f64,
    gamma: f64,
}

impl TripleWall {
    fn outer(&self, incidence: &Incidence) -> OuterTerms {
        if self.outer_class == BumperClass::Cfrp {
            return OuterTerms {
                thickness: external_mli_thickness(
                    self.outer_bumper.reference_thickness(),
                    self.mli_areal_density,
                ),
                low: 4.2,
                high: 8.4,
                k3s: 1.1,
                ks2: 1.0,
                ktw: 1.0,
                beta: 1.0 / 3.0,
                delta: 4.0 / 3.0,
                epsilon: 0.0,
                gamma: 2.0 / 3.0,
            };
        }
        let delta = srl_obliquity_exponent(incidence.obliquity.degrees);
        OuterTerms {
            thickness: external_mli_thickness(self.outer_bumper.thickness_cm, self.mli_areal_density),
            low: 3.0,
            high: 7.0,
            k3s: 1.4,
            ks2: 0.1,
            ktw: 1.5,
            beta: 2.0 / 3.0,
            delta,
            // 8/3 alongside 4/3, 10/4 alongside 5/4
            epsilon: 2.0 * delta,
            gamma: 1.0 / 3.0,
        }
    }

    /// Inner bumper density and thickness.
    fn inner(&self) -> (f64, f64) {
        match self.inner_class {
            BumperClass::Cfrp => (
                REFERENCE_DENSITY_G_CM3,
                self.inner_bumper.reference_thickness(),
            ),
            _ => (self.inner_bumper.density_g_cm3, self.inner_bumper.thickness_cm),
        }
    }
}

impl RegimeModel for TripleWall {
    fn name(&self) -> &'static str {
        "triple wall"
    }

    fn validate(&self) -> Result<(), BleError> {
        self.outer_bumper.validate("outer bumper")?;
        self.inner_bumper.validate("inner bumper")?;
        self.wall.validate("rear wall")?;
        self.wall.yield_strength("rear wall")?;
        require_positive("outer standoff", self.outer_standoff_cm)?;
        require_positive("inner standoff", self.inner_standoff_cm)?;
        require_non_negative("MLI areal density", self.mli_areal_density)?;
        Ok(())
    }

    fn transitions(&self, incidence: &Incidence) -> Result<Transitions, BleError> {
        let outer = self.outer(incidence);
        let c = incidence.cos();
        Ok(Transitions::impact(outer.low / c, outer.high / c))
    }

    fn low_velocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let sigma = self.wall.yield_strength("rear wall")?;
        let outer = self.outer(incidence);
        let (_, tb) = self.inner();
        let strength =
            (self.wall.thickness_cm.sqrt() + tb) / outer.k3s * (sigma / 40.0).sqrt() + outer.thickness;
        let resistance = 0.6
            * incidence.obliquity.cos_pow(outer.delta)
            * incidence.projectile_density.sqrt()
            * v.powf(2.0 / 3.0);
        Ok((strength / resistance).powf(18.0 / 19.0))
    }

    fn hypervelocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let sigma = self.wall.yield_strength("rear wall")?;
        let outer = self.outer(incidence);
        let (rho_b, tb) = self.inner();
        let tw = self.wall.thickness_cm;
        let spacing = self.outer_standoff_cm.cbrt() * (tb + outer.ktw * tw).powf(2.0 / 3.0)
            + outer.ks2
                * self.inner_standoff_cm.powf(outer.beta)
                * tw.powf(outer.gamma)
                * incidence.obliquity.cos_pow(-outer.epsilon);
        let numerator = 1.155 * spacing * (sigma / 70.0).cbrt();
        let denominator = 0.4_f64.powf(2.0 / 3.0)
            * incidence.projectile_density.cbrt()
            * rho_b.powf(1.0 / 9.0)
            * v.powf(2.0 / 3.0)
            * incidence.obliquity.cos_pow(outer.delta);
        Ok(numerator / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{ImpactCondition, Projectile};
    use crate::regime::evaluate;

    fn shield(outer_class: BumperClass) -> TripleWall {
        TripleWall {
            outer_bumper: Layer::new("AA6061-T6", 0.1, 2.71),
            outer_class,
            inner_bumper: Layer::new("AA6061-T6", 0.1, 2.71),
            inner_class: BumperClass::Metallic,
            wall: Layer::new("AA2024-T3", 0.2, 2.78).with_yield_ksi(47.0),
            outer_standoff_cm: 5.0,
            inner_standoff_cm: 5.0,
            mli_areal_density: 0.0,
        }
    }

    #[test]
    fn epsilon_follows_delta_band() {
        let model = shield(BumperClass::Metallic);
        let impact = ImpactCondition::new(Projectile::aluminium(), 7.0, 50.0);
        let incidence = Incidence::new(&impact, model.obliquity_ceiling_deg());
        let outer = model.outer(&incidence);
        assert_eq!(outer.delta, 5.0 / 4.0);
        assert_eq!(outer.epsilon, 10.0 / 4.0);
    }

    #[test]
    fn angle_beyond_ceiling_is_clamped() {
        let model = shield(BumperClass::Cfrp);
        let at_ceiling = evaluate(&model, &ImpactCondition::new(Projectile::aluminium(), 9.0, 65.0));
        let beyond = evaluate(&model, &ImpactCondition::new(Projectile::aluminium(), 9.0, 80.0));
        assert_eq!(at_ceiling.expect("ceiling"), beyond.expect("beyond"));
    }
}
