//! MLI blankets over a thin rear wall: the baseline and toughened blankets
//! (Christiansen 2009) and the enhanced blanket (Christiansen & Lear 2015).

use std::f64::consts::PI;

use blossum_solver::{DEFAULT_MAX_ITERATIONS, newton};

use crate::error::{BleError, require_non_negative, require_positive};
use crate::inputs::Layer;
use crate::regime::{Incidence, RegimeModel, Transitions};

const NEWTON_GUESS_CM: f64 = 0.5;
const NEWTON_TOLERANCE: f64 = 1.48e-8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MliKind {
    /// 0.188 g/cm² aluminised Mylar/Kapton blanket.
    Baseline,
    /// Baseline with Nextel and Kevlar layers added.
    Toughened,
    /// Beta cloth, MLI, foam and Spectra absorber layers.
    Enhanced,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MliBlanket {
    pub kind: MliKind,
    pub bumper_areal_density: f64,
    pub wall: Layer,
    pub mli_areal_density: f64,
    /// Overall shield thickness, required by the enhanced blanket.
    pub total_thickness_cm: Option<f64>,
}

impl MliBlanket {
    fn enhanced_hypervelocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let thickness = self
            .total_thickness_cm
            .ok_or_else(|| BleError::MissingField("enhanced MLI total thickness".to_string()))?;
        let rho_p = incidence.projectile_density;
        let vn = incidence.obliquity.normal(v);
        let effective_mass =
            self.bumper_areal_density + self.wall.areal_density() + 0.25 * self.mli_areal_density;
        let a = 29.0 * PI / 6.0 * rho_p * vn / thickness.powi(2);

        let f = |x: f64| a * x.powi(3) + 0.185 * x * rho_p - effective_mass;
        let df = |x: f64| 3.0 * a * x.powi(2) + 0.185;
        let solution = newton(f, df, NEWTON_GUESS_CM, NEWTON_TOLERANCE, DEFAULT_MAX_ITERATIONS)
            .map_err(BleError::convergence("enhanced MLI critical diameter"))?;
        Ok(solution.x)
    }
}

impl RegimeModel for MliBlanket {
    fn name(&self) -> &'static str {
        match self.kind {
            MliKind::Baseline => "MLI (baseline)",
            MliKind::Toughened => "MLI (toughened)",
            MliKind::Enhanced => "MLI (enhanced)",
        }
    }

    fn obliquity_ceiling_deg(&self) -> Option<f64> {
        None
    }

    fn validate(&self) -> Result<(), BleError> {
        require_non_negative("bumper areal density", self.bumper_areal_density)?;
        require_non_negative("MLI areal density", self.mli_areal_density)?;
        self.wall.validate("rear wall")?;
        match (self.kind, self.total_thickness_cm) {
            (MliKind::Enhanced, None) => Err(BleError::MissingField(
                "enhanced MLI total thickness".to_string(),
            )),
            (_, Some(thickness)) => require_positive("total thickness", thickness).map(|_| ()),
            _ => Ok(()),
        }
    }

    fn transitions(&self, incidence: &Incidence) -> Result<Transitions, BleError> {
        let c = incidence.cos();
        Ok(match self.kind {
            MliKind::Baseline => Transitions::impact(2.5 / c, 6.0 / c.sqrt()),
            MliKind::Toughened => Transitions::impact(2.5 / c, 6.2 / c.powf(0.25)),
            MliKind::Enhanced => Transitions::impact(2.4 / c.sqrt(), 6.4 / c.powf(0.25)),
        })
    }

    fn low_velocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let (kl, wall_term) = match self.kind {
            MliKind::Baseline | MliKind::Toughened => (1.7, self.wall.thickness_cm),
            MliKind::Enhanced => (2.7, 0.5 * self.wall.areal_density()),
        };
        Ok(kl * (wall_term + 0.37 * self.bumper_areal_density)
            / (incidence.obliquity.cos_pow(4.0 / 3.0)
                * incidence.projectile_density.sqrt()
                * v.powf(2.0 / 3.0)))
    }

    fn hypervelocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let kh = match self.kind {
            MliKind::Baseline => 2.9,
            MliKind::Toughened => 1.34,
            MliKind::Enhanced => return self.enhanced_hypervelocity(incidence, v),
        };
        Ok(kh * self.wall.thickness_cm.powf(2.0 / 3.0)
            / (incidence.projectile_density.cbrt()
                * v.powf(2.0 / 3.0)
                * incidence.obliquity.cos_pow(2.0 / 3.0)))
    }
}
