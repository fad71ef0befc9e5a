//! Aluminium Whipple shields: the NNO equation, its 2001 modification and the
//! shared geometry used by the JSC Whipple and Reimerdes equations.

use std::f64::consts::PI;

use blossum_core::geometry::Obliquity;

use crate::error::{BleError, require_positive};
use crate::inputs::{ImpactCondition, Layer, MliPlacement};
use crate::regime::{Incidence, RegimeModel, Transitions};

/// Bumper, standoff and rear wall.
#[derive(Debug, Clone, PartialEq)]
pub struct WhippleShield {
    pub bumper: Layer,
    /// Rear wall; its yield strength is required.
    pub wall: Layer,
    pub standoff_cm: f64,
    pub mli: MliPlacement,
}

impl WhippleShield {
    pub fn new(bumper: Layer, wall: Layer, standoff_cm: f64) -> Self {
        Self {
            bumper,
            wall,
            standoff_cm,
            mli: MliPlacement::None,
        }
    }

    pub fn with_mli(mut self, mli: MliPlacement) -> Self {
        self.mli = mli;
        self
    }

    pub fn validate(&self) -> Result<(), BleError> {
        self.bumper.validate("bumper")?;
        self.wall.validate("rear wall")?;
        self.wall.yield_strength("rear wall")?;
        require_positive("standoff", self.standoff_cm)?;
        self.mli.validate()
    }

    pub(crate) fn reject_mli(&self, model: &str) -> Result<(), BleError> {
        if self.mli == MliPlacement::None {
            Ok(())
        } else {
            Err(BleError::Unsupported {
                category: "MLI placement",
                value: format!("{:?} on a {model} shield", self.mli),
            })
        }
    }

    pub(crate) fn wall_yield(&self) -> Result<f64, BleError> {
        self.wall.yield_strength("rear wall")
    }

    /// Bumper thickness including an external blanket.
    pub fn effective_bumper_thickness(&self) -> f64 {
        self.mli.effective_bumper_thickness(self.bumper.thickness_cm)
    }

    /// Cour-Palais low-velocity term shared by the NNO and JSC equations.
    pub(crate) fn cour_palais_low_velocity(
        &self,
        incidence: &Incidence,
        velocity_km_s: f64,
    ) -> Result<f64, BleError> {
        let sigma = self.wall_yield()?;
        let strength =
            self.wall.thickness_cm * (sigma / 40.0).sqrt() + self.effective_bumper_thickness();
        let resistance = 0.6
            * incidence.obliquity.cos_pow(5.0 / 3.0)
            * incidence.projectile_density.sqrt()
            * velocity_km_s.powf(2.0 / 3.0);
        Ok((strength / resistance).powf(18.0 / 19.0))
    }

    /// NNO hypervelocity diameter, which is also `K` of the implicit JSC solve.
    pub(crate) fn nno_hypervelocity(
        &self,
        incidence: &Incidence,
        velocity_km_s: f64,
    ) -> Result<f64, BleError> {
        let sigma = self.wall_yield()?;
        let numerator = 3.918
            * self.wall.thickness_cm.powf(2.0 / 3.0)
            * self.standoff_cm.cbrt()
            * (sigma / 70.0).cbrt();
        let denominator = incidence.projectile_density.cbrt()
            * self.bumper.density_g_cm3.powf(1.0 / 9.0)
            * incidence.obliquity.normal(velocity_km_s).powf(2.0 / 3.0);
        Ok(numerator / denominator)
    }

    pub(crate) fn mli_offset(&self) -> f64 {
        self.mli.hypervelocity_offset(self.standoff_cm)
    }
}

/// Original NNO Whipple equation (Christiansen 1993).
#[derive(Debug, Clone, PartialEq)]
pub struct NnoWhipple {
    pub shield: WhippleShield,
}

impl RegimeModel for NnoWhipple {
    fn name(&self) -> &'static str {
        "NNO Whipple"
    }

    fn validate(&self) -> Result<(), BleError> {
        self.shield.validate()
    }

    fn transitions(&self, incidence: &Incidence) -> Result<Transitions, BleError> {
        let c = incidence.cos();
        let low = if self.shield.mli.is_internal() { 2.0 } else { 3.0 };
        Ok(Transitions::impact(low / c, 7.0 / c))
    }

    fn low_velocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        self.shield.cour_palais_low_velocity(incidence, v)
    }

    fn hypervelocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        self.shield.nno_hypervelocity(incidence, v)
    }

    fn hypervelocity_offset(&self, _incidence: &Incidence) -> f64 {
        self.shield.mli_offset()
    }
}

/// Modified NNO equation (Christiansen & Kerr 2001).
#[derive(Debug, Clone, PartialEq)]
pub struct ModifiedNno {
    pub shield: WhippleShield,
}

impl ModifiedNno {
    fn hypervelocity_coefficient(&self) -> f64 {
        let ratio = self.shield.bumper.thickness_cm
            / (self.shield.wall.thickness_cm.powf(2.0 / 3.0) * self.shield.standoff_cm.cbrt());
        if ratio < 0.126 {
            1.35
        } else {
            7.451 * ratio + 0.411
        }
    }
}

impl RegimeModel for ModifiedNno {
    fn name(&self) -> &'static str {
        "modified NNO"
    }

    fn validate(&self) -> Result<(), BleError> {
        self.shield.validate()?;
        require_positive("rear wall thickness", self.shield.wall.thickness_cm)?;
        self.shield.reject_mli(self.name())
    }

    fn transitions(&self, incidence: &Incidence) -> Result<Transitions, BleError> {
        let c = incidence.cos();
        Ok(Transitions::impact(3.0 / c.powf(1.5), 7.0 / c))
    }

    fn low_velocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let sigma = self.shield.wall_yield()?;
        let bumper = &self.shield.bumper;
        let strength = self.shield.wall.thickness_cm * (sigma / 40.0).sqrt()
            + 0.37 * bumper.thickness_cm * bumper.density_g_cm3;
        Ok(1.9 * strength
            / (incidence.obliquity.cos_pow(11.0 / 6.0)
                * incidence.projectile_density.sqrt()
                * v.powf(2.0 / 3.0)))
    }

    fn hypervelocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let sigma = self.shield.wall_yield()?;
        let wall = &self.shield.wall;
        let numerator = self.hypervelocity_coefficient()
            * wall.areal_density().powf(2.0 / 3.0)
            * self.shield.standoff_cm.sqrt()
            * (sigma / 70.0).cbrt();
        let denominator = incidence.projectile_density.cbrt()
            * self.shield.bumper.density_g_cm3.powf(1.0 / 9.0)
            * incidence.obliquity.normal(v).powf(2.0 / 3.0);
        Ok(numerator / denominator)
    }
}

/// Bumper and rear wall thickness sized by the NNO design equations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NnoSizing {
    pub bumper_thickness_cm: f64,
    pub wall_thickness_cm: f64,
}

/// Size a Whipple shield that just stops a projectile of the given diameter.
pub fn nno_design(
    projectile_diameter_cm: f64,
    impact: &ImpactCondition,
    bumper_density: f64,
    wall_yield_ksi: f64,
    standoff_cm: f64,
) -> Result<NnoSizing, BleError> {
    impact.validate()?;
    let dp = require_positive("projectile diameter", projectile_diameter_cm)?;
    let rho_b = require_positive("bumper density", bumper_density)?;
    let sigma = require_positive("rear wall yield strength", wall_yield_ksi)?;
    let standoff = require_positive("standoff", standoff_cm)?;

    let rho_p = impact.projectile.density_g_cm3;
    let obliquity = Obliquity::clamped(impact.angle_deg, Some(65.0));
    let cb = if standoff / dp < 30.0 { 0.25 } else { 0.2 };

    let bumper_thickness_cm = cb * dp * rho_p / rho_b;
    let wall_thickness_cm = 0.16
        * dp.sqrt()
        * (rho_p * rho_b).powf(1.0 / 6.0)
        * (PI / 6.0 * dp.powi(3) * rho_p).cbrt()
        * (obliquity.normal(impact.velocity_km_s) / standoff.sqrt())
        * (70.0 / sigma).sqrt();

    Ok(NnoSizing {
        bumper_thickness_cm,
        wall_thickness_cm,
    })
}
