//! Nextel/Kevlar stuffed Whipple shield (Christiansen & Kerr 2001).

use crate::error::{BleError, require_non_negative, require_positive};
use crate::inputs::{Layer, external_mli_thickness};
use crate::regime::{Incidence, RegimeModel, Transitions};

const KL: f64 = 2.35;
const CL: f64 = 0.37;

#[derive(Debug, Clone, PartialEq)]
pub struct StuffedWhipple {
    pub bumper: Layer,
    pub wall: Layer,
    pub standoff_cm: f64,
    pub kevlar_areal_density: f64,
    pub nextel_areal_density: f64,
    /// External blanket, folded into the bumper thickness.
    pub mli_areal_density: f64,
}

impl StuffedWhipple {
    fn stuffing(&self) -> f64 {
        self.kevlar_areal_density + self.nextel_areal_density
    }

    /// Bumper plus stuffing areal density.
    pub fn bumper_areal_density(&self) -> f64 {
        let tb_tot = external_mli_thickness(self.bumper.thickness_cm, self.mli_areal_density);
        tb_tot * self.bumper.density_g_cm3 + self.stuffing()
    }

    fn hypervelocity_coefficient(&self) -> f64 {
        let shield = self.bumper_areal_density() + self.wall.areal_density();
        let stuffing = self.stuffing();
        if stuffing >= 0.1 * shield && stuffing <= 0.15 * shield {
            0.45
        } else {
            0.6
        }
    }
}

impl RegimeModel for StuffedWhipple {
    fn name(&self) -> &'static str {
        "stuffed Whipple"
    }

    fn obliquity_ceiling_deg(&self) -> Option<f64> {
        None
    }

    fn validate(&self) -> Result<(), BleError> {
        self.bumper.validate("bumper")?;
        self.wall.validate("rear wall")?;
        self.wall.yield_strength("rear wall")?;
        require_positive("standoff", self.standoff_cm)?;
        require_non_negative("Kevlar areal density", self.kevlar_areal_density)?;
        require_non_negative("Nextel areal density", self.nextel_areal_density)?;
        require_non_negative("MLI areal density", self.mli_areal_density)?;
        Ok(())
    }

    fn transitions(&self, incidence: &Incidence) -> Result<Transitions, BleError> {
        let c = incidence.cos();
        Ok(Transitions::impact(2.6 / c.sqrt(), 6.5 / c.powf(0.75)))
    }

    fn low_velocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let sigma = self.wall.yield_strength("rear wall")?;
        Ok(KL
            * v.powf(-2.0 / 3.0)
            * incidence.obliquity.cos_pow(-4.0 / 3.0)
            * incidence.projectile_density.powf(-0.5)
            * (self.wall.thickness_cm * (sigma / 40.0).sqrt() + CL * self.bumper_areal_density()))
    }

    fn hypervelocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let sigma = self.wall.yield_strength("rear wall")?;
        Ok(self.hypervelocity_coefficient()
            * self.wall.areal_density().cbrt()
            * incidence.projectile_density.powf(-1.0 / 3.0)
            * v.powf(-1.0 / 3.0)
            * incidence.obliquity.cos_pow(-0.5)
            * self.standoff_cm.powf(2.0 / 3.0)
            * (sigma / 40.0).powf(1.0 / 6.0))
    }
}
