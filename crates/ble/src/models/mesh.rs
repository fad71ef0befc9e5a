//! Mesh double-bumper shield (Christiansen & Kerr 1993).

use crate::error::{BleError, require_non_negative, require_positive};
use crate::inputs::Layer;
use crate::regime::{Incidence, RegimeModel, Transitions};

/// Aluminium mesh, aluminium bumper, Kevlar cloth and rear wall.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDoubleBumper {
    pub mesh_areal_density: f64,
    pub bumper: Layer,
    pub kevlar_areal_density: f64,
    pub wall: Layer,
    pub standoff_cm: f64,
}

impl MeshDoubleBumper {
    pub fn bumper_areal_density(&self) -> f64 {
        self.mesh_areal_density + self.bumper.areal_density() + self.kevlar_areal_density
    }
}

impl RegimeModel for MeshDoubleBumper {
    fn name(&self) -> &'static str {
        "mesh double bumper"
    }

    fn obliquity_ceiling_deg(&self) -> Option<f64> {
        None
    }

    fn validate(&self) -> Result<(), BleError> {
        require_non_negative("mesh areal density", self.mesh_areal_density)?;
        require_non_negative("Kevlar areal density", self.kevlar_areal_density)?;
        self.bumper.validate("bumper")?;
        self.wall.validate("rear wall")?;
        self.wall.yield_strength("rear wall")?;
        require_positive("standoff", self.standoff_cm)?;
        Ok(())
    }

    fn transitions(&self, incidence: &Incidence) -> Result<Transitions, BleError> {
        let c = incidence.cos();
        Ok(Transitions::impact(2.8 / c.sqrt(), 6.4 / c.cbrt()))
    }

    fn low_velocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let sigma = self.wall.yield_strength("rear wall")?;
        let strength =
            self.wall.thickness_cm * (sigma / 40.0).sqrt() + 0.37 * self.bumper_areal_density();
        Ok(2.2 * strength
            / (incidence.obliquity.cos_pow(5.0 / 3.0)
                * incidence.projectile_density.sqrt()
                * v.powf(2.0 / 3.0)))
    }

    fn hypervelocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let sigma = self.wall.yield_strength("rear wall")?;
        Ok(0.6
            * self.wall.areal_density().cbrt()
            * self.standoff_cm.sqrt()
            * (sigma / 40.0).powf(1.0 / 6.0)
            / (incidence.projectile_density.cbrt() * v.cbrt() * incidence.cos().cbrt()))
    }
}
