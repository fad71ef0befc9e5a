//! Multi-shock shields: four Nextel bumpers over a fabric or aluminium rear wall
//! (Christiansen 2003) and the hybrid Nextel/aluminium configuration (Ryan 2009).

use crate::error::{BleError, require_non_negative, require_positive};
use crate::inputs::Layer;
use crate::regime::{Incidence, RegimeModel, Transitions};

const CL: f64 = 0.37;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiShockKind {
    /// Nextel fabric rear wall.
    NextelWall,
    /// Kevlar fabric rear wall.
    KevlarWall,
    AluminumWall,
    /// Two Nextel bumpers and an aluminium bumper ahead of an aluminium wall.
    Hybrid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiShock {
    pub kind: MultiShockKind,
    /// Total areal density of the bumpers (g/cm²).
    pub bumper_areal_density: f64,
    /// Rear wall; yield strength required for aluminium walls.
    pub wall: Layer,
    pub standoff_cm: f64,
}

impl MultiShock {
    fn is_fabric(&self) -> bool {
        matches!(
            self.kind,
            MultiShockKind::NextelWall | MultiShockKind::KevlarWall
        )
    }
}

impl RegimeModel for MultiShock {
    fn name(&self) -> &'static str {
        match self.kind {
            MultiShockKind::NextelWall => "multi-shock (Nextel wall)",
            MultiShockKind::KevlarWall => "multi-shock (Kevlar wall)",
            MultiShockKind::AluminumWall => "multi-shock (aluminium wall)",
            MultiShockKind::Hybrid => "hybrid multi-shock",
        }
    }

    fn obliquity_ceiling_deg(&self) -> Option<f64> {
        match self.kind {
            MultiShockKind::Hybrid => Some(75.0),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), BleError> {
        require_non_negative("bumper areal density", self.bumper_areal_density)?;
        self.wall.validate("rear wall")?;
        if !self.is_fabric() {
            self.wall.yield_strength("rear wall")?;
        }
        require_positive("standoff", self.standoff_cm)?;
        Ok(())
    }

    fn transitions(&self, incidence: &Incidence) -> Result<Transitions, BleError> {
        let c = incidence.cos();
        Ok(match self.kind {
            MultiShockKind::Hybrid => Transitions::impact(2.7 / c.sqrt(), 6.5 / c.powf(2.0 / 3.0)),
            _ => Transitions::impact(2.4 / c.sqrt(), 6.4 / c.powf(0.25)),
        })
    }

    fn low_velocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let (coefficient, wall_term, cos_exponent) = match self.kind {
            MultiShockKind::NextelWall | MultiShockKind::KevlarWall => {
                (2.7, 0.5 * self.wall.areal_density(), 4.0 / 3.0)
            }
            MultiShockKind::AluminumWall | MultiShockKind::Hybrid => {
                let sigma = self.wall.yield_strength("rear wall")?;
                let wall_term = self.wall.thickness_cm * (sigma / 40.0).sqrt();
                let cos_exponent = match self.kind {
                    MultiShockKind::Hybrid if incidence.angle_deg <= 45.0 => 7.0 / 3.0,
                    MultiShockKind::Hybrid => 2.0,
                    _ => 4.0 / 3.0,
                };
                (2.0, wall_term, cos_exponent)
            }
        };
        Ok(coefficient * (wall_term + CL * self.bumper_areal_density)
            / (incidence.obliquity.cos_pow(cos_exponent)
                * incidence.projectile_density.sqrt()
                * v.powf(2.0 / 3.0)))
    }

    fn hypervelocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let rho_p = incidence.projectile_density;
        let c = incidence.cos();
        let s = self.standoff_cm;
        let wall_ad = self.wall.areal_density();
        Ok(match self.kind {
            MultiShockKind::NextelWall | MultiShockKind::KevlarWall => {
                let kh: f64 = if self.kind == MultiShockKind::NextelWall {
                    43.6
                } else {
                    29.0
                };
                1.24 * wall_ad.cbrt() * s.powf(2.0 / 3.0)
                    / (kh.cbrt() * rho_p.cbrt() * v.cbrt() * c.cbrt())
            }
            MultiShockKind::AluminumWall => {
                let sigma = self.wall.yield_strength("rear wall")?;
                0.358 * wall_ad.cbrt() * (sigma / 40.0).powf(1.0 / 6.0) * s.powf(2.0 / 3.0)
                    / (rho_p.cbrt() * v.cbrt() * c.cbrt())
            }
            MultiShockKind::Hybrid => {
                let sigma = self.wall.yield_strength("rear wall")?;
                2.15 * wall_ad.powf(2.0 / 3.0) * (sigma / 40.0).cbrt() * s.cbrt()
                    / (c.powf(2.0 / 3.0) * rho_p.cbrt() * v.powf(2.0 / 3.0))
            }
        })
    }
}
