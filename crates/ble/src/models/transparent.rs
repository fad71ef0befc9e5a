//! Windows: fused silica and quartz (Cour-Palais 1987) and polycarbonate
//! (Christiansen & Burt 2003).

use blossum_core::geometry::Obliquity;

use crate::error::{BleError, require_positive};
use crate::inputs::ImpactCondition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransparentMaterial {
    FusedSilica,
    Quartz,
    Polycarbonate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransparentFailure {
    Perforation,
    DetachedSpall,
    IncipientSpall,
    /// Crater/spall diameter limit on the front surface (cm).
    SurfaceDamage { max_damage_diameter_cm: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransparentWall {
    pub material: TransparentMaterial,
    pub failure: TransparentFailure,
    pub thickness_cm: f64,
}

impl TransparentWall {
    pub fn name(&self) -> &'static str {
        match self.material {
            TransparentMaterial::FusedSilica => "transparent (fused silica)",
            TransparentMaterial::Quartz => "transparent (quartz)",
            TransparentMaterial::Polycarbonate => "transparent (polycarbonate)",
        }
    }

    pub fn validate(&self) -> Result<(), BleError> {
        require_positive("window thickness", self.thickness_cm)?;
        if let TransparentFailure::SurfaceDamage {
            max_damage_diameter_cm,
        } = self.failure
        {
            if self.material == TransparentMaterial::Polycarbonate {
                return Err(BleError::Unsupported {
                    category: "failure mode",
                    value: "surface damage for polycarbonate".to_string(),
                });
            }
            require_positive("maximum damage diameter", max_damage_diameter_cm)?;
        }
        Ok(())
    }

    pub fn critical_diameter(&self, impact: &ImpactCondition) -> Result<f64, BleError> {
        impact.validate()?;
        self.validate()?;

        let rho_p = impact.projectile.density_g_cm3;
        let v = impact.velocity_km_s;
        let obliquity = Obliquity::clamped(impact.angle_deg, None);
        let glass = self.material != TransparentMaterial::Polycarbonate;

        let dc = match self.failure {
            TransparentFailure::SurfaceDamage {
                max_damage_diameter_cm,
            } => {
                let k1 = if self.material == TransparentMaterial::FusedSilica {
                    30.9
                } else {
                    15.1
                };
                (max_damage_diameter_cm
                    / (k1 * rho_p.powf(0.44) * obliquity.normal(v).powf(0.44)))
                .powf(1.0 / 1.33)
            }
            mode => {
                let k = match (glass, mode) {
                    (true, TransparentFailure::Perforation) => 2.0,
                    (true, TransparentFailure::DetachedSpall) => 3.0,
                    (true, _) => 7.0,
                    (false, TransparentFailure::Perforation) => 1.0 / 1.04,
                    (false, TransparentFailure::DetachedSpall) => 1.0 / 0.98,
                    (false, _) => 1.0 / 0.65,
                };
                let (q, alpha, beta, gamma) = match self.material {
                    TransparentMaterial::FusedSilica => (1.89, 0.5, 2.0 / 3.0, 18.0 / 19.0),
                    TransparentMaterial::Quartz => (1.32, 0.5, 2.0 / 3.0, 18.0 / 19.0),
                    TransparentMaterial::Polycarbonate => (1.0, 1.0 / 3.0, 1.0 / 3.0, 1.0),
                };
                (q * self.thickness_cm
                    / (k * rho_p.powf(alpha) * v.powf(2.0 / 3.0) * obliquity.cos_pow(beta)))
                .powf(gamma)
            }
        };

        if !dc.is_finite() || dc < 0.0 {
            return Err(BleError::NonPhysical {
                model: self.name(),
                velocity_km_s: v,
                value: dc,
            });
        }
        Ok(dc)
    }
}
