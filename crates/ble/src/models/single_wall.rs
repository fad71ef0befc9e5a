//! Monolithic walls: Cour-Palais/Christiansen metallic equations (Christiansen 1991,
//! Ratliff 2008) and the Schäfer (2004) composite equations. Closed form, no regimes.

use blossum_core::geometry::Obliquity;

use crate::error::{BleError, require_non_negative, require_positive};
use crate::inputs::{ImpactCondition, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallMaterial {
    Titanium,
    Steel,
    Aluminum,
    Cfrp,
    Fibreglass,
}

impl WallMaterial {
    fn is_metallic(self) -> bool {
        matches!(self, Self::Titanium | Self::Steel | Self::Aluminum)
    }
}

/// Damage that counts as failure of a monolithic wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    #[default]
    Perforation,
    DetachedSpall,
    IncipientSpall,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleWall {
    pub material: WallMaterial,
    pub failure: FailureMode,
    pub wall: Layer,
    /// Brinell hardness, titanium and aluminium only.
    pub brinell_hardness: Option<f64>,
    /// Speed of sound in the wall (km/s), titanium and aluminium only.
    pub sound_speed_km_s: Option<f64>,
    pub mli_areal_density: f64,
}

/// Exponents and coefficients of `dc = (t·α·(ρs/ρp)^β / (k·K·(v cosθ)^(2/3)))^γ`.
struct Coefficients {
    alpha: f64,
    beta: f64,
    k: f64,
    big_k: f64,
    gamma: f64,
}

impl SingleWall {
    pub fn name(&self) -> &'static str {
        match self.material {
            WallMaterial::Titanium => "single wall (titanium)",
            WallMaterial::Steel => "single wall (steel)",
            WallMaterial::Aluminum => "single wall (aluminium)",
            WallMaterial::Cfrp => "single wall (CFRP)",
            WallMaterial::Fibreglass => "single wall (fibreglass)",
        }
    }

    fn hardness(&self) -> Result<f64, BleError> {
        self.brinell_hardness
            .ok_or_else(|| BleError::MissingField("wall Brinell hardness".to_string()))
    }

    fn sound_speed(&self) -> Result<f64, BleError> {
        self.sound_speed_km_s
            .ok_or_else(|| BleError::MissingField("wall sound speed".to_string()))
    }

    fn unsupported_mode(&self) -> BleError {
        BleError::Unsupported {
            category: "failure mode",
            value: format!("{:?} for {}", self.failure, self.name()),
        }
    }

    fn coefficients(&self, projectile_density: f64) -> Result<Coefficients, BleError> {
        let mode = self.failure;
        Ok(match self.material {
            WallMaterial::Titanium => Coefficients {
                alpha: self.hardness()?.powf(0.25),
                beta: 0.5,
                k: match mode {
                    FailureMode::Perforation => 1.8,
                    FailureMode::DetachedSpall => 2.4,
                    FailureMode::IncipientSpall => 3.0,
                },
                big_k: 5.24 / self.sound_speed()?.powf(2.0 / 3.0),
                gamma: 1.0,
            },
            WallMaterial::Steel => {
                if mode != FailureMode::Perforation {
                    return Err(self.unsupported_mode());
                }
                Coefficients {
                    alpha: 1.0,
                    beta: 0.5,
                    k: 1.8,
                    big_k: 0.345,
                    gamma: 18.0 / 19.0,
                }
            }
            WallMaterial::Aluminum => Coefficients {
                alpha: self.hardness()?.powf(0.25),
                beta: if projectile_density / self.wall.density_g_cm3 < 1.5 {
                    0.5
                } else {
                    1.5
                },
                k: match mode {
                    FailureMode::Perforation => 1.8,
                    FailureMode::DetachedSpall => 2.2,
                    FailureMode::IncipientSpall => 3.0,
                },
                big_k: 5.24 / self.sound_speed()?.powf(2.0 / 3.0),
                gamma: 18.0 / 19.0,
            },
            WallMaterial::Cfrp => Coefficients {
                alpha: 1.0,
                beta: 0.5,
                k: if mode == FailureMode::Perforation { 1.8 } else { 3.0 },
                big_k: 0.62,
                gamma: 1.0,
            },
            WallMaterial::Fibreglass => {
                if mode != FailureMode::Perforation {
                    return Err(self.unsupported_mode());
                }
                Coefficients {
                    alpha: 1.0,
                    beta: 0.5,
                    k: 1.8,
                    big_k: 0.434,
                    gamma: 1.0,
                }
            }
        })
    }

    pub fn validate(&self) -> Result<(), BleError> {
        self.wall.validate("wall")?;
        require_non_negative("MLI areal density", self.mli_areal_density)?;
        if let Some(hardness) = self.brinell_hardness {
            require_positive("wall Brinell hardness", hardness)?;
        }
        if let Some(speed) = self.sound_speed_km_s {
            require_positive("wall sound speed", speed)?;
        }
        Ok(())
    }

    /// Critical diameter at the impact's velocity and obliquity.
    pub fn critical_diameter(&self, impact: &ImpactCondition) -> Result<f64, BleError> {
        impact.validate()?;
        self.validate()?;

        let rho_p = impact.projectile.density_g_cm3;
        let rho_s = self.wall.density_g_cm3;
        let vn = Obliquity::clamped(impact.angle_deg, None).normal(impact.velocity_km_s);
        let coeff = self.coefficients(rho_p)?;

        let blanketed = self.mli_areal_density > 0.0;
        let thickness = if blanketed && !self.material.is_metallic() {
            self.wall.thickness_cm + 4.5 * self.mli_areal_density / rho_s
        } else {
            self.wall.thickness_cm
        };
        let mut dc = (thickness * coeff.alpha * (rho_s / rho_p).powf(coeff.beta)
            / (coeff.k * coeff.big_k * vn.powf(2.0 / 3.0)))
        .powf(coeff.gamma);
        if blanketed && self.material.is_metallic() {
            dc += 2.2 * self.mli_areal_density * rho_p.powf(-0.47) * vn.powf(-0.63);
        }

        log::trace!("{}: v = {} km/s -> dc = {dc}", self.name(), impact.velocity_km_s);
        if !dc.is_finite() || dc < 0.0 {
            return Err(BleError::NonPhysical {
                model: self.name(),
                velocity_km_s: impact.velocity_km_s,
                value: dc,
            });
        }
        Ok(dc)
    }
}
