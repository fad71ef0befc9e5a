//! Passive input records shared by every ballistic limit equation.

use blossum_core::constants::{EXTERNAL_MLI_FACTOR, INTERNAL_MLI_FACTOR, REFERENCE_DENSITY_G_CM3};
use blossum_core::units;

use crate::error::{BleError, require_non_negative, require_positive};

/// Impacting particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Informational only.
    pub material: String,
    pub density_g_cm3: f64,
}

impl Projectile {
    pub fn new(material: impl Into<String>, density_g_cm3: f64) -> Self {
        Self {
            material: material.into(),
            density_g_cm3,
        }
    }

    /// Aluminium sphere, the usual test projectile.
    pub fn aluminium() -> Self {
        Self::new("AA2017-T4", 2.796)
    }
}

/// Single impact condition: projectile, velocity, and obliquity.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactCondition {
    pub projectile: Projectile,
    pub velocity_km_s: f64,
    /// Angle from the surface normal before any model-specific ceiling is applied.
    pub angle_deg: f64,
}

impl ImpactCondition {
    pub fn new(projectile: Projectile, velocity_km_s: f64, angle_deg: f64) -> Self {
        Self {
            projectile,
            velocity_km_s,
            angle_deg,
        }
    }

    /// Copy of this condition at a different impact velocity.
    pub fn at_velocity(&self, velocity_km_s: f64) -> Self {
        Self {
            velocity_km_s,
            ..self.clone()
        }
    }

    /// Reject non-physical impact conditions before any model runs.
    pub fn validate(&self) -> Result<(), BleError> {
        require_positive("projectile density", self.projectile.density_g_cm3)?;
        require_positive("impact velocity", self.velocity_km_s)?;
        if !(self.angle_deg.is_finite() && (0.0..90.0).contains(&self.angle_deg)) {
            return Err(BleError::Domain {
                field: "impact angle".to_string(),
                requirement: "within [0, 90) degrees",
                value: self.angle_deg,
            });
        }
        Ok(())
    }
}

/// Uniform shield layer (bumper, facesheet, or rear wall).
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub material: String,
    pub thickness_cm: f64,
    pub density_g_cm3: f64,
    /// Yield strength in ksi, required only by equations that use wall strength.
    pub yield_ksi: Option<f64>,
}

impl Layer {
    pub fn new(material: impl Into<String>, thickness_cm: f64, density_g_cm3: f64) -> Self {
        Self {
            material: material.into(),
            thickness_cm,
            density_g_cm3,
            yield_ksi: None,
        }
    }

    /// Layer described by its areal density instead of its thickness.
    pub fn from_areal_density(
        material: impl Into<String>,
        areal_density_g_cm2: f64,
        density_g_cm3: f64,
    ) -> Self {
        Self::new(
            material,
            units::thickness(areal_density_g_cm2, density_g_cm3),
            density_g_cm3,
        )
    }

    pub fn with_yield_ksi(mut self, yield_ksi: f64) -> Self {
        self.yield_ksi = Some(yield_ksi);
        self
    }

    pub fn areal_density(&self) -> f64 {
        units::areal_density(self.thickness_cm, self.density_g_cm3)
    }

    /// Thickness of the same areal density expressed in the reference aluminium.
    pub fn reference_thickness(&self) -> f64 {
        self.areal_density() / REFERENCE_DENSITY_G_CM3
    }

    /// Yield strength, failing when the configuration did not provide it.
    pub fn yield_strength(&self, role: &str) -> Result<f64, BleError> {
        self.yield_ksi
            .ok_or_else(|| BleError::MissingField(format!("{role} yield strength")))
    }

    pub fn validate(&self, role: &str) -> Result<(), BleError> {
        require_non_negative(format!("{role} thickness"), self.thickness_cm)?;
        require_positive(format!("{role} density"), self.density_g_cm3)?;
        if let Some(yield_ksi) = self.yield_ksi {
            require_positive(format!("{role} yield strength"), yield_ksi)?;
        }
        Ok(())
    }
}

/// Multi-layer insulation blanket position relative to the shield.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MliPlacement {
    #[default]
    None,
    /// Blanket on the outside of the bumper, folded into an equivalent bumper thickness.
    External { areal_density_g_cm2: f64 },
    /// Blanket inside the standoff, `standoff_cm` from the rear wall.
    Internal {
        areal_density_g_cm2: f64,
        standoff_cm: f64,
    },
}

impl MliPlacement {
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Bumper thickness including any external blanket.
    pub fn effective_bumper_thickness(&self, bumper_thickness_cm: f64) -> f64 {
        match *self {
            Self::External {
                areal_density_g_cm2,
            } => external_mli_thickness(bumper_thickness_cm, areal_density_g_cm2),
            _ => bumper_thickness_cm,
        }
    }

    /// Critical diameter increment contributed by an internal blanket.
    pub fn hypervelocity_offset(&self, standoff_cm: f64) -> f64 {
        match *self {
            Self::Internal {
                areal_density_g_cm2,
                standoff_cm: mli_standoff,
            } => INTERNAL_MLI_FACTOR * areal_density_g_cm2 * (mli_standoff / standoff_cm).sqrt(),
            _ => 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), BleError> {
        match *self {
            Self::None => Ok(()),
            Self::External {
                areal_density_g_cm2,
            } => require_non_negative("MLI areal density", areal_density_g_cm2).map(|_| ()),
            Self::Internal {
                areal_density_g_cm2,
                standoff_cm,
            } => {
                require_non_negative("MLI areal density", areal_density_g_cm2)?;
                require_positive("MLI standoff", standoff_cm)?;
                Ok(())
            }
        }
    }
}

/// Bumper thickness plus the aluminium-equivalent thickness of an external blanket.
pub(crate) fn external_mli_thickness(bumper_thickness_cm: f64, mli_areal_density: f64) -> f64 {
    bumper_thickness_cm + EXTERNAL_MLI_FACTOR * mli_areal_density / REFERENCE_DENSITY_G_CM3
}
