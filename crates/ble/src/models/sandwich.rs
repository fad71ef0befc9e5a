//! Sandwich panels: foam-core (Ryan et al. 2009/2015) and honeycomb-core double
//! walls after the Schäfer-Ryan-Lambert (SRL) equation (Ryan et al. 2007).

use blossum_core::constants::{REFERENCE_DENSITY_G_CM3, REFERENCE_YIELD_KSI};

use crate::error::{BleError, require_non_negative, require_positive};
use crate::inputs::{Layer, external_mli_thickness};
use crate::regime::{Incidence, RegimeModel, Transitions};

/// Cos exponent of the SRL equations for metallic or generic bumpers.
pub(crate) fn srl_obliquity_exponent(angle_deg: f64) -> f64 {
    if angle_deg <= 45.0 || angle_deg >= 65.0 {
        4.0 / 3.0
    } else {
        5.0 / 4.0
    }
}

/// How the foam core is described; exactly one quantity is needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FoamCore {
    /// Whole-panel mass per unit area and unit panel thickness.
    PanelMass(f64),
    /// Whole-panel areal density (g/cm²), facesheets included.
    PanelArealDensity(f64),
    /// Foam density (g/cm³).
    Density(f64),
    /// Foam areal density (g/cm²).
    ArealDensity(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoamSandwichPanel {
    /// Front facesheet.
    pub bumper: Layer,
    /// Rear facesheet; yield strength required.
    pub wall: Layer,
    pub core_thickness_cm: f64,
    pub core: FoamCore,
    pub mli_areal_density: f64,
}

impl FoamSandwichPanel {
    /// Foam density and areal density.
    pub fn foam(&self) -> Result<(f64, f64), BleError> {
        let s = self.core_thickness_cm;
        let facesheets = self.bumper.areal_density() + self.wall.areal_density();
        let areal_density = match self.core {
            FoamCore::PanelMass(mass) => {
                mass / (s + self.bumper.thickness_cm + self.wall.thickness_cm) - facesheets
            }
            FoamCore::PanelArealDensity(panel) => panel - facesheets,
            FoamCore::Density(density) => density * s,
            FoamCore::ArealDensity(areal_density) => areal_density,
        };
        let areal_density = require_non_negative("foam areal density", areal_density)?;
        Ok((areal_density / s, areal_density))
    }
}

const C1: f64 = 1.83;
const C2: f64 = 1.1;
const C3: f64 = 0.89;

impl RegimeModel for FoamSandwichPanel {
    fn name(&self) -> &'static str {
        "foam sandwich panel"
    }

    fn obliquity_ceiling_deg(&self) -> Option<f64> {
        None
    }

    fn validate(&self) -> Result<(), BleError> {
        self.bumper.validate("front facesheet")?;
        self.wall.validate("rear facesheet")?;
        self.wall.yield_strength("rear facesheet")?;
        require_positive("core thickness", self.core_thickness_cm)?;
        require_non_negative("MLI areal density", self.mli_areal_density)?;
        self.foam().map(|_| ())
    }

    fn transitions(&self, incidence: &Incidence) -> Result<Transitions, BleError> {
        let c = incidence.cos().cbrt();
        Ok(Transitions::impact(2.25 / c, 4.0 / c))
    }

    fn low_velocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let sigma = self.wall.yield_strength("rear facesheet")?;
        let (foam_density, _) = self.foam()?;
        let tb_tot = external_mli_thickness(self.bumper.thickness_cm, self.mli_areal_density);
        let strength = tb_tot
            + self.wall.thickness_cm * (sigma / 40.0).sqrt()
            + self.core_thickness_cm.powf(C2) * foam_density / self.wall.density_g_cm3;
        let resistance = incidence.projectile_density.sqrt()
            * v.powf(2.0 / 3.0)
            * incidence.obliquity.cos_pow(0.8);
        Ok(C1 * strength / resistance.powf(18.0 / 19.0))
    }

    fn hypervelocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let sigma = self.wall.yield_strength("rear facesheet")?;
        let (_, foam_areal_density) = self.foam()?;
        let wall = self.wall.thickness_cm + 0.5 * foam_areal_density / self.wall.density_g_cm3;
        let numerator = 2.152
            * wall.powf(2.0 / 3.0)
            * C3
            * self.core_thickness_cm.powf(9.0 / 20.0)
            * (sigma / 70.0).cbrt();
        let denominator = incidence.projectile_density.cbrt()
            * self.bumper.density_g_cm3.powf(1.0 / 9.0)
            * v.powf(0.4)
            * incidence.obliquity.cos_pow(0.8);
        Ok(numerator / denominator)
    }
}

/// Bumper material class of the SRL equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumperClass {
    Cfrp,
    /// Non-metallic, non-CFRP facesheet scaled to the reference aluminium.
    Other,
    Metallic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoneycombSandwichPanel {
    pub bumper: Layer,
    pub bumper_class: BumperClass,
    /// Rear facesheet; yield strength required for metallic bumpers.
    pub wall: Layer,
    pub standoff_cm: f64,
    pub mli_areal_density: f64,
}

struct SrlTerms {
    sigma: f64,
    bumper_density: f64,
    bumper_thickness: f64,
    wall_thickness: f64,
    delta: f64,
    k3s: f64,
}

impl HoneycombSandwichPanel {
    fn terms(&self, incidence: &Incidence) -> Result<SrlTerms, BleError> {
        let (sigma, bumper_density, tb, tw) = match self.bumper_class {
            BumperClass::Cfrp | BumperClass::Other => (
                REFERENCE_YIELD_KSI,
                REFERENCE_DENSITY_G_CM3,
                self.bumper.reference_thickness(),
                self.wall.reference_thickness(),
            ),
            BumperClass::Metallic => (
                self.wall.yield_strength("rear facesheet")?,
                self.bumper.density_g_cm3,
                self.bumper.thickness_cm,
                self.wall.thickness_cm,
            ),
        };
        let (delta, k3s) = match self.bumper_class {
            BumperClass::Cfrp => (4.0 / 3.0, 1.1),
            _ => (srl_obliquity_exponent(incidence.obliquity.degrees), 1.4),
        };
        Ok(SrlTerms {
            sigma,
            bumper_density,
            bumper_thickness: external_mli_thickness(tb, self.mli_areal_density),
            wall_thickness: tw,
            delta,
            k3s,
        })
    }
}

impl RegimeModel for HoneycombSandwichPanel {
    fn name(&self) -> &'static str {
        "honeycomb sandwich panel"
    }

    fn obliquity_ceiling_deg(&self) -> Option<f64> {
        None
    }

    fn validate(&self) -> Result<(), BleError> {
        self.bumper.validate("bumper")?;
        self.wall.validate("rear facesheet")?;
        if self.bumper_class == BumperClass::Metallic {
            self.wall.yield_strength("rear facesheet")?;
        }
        require_positive("standoff", self.standoff_cm)?;
        require_non_negative("MLI areal density", self.mli_areal_density)?;
        Ok(())
    }

    fn transitions(&self, incidence: &Incidence) -> Result<Transitions, BleError> {
        let c = incidence.cos();
        let (low, high) = match self.bumper_class {
            BumperClass::Cfrp => (4.2, 8.4),
            BumperClass::Other | BumperClass::Metallic => (3.0, 7.0),
        };
        Ok(Transitions::impact(low / c, high / c))
    }

    fn low_velocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let t = self.terms(incidence)?;
        let strength = t.wall_thickness / t.k3s * (t.sigma / 40.0).sqrt() + t.bumper_thickness;
        let resistance = 0.6
            * incidence.obliquity.cos_pow(t.delta)
            * incidence.projectile_density.sqrt()
            * v.powf(2.0 / 3.0);
        Ok((strength / resistance).powf(18.0 / 19.0))
    }

    fn hypervelocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let t = self.terms(incidence)?;
        let numerator = 1.155
            * self.standoff_cm.cbrt()
            * t.wall_thickness.powf(2.0 / 3.0)
            * (t.sigma / 70.0).cbrt();
        let denominator = 0.4_f64.powf(2.0 / 3.0)
            * incidence.projectile_density.cbrt()
            * t.bumper_density.powf(1.0 / 9.0)
            * v.powf(2.0 / 3.0)
            * incidence.obliquity.cos_pow(t.delta);
        Ok(numerator / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{ImpactCondition, Projectile};
    use crate::regime::evaluate;

    fn foam_panel(core: FoamCore) -> FoamSandwichPanel {
        FoamSandwichPanel {
            bumper: Layer::new("AA7075-T6", 0.1, 2.81),
            wall: Layer::new("AA7075-T6", 0.1, 2.81).with_yield_ksi(73.0),
            core_thickness_cm: 2.0,
            core,
            mli_areal_density: 0.0,
        }
    }

    #[test]
    fn foam_core_descriptions_agree() {
        let (density, areal) = foam_panel(FoamCore::Density(0.1)).foam().expect("core");
        assert!((areal - 0.2).abs() < 1e-12);
        let (d2, _) = foam_panel(FoamCore::ArealDensity(0.2)).foam().expect("core");
        assert!((d2 - density).abs() < 1e-12);
        let (d3, _) = foam_panel(FoamCore::PanelArealDensity(0.2 + 0.562))
            .foam()
            .expect("core");
        assert!((d3 - density).abs() < 1e-9);
    }

    #[test]
    fn facesheets_heavier_than_panel_are_rejected() {
        let err = foam_panel(FoamCore::PanelArealDensity(0.3)).foam().expect_err("negative");
        assert!(matches!(err, BleError::Domain { .. }));
    }

    #[test]
    fn srl_reference_scaling_for_cfrp() {
        let panel = HoneycombSandwichPanel {
            bumper: Layer::new("CFRP", 0.15, 1.56),
            bumper_class: BumperClass::Cfrp,
            wall: Layer::new("CFRP", 0.15, 1.56),
            standoff_cm: 5.0,
            mli_areal_density: 0.0,
        };
        let impact = ImpactCondition::new(Projectile::aluminium(), 10.0, 0.0);
        let dc = evaluate(&panel, &impact).expect("evaluates");
        assert!(dc.is_finite() && dc > 0.0);
    }

    #[test]
    fn obliquity_exponent_band() {
        assert_eq!(srl_obliquity_exponent(30.0), 4.0 / 3.0);
        assert_eq!(srl_obliquity_exponent(50.0), 5.0 / 4.0);
        assert_eq!(srl_obliquity_exponent(70.0), 4.0 / 3.0);
    }
}
