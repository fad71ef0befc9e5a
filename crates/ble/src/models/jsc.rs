//! JSC Whipple equation (Ryan & Christiansen 2011) and its 2015 modification.

use crate::derating::{DeratingContext, DeratingModel, ThicknessCriterion, solve_critical_diameter};
use crate::error::BleError;
use crate::models::whipple::WhippleShield;
use crate::regime::{Incidence, RegimeModel, Transitions};
use crate::transition::jsc_low_velocity_transition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JscVariant {
    /// Step thickness criterion, `F2*` evaluated at the hypervelocity transition.
    #[default]
    Standard,
    /// Interpolated, density-scaled criterion with `F2*` at the impact velocity.
    Modified,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JscWhipple {
    pub shield: WhippleShield,
    pub variant: JscVariant,
}

impl JscWhipple {
    pub fn new(shield: WhippleShield, variant: JscVariant) -> Self {
        Self { shield, variant }
    }

    fn derating(&self, incidence: &Incidence, velocity_km_s: f64) -> Result<DeratingContext, BleError> {
        let shield = &self.shield;
        let (criterion, derating_velocity) = match self.variant {
            JscVariant::Standard => (ThicknessCriterion::Step, 7.0 / incidence.cos()),
            JscVariant::Modified => (
                ThicknessCriterion::Interpolated {
                    density_ratio: incidence.projectile_density / shield.bumper.density_g_cm3,
                },
                velocity_km_s,
            ),
        };
        Ok(DeratingContext {
            model: DeratingModel::Jsc,
            criterion,
            bumper_thickness: shield.effective_bumper_thickness(),
            bumper_density: shield.bumper.density_g_cm3,
            standoff: shield.standoff_cm,
            wall_yield_ksi: shield.wall_yield()?,
            projectile_density: incidence.projectile_density,
            obliquity: incidence.obliquity,
            velocity_km_s: derating_velocity,
        })
    }
}

impl RegimeModel for JscWhipple {
    fn name(&self) -> &'static str {
        match self.variant {
            JscVariant::Standard => "JSC Whipple",
            JscVariant::Modified => "JSC Whipple (modified)",
        }
    }

    fn validate(&self) -> Result<(), BleError> {
        self.shield.validate()
    }

    fn transitions(&self, incidence: &Incidence) -> Result<Transitions, BleError> {
        let c = incidence.cos();
        let low = if self.shield.mli.is_internal() {
            2.0
        } else {
            jsc_low_velocity_transition(
                self.shield.effective_bumper_thickness(),
                self.shield.wall.thickness_cm,
                self.shield.wall_yield()?,
                incidence.projectile_density,
                &incidence.obliquity,
            )?
        };
        Transitions::impact(low / c, 7.0 / c).ordered()
    }

    fn low_velocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        self.shield.cour_palais_low_velocity(incidence, v)
    }

    fn hypervelocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let scale = self.shield.nno_hypervelocity(incidence, v)?;
        solve_critical_diameter(&self.derating(incidence, v)?, scale)
    }

    fn hypervelocity_offset(&self, _incidence: &Incidence) -> f64 {
        self.shield.mli_offset()
    }
}
