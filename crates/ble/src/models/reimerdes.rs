//! Reimerdes, Nölke & Schäfer (2006) modification of the Cour-Palais/Christiansen
//! double-wall equations. Regime boundaries are compared against `v·cosθ`.

use crate::derating::{DeratingContext, DeratingModel, ThicknessCriterion, solve_critical_diameter};
use crate::error::BleError;
use crate::models::whipple::WhippleShield;
use crate::regime::{Incidence, RegimeModel, Transitions};
use crate::transition::reimerdes_low_velocity_transition;

/// Wall strength coefficient.
const K: f64 = 1.8;
const K_INFINITY: f64 = 0.42;
const HYPERVELOCITY_NORMAL_KM_S: f64 = 7.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Reimerdes {
    pub shield: WhippleShield,
}

impl RegimeModel for Reimerdes {
    fn name(&self) -> &'static str {
        "Reimerdes"
    }

    fn validate(&self) -> Result<(), BleError> {
        self.shield.validate()?;
        self.shield.reject_mli(self.name())
    }

    fn transitions(&self, incidence: &Incidence) -> Result<Transitions, BleError> {
        let low = reimerdes_low_velocity_transition(
            self.shield.bumper.thickness_cm,
            self.shield.wall.thickness_cm,
            incidence.projectile_density,
            &incidence.obliquity,
        )?;
        Transitions::normal(low, HYPERVELOCITY_NORMAL_KM_S).ordered()
    }

    fn low_velocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let vn = incidence.obliquity.normal(v);
        let strength = self.shield.wall.thickness_cm / K + self.shield.bumper.thickness_cm;
        let resistance =
            0.796 * K_INFINITY * incidence.projectile_density.powf(0.518) * vn.powf(2.0 / 3.0);
        Ok((strength / resistance).powf(18.0 / 19.0))
    }

    fn hypervelocity(&self, incidence: &Incidence, v: f64) -> Result<f64, BleError> {
        let shield = &self.shield;
        let scale = shield.nno_hypervelocity(incidence, v)?;
        let context = DeratingContext {
            model: DeratingModel::Reimerdes,
            criterion: ThicknessCriterion::Step,
            bumper_thickness: shield.bumper.thickness_cm,
            bumper_density: shield.bumper.density_g_cm3,
            standoff: shield.standoff_cm,
            wall_yield_ksi: shield.wall_yield()?,
            projectile_density: incidence.projectile_density,
            obliquity: incidence.obliquity,
            velocity_km_s: HYPERVELOCITY_NORMAL_KM_S / incidence.cos(),
        };
        solve_critical_diameter(&context, scale)
    }
}
