//! Ballistic limit equations for micrometeoroid and orbital debris shielding.
//!
//! Each equation maps a shield, a projectile and an impact condition to the critical
//! projectile diameter: the smallest sphere predicted to perforate (or spall) the
//! shield. Multi-regime equations share the low-velocity / shatter / hypervelocity
//! driver in [`regime`]; single walls and windows are closed form.
//!
//! Units throughout: cm, g/cm³, g/cm², km/s, degrees, and ksi for yield strength.

pub mod curve;
pub mod derating;
pub mod error;
pub mod inputs;
pub mod models;
pub mod regime;
pub mod transition;

pub use curve::{CurveError, CurvePoint, VelocityGrid, generate_curve, sweep};
pub use error::BleError;
pub use inputs::{ImpactCondition, Layer, MliPlacement, Projectile};
pub use models::*;
pub use regime::{Regime, RegimeModel, Transitions, VelocityBasis, evaluate, evaluate_with_regime};

/// Any supported shield, ready to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub enum Shield {
    Nno(NnoWhipple),
    ModifiedNno(ModifiedNno),
    Jsc(JscWhipple),
    Reimerdes(Reimerdes),
    Stuffed(StuffedWhipple),
    FoamSandwich(FoamSandwichPanel),
    HoneycombSandwich(HoneycombSandwichPanel),
    TripleWall(TripleWall),
    Mesh(MeshDoubleBumper),
    MultiShock(MultiShock),
    Mli(MliBlanket),
    SingleWall(SingleWall),
    Transparent(TransparentWall),
}

macro_rules! shield_from {
    ($($variant:ident($model:ty)),* $(,)?) => {
        $(
            impl From<$model> for Shield {
                fn from(model: $model) -> Self {
                    Shield::$variant(model)
                }
            }
        )*
    };
}

shield_from!(
    Nno(NnoWhipple),
    ModifiedNno(ModifiedNno),
    Jsc(JscWhipple),
    Reimerdes(Reimerdes),
    Stuffed(StuffedWhipple),
    FoamSandwich(FoamSandwichPanel),
    HoneycombSandwich(HoneycombSandwichPanel),
    TripleWall(TripleWall),
    Mesh(MeshDoubleBumper),
    MultiShock(MultiShock),
    Mli(MliBlanket),
    SingleWall(SingleWall),
    Transparent(TransparentWall),
);

/// How a shield is evaluated.
enum Form<'a> {
    Regime(&'a dyn RegimeModel),
    SingleWall(&'a SingleWall),
    Transparent(&'a TransparentWall),
}

impl Shield {
    fn form(&self) -> Form<'_> {
        match self {
            Shield::Nno(m) => Form::Regime(m),
            Shield::ModifiedNno(m) => Form::Regime(m),
            Shield::Jsc(m) => Form::Regime(m),
            Shield::Reimerdes(m) => Form::Regime(m),
            Shield::Stuffed(m) => Form::Regime(m),
            Shield::FoamSandwich(m) => Form::Regime(m),
            Shield::HoneycombSandwich(m) => Form::Regime(m),
            Shield::TripleWall(m) => Form::Regime(m),
            Shield::Mesh(m) => Form::Regime(m),
            Shield::MultiShock(m) => Form::Regime(m),
            Shield::Mli(m) => Form::Regime(m),
            Shield::SingleWall(m) => Form::SingleWall(m),
            Shield::Transparent(m) => Form::Transparent(m),
        }
    }

    /// The three-regime form of this shield, if it has one.
    pub fn regime_model(&self) -> Option<&dyn RegimeModel> {
        match self.form() {
            Form::Regime(model) => Some(model),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self.form() {
            Form::Regime(model) => model.name(),
            Form::SingleWall(wall) => wall.name(),
            Form::Transparent(window) => window.name(),
        }
    }

    /// Angle above which the shield is evaluated at the ceiling.
    pub fn obliquity_ceiling_deg(&self) -> Option<f64> {
        self.regime_model().and_then(|m| m.obliquity_ceiling_deg())
    }

    pub fn validate(&self) -> Result<(), BleError> {
        match self.form() {
            Form::Regime(model) => model.validate(),
            Form::SingleWall(wall) => wall.validate(),
            Form::Transparent(window) => window.validate(),
        }
    }

    /// Critical projectile diameter (cm) for one impact.
    pub fn critical_diameter(&self, impact: &ImpactCondition) -> Result<f64, BleError> {
        match self.form() {
            Form::Regime(model) => evaluate(model, impact),
            Form::SingleWall(wall) => wall.critical_diameter(impact),
            Form::Transparent(window) => window.critical_diameter(impact),
        }
    }

    /// Transition velocities in impact-velocity terms, `None` for closed-form shields.
    pub fn transition_velocities(
        &self,
        impact: &ImpactCondition,
    ) -> Result<Option<(f64, f64)>, BleError> {
        let Some(model) = self.regime_model() else {
            return Ok(None);
        };
        impact.validate()?;
        model.validate()?;
        let incidence = regime::Incidence::new(impact, model.obliquity_ceiling_deg());
        let transitions = model.transitions(&incidence)?;
        Ok(Some(transitions.in_impact_terms(&incidence.obliquity)))
    }
}
