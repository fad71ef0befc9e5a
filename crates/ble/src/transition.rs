//! Low-velocity/shatter transition velocities that have no closed form.
//!
//! Both resolvers match the low-velocity equation against an empirical
//! "critical diameter at the onset of fragmentation" relation and minimise the
//! absolute difference of their squares on a bounded velocity window. A minimum
//! left on the window edge without a match is a convergence failure.

use blossum_core::geometry::Obliquity;
use blossum_solver::{DEFAULT_MAX_ITERATIONS, Solution, SolverError, minimize_bounded};

use crate::error::{BleError, require_positive};

/// Velocity window (km/s) searched for the transition.
pub const SEARCH_BOUNDS_KM_S: (f64, f64) = (1.854, 50.0);
/// Fixed starting point of the search.
pub const SEARCH_GUESS_KM_S: f64 = 3.0;
const SEARCH_TOLERANCE: f64 = 1e-10;
/// Distance from a bound (km/s) at which the minimiser is considered stuck on it.
const EDGE_TOLERANCE_KM_S: f64 = 1e-5;
/// Relative mismatch of the squared diameters accepted as a match.
const MATCH_TOLERANCE: f64 = 1e-6;

/// Where the matching equation crosses zero relative to the search window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crossing {
    Matched,
    AboveWindow,
    BelowWindow,
}

/// In both equations the low-velocity diameter exceeds the fragmentation diameter
/// only below the crossing, so the sign of the mismatch at an edge tells which side
/// of the window the crossing is on.
fn locate_crossing(x: f64, fragmentation: f64, low_velocity: f64) -> Crossing {
    let (lower, upper) = SEARCH_BOUNDS_KM_S;
    let mismatch = fragmentation.powi(2) - low_velocity.powi(2);
    let scale = fragmentation.powi(2).max(low_velocity.powi(2));
    let on_edge = x - lower <= EDGE_TOLERANCE_KM_S || upper - x <= EDGE_TOLERANCE_KM_S;
    if !on_edge || mismatch.abs() <= MATCH_TOLERANCE * scale {
        Crossing::Matched
    } else if mismatch < 0.0 {
        Crossing::AboveWindow
    } else {
        Crossing::BelowWindow
    }
}

fn stuck_on_bound(stage: &'static str, solution: &Solution) -> BleError {
    let (lower, upper) = SEARCH_BOUNDS_KM_S;
    BleError::Convergence {
        stage,
        source: SolverError::BoundaryMinimum {
            method: "brent minimiser",
            lower,
            upper,
            x: solution.x,
            value: solution.value,
        },
    }
}

fn search<F: Fn(f64) -> f64>(stage: &'static str, objective: F) -> Result<Solution, BleError> {
    let (lower, upper) = SEARCH_BOUNDS_KM_S;
    minimize_bounded(
        objective,
        lower,
        upper,
        SEARCH_GUESS_KM_S,
        SEARCH_TOLERANCE,
        DEFAULT_MAX_ITERATIONS,
    )
    .map_err(BleError::convergence(stage))
}

/// Transition velocity of the JSC Whipple equation, in normal-velocity terms.
pub fn jsc_low_velocity_transition(
    bumper_thickness: f64,
    wall_thickness: f64,
    wall_yield_ksi: f64,
    projectile_density: f64,
    obliquity: &Obliquity,
) -> Result<f64, BleError> {
    const STAGE: &str = "JSC low-velocity transition";
    let tb = require_positive("bumper thickness", bumper_thickness)?;
    let strength = wall_thickness * (wall_yield_ksi / 40.0).sqrt() + tb;
    let denominator = 0.6 * obliquity.cos_pow(5.0 / 3.0) * projectile_density.sqrt();

    let fragmentation = |x: f64| tb / (x / 1.436).cbrt();
    let low_velocity =
        |x: f64| (strength / (denominator * x.abs().powf(2.0 / 3.0))).powf(18.0 / 19.0);
    let solution = search(STAGE, |x| {
        (fragmentation(x).powi(2) - low_velocity(x).powi(2)).abs()
    })?;

    match locate_crossing(solution.x, fragmentation(solution.x), low_velocity(solution.x)) {
        Crossing::Matched => {}
        // tb/dp only grows with x, so a crossing above the window keeps the 2.60 branch.
        Crossing::AboveWindow => log::debug!(
            "JSC vLV crossing lies above {} km/s; ratio correction saturated",
            SEARCH_BOUNDS_KM_S.1
        ),
        Crossing::BelowWindow => return Err(stuck_on_bound(STAGE, &solution)),
    }

    let dp_transition = fragmentation(solution.x);
    let ratio = tb / dp_transition;
    let transition = if ratio >= 0.16 {
        2.60
    } else {
        1.436 * ratio.powf(-1.0 / 3.0)
    };
    log::debug!(
        "JSC vLV search: x = {:.6} after {} iterations, transition = {transition} km/s",
        solution.x,
        solution.iterations
    );
    Ok(transition)
}

/// Transition velocity of the Reimerdes equation, in normal-velocity terms.
pub fn reimerdes_low_velocity_transition(
    bumper_thickness: f64,
    wall_thickness: f64,
    projectile_density: f64,
    obliquity: &Obliquity,
) -> Result<f64, BleError> {
    const STAGE: &str = "Reimerdes low-velocity transition";
    let tb = require_positive("bumper thickness", bumper_thickness)?;
    let strength = wall_thickness / 1.8 + tb;
    let denominator = 0.796 * 0.42 * projectile_density.powf(0.518);

    let fragmentation = |x: f64| tb * ((x - 1.853) / 0.397).powf(1.0 / 0.565);
    let low_velocity = |x: f64| {
        (strength / (denominator * (x * obliquity.cos).powf(2.0 / 3.0))).powf(18.0 / 19.0)
    };
    let solution = search(STAGE, |x| {
        (fragmentation(x).powi(2) - low_velocity(x).powi(2)).abs()
    })?;

    if locate_crossing(solution.x, fragmentation(solution.x), low_velocity(solution.x))
        != Crossing::Matched
    {
        return Err(stuck_on_bound(STAGE, &solution));
    }

    log::debug!(
        "Reimerdes vLV search: {:.6} km/s after {} iterations",
        solution.x,
        solution.iterations
    );
    Ok(solution.x)
}
