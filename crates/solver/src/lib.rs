//! Scalar numerical primitives: Brent bounded minimisation, Brent bracketed root finding,
//! and Newton–Raphson iteration.
//!
//! Every routine runs to convergence or fails with [`SolverError`] within a fixed iteration
//! cap; none of them returns a stale estimate silently.

pub mod minimize;
pub mod roots;

use thiserror::Error;

pub use minimize::minimize_bounded;
pub use roots::{bracket_increasing, find_root, newton};

/// Default iteration cap shared by the ballistic limit solvers.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Converged result of a scalar solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Abscissa of the minimum or root.
    pub x: f64,
    /// Objective (or residual) value at `x`.
    pub value: f64,
    pub iterations: usize,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    #[error("{method} did not converge within {iterations} iterations (last x = {x}, value = {value:e})")]
    NoConvergence {
        method: &'static str,
        iterations: usize,
        x: f64,
        value: f64,
    },
    #[error("root not bracketed: f({lower}) = {f_lower}, f({upper}) = {f_upper}")]
    NotBracketed {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },
    #[error("invalid search interval [{lower}, {upper}]")]
    InvalidInterval { lower: f64, upper: f64 },
    #[error("{method} evaluated a non-finite value at x = {x}")]
    NonFinite { method: &'static str, x: f64 },
    #[error("newton iteration hit a zero derivative at x = {x}")]
    ZeroDerivative { x: f64 },
    /// A bounded search ended on its bound without reaching the target value.
    #[error("{method} stopped on the bound of [{lower}, {upper}] at x = {x} (objective {value:e})")]
    BoundaryMinimum {
        method: &'static str,
        lower: f64,
        upper: f64,
        x: f64,
        value: f64,
    },
    /// The bracket collapsed onto a jump of the function rather than a zero.
    #[error("{method} converged onto a discontinuity at x = {x} (residual {residual:e})")]
    Discontinuity {
        method: &'static str,
        x: f64,
        residual: f64,
    },
}
