//! Brent's bounded scalar minimiser (golden section with parabolic interpolation).

use crate::{Solution, SolverError};

/// (3 - sqrt(5)) / 2
const GOLDEN: f64 = 0.381_966_011_250_105_1;
const SQRT_EPS: f64 = 1.490_116_119_384_765_6e-8;

/// Minimise `f` on `[lower, upper]` starting from `guess`.
///
/// The search keeps the bracketing interval shrinking monotonically, so the returned
/// abscissa always lies inside the bounds. A minimum located on a bound is a valid,
/// converged result. `tolerance` is the absolute tolerance on `x`.
pub fn minimize_bounded<F>(
    f: F,
    lower: f64,
    upper: f64,
    guess: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<Solution, SolverError>
where
    F: Fn(f64) -> f64,
{
    if !(lower < upper) || !lower.is_finite() || !upper.is_finite() {
        return Err(SolverError::InvalidInterval { lower, upper });
    }

    let mut a = lower;
    let mut b = upper;
    let mut x = if guess > a && guess < b {
        guess
    } else {
        a + GOLDEN * (b - a)
    };
    let mut fx = eval(&f, x)?;
    let (mut w, mut v) = (x, x);
    let (mut fw, mut fv) = (fx, fx);
    let mut d = 0.0_f64;
    let mut e = 0.0_f64;

    for iteration in 1..=max_iterations {
        let xm = 0.5 * (a + b);
        let tol1 = SQRT_EPS * x.abs() + tolerance / 3.0;
        let tol2 = 2.0 * tol1;

        if (x - xm).abs() <= tol2 - 0.5 * (b - a) {
            log::debug!("brent minimiser converged: x = {x}, f = {fx:e}, iterations = {iteration}");
            return Ok(Solution {
                x,
                value: fx,
                iterations: iteration,
            });
        }

        let mut use_golden = true;
        if e.abs() > tol1 {
            let r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            } else {
                q = -q;
            }
            let e_prev = e;
            e = d;
            if p.abs() < (0.5 * q * e_prev).abs() && p > q * (a - x) && p < q * (b - x) {
                d = p / q;
                let u = x + d;
                if u - a < tol2 || b - u < tol2 {
                    d = tol1.copysign(xm - x);
                }
                use_golden = false;
            }
        }
        if use_golden {
            e = if x >= xm { a - x } else { b - x };
            d = GOLDEN * e;
        }

        let u = if d.abs() >= tol1 {
            x + d
        } else {
            x + tol1.copysign(d)
        };
        let fu = eval(&f, u)?;

        if fu <= fx {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            fv = fw;
            w = x;
            fw = fx;
            x = u;
            fx = fu;
        } else {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                fv = fw;
                w = u;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }
    }

    Err(SolverError::NoConvergence {
        method: "brent minimiser",
        iterations: max_iterations,
        x,
        value: fx,
    })
}

fn eval<F: Fn(f64) -> f64>(f: &F, x: f64) -> Result<f64, SolverError> {
    let value = f(x);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SolverError::NonFinite {
            method: "brent minimiser",
            x,
        })
    }
}
