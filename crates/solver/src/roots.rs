//! Root finding: Brent's bracketed method, outward bracketing, and Newton–Raphson.

use crate::{Solution, SolverError};

/// Find a root of `f` bracketed by `[lower, upper]` using Brent's method.
///
/// `tolerance` is the absolute tolerance on `x`.
pub fn find_root<F>(
    f: F,
    lower: f64,
    upper: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<Solution, SolverError>
where
    F: Fn(f64) -> f64,
{
    let mut a = lower;
    let mut b = upper;
    let mut fa = eval(&f, a, "brent root finder")?;
    let mut fb = eval(&f, b, "brent root finder")?;

    if fa == 0.0 {
        return Ok(Solution {
            x: a,
            value: fa,
            iterations: 0,
        });
    }
    if fb == 0.0 {
        return Ok(Solution {
            x: b,
            value: fb,
            iterations: 0,
        });
    }
    if fa.signum() == fb.signum() {
        return Err(SolverError::NotBracketed {
            lower,
            upper,
            f_lower: fa,
            f_upper: fb,
        });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 1..=max_iterations {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * tolerance;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol1 || fb == 0.0 {
            log::debug!("brent root finder converged: x = {b}, f = {fb:e}, iterations = {iteration}");
            return Ok(Solution {
                x: b,
                value: fb,
                iterations: iteration,
            });
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q);
            if a == c {
                // secant step
                p = 2.0 * xm * s;
                q = 1.0 - s;
            } else {
                // inverse quadratic interpolation
                let qa = fa / fc;
                let r = fb / fc;
                p = s * (2.0 * xm * qa * (qa - r) - (b - a) * (r - 1.0));
                q = (qa - 1.0) * (r - 1.0) * (s - 1.0);
            }
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol1 { d } else { tol1.copysign(xm) };
        fb = eval(&f, b, "brent root finder")?;
    }

    Err(SolverError::NoConvergence {
        method: "brent root finder",
        iterations: max_iterations,
        x: b,
        value: fb,
    })
}

/// Bracket the root of a function that is increasing on `(0, ∞)`.
///
/// Starting from a positive `guess`, the interval is grown geometrically by `factor`
/// towards the sign change. Returns `(lower, upper)` with `f(lower) <= 0 <= f(upper)`.
pub fn bracket_increasing<F>(
    f: F,
    guess: f64,
    factor: f64,
    max_steps: usize,
) -> Result<(f64, f64), SolverError>
where
    F: Fn(f64) -> f64,
{
    if !(guess > 0.0) || !(factor > 1.0) {
        return Err(SolverError::InvalidInterval {
            lower: guess,
            upper: guess * factor,
        });
    }

    let f0 = eval(&f, guess, "bracket search")?;
    if f0 == 0.0 {
        return Ok((guess, guess));
    }

    let mut inner = guess;
    for _ in 0..max_steps {
        let outer = if f0 < 0.0 {
            inner * factor
        } else {
            inner / factor
        };
        let value = eval(&f, outer, "bracket search")?;
        if value.signum() != f0.signum() || value == 0.0 {
            return Ok(if f0 < 0.0 {
                (inner, outer)
            } else {
                (outer, inner)
            });
        }
        inner = outer;
    }

    Err(SolverError::NoConvergence {
        method: "bracket search",
        iterations: max_steps,
        x: inner,
        value: f(inner),
    })
}

/// Newton–Raphson iteration with an analytic derivative.
///
/// Converges when the step size falls below `tolerance`.
pub fn newton<F, D>(
    f: F,
    derivative: D,
    guess: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<Solution, SolverError>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let mut x = guess;
    for iteration in 1..=max_iterations {
        let fx = eval(&f, x, "newton")?;
        let slope = eval(&derivative, x, "newton")?;
        if slope == 0.0 {
            return Err(SolverError::ZeroDerivative { x });
        }
        let next = x - fx / slope;
        if !next.is_finite() {
            return Err(SolverError::NonFinite {
                method: "newton",
                x,
            });
        }
        if (next - x).abs() < tolerance {
            log::debug!("newton converged: x = {next}, iterations = {iteration}");
            return Ok(Solution {
                x: next,
                value: f(next),
                iterations: iteration,
            });
        }
        x = next;
    }

    Err(SolverError::NoConvergence {
        method: "newton",
        iterations: max_iterations,
        x,
        value: f(x),
    })
}

fn eval<F: Fn(f64) -> f64>(f: &F, x: f64, method: &'static str) -> Result<f64, SolverError> {
    let value = f(x);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SolverError::NonFinite { method, x })
    }
}
