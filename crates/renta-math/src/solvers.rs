//! Root-finding algorithms.
//!
//! Two solvers cover the library's needs: Newton-Raphson for fast
//! convergence on well-behaved IRR problems, and bisection as a
//! guaranteed fallback when Newton diverges or the derivative vanishes.

use renta_core::error::{RentaError, RentaResult};

/// Configuration for iterative solvers.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Maximum number of iterations before giving up.
    pub max_iterations: u32,
    /// Convergence tolerance on the residual.
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-10,
        }
    }
}

/// Result of a successful solver run.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Iterations used.
    pub iterations: u32,
    /// Residual at the root.
    pub residual: f64,
}

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)`.
///
/// # Errors
///
/// Returns `RentaError::ConvergenceFailed` if the iteration budget is
/// exhausted, or `RentaError::Computation` on a vanishing derivative.
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> RentaResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);
        if dfx.abs() < 1e-15 {
            return Err(RentaError::computation(format!(
                "derivative vanished at x = {x}"
            )));
        }

        let step = fx / dfx;
        x -= step;

        if step.abs() < config.tolerance {
            let final_fx = f(x);
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: final_fx,
            });
        }
    }

    Err(RentaError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}

/// Bisection root-finding algorithm.
///
/// Requires `f(a) * f(b) < 0` (opposite signs at the endpoints).
///
/// # Errors
///
/// Returns `RentaError::Computation` if the bracket is invalid, or
/// `RentaError::ConvergenceFailed` if the iteration budget is exhausted.
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> RentaResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a;
    let mut hi = b;
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo * f_hi > 0.0 {
        return Err(RentaError::computation(format!(
            "root not bracketed: f({a}) = {f_lo}, f({b}) = {f_hi}"
        )));
    }

    for iteration in 0..config.max_iterations {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);

        if f_mid.abs() < config.tolerance || 0.5 * (hi - lo) < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration,
                residual: f_mid,
            });
        }

        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Err(RentaError::convergence_failed(
        config.max_iterations,
        f(0.5 * (lo + hi)).abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newton_sqrt_two() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
        assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn test_newton_vanishing_derivative() {
        let f = |_x: f64| 1.0;
        let df = |_x: f64| 0.0;

        assert!(newton_raphson(f, df, 0.0, &SolverConfig::default()).is_err());
    }

    #[test]
    fn test_bisection_cubic() {
        let f = |x: f64| x * x * x - x - 2.0;

        let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
        assert!(f(result.root).abs() < 1e-9);
    }

    #[test]
    fn test_bisection_invalid_bracket() {
        let f = |x: f64| x * x + 1.0;
        assert!(bisection(f, -1.0, 1.0, &SolverConfig::default()).is_err());
    }
}
