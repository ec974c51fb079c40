//! Internal rate of return.
//!
//! Two flavours: period-indexed [`irr`] for flows at regular intervals,
//! and date-aware [`xirr`] discounting each flow by its actual day
//! offset on an annual-365 base. Both try Newton-Raphson first and fall
//! back to bisection over a wide bracket.

use log::debug;

use renta_core::error::{RentaError, RentaResult};

use crate::solvers::{bisection, newton_raphson, SolverConfig};

/// Lower bracket bound for the bisection fallback (-99.99% per period).
const RATE_FLOOR: f64 = -0.9999;
/// Upper bracket bound for the bisection fallback (1000% per period).
const RATE_CEIL: f64 = 10.0;

/// Computes the internal rate of return of a period-indexed flow series.
///
/// `flows[0]` is the investment outlay (negative); `flows[i]` is
/// received at the end of period `i`. The result is the periodic rate as
/// a decimal.
///
/// # Errors
///
/// Returns `RentaError::Computation` when the series cannot change sign
/// and `RentaError::ConvergenceFailed` when no root is found.
pub fn irr(flows: &[f64]) -> RentaResult<f64> {
    validate_flows(flows)?;

    let npv = |rate: f64| {
        flows
            .iter()
            .enumerate()
            .map(|(i, cf)| cf / (1.0 + rate).powi(i as i32))
            .sum::<f64>()
    };
    let d_npv = |rate: f64| {
        flows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, cf)| -(i as f64) * cf / (1.0 + rate).powi(i as i32 + 1))
            .sum::<f64>()
    };

    solve(npv, d_npv)
}

/// Computes the date-aware internal rate of return (XIRR).
///
/// `day_offsets[i]` is the number of calendar days from the valuation
/// date to flow `i` (offset 0 for the outlay itself); discounting uses
/// an annual-365 exponent. The result is the annual rate as a decimal.
///
/// # Errors
///
/// Returns `RentaError::Computation` on malformed input and
/// `RentaError::ConvergenceFailed` when no root is found.
pub fn xirr(day_offsets: &[i64], flows: &[f64]) -> RentaResult<f64> {
    validate_flows(flows)?;
    if day_offsets.len() != flows.len() {
        return Err(RentaError::computation(format!(
            "xirr length mismatch: {} day offsets vs {} flows",
            day_offsets.len(),
            flows.len()
        )));
    }

    let years: Vec<f64> = day_offsets.iter().map(|&d| d as f64 / 365.0).collect();

    let npv = |rate: f64| {
        flows
            .iter()
            .zip(&years)
            .map(|(cf, t)| cf / (1.0 + rate).powf(*t))
            .sum::<f64>()
    };
    let d_npv = |rate: f64| {
        flows
            .iter()
            .zip(&years)
            .map(|(cf, t)| -t * cf / (1.0 + rate).powf(t + 1.0))
            .sum::<f64>()
    };

    solve(npv, d_npv)
}

/// Annualizes a periodic rate: `(1 + rate)^periods_per_year - 1`.
#[must_use]
pub fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

fn validate_flows(flows: &[f64]) -> RentaResult<()> {
    if flows.len() < 2 {
        return Err(RentaError::computation(
            "IRR requires at least two cash flows",
        ));
    }
    let has_negative = flows.iter().any(|cf| *cf < 0.0);
    let has_positive = flows.iter().any(|cf| *cf > 0.0);
    if !has_negative || !has_positive {
        return Err(RentaError::computation(
            "IRR requires at least one inflow and one outflow",
        ));
    }
    Ok(())
}

fn solve<F, DF>(npv: F, d_npv: DF) -> RentaResult<f64>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let config = SolverConfig::default();

    match newton_raphson(&npv, &d_npv, 0.05, &config) {
        Ok(result) if result.root > RATE_FLOOR => Ok(result.root),
        other => {
            debug!("newton failed for IRR ({other:?}), falling back to bisection");
            bisection(&npv, RATE_FLOOR, RATE_CEIL, &config).map(|r| r.root)
        }
    }
}
