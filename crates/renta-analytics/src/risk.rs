//! Duration, DV01 and convexity.

use renta_core::error::{RentaError, RentaResult};
use renta_core::types::{DayCountBasis, Periodicity};

/// Macaulay duration in years: `Σ(t·PV) / dirty_price`.
///
/// # Errors
///
/// Returns `RentaError::Computation` on a zero dirty price.
pub fn macaulay_duration(time_weighted: &[f64], dirty: f64) -> RentaResult<f64> {
    if dirty == 0.0 {
        return Err(RentaError::computation(
            "dirty price is zero, duration is undefined",
        ));
    }
    Ok(time_weighted.iter().sum::<f64>() / dirty)
}

/// Modified duration: `Macaulay / (1 + rate/100)`.
#[must_use]
pub fn modified_duration(macaulay: f64, market_rate_pct: f64) -> f64 {
    macaulay / (1.0 + market_rate_pct / 100.0)
}

/// Peso value of a one-basis-point yield move:
/// `modified × settlement_value / 10000`.
#[must_use]
pub fn dv01(modified: f64, settlement_value: f64) -> f64 {
    modified * settlement_value / 10_000.0
}

/// Convexity: `Σ[(t·PV)(t+1)] / [dirty × (1+rate/100)^(2·period_days/365)]`.
///
/// `period_days` is a fixed convention per periodicity and basis (e.g.
/// Semiannual is 180 under 30/360 and 182 under Actual/365), not read
/// off the actual schedule.
///
/// # Errors
///
/// Returns `RentaError::Computation` on a zero dirty price.
pub fn convexity(
    convexity_terms: &[f64],
    dirty: f64,
    market_rate_pct: f64,
    periodicity: Periodicity,
    basis: DayCountBasis,
) -> RentaResult<f64> {
    if dirty == 0.0 {
        return Err(RentaError::computation(
            "dirty price is zero, convexity is undefined",
        ));
    }

    let period_days = periodicity.conventional_period_days(basis) as f64;
    let compounding = (1.0 + market_rate_pct / 100.0).powf(2.0 * period_days / 365.0);

    Ok(convexity_terms.iter().sum::<f64>() / (dirty * compounding))
}
