//! Cash-flow building and discounting.
//!
//! Coupon amounts run on the base-notional (100) scale; the bullet
//! principal is added to the final coupon. Discounting in the canonical
//! engine always uses an annual-365 exponent, whatever the accrual
//! basis, so market-rate compounding stays annual-365-based; the legacy
//! fixed-grid path keeps the basis divisor instead. Every derived
//! series must match the schedule length, enforced when assembling the
//! table.

use renta_core::error::{RentaError, RentaResult};
use renta_core::types::DayCountBasis;

/// Builds the coupon amount series on the base-notional scale.
///
/// `amount_i = rate_i × base_notional`, plus the base notional on the
/// final entry (bullet redemption).
///
/// # Errors
///
/// Returns `RentaError::Computation` on an empty rate series.
pub fn coupon_amounts(base_notional: f64, periodic_rates: &[f64]) -> RentaResult<Vec<f64>> {
    if periodic_rates.is_empty() {
        return Err(RentaError::computation("periodic rate list is empty"));
    }

    let mut amounts: Vec<f64> = periodic_rates
        .iter()
        .map(|rate| base_notional * rate)
        .collect();
    // Sole principal repayment, at maturity.
    *amounts.last_mut().expect("non-empty by the check above") += base_notional;

    Ok(amounts)
}

/// Discounts each flow to the trade date with an annual-365 exponent:
/// `CF / (1 + rate/100)^(days/365)`.
///
/// # Errors
///
/// Returns `RentaError::Computation` on a length mismatch.
pub fn present_values(
    flows: &[f64],
    market_rate_pct: f64,
    discount_days: &[i64],
) -> RentaResult<Vec<f64>> {
    discount(flows, market_rate_pct, discount_days, 365.0)
}

/// Legacy discounting for the fixed-grid path: the exponent divisor
/// follows the bond's own basis (360 under 30/360).
///
/// # Errors
///
/// Returns `RentaError::Computation` on a length mismatch.
pub fn present_values_on_basis(
    flows: &[f64],
    market_rate_pct: f64,
    discount_days: &[i64],
    basis: DayCountBasis,
) -> RentaResult<Vec<f64>> {
    discount(flows, market_rate_pct, discount_days, basis.days_per_year() as f64)
}

fn discount(
    flows: &[f64],
    market_rate_pct: f64,
    discount_days: &[i64],
    year_days: f64,
) -> RentaResult<Vec<f64>> {
    if flows.len() != discount_days.len() {
        return Err(RentaError::computation(format!(
            "present value length mismatch: {} flows vs {} tenors",
            flows.len(),
            discount_days.len()
        )));
    }

    let rate = market_rate_pct / 100.0;
    Ok(flows
        .iter()
        .zip(discount_days)
        .map(|(cf, &days)| cf / (1.0 + rate).powf(days as f64 / year_days))
        .collect())
}

/// Rescales base-100 flows to the negotiated notional:
/// `CF / 100 × notional`.
#[must_use]
pub fn negotiated_flows(negotiated_notional: f64, flows: &[f64]) -> Vec<f64> {
    flows.iter().map(|cf| cf / 100.0 * negotiated_notional).collect()
}

/// The time-weighted present value series feeding duration:
/// `PV_i × days_i / basis_days`.
#[must_use]
pub fn time_weighted_pvs(
    present_values: &[f64],
    discount_days: &[i64],
    basis: DayCountBasis,
) -> Vec<f64> {
    let year_days = basis.days_per_year() as f64;
    present_values
        .iter()
        .zip(discount_days)
        .map(|(pv, &days)| pv * days as f64 / year_days)
        .collect()
}

/// The convexity numerator series: `(t_i × PV_i) × (t_i + 1)`.
#[must_use]
pub fn convexity_terms(
    time_weighted: &[f64],
    discount_days: &[i64],
    basis: DayCountBasis,
) -> Vec<f64> {
    let year_days = basis.days_per_year() as f64;
    time_weighted
        .iter()
        .zip(discount_days)
        .map(|(t_pv, &days)| t_pv * (days as f64 / year_days + 1.0))
        .collect()
}
