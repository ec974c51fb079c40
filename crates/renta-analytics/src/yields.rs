//! Investment yield (TIR) from the negotiated flows.

use renta_core::error::RentaResult;
use renta_core::types::{Date, Periodicity};
use renta_math::irr::{annualize, irr, xirr};

/// Date-aware investment yield, in percent.
///
/// The outlay at the trade date is the settlement value (valor de
/// giro); each coupon date contributes its peso flow. Discounting uses
/// annual-365 exponents over the actual calendar offsets.
///
/// # Errors
///
/// Propagates solver failures and degenerate flow series.
pub fn investment_yield(
    trade: Date,
    dates: &[Date],
    peso_flows: &[f64],
    settlement_value: f64,
) -> RentaResult<f64> {
    let mut offsets = Vec::with_capacity(dates.len() + 1);
    let mut flows = Vec::with_capacity(peso_flows.len() + 1);

    offsets.push(0);
    flows.push(-settlement_value);
    for (date, flow) in dates.iter().zip(peso_flows) {
        offsets.push(trade.days_between(date));
        flows.push(*flow);
    }

    Ok(xirr(&offsets, &flows)? * 100.0)
}

/// Period-indexed yield annualized by the coupon periodicity, in
/// percent. Used when flows carry no explicit dates.
///
/// # Errors
///
/// Propagates solver failures and degenerate flow series.
pub fn periodic_yield_annualized(flows: &[f64], periodicity: Periodicity) -> RentaResult<f64> {
    let periodic = irr(flows)?;
    Ok(annualize(periodic, periodicity.periods_per_year()) * 100.0)
}
