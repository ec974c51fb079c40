//! Cash-flow table assembly per instrument.
//!
//! One builder per instrument produces the full table a pricing request
//! reports: coupon dates, day counts, discount tenors, periodic rates,
//! coupon amounts, present values, duration/convexity series and the
//! peso flows on the negotiated notional. Analytics are layered on top
//! by the `renta-analytics` crate.

use serde::Serialize;

use renta_core::calendars::Calendar;
use renta_core::error::{RentaError, RentaResult};
use renta_core::types::{Date, IpcMode, RateMode};
use renta_math::rates::nominal_to_effective_annual;
use renta_rates::RateSource;

use crate::cashflows::{
    convexity_terms, coupon_amounts, negotiated_flows, present_values, present_values_on_basis,
    time_weighted_pvs,
};
use crate::rates::{
    fixed_periodic_rates, ibr_market_rate_ea, ibr_periodic_rates, ipc_market_rate_ea,
    ipc_periodic_rates,
};
use crate::schedule::CouponSchedule;
use crate::terms::{BondTerms, TradeContext};

/// The complete per-coupon table for one pricing request.
#[derive(Debug, Clone)]
pub struct BondCashflows {
    /// The coupon schedule the table was built on.
    pub schedule: CouponSchedule,
    /// Periodic coupon rate per row, as a decimal.
    pub periodic_rates: Vec<f64>,
    /// Coupon amounts on the base-100 scale, principal on the last row.
    pub coupons: Vec<f64>,
    /// Present value of each coupon at the trade date.
    pub present_values: Vec<f64>,
    /// Time-weighted present values (`t × PV`).
    pub time_weighted: Vec<f64>,
    /// Convexity numerator terms (`t × PV × (t + 1)`).
    pub convexity_terms: Vec<f64>,
    /// Coupon flows in pesos on the negotiated notional.
    pub peso_flows: Vec<f64>,
    /// Index rate applied per row for floating/indexed bonds, percent.
    pub applied_index: Option<Vec<f64>>,
    /// Effective annual rate the table was discounted at, percent.
    pub market_rate_ea: f64,
}

/// Forward-looking flows of an index-linked bond in negotiated-notional
/// terms, with the index rates actually applied.
#[derive(Debug, Clone, Serialize)]
pub struct RealFlows {
    /// Coupon payment dates.
    pub dates: Vec<Date>,
    /// Coupon flows in pesos on the negotiated notional.
    pub peso_flows: Vec<f64>,
    /// Index rate applied per row, spread stripped, in percent.
    pub applied_rates: Vec<f64>,
}

impl BondCashflows {
    fn assemble(
        schedule: CouponSchedule,
        periodic_rates: Vec<f64>,
        market_rate_ea: f64,
        terms: &BondTerms,
        applied_index: Option<Vec<f64>>,
        basis_discounting: bool,
    ) -> RentaResult<Self> {
        let coupons = coupon_amounts(terms.base_notional, &periodic_rates)?;
        let pvs = if basis_discounting {
            present_values_on_basis(
                &coupons,
                market_rate_ea,
                schedule.discount_days(),
                schedule.basis(),
            )?
        } else {
            present_values(&coupons, market_rate_ea, schedule.discount_days())?
        };
        let time_weighted = time_weighted_pvs(&pvs, schedule.discount_days(), schedule.basis());
        let convexity = convexity_terms(&time_weighted, schedule.discount_days(), schedule.basis());
        let peso_flows = negotiated_flows(terms.negotiated_notional, &coupons);

        let table = Self {
            schedule,
            periodic_rates,
            coupons,
            present_values: pvs,
            time_weighted,
            convexity_terms: convexity,
            peso_flows,
            applied_index,
            market_rate_ea,
        };
        table.check_lengths()?;
        Ok(table)
    }

    /// Verifies every derived series matches the schedule length.
    fn check_lengths(&self) -> RentaResult<()> {
        let expected = self.schedule.len();
        let columns = [
            ("periodic_rates", self.periodic_rates.len()),
            ("coupons", self.coupons.len()),
            ("present_values", self.present_values.len()),
            ("time_weighted", self.time_weighted.len()),
            ("convexity_terms", self.convexity_terms.len()),
            ("peso_flows", self.peso_flows.len()),
        ];

        for (name, len) in columns {
            if len != expected {
                return Err(RentaError::computation(format!(
                    "column '{name}' has inconsistent length: {len} vs {expected} rows"
                )));
            }
        }
        if let Some(applied) = &self.applied_index {
            if applied.len() != expected {
                return Err(RentaError::computation(format!(
                    "column 'applied_index' has inconsistent length: {} vs {expected} rows",
                    applied.len()
                )));
            }
        }

        Ok(())
    }

    /// The forward flows view for an index-linked bond.
    ///
    /// # Errors
    ///
    /// Returns `RentaError::Computation` when the table carries no
    /// applied index series (fixed-rate bonds).
    pub fn real_flows(&self) -> RentaResult<RealFlows> {
        let applied = self.applied_index.as_ref().ok_or_else(|| {
            RentaError::computation("fixed-rate table carries no applied index series")
        })?;

        Ok(RealFlows {
            dates: self.schedule.dates().to_vec(),
            peso_flows: self.peso_flows.clone(),
            applied_rates: applied.clone(),
        })
    }
}

/// Builds the cash-flow table for a fixed-rate bond on the canonical
/// forward schedule. The market rate is taken as effective annual,
/// converting first when quoted nominal.
///
/// # Errors
///
/// Propagates schedule and length-consistency failures.
pub fn build_fixed(terms: &BondTerms, trade: &TradeContext) -> RentaResult<BondCashflows> {
    let schedule = CouponSchedule::forward(
        terms.issue_date,
        terms.maturity_date,
        trade.trade_date,
        terms.periodicity,
        terms.basis,
    )?;
    let rates = fixed_periodic_rates(&schedule, terms.coupon_rate, terms.rate_mode)?;
    let market_ea = match trade.market_rate_mode {
        RateMode::EffectiveAnnual => trade.market_rate,
        RateMode::NominalAnnual => {
            nominal_to_effective_annual(trade.market_rate, terms.periodicity)
        }
    };

    BondCashflows::assemble(schedule, rates, market_ea, terms, None, false)
}

/// Builds the cash-flow table for a fixed-rate bond on the legacy fixed
/// grid: issue row included, zero first day count and basis-divisor
/// discounting.
///
/// # Errors
///
/// Propagates schedule and length-consistency failures.
pub fn build_fixed_grid(terms: &BondTerms, trade: &TradeContext) -> RentaResult<BondCashflows> {
    let schedule = CouponSchedule::fixed_grid(
        terms.issue_date,
        terms.maturity_date,
        trade.trade_date,
        terms.periodicity,
        terms.basis,
    )?;
    let rates = fixed_periodic_rates(&schedule, terms.coupon_rate, terms.rate_mode)?;
    let market_ea = match trade.market_rate_mode {
        RateMode::EffectiveAnnual => trade.market_rate,
        RateMode::NominalAnnual => {
            nominal_to_effective_annual(trade.market_rate, terms.periodicity)
        }
    };

    BondCashflows::assemble(schedule, rates, market_ea, terms, None, true)
}

/// Builds the cash-flow table for an IBR floating bond. `terms.coupon_rate`
/// and `trade.market_rate` are the coupon and negotiation spreads over
/// the index.
///
/// # Errors
///
/// Propagates `RentaError::RateNotFound` naming any missing fixing.
pub fn build_ibr(
    terms: &BondTerms,
    trade: &TradeContext,
    source: &dyn RateSource,
    calendar: &dyn Calendar,
) -> RentaResult<BondCashflows> {
    let schedule = CouponSchedule::forward(
        terms.issue_date,
        terms.maturity_date,
        trade.trade_date,
        terms.periodicity,
        terms.basis,
    )?;
    let rates = ibr_periodic_rates(source, calendar, &schedule, terms.coupon_rate, terms.rate_mode)?;
    let market_ea = ibr_market_rate_ea(
        source,
        calendar,
        &schedule,
        trade.trade_date,
        trade.market_rate,
        trade.market_rate_mode,
    )?;

    BondCashflows::assemble(
        schedule,
        rates.periodic,
        market_ea,
        terms,
        Some(rates.applied_index),
        false,
    )
}

/// Builds the cash-flow table for an IPC inflation-indexed bond.
///
/// # Errors
///
/// Propagates `RentaError::RateNotFound` naming any missing print date.
pub fn build_ipc(
    terms: &BondTerms,
    trade: &TradeContext,
    ipc_mode: IpcMode,
    source: &dyn RateSource,
) -> RentaResult<BondCashflows> {
    let schedule = CouponSchedule::forward(
        terms.issue_date,
        terms.maturity_date,
        trade.trade_date,
        terms.periodicity,
        terms.basis,
    )?;
    let rates = ipc_periodic_rates(
        source,
        &schedule,
        trade.trade_date,
        terms.coupon_rate,
        terms.rate_mode,
        ipc_mode,
    )?;
    let market_ea = ipc_market_rate_ea(
        source,
        &schedule,
        trade.trade_date,
        trade.market_rate,
        trade.market_rate_mode,
    )?;

    BondCashflows::assemble(
        schedule,
        rates.periodic,
        market_ea,
        terms,
        Some(rates.applied_index),
        false,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use renta_core::types::{DayCountBasis, Periodicity};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn one_year_terms() -> BondTerms {
        BondTerms {
            issue_date: d(2023, 1, 1),
            maturity_date: d(2024, 1, 1),
            periodicity: Periodicity::Annual,
            basis: DayCountBasis::Thirty360,
            coupon_rate: 10.0,
            rate_mode: RateMode::EffectiveAnnual,
            base_notional: 100.0,
            negotiated_notional: 1_000_000.0,
        }
    }

    fn at_issue_trade() -> TradeContext {
        TradeContext {
            trade_date: d(2023, 1, 1),
            market_rate: 10.0,
            market_rate_mode: RateMode::EffectiveAnnual,
        }
    }

    #[test]
    fn test_fixed_one_year_par_bond() {
        let table = build_fixed(&one_year_terms(), &at_issue_trade()).unwrap();

        assert_eq!(table.schedule.dates(), &[d(2024, 1, 1)]);
        assert_relative_eq!(table.coupons[0], 110.0, epsilon = 1e-9);
        assert_relative_eq!(table.present_values[0], 100.0, epsilon = 1e-9);
        assert_relative_eq!(table.peso_flows[0], 1_100_000.0, epsilon = 1e-3);
        assert!(table.applied_index.is_none());
    }

    #[test]
    fn test_fixed_nominal_market_rate_is_annualized() {
        let mut trade = at_issue_trade();
        trade.market_rate_mode = RateMode::NominalAnnual;
        let mut terms = one_year_terms();
        terms.periodicity = Periodicity::Semiannual;

        let table = build_fixed(&terms, &trade).unwrap();
        assert_relative_eq!(
            table.market_rate_ea,
            ((1.0_f64 + 0.05).powi(2) - 1.0) * 100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_fixed_grid_discounts_on_basis() {
        let table = build_fixed_grid(&one_year_terms(), &at_issue_trade()).unwrap();

        // Issue row, then the 360-day step.
        assert_eq!(table.schedule.dates(), &[d(2023, 1, 1), d(2023, 12, 27)]);
        assert_relative_eq!(table.coupons[1], 110.0, epsilon = 1e-9);
        // 110 / 1.1^(360/360) on the basis divisor.
        assert_relative_eq!(table.present_values[1], 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_real_flows_rejected_for_fixed() {
        let table = build_fixed(&one_year_terms(), &at_issue_trade()).unwrap();
        assert!(table.real_flows().is_err());
    }
}
