//! Pricing entry points.
//!
//! Each entry point validates the request, builds the cash-flow table
//! and derives the trading metrics. Price-sensitivity measures are
//! reported for fixed-rate bonds only; floating and indexed coupons
//! reset with the market, so duration on projected flows would be
//! misleading.

use log::debug;
use serde::Serialize;

use renta_bonds::pricing::{build_fixed, build_ibr, build_ipc};
use renta_bonds::terms::{validate_request, BondTerms, TradeContext};
use renta_bonds::BondCashflows;
use renta_core::calendars::Calendar;
use renta_core::error::RentaResult;
use renta_core::types::IpcMode;
use renta_rates::RateSource;

use crate::price::{accrued_interest, classify_clean_price, dirty_price, PriceClass};
use crate::risk::{convexity, dv01, macaulay_duration, modified_duration};
use crate::yields::investment_yield;

/// Price-sensitivity measures, reported for fixed-rate bonds.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RiskMetrics {
    /// Macaulay duration in years.
    pub macaulay: f64,
    /// Modified duration in years.
    pub modified: f64,
    /// Peso value of a one-basis-point yield move.
    pub dv01: f64,
    /// Convexity of the price/yield curve.
    pub convexity: f64,
}

/// The trading metrics of one pricing request.
#[derive(Debug, Clone, Serialize)]
pub struct PricingResult {
    /// Dirty price, percent of face, truncated to three decimals.
    pub dirty_price: f64,
    /// Accrued interest (cupón corrido), percent of face.
    pub accrued_interest: f64,
    /// Clean price: dirty minus accrued.
    pub clean_price: f64,
    /// Clean price classified against par.
    pub classification: PriceClass,
    /// Settlement value (valor de giro) in pesos.
    pub settlement_value: f64,
    /// Effective annual rate the flows were discounted at, percent.
    pub market_rate_ea: f64,
    /// Investment yield (TIR) from the negotiated flows, percent.
    pub investment_yield: f64,
    /// Sensitivity measures; `None` for floating and indexed bonds.
    pub risk: Option<RiskMetrics>,
}

fn result_from_table(
    table: &BondCashflows,
    terms: &BondTerms,
    trade: &TradeContext,
    with_risk: bool,
) -> RentaResult<PricingResult> {
    let dirty = dirty_price(&table.present_values)?;
    let accrued = accrued_interest(table, trade.trade_date)?;
    let clean = dirty - accrued;
    let settlement = dirty / 100.0 * terms.negotiated_notional;

    let yield_pct = investment_yield(
        trade.trade_date,
        table.schedule.dates(),
        &table.peso_flows,
        settlement,
    )?;

    let risk = if with_risk {
        let macaulay = macaulay_duration(&table.time_weighted, dirty)?;
        let modified = modified_duration(macaulay, table.market_rate_ea);
        Some(RiskMetrics {
            macaulay,
            modified,
            dv01: dv01(modified, settlement),
            convexity: convexity(
                &table.convexity_terms,
                dirty,
                table.market_rate_ea,
                table.schedule.periodicity(),
                table.schedule.basis(),
            )?,
        })
    } else {
        None
    };

    debug!(
        "priced {} rows: dirty {dirty:.3}, clean {clean:.3}, yield {yield_pct:.3}%",
        table.schedule.len()
    );

    Ok(PricingResult {
        dirty_price: dirty,
        accrued_interest: accrued,
        clean_price: clean,
        classification: classify_clean_price(clean),
        settlement_value: settlement,
        market_rate_ea: table.market_rate_ea,
        investment_yield: yield_pct,
        risk,
    })
}

/// Prices a fixed-rate bond: cash-flow table plus trading metrics,
/// including the sensitivity measures.
///
/// # Errors
///
/// Returns `RentaError::Validation` on bad inputs; propagates
/// computation failures.
pub fn price_fixed(
    terms: &BondTerms,
    trade: &TradeContext,
) -> RentaResult<(BondCashflows, PricingResult)> {
    validate_request(terms, trade, false)?;
    let table = build_fixed(terms, trade)?;
    let result = result_from_table(&table, terms, trade, true)?;
    Ok((table, result))
}

/// Prices an IBR floating bond against the given rate source. `online`
/// enforces the no-future-dates rule of the live source.
///
/// # Errors
///
/// Returns `RentaError::Validation` on bad inputs and
/// `RentaError::RateNotFound` naming any missing fixing date.
pub fn price_ibr(
    terms: &BondTerms,
    trade: &TradeContext,
    source: &dyn RateSource,
    calendar: &dyn Calendar,
    online: bool,
) -> RentaResult<(BondCashflows, PricingResult)> {
    validate_request(terms, trade, online)?;
    let table = build_ibr(terms, trade, source, calendar)?;
    let result = result_from_table(&table, terms, trade, false)?;
    Ok((table, result))
}

/// Prices an IPC inflation-indexed bond against the given rate source.
///
/// # Errors
///
/// Returns `RentaError::Validation` on bad inputs and
/// `RentaError::RateNotFound` naming any missing print date.
pub fn price_ipc(
    terms: &BondTerms,
    trade: &TradeContext,
    ipc_mode: IpcMode,
    source: &dyn RateSource,
    online: bool,
) -> RentaResult<(BondCashflows, PricingResult)> {
    validate_request(terms, trade, online)?;
    let table = build_ipc(terms, trade, ipc_mode, source)?;
    let result = result_from_table(&table, terms, trade, false)?;
    Ok((table, result))
}
