//! Rate algebra.
//!
//! Conversions between nominal and effective-annual quotes, spread
//! composition for floating indices, and the truncation helper used for
//! published prices. All functions here work on rates expressed as
//! percentages unless noted otherwise.

use renta_core::types::{Periodicity, RateMode};

/// Converts a nominal annual rate (in percent, compounded per period) to
/// an effective annual rate (in percent).
///
/// An annual-periodicity nominal rate is already effective.
#[must_use]
pub fn nominal_to_effective_annual(nominal_pct: f64, periodicity: Periodicity) -> f64 {
    let n = periodicity.periods_per_year();
    if n == 1 {
        return nominal_pct;
    }

    let effective = (1.0 + (nominal_pct / 100.0) / f64::from(n)).powi(n as i32) - 1.0;
    effective * 100.0
}

/// Composes an index rate with a spread (both in percent).
///
/// Nominal mode adds the rates; effective mode compounds them:
/// `(1 + index)(1 + spread) - 1`.
#[must_use]
pub fn compose_spread(index_pct: f64, spread_pct: f64, mode: RateMode) -> f64 {
    match mode {
        RateMode::NominalAnnual => index_pct + spread_pct,
        RateMode::EffectiveAnnual => {
            ((1.0 + index_pct / 100.0) * (1.0 + spread_pct / 100.0) - 1.0) * 100.0
        }
    }
}

/// Strips a spread from a composed effective rate (both in percent):
/// `(1 + total) / (1 + spread) - 1`.
///
/// Used for the display series of applied index rates.
#[must_use]
pub fn strip_effective_spread(total_pct: f64, spread_pct: f64) -> f64 {
    ((1.0 + total_pct / 100.0) / (1.0 + spread_pct / 100.0) - 1.0) * 100.0
}

/// Truncates (floors) a value to the given number of decimals.
///
/// Published dirty prices are truncated, not rounded, to reconcile with
/// external systems.
#[must_use]
pub fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).floor() / factor
}

/// Rounds a value to the given number of decimals.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
