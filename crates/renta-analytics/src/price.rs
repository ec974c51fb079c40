//! Dirty price, accrued interest and clean-price classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use renta_bonds::schedule::previous_period_date;
use renta_bonds::BondCashflows;
use renta_core::daycounts::days_between;
use renta_core::error::{RentaError, RentaResult};
use renta_core::types::Date;
use renta_math::rates::truncate;

/// Decimal places kept on the published dirty price.
const PRICE_DECIMALS: u32 = 3;

/// Classification of a clean price against the 100 par level.
///
/// The comparison is an exact floating equality against 100.0, kept
/// for reproducibility with the established convention rather than a
/// tolerance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceClass {
    /// Trades exactly at its nominal value.
    Par,
    /// Trades below its nominal value.
    Discount,
    /// Trades above its nominal value.
    Premium,
}

impl fmt::Display for PriceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PriceClass::Par => "Precio a la par. Se negocia exactamente a su valor nominal.",
            PriceClass::Discount => {
                "Precio al descuento. Se negocia por debajo de su valor nominal."
            }
            PriceClass::Premium => "Precio con prima. Se negocia por encima de su valor nominal.",
        };
        write!(f, "{text}")
    }
}

/// Classifies a clean price against par.
#[must_use]
pub fn classify_clean_price(clean: f64) -> PriceClass {
    if clean == 100.0 {
        PriceClass::Par
    } else if clean < 100.0 {
        PriceClass::Discount
    } else {
        PriceClass::Premium
    }
}

/// Dirty price: the sum of present values on the base-100 scale,
/// truncated (not rounded) to three decimals for reconciliation with
/// external systems.
///
/// # Errors
///
/// Returns `RentaError::Computation` on an empty table.
pub fn dirty_price(present_values: &[f64]) -> RentaResult<f64> {
    if present_values.is_empty() {
        return Err(RentaError::computation("present value list is empty"));
    }
    Ok(truncate(present_values.iter().sum(), PRICE_DECIMALS))
}

/// Accrued interest (cupón corrido) at the trade date.
///
/// The accruing coupon is the first schedule date past the trade date;
/// its period starts at the latest coupon date at or before the trade
/// (the synthetic previous-period date when the schedule keeps no
/// earlier row). Accrued is that coupon amount prorated linearly over
/// the elapsed portion of the period, measured under the bond's
/// day-count basis. Zero when the trade date sits exactly on a coupon
/// boundary.
///
/// # Errors
///
/// Returns `RentaError::Computation` when no coupon date remains past
/// the trade date or the accruing period has no day count.
pub fn accrued_interest(table: &BondCashflows, trade: Date) -> RentaResult<f64> {
    let row = table
        .schedule
        .dates()
        .iter()
        .position(|date| *date > trade)
        .ok_or_else(|| {
            RentaError::computation(format!("no coupon date remains after {trade}"))
        })?;

    let coupon = table.coupons[row];
    let period_days = table.schedule.coupon_days()[row];
    if period_days <= 0 {
        return Err(RentaError::computation(
            "accruing coupon period has no day count",
        ));
    }

    let period_start = if row == 0 {
        previous_period_date(
            table.schedule.dates()[0],
            table.schedule.periodicity(),
            table.schedule.basis(),
            1,
        )?
    } else {
        table.schedule.dates()[row - 1]
    };
    let elapsed = days_between(period_start, trade, table.schedule.basis());

    Ok(coupon / period_days as f64 * elapsed as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use renta_bonds::{build_fixed, build_fixed_grid, BondTerms, TradeContext};
    use renta_core::types::{DayCountBasis, Periodicity, RateMode};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn semiannual_terms() -> BondTerms {
        BondTerms {
            issue_date: d(2023, 1, 1),
            maturity_date: d(2025, 1, 1),
            periodicity: Periodicity::Semiannual,
            basis: DayCountBasis::Thirty360,
            coupon_rate: 8.0,
            rate_mode: RateMode::NominalAnnual,
            base_notional: 100.0,
            negotiated_notional: 1_000_000.0,
        }
    }

    fn trade_on(date: Date) -> TradeContext {
        TradeContext {
            trade_date: date,
            market_rate: 9.0,
            market_rate_mode: RateMode::EffectiveAnnual,
        }
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(classify_clean_price(100.0), PriceClass::Par);
        assert_eq!(classify_clean_price(99.999), PriceClass::Discount);
        assert_eq!(classify_clean_price(100.001), PriceClass::Premium);
    }

    #[test]
    fn test_dirty_price_truncates() {
        assert_relative_eq!(dirty_price(&[50.5129, 50.0]).unwrap(), 100.512);
        assert!(dirty_price(&[]).is_err());
    }

    #[test]
    fn test_accrued_zero_on_coupon_boundary() {
        // Trade exactly on the 2024-01-01 coupon date.
        let trade = d(2024, 1, 1);
        let table = build_fixed(&semiannual_terms(), &trade_on(trade)).unwrap();

        let accrued = accrued_interest(&table, trade).unwrap();
        assert_relative_eq!(accrued, 0.0);
    }

    #[test]
    fn test_accrued_prorates_within_period() {
        // 90 of 180 days into the period running 2024-01-01..2024-07-01.
        let terms = BondTerms {
            rate_mode: RateMode::EffectiveAnnual,
            ..semiannual_terms()
        };
        let trade = d(2024, 4, 1);
        let table = build_fixed(&terms, &trade_on(trade)).unwrap();

        let coupon = table.coupons[0];
        let accrued = accrued_interest(&table, trade).unwrap();
        assert_relative_eq!(accrued, coupon / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_accrued_fixed_grid_anchors_at_latest_coupon() {
        // Legacy grid traded past the first coupons: the accruing
        // period runs from the prior grid date, not from issue.
        let terms = BondTerms {
            issue_date: d(2023, 1, 1),
            maturity_date: d(2025, 1, 1),
            periodicity: Periodicity::Semiannual,
            basis: DayCountBasis::Thirty360,
            coupon_rate: 8.0,
            rate_mode: RateMode::EffectiveAnnual,
            base_notional: 100.0,
            negotiated_notional: 1_000_000.0,
        };
        let trade = d(2024, 2, 1);
        let table = build_fixed_grid(&terms, &trade_on(trade)).unwrap();

        // Grid: issue, then 180-day steps; upcoming coupon 2024-06-24.
        assert_eq!(table.schedule.dates()[2], d(2023, 12, 27));
        assert_eq!(table.schedule.dates()[3], d(2024, 6, 24));

        let coupon = table.coupons[3];
        let accrued = accrued_interest(&table, trade).unwrap();

        // 34 of 180 days elapsed under 30/360 since 2023-12-27.
        assert_relative_eq!(accrued, coupon * 34.0 / 180.0, epsilon = 1e-9);
        assert!(accrued > 0.0);
        assert!(accrued < coupon);
    }

    #[test]
    fn test_accrued_monotonic_over_period() {
        let terms = BondTerms {
            rate_mode: RateMode::EffectiveAnnual,
            ..semiannual_terms()
        };

        let mut previous = -1.0;
        for offset in [0, 30, 60, 89] {
            let trade = d(2024, 1, 1).add_days(offset);
            let table = build_fixed(&terms, &trade_on(trade)).unwrap();
            let accrued = accrued_interest(&table, trade).unwrap();
            assert!(accrued > previous);
            previous = accrued;
        }
    }
}
