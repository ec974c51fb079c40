//! Day count conventions.
//!
//! Two conventions govern Colombian fixed income accrual: 30/360 (US bond
//! basis) and Actual/365. Discount tenors against the trade date carry a
//! Feb-29 adjustment that keeps the annual-365 time fraction from being
//! inflated by leap years.

use crate::types::{Date, DayCountBasis};

/// Trait for day count conventions.
pub trait DayCount {
    /// Returns the name of the convention.
    fn name(&self) -> &'static str;

    /// Calculates the number of days between two dates under the
    /// convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// 30/360 US day count convention (Bond Basis).
///
/// # Rules
///
/// 1. If D1 is 31, change D1 to 30
/// 2. If D2 is 31 AND D1 (after rule 1) is 30, change D2 to 30
///
/// # Formula
///
/// `Days = 360 x (Y2 - Y1) + 30 x (M2 - M1) + (D2 - D1)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360;

impl DayCount for Thirty360 {
    fn name(&self) -> &'static str {
        "30/360"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let y1 = i64::from(start.year());
        let y2 = i64::from(end.year());
        let m1 = i64::from(start.month());
        let m2 = i64::from(end.month());
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());

        if d1 == 31 {
            d1 = 30;
        }
        if d2 == 31 && d1 == 30 {
            d2 = 30;
        }

        360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
    }
}

/// Actual/365 day count convention.
///
/// The day count is the literal calendar-day difference; the 365
/// denominator is applied by the accrual formulas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actual365;

impl DayCount for Actual365 {
    fn name(&self) -> &'static str {
        "365/365"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Calculates the day count between two dates under the given basis.
#[must_use]
pub fn days_between(start: Date, end: Date, basis: DayCountBasis) -> i64 {
    match basis {
        DayCountBasis::Thirty360 => Thirty360.day_count(start, end),
        DayCountBasis::Actual365 => Actual365.day_count(start, end),
    }
}

/// Calculates the discount tenor from the trade date to a coupon date.
///
/// The tenor is the literal calendar-day difference minus one day for
/// every February 29 inside `[trade, coupon]`, so that discounting
/// against a fixed annual-365 base is not inflated by leap years.
/// Changing the adjustment would shift every published price, so it is
/// kept exactly as quoted in the market convention.
#[must_use]
pub fn discount_tenor(trade: Date, coupon: Date) -> i64 {
    let mut days = trade.days_between(&coupon);

    for year in trade.year()..=coupon.year() {
        if let Ok(feb29) = Date::from_ymd(year, 2, 29) {
            if trade <= feb29 && feb29 <= coupon {
                days -= 1;
            }
        }
    }

    days
}
