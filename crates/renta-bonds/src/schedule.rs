//! Coupon schedule generation.
//!
//! Two grids coexist:
//!
//! - The canonical grid steps calendar months from the issue date,
//!   preserving month-end anchoring (stepping from the last day of a
//!   month lands on the last day of the target month), and keeps only
//!   the dates after the trade date. The first coupon period is sized
//!   against a synthetic previous-period date one step back.
//! - The fixed grid, kept for the original fixed-rate variant, starts
//!   at the issue date itself and advances either by calendar months
//!   (Actual/365) or by a fixed day count of 30/90/180/360 (30/360).

use renta_core::daycounts::{days_between, discount_tenor};
use renta_core::error::{RentaError, RentaResult};
use renta_core::types::{Date, DayCountBasis, Periodicity};

/// An immutable coupon schedule: the payment dates plus the per-row day
/// counts the rest of the engine consumes.
#[derive(Debug, Clone)]
pub struct CouponSchedule {
    dates: Vec<Date>,
    coupon_days: Vec<i64>,
    discount_days: Vec<i64>,
    periodicity: Periodicity,
    basis: DayCountBasis,
}

impl CouponSchedule {
    /// Builds the canonical forward schedule for a pricing request:
    /// month-stepped dates after `trade` up to `maturity`, first period
    /// sized from the synthetic previous-period date, discount tenors
    /// leap-adjusted against the trade date.
    ///
    /// # Errors
    ///
    /// Returns `RentaError::Computation` when no coupon date remains
    /// after the trade date.
    pub fn forward(
        issue: Date,
        maturity: Date,
        trade: Date,
        periodicity: Periodicity,
        basis: DayCountBasis,
    ) -> RentaResult<Self> {
        let dates = month_grid(issue, maturity, Some(trade), periodicity)?;
        if dates.is_empty() {
            return Err(RentaError::computation(format!(
                "no coupon dates remain after {trade}"
            )));
        }

        let mut coupon_days = Vec::with_capacity(dates.len());
        for (i, date) in dates.iter().enumerate() {
            let start = if i == 0 {
                previous_period_date(dates[0], periodicity, basis, 1)?
            } else {
                dates[i - 1]
            };
            coupon_days.push(days_between(start, *date, basis));
        }

        let discount_days = dates.iter().map(|d| discount_tenor(trade, *d)).collect();

        Ok(Self {
            dates,
            coupon_days,
            discount_days,
            periodicity,
            basis,
        })
    }

    /// Builds the legacy fixed-grid schedule: the issue date is row
    /// zero with a day count of zero, later rows are literal calendar
    /// differences, and discount tenors are plain day differences from
    /// the trade date with the issue row forced to zero.
    ///
    /// # Errors
    ///
    /// Returns `RentaError::Computation` on a degenerate (single-row)
    /// grid.
    pub fn fixed_grid(
        issue: Date,
        maturity: Date,
        trade: Date,
        periodicity: Periodicity,
        basis: DayCountBasis,
    ) -> RentaResult<Self> {
        let dates = match basis {
            DayCountBasis::Actual365 => month_grid(issue, maturity, None, periodicity)?,
            DayCountBasis::Thirty360 => day_grid(issue, maturity, periodicity),
        };
        if dates.len() < 2 {
            return Err(RentaError::computation(format!(
                "fixed grid from {issue} to {maturity} holds no coupon rows"
            )));
        }

        let mut coupon_days = vec![0];
        for pair in dates.windows(2) {
            coupon_days.push(pair[0].days_between(&pair[1]));
        }

        let mut discount_days: Vec<i64> =
            dates.iter().map(|d| trade.days_between(d)).collect();
        discount_days[0] = 0;

        Ok(Self {
            dates,
            coupon_days,
            discount_days,
            periodicity,
            basis,
        })
    }

    /// The coupon payment dates, in ascending order.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Day count of each coupon period under the basis.
    #[must_use]
    pub fn coupon_days(&self) -> &[i64] {
        &self.coupon_days
    }

    /// Discount tenor from the trade date to each coupon date.
    #[must_use]
    pub fn discount_days(&self) -> &[i64] {
        &self.discount_days
    }

    /// Number of rows in the schedule.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true when the schedule holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Date of the first scheduled coupon.
    #[must_use]
    pub fn first_date(&self) -> Date {
        self.dates[0]
    }

    /// Coupon payment periodicity.
    #[must_use]
    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    /// Day-count basis of the schedule.
    #[must_use]
    pub fn basis(&self) -> DayCountBasis {
        self.basis
    }
}

/// Generates the month-stepped date grid from `issue` to the last grid
/// date at or before `maturity`, keeping month-end anchoring. With
/// `after` set, only dates strictly past it are returned.
fn month_grid(
    issue: Date,
    maturity: Date,
    after: Option<Date>,
    periodicity: Periodicity,
) -> RentaResult<Vec<Date>> {
    let months = periodicity.months_per_period() as i32;
    let mut dates = Vec::new();
    let mut current = issue;

    while current <= maturity {
        if after.map_or(true, |cutoff| current > cutoff) {
            dates.push(current);
        }

        let mut next = current.add_months(months)?;
        if current.is_end_of_month() {
            next = next.end_of_month();
        }
        current = next;
    }

    Ok(dates)
}

/// Generates the fixed-day grid (30/90/180/360 per period) from `issue`
/// up to `maturity`.
fn day_grid(issue: Date, maturity: Date, periodicity: Periodicity) -> Vec<Date> {
    let step = periodicity.fixed_step_days();
    let mut dates = Vec::new();
    let mut current = issue;

    while current <= maturity {
        dates.push(current);
        current = current.add_days(step);
    }

    dates
}

/// Steps `periods` coupon periods backward from `date`.
///
/// Under Actual/365 this is plain month arithmetic; under 30/360 the
/// day of month is first clamped to 30, matching how the grid treats
/// day-31 anchors.
///
/// # Errors
///
/// Returns `RentaError::InvalidDate` when the result falls outside the
/// supported date range.
pub fn previous_period_date(
    date: Date,
    periodicity: Periodicity,
    basis: DayCountBasis,
    periods: u32,
) -> RentaResult<Date> {
    let months = (periodicity.months_per_period() * periods) as i32;

    let anchor = match basis {
        DayCountBasis::Actual365 => date,
        DayCountBasis::Thirty360 => {
            Date::from_ymd(date.year(), date.month(), date.day().min(30))?
        }
    };

    anchor.add_months(-months)
}
