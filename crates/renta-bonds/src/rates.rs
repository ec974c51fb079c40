//! Per-period coupon rate conversion.
//!
//! Fixed coupons are derived from the quoted annual rate and the
//! schedule day counts. Floating (IBR) and inflation-indexed (IPC)
//! coupons compose an index print with the negotiation spread per
//! period; the first coupon always uses the print fixed one period
//! before the first coupon date, so the fetched series is shifted right
//! by one with the pre-period print filling slot zero.

use log::debug;

use renta_core::calendars::Calendar;
use renta_core::error::{RentaError, RentaResult};
use renta_core::fixing::ibr_publication_date;
use renta_core::types::{Date, IpcMode, RateMode};
use renta_math::rates::{
    compose_spread, nominal_to_effective_annual, round_to, strip_effective_spread,
};
use renta_rates::RateSource;

use crate::schedule::{previous_period_date, CouponSchedule};

/// Decimal places kept on floating and indexed periodic rates.
const PERIODIC_RATE_DECIMALS: u32 = 5;
/// Decimal places kept on the display series of applied index rates.
const DISPLAY_RATE_DECIMALS: u32 = 2;

/// Periodic rates for an index-linked bond plus the display series of
/// the index prints actually applied (spread stripped, in percent).
#[derive(Debug, Clone)]
pub struct IndexedRates {
    /// Periodic coupon rate per schedule row, as a decimal.
    pub periodic: Vec<f64>,
    /// Index rate applied per row, spread removed, in percent.
    pub applied_index: Vec<f64>,
}

/// Converts a fixed annual coupon rate into the per-period rate series.
///
/// Effective-annual rates compound over the actual day count of each
/// period; nominal rates divide by the periods per year, with the first
/// entry forced to zero (the initial stub accrues no extra coupon under
/// the nominal treatment).
///
/// # Errors
///
/// Returns `RentaError::Computation` when the schedule is empty.
pub fn fixed_periodic_rates(
    schedule: &CouponSchedule,
    annual_rate_pct: f64,
    mode: RateMode,
) -> RentaResult<Vec<f64>> {
    if schedule.is_empty() {
        return Err(RentaError::computation("coupon day count list is empty"));
    }

    let annual = annual_rate_pct / 100.0;
    let basis_days = schedule.basis().days_per_year() as f64;

    let rates = match mode {
        RateMode::EffectiveAnnual => schedule
            .coupon_days()
            .iter()
            .map(|&days| (1.0 + annual).powf(days as f64 / basis_days) - 1.0)
            .collect(),
        RateMode::NominalAnnual => {
            let per_period = annual / f64::from(schedule.periodicity().periods_per_year());
            let mut rates = vec![per_period; schedule.len()];
            rates[0] = 0.0;
            rates
        }
    };

    Ok(rates)
}

/// Builds the IBR-linked periodic rate series for a schedule.
///
/// Each coupon date is resolved to its publication date, the prints are
/// fetched in one batch, composed with the spread, then shifted right
/// so that the first coupon uses the print fixed one period before it.
/// Periodic rate: composed nominal rate divided by periods per year,
/// rounded to five decimals.
///
/// # Errors
///
/// Propagates `RentaError::RateNotFound` naming any missing fixing
/// date, so the caller can switch to the projection-file source.
pub fn ibr_periodic_rates(
    source: &dyn RateSource,
    calendar: &dyn Calendar,
    schedule: &CouponSchedule,
    spread_pct: f64,
    mode: RateMode,
) -> RentaResult<IndexedRates> {
    let composed = shifted_composed_series(schedule, spread_pct, mode, |date| {
        source.rate_on(ibr_publication_date(calendar, date))
    })?;

    let n = f64::from(schedule.periodicity().periods_per_year());
    let periodic = composed
        .iter()
        .map(|&total| round_to(total / 100.0 / n, PERIODIC_RATE_DECIMALS))
        .collect();

    // Display series keeps the print without the spread.
    let applied_index = composed
        .iter()
        .map(|&total| round_to(total - spread_pct, DISPLAY_RATE_DECIMALS))
        .collect();

    Ok(IndexedRates {
        periodic,
        applied_index,
    })
}

/// Builds the IPC-linked periodic rate series for a schedule.
///
/// `Inicio` fixes one print per period (shifted like IBR, but the print
/// is looked up on the coupon date itself, inflation series carry no
/// publication lag here); `Final` applies the single print at the trade
/// date to every period. The periodic rate compounds:
/// `(1 + composed/100)^(days/basis) - 1`, rounded to five decimals.
///
/// # Errors
///
/// Propagates `RentaError::RateNotFound` naming any missing print date.
pub fn ipc_periodic_rates(
    source: &dyn RateSource,
    schedule: &CouponSchedule,
    trade: Date,
    spread_pct: f64,
    mode: RateMode,
    ipc_mode: IpcMode,
) -> RentaResult<IndexedRates> {
    let composed = match ipc_mode {
        IpcMode::Inicio => {
            shifted_composed_series(schedule, spread_pct, mode, |date| source.rate_on(date))?
        }
        IpcMode::Final => {
            let at_trade = compose_spread(source.rate_on(trade)?, spread_pct, mode);
            vec![at_trade; schedule.len()]
        }
    };

    let basis_days = schedule.basis().days_per_year() as f64;
    let periodic = composed
        .iter()
        .zip(schedule.coupon_days())
        .map(|(&total, &days)| {
            round_to(
                (1.0 + total / 100.0).powf(days as f64 / basis_days) - 1.0,
                PERIODIC_RATE_DECIMALS,
            )
        })
        .collect();

    let applied_index = composed
        .iter()
        .map(|&total| round_to(strip_effective_spread(total, spread_pct), DISPLAY_RATE_DECIMALS))
        .collect();

    Ok(IndexedRates {
        periodic,
        applied_index,
    })
}

/// Effective annual discount rate for an IBR bond: the print governing
/// the trade date, composed with the market spread, annualized from its
/// nominal periodicity.
///
/// # Errors
///
/// Propagates rate source failures.
pub fn ibr_market_rate_ea(
    source: &dyn RateSource,
    calendar: &dyn Calendar,
    schedule: &CouponSchedule,
    trade: Date,
    market_spread_pct: f64,
    mode: RateMode,
) -> RentaResult<f64> {
    let print_date = ibr_publication_date(calendar, trade);
    let composed = compose_spread(source.rate_on(print_date)?, market_spread_pct, mode);
    Ok(nominal_to_effective_annual(composed, schedule.periodicity()))
}

/// Effective annual discount rate for an IPC bond: the print at the
/// trade date composed with the market spread, annualized from its
/// nominal periodicity.
///
/// # Errors
///
/// Propagates rate source failures.
pub fn ipc_market_rate_ea(
    source: &dyn RateSource,
    schedule: &CouponSchedule,
    trade: Date,
    market_spread_pct: f64,
    mode: RateMode,
) -> RentaResult<f64> {
    let composed = compose_spread(source.rate_on(trade)?, market_spread_pct, mode);
    Ok(nominal_to_effective_annual(composed, schedule.periodicity()))
}

/// Fetches the composed index+spread series for every schedule row and
/// shifts it right by one, filling slot zero with the print one period
/// before the first coupon date.
fn shifted_composed_series(
    schedule: &CouponSchedule,
    spread_pct: f64,
    mode: RateMode,
    fetch: impl Fn(Date) -> RentaResult<f64>,
) -> RentaResult<Vec<f64>> {
    if schedule.is_empty() {
        return Err(RentaError::computation("coupon date list is empty"));
    }

    let previous_date = previous_period_date(
        schedule.first_date(),
        schedule.periodicity(),
        schedule.basis(),
        1,
    )?;
    let previous = compose_spread(fetch(previous_date)?, spread_pct, mode);
    debug!(
        "pre-period print fixed at {previous_date} for first coupon {}",
        schedule.first_date()
    );

    let mut composed = Vec::with_capacity(schedule.len());
    composed.push(previous);
    for date in &schedule.dates()[..schedule.len() - 1] {
        composed.push(compose_spread(fetch(*date)?, spread_pct, mode));
    }

    Ok(composed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use renta_core::calendars::WeekendCalendar;
    use renta_core::types::{DayCountBasis, Periodicity};
    use renta_rates::RateTable;

    struct TableSource(RateTable);

    impl RateSource for TableSource {
        fn source_name(&self) -> &str {
            "table"
        }

        fn rate_on(&self, date: Date) -> RentaResult<f64> {
            self.0.get(date)
        }
    }

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn semiannual_schedule() -> CouponSchedule {
        CouponSchedule::forward(
            d(2024, 6, 17),
            d(2025, 6, 17),
            d(2024, 6, 17),
            Periodicity::Semiannual,
            DayCountBasis::Actual365,
        )
        .unwrap()
    }

    #[test]
    fn test_fixed_effective_rates_follow_day_counts() {
        let schedule = semiannual_schedule();
        let rates =
            fixed_periodic_rates(&schedule, 10.0, RateMode::EffectiveAnnual).unwrap();

        assert_eq!(rates.len(), 2);
        for (rate, days) in rates.iter().zip(schedule.coupon_days()) {
            assert_relative_eq!(
                *rate,
                1.10_f64.powf(*days as f64 / 365.0) - 1.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_fixed_nominal_rates_zero_first_entry() {
        let schedule = semiannual_schedule();
        let rates = fixed_periodic_rates(&schedule, 12.0, RateMode::NominalAnnual).unwrap();

        assert_eq!(rates[0], 0.0);
        assert_relative_eq!(rates[1], 0.06, epsilon = 1e-12);
    }

    #[test]
    fn test_ibr_rates_shift_right_with_pre_period_print() {
        // Coupons on Tue 2024-12-17 and Tue 2025-06-17; the pre-period
        // print governs the first coupon and the first coupon's own
        // print moves to the second.
        let schedule = semiannual_schedule();
        assert_eq!(schedule.dates(), &[d(2024, 12, 17), d(2025, 6, 17)]);

        let calendar = WeekendCalendar;
        // Pre-period date Mon 2024-06-17 -> Friday 2024-06-14 print.
        // First coupon Tue 2024-12-17 -> previous business Monday.
        let table = RateTable::new([(d(2024, 6, 14), 9.0), (d(2024, 12, 16), 8.0)]);

        let rates = ibr_periodic_rates(
            &TableSource(table),
            &calendar,
            &schedule,
            2.0,
            RateMode::NominalAnnual,
        )
        .unwrap();

        // (9 + 2) / 100 / 2 and (8 + 2) / 100 / 2, rounded to 5 places.
        assert_relative_eq!(rates.periodic[0], 0.055, epsilon = 1e-12);
        assert_relative_eq!(rates.periodic[1], 0.05, epsilon = 1e-12);
        assert_eq!(rates.applied_index, vec![9.0, 8.0]);
    }

    #[test]
    fn test_ibr_missing_fixing_names_date() {
        let schedule = semiannual_schedule();
        let err = ibr_periodic_rates(
            &TableSource(RateTable::default()),
            &WeekendCalendar,
            &schedule,
            2.0,
            RateMode::NominalAnnual,
        )
        .unwrap_err();

        assert!(matches!(err, RentaError::RateNotFound { .. }));
        assert!(err.to_string().contains("2024-06-14"));
    }

    #[test]
    fn test_ipc_final_mode_uses_trade_print_everywhere() {
        let schedule = semiannual_schedule();
        let trade = d(2024, 6, 17);
        let table = RateTable::new([(trade, 5.0)]);

        let rates = ipc_periodic_rates(
            &TableSource(table),
            &schedule,
            trade,
            3.0,
            RateMode::EffectiveAnnual,
            IpcMode::Final,
        )
        .unwrap();

        let composed = (1.05 * 1.03 - 1.0) * 100.0;
        for (rate, days) in rates.periodic.iter().zip(schedule.coupon_days()) {
            let expected = (1.0_f64 + composed / 100.0).powf(*days as f64 / 365.0) - 1.0;
            assert_relative_eq!(*rate, round_to(expected, 5), epsilon = 1e-12);
        }
        // Spread stripped back out for display.
        assert_eq!(rates.applied_index, vec![5.0, 5.0]);
    }

    #[test]
    fn test_ipc_inicio_mode_shifts_prints() {
        let schedule = semiannual_schedule();
        let trade = d(2024, 6, 17);
        // Prints on the pre-period date and the first coupon date.
        let table = RateTable::new([(d(2024, 6, 17), 4.0), (d(2024, 12, 17), 6.0)]);

        let rates = ipc_periodic_rates(
            &TableSource(table),
            &schedule,
            trade,
            0.0,
            RateMode::NominalAnnual,
            IpcMode::Inicio,
        )
        .unwrap();

        assert_eq!(rates.applied_index, vec![4.0, 6.0]);
    }

    #[test]
    fn test_ibr_market_rate_annualizes() {
        let schedule = semiannual_schedule();
        let calendar = WeekendCalendar;
        // Trade Mon 2024-06-17 -> Friday 2024-06-14 print.
        let table = RateTable::new([(d(2024, 6, 14), 9.0)]);

        let ea = ibr_market_rate_ea(
            &TableSource(table),
            &calendar,
            &schedule,
            d(2024, 6, 17),
            1.0,
            RateMode::NominalAnnual,
        )
        .unwrap();

        assert_relative_eq!(
            ea,
            ((1.0_f64 + 0.10 / 2.0).powi(2) - 1.0) * 100.0,
            epsilon = 1e-10
        );
    }
}
