//! Colombian banking holiday calendar.
//!
//! Colombian public holidays fall in three groups:
//!
//! - Fixed-date holidays observed on their calendar day.
//! - Emiliani-law holidays, moved to the following Monday when they do
//!   not already fall on one.
//! - Easter-derived holidays (Holy Thursday and Good Friday observed in
//!   place; Ascension, Corpus Christi and Sacred Heart moved to Monday).
//!
//! The full table is materialized once for a wide year range and then
//! served as immutable read-only data.

use std::collections::HashSet;

use chrono::Weekday;
use once_cell::sync::Lazy;

use super::Calendar;
use crate::types::Date;

/// First year covered by the materialized holiday table.
const MIN_YEAR: i32 = 1990;
/// Last year covered by the materialized holiday table.
const MAX_YEAR: i32 = 2100;

/// Static Colombian calendar instance.
static COLOMBIA_CALENDAR: Lazy<ColombiaCalendar> = Lazy::new(ColombiaCalendar::new);

/// Colombian banking holiday calendar.
///
/// ## Holidays
///
/// Observed in place: New Year's Day, Labour Day (May 1), Independence
/// Day (Jul 20), Battle of Boyacá (Aug 7), Immaculate Conception
/// (Dec 8), Christmas Day, Holy Thursday, Good Friday.
///
/// Moved to the next Monday (Ley Emiliani): Epiphany (Jan 6), Saint
/// Joseph (Mar 19), Saints Peter and Paul (Jun 29), Assumption (Aug 15),
/// Columbus Day (Oct 12), All Saints (Nov 1), Independence of Cartagena
/// (Nov 11), Ascension, Corpus Christi, Sacred Heart.
#[derive(Debug, Clone)]
pub struct ColombiaCalendar {
    holidays: HashSet<Date>,
}

impl ColombiaCalendar {
    /// Creates a new Colombian calendar.
    #[must_use]
    pub fn new() -> Self {
        let mut holidays = HashSet::new();
        for year in MIN_YEAR..=MAX_YEAR {
            add_year_holidays(year, &mut holidays);
        }
        Self { holidays }
    }

    /// Returns the global Colombian calendar instance.
    pub fn global() -> &'static ColombiaCalendar {
        &COLOMBIA_CALENDAR
    }
}

impl Default for ColombiaCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for ColombiaCalendar {
    fn name(&self) -> &'static str {
        "Colombia"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}

/// Adds all holidays for one year to the table.
fn add_year_holidays(year: i32, holidays: &mut HashSet<Date>) {
    let fixed = [(1, 1), (5, 1), (7, 20), (8, 7), (12, 8), (12, 25)];
    for (month, day) in fixed {
        if let Ok(date) = Date::from_ymd(year, month, day) {
            holidays.insert(date);
        }
    }

    let emiliani = [(1, 6), (3, 19), (6, 29), (8, 15), (10, 12), (11, 1), (11, 11)];
    for (month, day) in emiliani {
        if let Ok(date) = Date::from_ymd(year, month, day) {
            holidays.insert(next_monday(date));
        }
    }

    let easter = easter_sunday(year);
    holidays.insert(easter.add_days(-3)); // Holy Thursday
    holidays.insert(easter.add_days(-2)); // Good Friday
    holidays.insert(next_monday(easter.add_days(39))); // Ascension
    holidays.insert(next_monday(easter.add_days(60))); // Corpus Christi
    holidays.insert(next_monday(easter.add_days(68))); // Sacred Heart
}

/// Moves a date to the following Monday unless it already is one.
fn next_monday(date: Date) -> Date {
    let mut result = date;
    while result.weekday() != Weekday::Mon {
        result = result.add_days(1);
    }
    result
}

/// Easter Sunday for the given year (anonymous Gregorian computus).
fn easter_sunday(year: i32) -> Date {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    Date::from_ymd(year, month as u32, day as u32).expect("computus yields a valid date")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_easter_sunday_known_years() {
        assert_eq!(easter_sunday(2024), d(2024, 3, 31));
        assert_eq!(easter_sunday(2025), d(2025, 4, 20));
        assert_eq!(easter_sunday(2026), d(2026, 4, 5));
    }

    #[test]
    fn test_fixed_holidays() {
        let cal = ColombiaCalendar::global();
        assert!(cal.is_holiday(d(2025, 1, 1)));
        assert!(cal.is_holiday(d(2025, 5, 1)));
        assert!(cal.is_holiday(d(2025, 12, 25)));
        // Jul 20, 2025 is a Sunday; observed in place, Monday Jul 21 works
        assert!(cal.is_business_day(d(2025, 7, 21)));
    }

    #[test]
    fn test_emiliani_moves_to_monday() {
        let cal = ColombiaCalendar::global();
        // Epiphany 2025: Jan 6 is already a Monday
        assert!(cal.is_holiday(d(2025, 1, 6)));
        // Saint Joseph 2025: Mar 19 is a Wednesday, observed Mon Mar 24
        assert!(cal.is_business_day(d(2025, 3, 19)));
        assert!(cal.is_holiday(d(2025, 3, 24)));
    }

    #[test]
    fn test_easter_derived_holidays_2025() {
        let cal = ColombiaCalendar::global();
        // Easter 2025: Apr 20
        assert!(cal.is_holiday(d(2025, 4, 17))); // Holy Thursday
        assert!(cal.is_holiday(d(2025, 4, 18))); // Good Friday
        assert!(cal.is_holiday(d(2025, 6, 2))); // Ascension (moved)
        assert!(cal.is_holiday(d(2025, 6, 23))); // Corpus Christi (moved)
        assert!(cal.is_holiday(d(2025, 6, 30))); // Sacred Heart (moved)
    }

    #[test]
    fn test_regular_business_day() {
        let cal = ColombiaCalendar::global();
        assert!(cal.is_business_day(d(2025, 3, 12)));
        assert!(!cal.is_business_day(d(2025, 3, 15))); // Saturday
    }
}
