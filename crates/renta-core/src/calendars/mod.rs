//! Business day calendars.
//!
//! Calendars determine which days are banking business days for a market.
//! The Colombian calendar is the one that matters here; a weekend-only
//! calendar and a table-driven calendar are provided for testing and for
//! externally supplied holiday data.

mod colombia;

pub use colombia::ColombiaCalendar;

use std::collections::HashSet;

use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Returns the closest business day strictly before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        let mut result = date.add_days(-1);
        while !self.is_business_day(result) {
            result = result.add_days(-1);
        }
        result
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }
}

/// A simple weekend-only calendar (no holidays).
///
/// Useful for testing or when holiday data is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// A calendar backed by an externally supplied holiday table.
///
/// The table is loaded once at construction and treated as immutable
/// read-only configuration.
#[derive(Debug, Clone)]
pub struct FixedHolidayCalendar {
    holidays: HashSet<Date>,
}

impl FixedHolidayCalendar {
    /// Creates a calendar from a holiday table.
    #[must_use]
    pub fn new(holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }
}

impl Calendar for FixedHolidayCalendar {
    fn name(&self) -> &'static str {
        "Fixed Holiday Table"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}
