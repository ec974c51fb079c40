//! Date type for financial calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RentaError, RentaResult};

/// A calendar date for financial calculations.
///
/// This is a newtype wrapper around `chrono::NaiveDate` providing
/// financial-specific operations and ensuring type safety.
///
/// # Example
///
/// ```rust
/// use renta_core::types::Date;
///
/// let date = Date::from_ymd(2025, 1, 31).unwrap();
/// let stepped = date.add_months(1).unwrap();
/// assert_eq!(stepped, Date::from_ymd(2025, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `RentaError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> RentaResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| RentaError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `RentaError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> RentaResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| RentaError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Creates a date from a DD/MM/YYYY string, the format used by the
    /// Colombian market data files.
    ///
    /// # Errors
    ///
    /// Returns `RentaError::InvalidDate` if the string is not a valid date.
    pub fn parse_dmy(s: &str) -> RentaResult<Self> {
        NaiveDate::parse_from_str(s, "%d/%m/%Y")
            .map(Date)
            .map_err(|_| RentaError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months to the date.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month.
    ///
    /// # Errors
    ///
    /// Returns `RentaError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> RentaResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        // Clamp day to valid range for new month
        let max_day = days_in_month(new_year, new_month);
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Adds a number of years to the date.
    ///
    /// # Errors
    ///
    /// Returns `RentaError::InvalidDate` if the result is invalid.
    pub fn add_years(&self, years: i32) -> RentaResult<Self> {
        let new_year = self.year() + years;
        let max_day = days_in_month(new_year, self.month());
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, self.month(), new_day)
    }

    /// Calculates the number of calendar days between two dates.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Wraps a `chrono::NaiveDate`.
    #[must_use]
    pub fn from_naive_date(date: NaiveDate) -> Self {
        Date(date)
    }

    /// Returns the end of month for the current date.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        Date(
            NaiveDate::from_ymd_opt(self.year(), self.month(), self.days_in_month())
                .expect("end of month should always be valid"),
        )
    }

    /// Checks if the date is the end of month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Formats as YYYYMMDD, the compact form used by the Banco de la
    /// República series API.
    #[must_use]
    pub fn to_compact(&self) -> String {
        format!("{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Returns the number of days in the given month.
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 1, 1).is_some_and(|d| d.leap_year()) => 29,
        2 => 28,
        _ => unreachable!("invalid month: {month}"),
    }
}
