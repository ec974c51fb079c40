//! IBR fixing-date resolution.
//!
//! The IBR index is published on a weekly lag: the print of a
//! business-day-adjusted Thursday or Friday governs the following days.
//! Given a target date, [`ibr_publication_date`] resolves which prior
//! business day's published rate applies. The rules must be reproduced
//! exactly, since they decide which historical rate each coupon uses.

use chrono::Weekday;

use crate::calendars::Calendar;
use crate::types::Date;

/// Returns the day acting as publication "Thursday" for the given date:
/// the previous calendar Thursday (or the date itself if it is one),
/// rolled back further while it is not a business day.
#[must_use]
pub fn previous_business_thursday(calendar: &dyn Calendar, date: Date) -> Date {
    let mut result = date;
    while result.weekday() != Weekday::Thu {
        result = result.add_days(-1);
    }
    while !calendar.is_business_day(result) {
        result = result.add_days(-1);
    }
    result
}

/// Returns the day acting as publication "Friday" for the given date:
/// the previous calendar Friday (or the date itself if it is one),
/// rolled back further while it is not a business day.
#[must_use]
pub fn previous_business_friday(calendar: &dyn Calendar, date: Date) -> Date {
    let mut result = date;
    while result.weekday() != Weekday::Fri {
        result = result.add_days(-1);
    }
    while !calendar.is_business_day(result) {
        result = result.add_days(-1);
    }
    result
}

/// Resolves the publication date whose IBR print governs `target`.
///
/// - Friday, Saturday, Sunday: the business-day-adjusted previous
///   Thursday.
/// - Monday: the Thursday rule if the Monday itself is a holiday,
///   otherwise the business-day-adjusted previous Friday.
/// - Tuesday: the Friday rule if the immediately preceding Monday was a
///   holiday, otherwise the single business day immediately prior.
/// - Wednesday, Thursday: the single business day immediately prior.
#[must_use]
pub fn ibr_publication_date(calendar: &dyn Calendar, target: Date) -> Date {
    match target.weekday() {
        Weekday::Fri | Weekday::Sat | Weekday::Sun => previous_business_thursday(calendar, target),
        Weekday::Mon => {
            if !calendar.is_business_day(target) {
                previous_business_thursday(calendar, target)
            } else {
                previous_business_friday(calendar, target)
            }
        }
        Weekday::Tue => {
            let monday = target.add_days(-1);
            if !calendar.is_business_day(monday) {
                previous_business_friday(calendar, target)
            } else {
                calendar.previous_business_day(target)
            }
        }
        Weekday::Wed | Weekday::Thu => calendar.previous_business_day(target),
    }
}
