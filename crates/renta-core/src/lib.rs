//! # Renta Core
//!
//! Core types and conventions for the Renta Colombian fixed income
//! pricing library.
//!
//! This crate provides the foundational building blocks used throughout
//! Renta:
//!
//! - **Types**: Domain-specific types like `Date`, `Periodicity`,
//!   `DayCountBasis`, `RateMode`
//! - **Day Count Conventions**: 30/360 and Actual/365 day counts and
//!   discount tenors
//! - **Business Day Calendars**: The Colombian banking holiday calendar
//! - **Fixing Resolution**: The IBR publication-lag rules mapping a
//!   coupon date to its governing fixing date
//!
//! ## Design Philosophy
//!
//! - **Closed enumerations**: convention parameters fail at parse time,
//!   not deep inside a formula
//! - **Explicit errors**: one taxonomy shared across the workspace, no
//!   sentinel values

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod fixing;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{Calendar, ColombiaCalendar, FixedHolidayCalendar, WeekendCalendar};
    pub use crate::daycounts::{days_between, discount_tenor, DayCount};
    pub use crate::error::{FieldError, RentaError, RentaResult};
    pub use crate::fixing::ibr_publication_date;
    pub use crate::types::{Date, DayCountBasis, IpcMode, Periodicity, RateMode};
}

// Re-export commonly used types at crate root
pub use error::{FieldError, RentaError, RentaResult};
pub use types::{Date, DayCountBasis, IpcMode, Periodicity, RateMode};
