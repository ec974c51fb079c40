//! Core domain types.

mod conventions;
mod date;

pub use conventions::{DayCountBasis, IpcMode, Periodicity, RateMode};
pub use date::Date;
