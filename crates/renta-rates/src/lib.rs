//! # Renta Rates
//!
//! Market index rate providers for the Renta Colombian fixed income
//! library. Two interchangeable sources serve IBR and IPC fixings:
//!
//! - [`BanRepClient`]: the Banco de la República series endpoint
//! - [`ProjectionSeries`]: a user-supplied CSV of projected rates
//!
//! Both implement [`RateSource`] and report missing dates as
//! `RentaError::RateNotFound` naming the offending date.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod banrep;
pub mod file;
pub mod source;

pub use banrep::{BanRepClient, BANREP_URL, IBR_SERIES_ID};
pub use file::{ProjectionSeries, IBR_SERIES, IPC_SERIES};
pub use source::{RateSource, RateTable};
