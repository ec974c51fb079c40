//! # Renta Analytics
//!
//! Trading analytics layered on the `renta-bonds` cash-flow tables:
//! dirty/clean price and par classification, accrued interest,
//! settlement value, investment yield, and the duration/DV01/convexity
//! sensitivity measures for fixed-rate bonds.
//!
//! The [`pricing`] module exposes the end-to-end entry points
//! ([`price_fixed`], [`price_ibr`], [`price_ipc`]); the other modules
//! carry the individual measures for callers that already hold a table.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod price;
pub mod pricing;
pub mod risk;
pub mod yields;

pub use price::{accrued_interest, classify_clean_price, dirty_price, PriceClass};
pub use pricing::{price_fixed, price_ibr, price_ipc, PricingResult, RiskMetrics};
pub use risk::{convexity, dv01, macaulay_duration, modified_duration};
pub use yields::{investment_yield, periodic_yield_annualized};
