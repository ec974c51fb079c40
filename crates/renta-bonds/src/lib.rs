//! # Renta Bonds
//!
//! The cash-flow engine of the Renta Colombian fixed income library:
//! bond terms and request validation, coupon schedule generation,
//! per-period rate conversion for fixed, IBR-floating and IPC-indexed
//! coupons, and discounted cash-flow table assembly.
//!
//! Analytics (prices, yield, duration, convexity) live in
//! `renta-analytics`, layered on the tables built here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cashflows;
pub mod pricing;
pub mod rates;
pub mod schedule;
pub mod terms;

pub use pricing::{
    build_fixed, build_fixed_grid, build_ibr, build_ipc, BondCashflows, RealFlows,
};
pub use rates::{
    fixed_periodic_rates, ibr_periodic_rates, ipc_periodic_rates, IndexedRates,
};
pub use schedule::{previous_period_date, CouponSchedule};
pub use terms::{validate_request, BondTerms, TradeContext};
