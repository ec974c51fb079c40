//! # Renta Math
//!
//! Numerical utilities for the Renta Colombian fixed income library:
//!
//! - Root finders (Newton-Raphson with a bisection fallback)
//! - Internal rate of return, period-indexed and date-aware (XIRR)
//! - Rate algebra: nominal/effective conversion, spread composition,
//!   price truncation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod irr;
pub mod rates;
pub mod solvers;

pub use irr::{annualize, irr, xirr};
pub use rates::{compose_spread, nominal_to_effective_annual, round_to, strip_effective_spread, truncate};
pub use solvers::{bisection, newton_raphson, SolverConfig, SolverResult};
