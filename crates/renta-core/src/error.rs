//! Error types for the Renta library.
//!
//! A single error taxonomy is shared by every crate in the workspace:
//! validation problems are collected per field and reported together,
//! data-source misses carry the exact date that was not found, and
//! configuration or computation problems are fatal for the request.

use thiserror::Error;

use crate::types::Date;

/// A specialized Result type for Renta operations.
pub type RentaResult<T> = Result<T, RentaError>;

/// A single invalid input field, surfaced to the caller by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending input field.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The main error type for Renta operations.
#[derive(Error, Debug, Clone)]
pub enum RentaError {
    /// One or more input fields failed validation.
    ///
    /// All field errors for a request are collected before returning,
    /// so the caller can surface every problem at once.
    #[error("Validation failed: {}", format_field_errors(.errors))]
    Validation {
        /// The complete set of per-field problems.
        errors: Vec<FieldError>,
    },

    /// A requested index fixing is absent from the active rate source.
    ///
    /// Names the missing date so the caller can retry against the
    /// alternate (projection file) source.
    #[error("No rate published for {date}")]
    RateNotFound {
        /// The fixing date with no published rate.
        date: Date,
    },

    /// The external rate source could not be reached or returned garbage.
    #[error("Rate source error: {reason}")]
    DataSource {
        /// Description of the transport or parse failure.
        reason: String,
    },

    /// Unrecognized periodicity, basis, or rate-mode value.
    ///
    /// Should be unreachable once inputs are parsed into enums.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the configuration problem.
        reason: String,
    },

    /// Degenerate numerical input (zero dirty price, length mismatch, ...).
    #[error("Computation error: {reason}")]
    Computation {
        /// Description of what went wrong.
        reason: String,
    },

    /// Error in date arithmetic or an invalid calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Numerical solver failed to converge.
    #[error("Convergence failed after {iterations} iterations (residual: {residual})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl RentaError {
    /// Creates a validation error from a set of field errors.
    #[must_use]
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    /// Creates a missing-fixing error for the given date.
    #[must_use]
    pub fn rate_not_found(date: Date) -> Self {
        Self::RateNotFound { date }
    }

    /// Creates a data-source error.
    #[must_use]
    pub fn data_source(reason: impl Into<String>) -> Self {
        Self::DataSource {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Creates a computation error.
    #[must_use]
    pub fn computation(reason: impl Into<String>) -> Self {
        Self::Computation {
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a convergence failure error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_lists_every_field() {
        let err = RentaError::validation(vec![
            FieldError::new("fecha_emision", "must precede maturity"),
            FieldError::new("tasa_mercado", "cannot be empty"),
        ]);
        let text = err.to_string();
        assert!(text.contains("fecha_emision"));
        assert!(text.contains("tasa_mercado"));
    }

    #[test]
    fn test_rate_not_found_names_the_date() {
        let date = Date::from_ymd(2025, 3, 14).unwrap();
        let err = RentaError::rate_not_found(date);
        assert!(err.to_string().contains("2025-03-14"));
    }
}
