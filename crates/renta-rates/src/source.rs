//! The rate source contract.

use std::collections::BTreeMap;

use renta_core::error::{RentaError, RentaResult};
use renta_core::types::Date;

/// A provider of published index rates (IBR, IPC) keyed by date.
///
/// Two interchangeable providers implement this contract: the Banco de
/// la República HTTP API and a user-supplied projection file. Both must
/// report a missing date as [`RentaError::RateNotFound`] naming the
/// date, never a silent empty result.
pub trait RateSource: Send + Sync {
    /// Returns a short human-readable name for error reporting.
    fn source_name(&self) -> &str;

    /// Returns the rate published for the given date, in percent.
    fn rate_on(&self, date: Date) -> RentaResult<f64>;

    /// Returns the rates for every date in the list, in list order.
    ///
    /// The default implementation queries date by date; providers with
    /// a cheaper range query override it.
    fn rates_on(&self, dates: &[Date]) -> RentaResult<Vec<f64>> {
        dates.iter().map(|&date| self.rate_on(date)).collect()
    }
}

/// An in-memory rate table, the common backing for both providers.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: BTreeMap<Date, f64>,
}

impl RateTable {
    /// Creates a table from (date, rate-percent) pairs.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (Date, f64)>) -> Self {
        Self {
            rates: entries.into_iter().collect(),
        }
    }

    /// Returns the rate for the date, or a `RateNotFound` error naming
    /// it.
    pub fn get(&self, date: Date) -> RentaResult<f64> {
        self.rates
            .get(&date)
            .copied()
            .ok_or(RentaError::RateNotFound { date })
    }

    /// Number of dated entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
