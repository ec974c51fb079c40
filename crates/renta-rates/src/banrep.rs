//! Banco de la República series client.
//!
//! The bank publishes index series through a JSON POST endpoint: the
//! request names a series id and a YYYYMMDD date range, the response is
//! an array of series objects whose `data` field holds
//! `[unix_millis, value]` pairs.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use renta_core::error::{RentaError, RentaResult};
use renta_core::types::Date;

use crate::source::{RateSource, RateTable};

/// Default endpoint for the series lookup service.
pub const BANREP_URL: &str =
    "https://suameca.banrep.gov.co/buscador-de-series/rest/buscadorSeriesRestService/consultaDatosSeries";

/// Series id of the overnight IBR nominal rate.
pub const IBR_SERIES_ID: u32 = 242;

/// Request/response timeout for the series endpoint.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeriesQuery {
    series: Vec<SeriesSelector>,
    fecha_inicio: u64,
    fecha_fin: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeriesSelector {
    id_periodicidades: Vec<u32>,
    id_serie: u32,
}

#[derive(Debug, Deserialize)]
struct SeriesEnvelope {
    #[serde(default)]
    data: Vec<(i64, f64)>,
}

/// Synchronous client for a single Banco de la República series.
///
/// Lookups are stateless: each call fetches the date range it needs.
/// Transport failures are retried once before aborting the pricing
/// request; there is no partial-result path.
pub struct BanRepClient {
    http: reqwest::blocking::Client,
    url: String,
    series_id: u32,
}

impl BanRepClient {
    /// Creates a client for the given series id against the default
    /// endpoint.
    ///
    /// # Errors
    ///
    /// Returns `RentaError::DataSource` if the HTTP client cannot be
    /// constructed.
    pub fn new(series_id: u32) -> RentaResult<Self> {
        Self::with_url(series_id, BANREP_URL)
    }

    /// Creates a client for the overnight IBR series.
    pub fn ibr() -> RentaResult<Self> {
        Self::new(IBR_SERIES_ID)
    }

    /// Creates a client against a custom endpoint (used by tests).
    pub fn with_url(series_id: u32, url: impl Into<String>) -> RentaResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RentaError::data_source(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: url.into(),
            series_id,
        })
    }

    /// Fetches the series over `[start, end]` into a rate table.
    ///
    /// # Errors
    ///
    /// Returns `RentaError::DataSource` when the endpoint cannot be
    /// reached (after one retry) or returns an unparseable body.
    pub fn fetch_range(&self, start: Date, end: Date) -> RentaResult<RateTable> {
        let query = SeriesQuery {
            series: vec![SeriesSelector {
                id_periodicidades: vec![1],
                id_serie: self.series_id,
            }],
            fecha_inicio: start
                .to_compact()
                .parse()
                .expect("compact date is numeric"),
            fecha_fin: end.to_compact().parse().expect("compact date is numeric"),
        };

        let envelopes = self.post_with_retry(&query)?;
        let data = envelopes.into_iter().next().map(|e| e.data).unwrap_or_default();

        debug!(
            "BanRep series {} returned {} points for {start}..{end}",
            self.series_id,
            data.len()
        );

        let entries = data.into_iter().filter_map(|(millis, value)| {
            chrono::DateTime::from_timestamp_millis(millis)
                .map(|ts| (Date::from_naive_date(ts.date_naive()), value))
        });

        Ok(RateTable::new(entries))
    }

    fn post_with_retry(&self, query: &SeriesQuery) -> RentaResult<Vec<SeriesEnvelope>> {
        match self.post_once(query) {
            Ok(body) => Ok(body),
            Err(first) => {
                // One retry, scoped to the rate source call only.
                warn!("BanRep request failed ({first}), retrying once");
                self.post_once(query)
            }
        }
    }

    fn post_once(&self, query: &SeriesQuery) -> RentaResult<Vec<SeriesEnvelope>> {
        let response = self
            .http
            .post(&self.url)
            .json(query)
            .send()
            .map_err(|e| RentaError::data_source(format!("BanRep request failed: {e}")))?
            .error_for_status()
            .map_err(|e| RentaError::data_source(format!("BanRep returned an error: {e}")))?;

        response
            .json()
            .map_err(|e| RentaError::data_source(format!("BanRep response unparseable: {e}")))
    }
}

impl RateSource for BanRepClient {
    fn source_name(&self) -> &str {
        "Banco de la República"
    }

    fn rate_on(&self, date: Date) -> RentaResult<f64> {
        self.fetch_range(date, date)?.get(date)
    }

    fn rates_on(&self, dates: &[Date]) -> RentaResult<Vec<f64>> {
        let (Some(&min), Some(&max)) = (dates.iter().min(), dates.iter().max()) else {
            return Ok(Vec::new());
        };

        let table = self.fetch_range(min, max)?;
        dates.iter().map(|&date| table.get(date)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_wire_format() {
        let query = SeriesQuery {
            series: vec![SeriesSelector {
                id_periodicidades: vec![1],
                id_serie: IBR_SERIES_ID,
            }],
            fecha_inicio: 20250102,
            fecha_fin: 20250131,
        };

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["series"][0]["idSerie"], 242);
        assert_eq!(json["series"][0]["idPeriodicidades"][0], 1);
        assert_eq!(json["fechaInicio"], 20250102);
        assert_eq!(json["fechaFin"], 20250131);
    }

    #[test]
    fn test_envelope_parsing() {
        let body = r#"[{"data": [[1735776000000, 9.53], [1735862400000, 9.51]]}]"#;
        let envelopes: Vec<SeriesEnvelope> = serde_json::from_str(body).unwrap();
        assert_eq!(envelopes[0].data.len(), 2);
        assert_eq!(envelopes[0].data[0].1, 9.53);
    }

    #[test]
    fn test_envelope_missing_data_field() {
        let body = r#"[{}]"#;
        let envelopes: Vec<SeriesEnvelope> = serde_json::from_str(body).unwrap();
        assert!(envelopes[0].data.is_empty());
    }
}
