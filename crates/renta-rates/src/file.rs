//! Projection-file rate source.
//!
//! When a requested fixing date is not yet published online, the caller
//! can supply a projection file instead: one CSV series per index, a
//! date column and a rate column, looked up by exact date match. The
//! conventional series names mirror the uploaded-workbook sheets:
//! "IBR Estimada" and "IPC Estimado".

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use renta_core::error::{RentaError, RentaResult};
use renta_core::types::Date;

use crate::source::{RateSource, RateTable};

/// Conventional series name for projected IBR rates.
pub const IBR_SERIES: &str = "IBR Estimada";
/// Conventional series name for projected IPC rates.
pub const IPC_SERIES: &str = "IPC Estimado";

#[derive(Debug, Deserialize)]
struct ProjectionRecord {
    fecha: String,
    tasa: f64,
}

/// A named series of projected rates loaded from a CSV file.
///
/// The file must have a `fecha` column (DD/MM/YYYY or YYYY-MM-DD) and a
/// `tasa` column with the rate in percent. Loaded once; immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct ProjectionSeries {
    name: String,
    table: RateTable,
}

impl ProjectionSeries {
    /// Loads a series from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// Returns `RentaError::DataSource` on I/O or parse problems.
    pub fn from_path(name: impl Into<String>, path: impl AsRef<Path>) -> RentaResult<Self> {
        let name = name.into();
        let reader = csv::Reader::from_path(path.as_ref()).map_err(|e| {
            RentaError::data_source(format!(
                "cannot open projection file for '{name}': {e}"
            ))
        })?;
        Self::from_csv(name, reader)
    }

    /// Loads a series from any CSV reader (in-memory buffers in tests).
    ///
    /// # Errors
    ///
    /// Returns `RentaError::DataSource` on malformed rows or dates.
    pub fn from_reader(name: impl Into<String>, data: impl Read) -> RentaResult<Self> {
        Self::from_csv(name.into(), csv::Reader::from_reader(data))
    }

    fn from_csv<R: Read>(name: String, mut reader: csv::Reader<R>) -> RentaResult<Self> {
        let mut entries = Vec::new();

        for result in reader.deserialize() {
            let record: ProjectionRecord = result.map_err(|e| {
                RentaError::data_source(format!("bad row in series '{name}': {e}"))
            })?;

            let date = Date::parse_dmy(&record.fecha)
                .or_else(|_| Date::parse(&record.fecha))
                .map_err(|_| {
                    RentaError::data_source(format!(
                        "bad date '{}' in series '{name}'",
                        record.fecha
                    ))
                })?;

            entries.push((date, record.tasa));
        }

        if entries.is_empty() {
            return Err(RentaError::data_source(format!(
                "projection series '{name}' holds no rows"
            )));
        }

        Ok(Self {
            name,
            table: RateTable::new(entries),
        })
    }

    /// Number of dated rates in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the series holds no rates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl RateSource for ProjectionSeries {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn rate_on(&self, date: Date) -> RentaResult<f64> {
        self.table.get(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
fecha,tasa
02/01/2025,9.53
03/01/2025,9.51
07/01/2025,9.48
";

    #[test]
    fn test_load_and_lookup() {
        let series = ProjectionSeries::from_reader(IBR_SERIES, SAMPLE.as_bytes()).unwrap();
        assert_eq!(series.len(), 3);

        let date = Date::from_ymd(2025, 1, 3).unwrap();
        assert_eq!(series.rate_on(date).unwrap(), 9.51);
    }

    #[test]
    fn test_missing_date_is_an_error() {
        let series = ProjectionSeries::from_reader(IBR_SERIES, SAMPLE.as_bytes()).unwrap();
        let missing = Date::from_ymd(2025, 1, 4).unwrap();

        let err = series.rate_on(missing).unwrap_err();
        assert!(matches!(err, RentaError::RateNotFound { .. }));
        assert!(err.to_string().contains("2025-01-04"));
    }

    #[test]
    fn test_iso_dates_accepted() {
        let data = "fecha,tasa\n2025-01-02,4.2\n";
        let series = ProjectionSeries::from_reader(IPC_SERIES, data.as_bytes()).unwrap();
        assert_eq!(
            series.rate_on(Date::from_ymd(2025, 1, 2).unwrap()).unwrap(),
            4.2
        );
    }

    #[test]
    fn test_empty_series_rejected() {
        let data = "fecha,tasa\n";
        assert!(ProjectionSeries::from_reader(IBR_SERIES, data.as_bytes()).is_err());
    }

    #[test]
    fn test_batch_lookup_in_order() {
        let series = ProjectionSeries::from_reader(IBR_SERIES, SAMPLE.as_bytes()).unwrap();
        let dates = [
            Date::from_ymd(2025, 1, 7).unwrap(),
            Date::from_ymd(2025, 1, 2).unwrap(),
        ];
        assert_eq!(series.rates_on(&dates).unwrap(), vec![9.48, 9.53]);
    }
}
