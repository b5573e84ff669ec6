//! Loading and normalizing raw sales tables into a [`Series`].
//!
//! Accepts either delimited text (CSV with a header row) or an already
//! materialized record table. Column names are case-insensitive but must
//! resolve to exactly `date` and `amount`; extra columns are ignored.

use crate::core::Series;
use crate::error::{ForecastError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use std::io::Read;

/// One row of a raw sales table.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// ISO 8601 date string, e.g. `2024-03-01`.
    pub date: String,
    /// Sale amount; may be fractional.
    pub amount: f64,
}

/// Parse a date value, accepting ISO dates and ISO datetimes.
fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime.date());
        }
    }
    Err(ForecastError::DateParse {
        value: value.to_string(),
    })
}

/// Resolve a required column by case-insensitive name.
fn resolve_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| ForecastError::Schema {
            column: name.to_string(),
        })
}

/// Load a sales series from CSV text with `date` and `amount` columns.
///
/// The result is sorted ascending by date; rows with equal dates keep their
/// file order. The input is read once and never mutated.
pub fn load_csv<R: Read>(reader: R) -> Result<Series> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let date_col = resolve_column(&headers, "date")?;
    let amount_col = resolve_column(&headers, "amount")?;

    let mut observations = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let date = parse_date(row.get(date_col).unwrap_or_default())?;
        let raw_amount = row.get(amount_col).unwrap_or_default().trim();
        let amount: f64 = raw_amount.parse().map_err(|_| ForecastError::Amount {
            value: raw_amount.to_string(),
        })?;
        observations.push((date, amount));
    }

    debug!("loaded {} observations from csv", observations.len());
    Ok(Series::new(observations))
}

/// Build a sales series from an already materialized record table.
///
/// Same normalization as [`load_csv`]: dates are parsed and the result is
/// sorted ascending with stable tie order.
pub fn from_records(records: &[RawRecord]) -> Result<Series> {
    let observations = records
        .iter()
        .map(|record| Ok((parse_date(&record.date)?, record.amount)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Series::new(observations))
}
