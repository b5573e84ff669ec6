//! Forecast result structure and its CSV export.

use crate::error::Result;
use chrono::NaiveDate;
use std::io::Write;

/// Point forecasts continuing monthly from the end of the fitted data.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    months: Vec<NaiveDate>,
    predictions: Vec<f64>,
}

impl ForecastResult {
    pub(crate) fn new(months: Vec<NaiveDate>, predictions: Vec<f64>) -> Self {
        debug_assert_eq!(months.len(), predictions.len());
        Self {
            months,
            predictions,
        }
    }

    /// Forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.months.len()
    }

    /// Check if the forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Future month-start dates, ascending.
    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    /// Predicted values, in month order.
    pub fn predictions(&self) -> &[f64] {
        &self.predictions
    }

    /// Iterate over (month, prediction) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.months
            .iter()
            .copied()
            .zip(self.predictions.iter().copied())
    }

    /// Write the forecast as `date,forecast` CSV rows with a trailing newline.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(["date", "forecast"])?;
        for (month, prediction) in self.iter() {
            out.write_record([month.format("%Y-%m-%d").to_string(), prediction.to_string()])?;
        }
        out.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Render the forecast as a CSV string (the download artifact).
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        // csv::Writer only emits valid UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
