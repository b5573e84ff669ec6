//! Calendar-month resampling of a raw sales series.

use crate::core::{add_months, month_start, MonthlySeries, Series};
use crate::error::{ForecastError, Result};
use log::debug;

/// Resample a series into monthly totals on month-start boundaries.
///
/// Every calendar month between the first and last observed date appears in
/// the output; months with no source rows carry a 0.0 total. Months outside
/// the observed range are never synthesized.
pub fn aggregate_monthly(series: &Series) -> Result<MonthlySeries> {
    let first = series.first_date().ok_or(ForecastError::EmptyData)?;
    let last = series.last_date().ok_or(ForecastError::EmptyData)?;

    let start = month_start(first);
    let end = month_start(last);

    let mut months = Vec::new();
    let mut month = start;
    while month <= end {
        months.push(month);
        month = add_months(month, 1);
    }

    let mut totals = vec![0.0; months.len()];
    for (date, amount) in series.iter() {
        // Contiguous months make the bucket index a month-count offset.
        let bucket = month_index(start, month_start(date));
        totals[bucket] += amount;
    }

    debug!(
        "aggregated {} observations into {} monthly buckets",
        series.len(),
        months.len()
    );
    MonthlySeries::new(months, totals)
}

/// Number of whole months from `start` to `month`, both month starts.
fn month_index(start: chrono::NaiveDate, month: chrono::NaiveDate) -> usize {
    use chrono::Datelike;
    let years = month.year() - start.year();
    let months = month.month() as i32 - start.month() as i32;
    (years * 12 + months) as usize
}
