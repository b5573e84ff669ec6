//! Series value types with explicit ordering invariants.

use crate::error::{ForecastError, Result};
use chrono::{Datelike, Months, NaiveDate};

/// First calendar day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    // Day 1 exists for every valid (year, month).
    date.with_day(1).unwrap_or(date)
}

/// Advance a date by a whole number of calendar months.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date + Months::new(months)
}

/// A raw sales series: (date, amount) observations sorted ascending by date.
///
/// Duplicate dates are allowed; aggregation collapses them into monthly
/// buckets. Ties keep their original relative order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl Series {
    /// Build a series from unordered observations. Sorting is stable.
    pub fn new(mut observations: Vec<(NaiveDate, f64)>) -> Self {
        observations.sort_by_key(|(date, _)| *date);
        let (dates, values) = observations.into_iter().unzip();
        Self { dates, values }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Observation dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Observation amounts, in date order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over (date, amount) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Earliest observation date.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Latest observation date.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

/// A monthly sales series: one summed value per calendar month.
///
/// Invariants, checked at construction: every date is a month start, months
/// are strictly increasing with no gaps, and the two vectors have equal
/// length. Months with no source rows carry a 0.0 total.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    months: Vec<NaiveDate>,
    totals: Vec<f64>,
}

impl MonthlySeries {
    /// Build a monthly series, validating the contiguity invariants.
    pub fn new(months: Vec<NaiveDate>, totals: Vec<f64>) -> Result<Self> {
        if months.len() != totals.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: months.len(),
                got: totals.len(),
            });
        }
        for window in months.windows(2) {
            if window[1] != add_months(window[0], 1) {
                return Err(ForecastError::InvalidParameter(format!(
                    "months must be consecutive: {} is not followed by {}",
                    window[0], window[1]
                )));
            }
        }
        if let Some(&first) = months.first() {
            if first != month_start(first) {
                return Err(ForecastError::InvalidParameter(format!(
                    "months must be month-start dates, got {first}"
                )));
            }
        }
        Ok(Self { months, totals })
    }

    /// Number of months.
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Month-start dates, ascending and contiguous.
    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    /// Monthly totals, in month order.
    pub fn totals(&self) -> &[f64] {
        &self.totals
    }

    /// Iterate over (month, total) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.months.iter().copied().zip(self.totals.iter().copied())
    }

    /// Last observed month.
    pub fn last_month(&self) -> Option<NaiveDate> {
        self.months.last().copied()
    }

    /// Partition into a prefix of `mid` months and the trailing suffix.
    ///
    /// The pieces concatenate back to the original series exactly.
    pub fn split_at(&self, mid: usize) -> Result<(MonthlySeries, MonthlySeries)> {
        if mid > self.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "split index {mid} exceeds series length {}",
                self.len()
            )));
        }
        let head = MonthlySeries {
            months: self.months[..mid].to_vec(),
            totals: self.totals[..mid].to_vec(),
        };
        let tail = MonthlySeries {
            months: self.months[mid..].to_vec(),
            totals: self.totals[mid..].to_vec(),
        };
        Ok((head, tail))
    }
}
