//! Core data structures for the forecasting pipeline.

mod forecast;
mod series;

pub use forecast::ForecastResult;
pub use series::{add_months, month_start, MonthlySeries, Series};
