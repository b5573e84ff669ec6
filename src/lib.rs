//! # sales-forecast
//!
//! Monthly sales forecasting with seasonal exponential smoothing.
//!
//! Takes a raw (date, amount) sales table, aggregates it into a regular
//! monthly cadence, evaluates a Holt-Winters model against a held-out test
//! window, and produces a future forecast. The [`pipeline`] module ties the
//! stages together; each stage is also usable on its own.

pub mod aggregate;
pub mod core;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod sample;
pub mod split;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::aggregate::aggregate_monthly;
    pub use crate::core::{ForecastResult, MonthlySeries, Series};
    pub use crate::error::{ForecastError, Result};
    pub use crate::loader::{from_records, load_csv, RawRecord};
    pub use crate::metrics::{evaluate, Metrics};
    pub use crate::model::{FittedModel, HoltWinters, ModelConfig, Strategy};
    pub use crate::pipeline::{ForecastPipeline, PipelineConfig, PipelineOutput};
    pub use crate::split::train_test_split;
}
