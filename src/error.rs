//! Error types for the sales-forecast library.

use thiserror::Error;

/// Result type alias for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while loading, modeling, or evaluating sales data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// A required input column is missing.
    #[error("input must contain a `{column}` column")]
    Schema { column: String },

    /// A date value could not be parsed.
    #[error("unparseable date value: `{value}`")]
    DateParse { value: String },

    /// An amount value could not be parsed as a number.
    #[error("unparseable amount value: `{value}`")]
    Amount { value: String },

    /// Insufficient observations for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The model could not be estimated.
    #[error("model fit failed: {0}")]
    Fit(String),

    /// Length mismatch between actual and predicted values.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Invalid configuration value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Underlying CSV transport error.
    #[error("csv error: {0}")]
    Csv(String),
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::Csv(err.to_string())
    }
}
