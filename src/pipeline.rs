//! End-to-end forecasting pipeline.
//!
//! Runs load → aggregate → split → fit → forecast (test) → evaluate →
//! refit (full data) → forecast (future horizon). Every stage is forward
//! only: the first failure aborts the run with no partial output, no
//! retries, and no fallback defaults.

use crate::aggregate::aggregate_monthly;
use crate::core::{ForecastResult, MonthlySeries, Series};
use crate::error::{ForecastError, Result};
use crate::loader::load_csv;
use crate::metrics::{evaluate, Metrics};
use crate::model::{FittedModel, HoltWinters, ModelConfig, Strategy};
use crate::split::train_test_split;
use log::{debug, info};
use std::io::Read;

/// Pipeline configuration, as supplied by the caller (e.g. a dashboard).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Trailing months held out for evaluation (3 to 36).
    pub test_periods: usize,
    /// Future months to forecast (1 to 36).
    pub forecast_horizon: usize,
    /// Trend/seasonality combination to fit.
    pub strategy: Strategy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            test_periods: 12,
            forecast_horizon: 12,
            strategy: Strategy::AddAdd,
        }
    }
}

impl PipelineConfig {
    fn validate(&self) -> Result<()> {
        if !(3..=36).contains(&self.test_periods) {
            return Err(ForecastError::InvalidParameter(format!(
                "test_periods must be between 3 and 36, got {}",
                self.test_periods
            )));
        }
        if !(1..=36).contains(&self.forecast_horizon) {
            return Err(ForecastError::InvalidParameter(format!(
                "forecast_horizon must be between 1 and 36, got {}",
                self.forecast_horizon
            )));
        }
        Ok(())
    }
}

/// Final pipeline output handed to the caller.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The aggregated monthly history (for display and plotting).
    pub monthly: MonthlySeries,
    /// Test-window accuracy of the selected model structure.
    pub metrics: Metrics,
    /// Future forecast from the model refit on the full history.
    pub forecast: ForecastResult,
}

/// Single-shot batch pipeline. Each run allocates its own state; nothing is
/// shared between runs.
#[derive(Debug, Clone)]
pub struct ForecastPipeline {
    config: PipelineConfig,
}

impl ForecastPipeline {
    /// Create a pipeline with a validated configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this pipeline runs under.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline over an already loaded series.
    pub fn run(&self, series: &Series) -> Result<PipelineOutput> {
        let monthly = aggregate_monthly(series)?;
        info!(
            "aggregated history: {} months ending {:?}",
            monthly.len(),
            monthly.last_month()
        );

        let (train, test) = train_test_split(&monthly, self.config.test_periods)?;
        debug!("split: {} train / {} test months", train.len(), test.len());

        let model_config = ModelConfig::from_strategy(self.config.strategy);
        let test_model = HoltWinters::fit(&train, &model_config)?;
        let test_forecast = test_model.forecast(test.len())?;
        let metrics = evaluate(test.totals(), test_forecast.predictions())?;
        info!(
            "test metrics for {}: mae={:.2} rmse={:.2}",
            self.config.strategy, metrics.mae, metrics.rmse
        );

        let full_model: FittedModel = HoltWinters::fit(&monthly, &model_config)?;
        let forecast = full_model.forecast(self.config.forecast_horizon)?;
        info!(
            "forecast: {} months starting {:?}",
            forecast.horizon(),
            forecast.months().first()
        );

        Ok(PipelineOutput {
            monthly,
            metrics,
            forecast,
        })
    }

    /// Run the pipeline over delimited text input.
    pub fn run_csv<R: Read>(&self, reader: R) -> Result<PipelineOutput> {
        let series = load_csv(reader)?;
        self.run(&series)
    }
}
