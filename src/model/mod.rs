//! Seasonal exponential-smoothing model configuration and fitting.

mod holt_winters;

pub use holt_winters::{FittedModel, HoltWinters};

use crate::error::ForecastError;
use std::fmt;
use std::str::FromStr;

/// Type of trend component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendType {
    /// Additive trend: the level changes by a constant step per period.
    #[default]
    Additive,
    /// Multiplicative trend: the level grows by a constant factor per period.
    Multiplicative,
}

/// Type of seasonal component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonalType {
    /// Additive seasonality: a constant offset per season position.
    #[default]
    Additive,
    /// Multiplicative seasonality: a proportional factor per season position.
    Multiplicative,
}

/// The four selectable trend/seasonal combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Additive trend, additive seasonality.
    #[default]
    AddAdd,
    /// Additive trend, multiplicative seasonality.
    AddMul,
    /// Multiplicative trend, additive seasonality.
    MulAdd,
    /// Multiplicative trend, multiplicative seasonality.
    MulMul,
}

impl Strategy {
    /// Trend component selected by this strategy.
    pub fn trend(self) -> TrendType {
        match self {
            Strategy::AddAdd | Strategy::AddMul => TrendType::Additive,
            Strategy::MulAdd | Strategy::MulMul => TrendType::Multiplicative,
        }
    }

    /// Seasonal component selected by this strategy.
    pub fn seasonal(self) -> SeasonalType {
        match self {
            Strategy::AddAdd | Strategy::MulAdd => SeasonalType::Additive,
            Strategy::AddMul | Strategy::MulMul => SeasonalType::Multiplicative,
        }
    }

    /// The wire form, `<trend>_<seasonal>`.
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::AddAdd => "add_add",
            Strategy::AddMul => "add_mul",
            Strategy::MulAdd => "mul_add",
            Strategy::MulMul => "mul_mul",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add_add" => Ok(Strategy::AddAdd),
            "add_mul" => Ok(Strategy::AddMul),
            "mul_add" => Ok(Strategy::MulAdd),
            "mul_mul" => Ok(Strategy::MulMul),
            other => Err(ForecastError::InvalidParameter(format!(
                "unknown strategy `{other}`, expected one of add_add, add_mul, mul_add, mul_mul"
            ))),
        }
    }
}

/// Trend/seasonality configuration for a model fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelConfig {
    /// Observations per seasonal cycle (12 for monthly data with annual
    /// seasonality).
    pub seasonal_periods: usize,
    /// Trend component type.
    pub trend: TrendType,
    /// Seasonal component type.
    pub seasonal: SeasonalType,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            seasonal_periods: 12,
            trend: TrendType::Additive,
            seasonal: SeasonalType::Additive,
        }
    }
}

impl ModelConfig {
    /// Annual-seasonality config for the given strategy.
    pub fn from_strategy(strategy: Strategy) -> Self {
        Self {
            seasonal_periods: 12,
            trend: strategy.trend(),
            seasonal: strategy.seasonal(),
        }
    }

    /// Whether any component is multiplicative (requires positive data).
    pub fn has_multiplicative_component(&self) -> bool {
        self.trend == TrendType::Multiplicative || self.seasonal == SeasonalType::Multiplicative
    }
}
