//! Holt-Winters triple exponential smoothing.
//!
//! Fits level, trend, and seasonal components to a monthly training series
//! and extrapolates them forward. Trend and seasonality are independently
//! additive or multiplicative, giving four model structures.
//!
//! Additive trend extrapolates `l + h*b`; multiplicative trend extrapolates
//! `l * b^h`. Additive seasonality adds the seasonal index for the target
//! season position; multiplicative seasonality scales by it.

use crate::core::{add_months, ForecastResult, MonthlySeries};
use crate::error::{ForecastError, Result};
use crate::model::{ModelConfig, SeasonalType, TrendType};
use crate::utils::minimize;
use chrono::NaiveDate;
use log::debug;

const PARAM_BOUNDS: (f64, f64) = (0.0001, 0.9999);

/// Holt-Winters model entry point.
pub struct HoltWinters;

/// Smoothing state at one point of the recursion.
struct State {
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
}

impl State {
    /// Initialize from the first two seasonal cycles.
    fn init(values: &[f64], config: &ModelConfig) -> State {
        let m = config.seasonal_periods;
        let level: f64 = values[..m].iter().sum::<f64>() / m as f64;

        let trend = match config.trend {
            TrendType::Additive => {
                // Average per-period change between the first two cycles.
                (0..m)
                    .map(|i| (values[m + i] - values[i]) / m as f64)
                    .sum::<f64>()
                    / m as f64
            }
            TrendType::Multiplicative => {
                // Average per-period growth factor between the first two
                // cycle means. Positivity is enforced before fitting.
                let second: f64 = values[m..2 * m].iter().sum::<f64>() / m as f64;
                (second / level).powf(1.0 / m as f64)
            }
        };

        let mut seasonals: Vec<f64> = match config.seasonal {
            SeasonalType::Additive => values[..m].iter().map(|y| y - level).collect(),
            SeasonalType::Multiplicative => values[..m].iter().map(|y| y / level).collect(),
        };
        normalize_seasonals(&mut seasonals, config.seasonal);

        State {
            level,
            trend,
            seasonals,
        }
    }

    /// Level carried forward one step before observing the next value.
    fn projected_level(&self, trend_type: TrendType) -> f64 {
        match trend_type {
            TrendType::Additive => self.level + self.trend,
            TrendType::Multiplicative => self.level * self.trend,
        }
    }

    /// One-step-ahead in-sample forecast for season position `season_idx`.
    fn one_step(&self, config: &ModelConfig, season_idx: usize) -> f64 {
        let projected = self.projected_level(config.trend);
        match config.seasonal {
            SeasonalType::Additive => projected + self.seasonals[season_idx],
            SeasonalType::Multiplicative => projected * self.seasonals[season_idx],
        }
    }

    /// Absorb the observation `y` at season position `season_idx`.
    fn update(&mut self, config: &ModelConfig, params: [f64; 3], season_idx: usize, y: f64) {
        let [alpha, beta, gamma] = params;
        let s = self.seasonals[season_idx];
        let projected = self.projected_level(config.trend);

        let deseasonalized = match config.seasonal {
            SeasonalType::Additive => y - s,
            SeasonalType::Multiplicative => {
                if s.abs() > 1e-10 {
                    y / s
                } else {
                    y
                }
            }
        };

        let level_prev = self.level;
        self.level = alpha * deseasonalized + (1.0 - alpha) * projected;

        self.trend = match config.trend {
            TrendType::Additive => beta * (self.level - level_prev) + (1.0 - beta) * self.trend,
            TrendType::Multiplicative => {
                if level_prev.abs() > 1e-10 {
                    beta * (self.level / level_prev) + (1.0 - beta) * self.trend
                } else {
                    self.trend
                }
            }
        };

        self.seasonals[season_idx] = match config.seasonal {
            SeasonalType::Additive => gamma * (y - self.level) + (1.0 - gamma) * s,
            SeasonalType::Multiplicative => {
                if self.level.abs() > 1e-10 {
                    gamma * (y / self.level) + (1.0 - gamma) * s
                } else {
                    s
                }
            }
        };
    }
}

/// Keep additive seasonals summing to 0, multiplicative averaging to 1.
fn normalize_seasonals(seasonals: &mut [f64], seasonal_type: SeasonalType) {
    let m = seasonals.len();
    if m == 0 {
        return;
    }
    let mean = seasonals.iter().sum::<f64>() / m as f64;
    match seasonal_type {
        SeasonalType::Additive => {
            for s in seasonals.iter_mut() {
                *s -= mean;
            }
        }
        SeasonalType::Multiplicative => {
            if mean.abs() > 1e-10 {
                for s in seasonals.iter_mut() {
                    *s /= mean;
                }
            }
        }
    }
}

/// In-sample sum of squared one-step errors for the given parameters.
fn sum_squared_errors(values: &[f64], config: &ModelConfig, params: [f64; 3]) -> f64 {
    let m = config.seasonal_periods;
    let mut state = State::init(values, config);
    let mut sse = 0.0;
    for (t, &y) in values.iter().enumerate().skip(m) {
        let season_idx = t % m;
        let error = y - state.one_step(config, season_idx);
        sse += error * error;
        state.update(config, params, season_idx, y);
    }
    sse
}

/// Estimate (alpha, beta, gamma) by minimizing in-sample SSE.
fn estimate_params(values: &[f64], config: &ModelConfig) -> [f64; 3] {
    let best = minimize(
        |p| sum_squared_errors(values, config, [p[0], p[1], p[2]]),
        &[0.3, 0.1, 0.1],
        &[PARAM_BOUNDS; 3],
        1000,
        1e-8,
    );
    [
        best[0].clamp(PARAM_BOUNDS.0, PARAM_BOUNDS.1),
        best[1].clamp(PARAM_BOUNDS.0, PARAM_BOUNDS.1),
        best[2].clamp(PARAM_BOUNDS.0, PARAM_BOUNDS.1),
    ]
}

impl HoltWinters {
    /// Fit the model to a monthly training series.
    ///
    /// Fails when the series holds fewer than two seasonal cycles, or when a
    /// multiplicative component is requested on data with non-positive
    /// values. Deterministic for identical inputs.
    pub fn fit(train: &MonthlySeries, config: &ModelConfig) -> Result<FittedModel> {
        let m = config.seasonal_periods;
        if m == 0 {
            return Err(ForecastError::InvalidParameter(
                "seasonal_periods must be positive".to_string(),
            ));
        }

        let values = train.totals();
        let n = values.len();
        if n < 2 * m {
            return Err(ForecastError::Fit(format!(
                "insufficient seasonal cycles: need at least {} observations, got {}",
                2 * m,
                n
            )));
        }
        if config.has_multiplicative_component() && values.iter().any(|&v| v <= 0.0) {
            return Err(ForecastError::Fit(
                "multiplicative components require strictly positive values".to_string(),
            ));
        }
        // Contiguous construction guarantees a last month exists here.
        let last_month = train.last_month().ok_or(ForecastError::EmptyData)?;

        let params = estimate_params(values, config);
        debug!(
            "estimated smoothing parameters alpha={:.4} beta={:.4} gamma={:.4}",
            params[0], params[1], params[2]
        );

        // Final pass with the chosen parameters, recording fitted values.
        let mut state = State::init(values, config);
        let mut fitted = Vec::with_capacity(n);
        let mut residuals = Vec::with_capacity(n);

        // The first cycle seeds the state and has no one-step forecast.
        fitted.extend_from_slice(&values[..m]);
        residuals.extend(std::iter::repeat(0.0).take(m));

        for (t, &y) in values.iter().enumerate().skip(m) {
            let season_idx = t % m;
            let one_step = state.one_step(config, season_idx);
            fitted.push(one_step);
            residuals.push(y - one_step);
            state.update(config, params, season_idx, y);
        }

        Ok(FittedModel {
            config: *config,
            alpha: params[0],
            beta: params[1],
            gamma: params[2],
            level: state.level,
            trend: state.trend,
            seasonals: state.seasonals,
            fitted,
            residuals,
            last_month,
            n,
        })
    }
}

/// An immutable fitted Holt-Winters artifact.
///
/// Forecasting is a pure read: the same model can produce forecasts for any
/// number of horizons without refitting.
#[derive(Debug, Clone)]
pub struct FittedModel {
    config: ModelConfig,
    alpha: f64,
    beta: f64,
    gamma: f64,
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
    fitted: Vec<f64>,
    residuals: Vec<f64>,
    last_month: NaiveDate,
    n: usize,
}

impl FittedModel {
    /// Produce `horizon` sequential point forecasts.
    ///
    /// Dates continue monthly from the month after the last training month.
    pub fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let m = self.config.seasonal_periods;

        let months: Vec<NaiveDate> = (1..=horizon)
            .map(|h| add_months(self.last_month, h as u32))
            .collect();
        let predictions: Vec<f64> = (1..=horizon)
            .map(|h| {
                let s = self.seasonals[(self.n + h - 1) % m];
                let projected = match self.config.trend {
                    TrendType::Additive => self.level + h as f64 * self.trend,
                    TrendType::Multiplicative => self.level * self.trend.powi(h as i32),
                };
                match self.config.seasonal {
                    SeasonalType::Additive => projected + s,
                    SeasonalType::Multiplicative => projected * s,
                }
            })
            .collect();

        Ok(ForecastResult::new(months, predictions))
    }

    /// Configuration the model was fitted under.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Estimated level smoothing parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Estimated trend smoothing parameter.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Estimated seasonal smoothing parameter.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Final level state.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Final trend state.
    pub fn trend(&self) -> f64 {
        self.trend
    }

    /// Final seasonal indices, one per season position.
    pub fn seasonals(&self) -> &[f64] {
        &self.seasonals
    }

    /// In-sample one-step forecasts (the first cycle echoes the data).
    pub fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }

    /// In-sample residuals (actual minus fitted).
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Last month of the training data.
    pub fn last_month(&self) -> NaiveDate {
        self.last_month
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Strategy;
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly_from(values: Vec<f64>) -> MonthlySeries {
        let months = (0..values.len() as u32)
            .map(|i| add_months(ymd(2019, 1, 1), i))
            .collect();
        MonthlySeries::new(months, values).unwrap()
    }

    fn seasonal_data(n: usize, base: f64, slope: f64, amplitude: f64) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let seasonal =
                    amplitude * (2.0 * std::f64::consts::PI * (i % 12) as f64 / 12.0).sin();
                base + slope * i as f64 + seasonal
            })
            .collect()
    }

    #[test]
    fn additive_fit_and_forecast() {
        let train = monthly_from(seasonal_data(48, 1000.0, 10.0, 100.0));
        let config = ModelConfig::from_strategy(Strategy::AddAdd);

        let model = HoltWinters::fit(&train, &config).unwrap();
        let forecast = model.forecast(12).unwrap();

        assert_eq!(forecast.horizon(), 12);
        // Dates continue monthly from the month after the last training month.
        assert_eq!(forecast.months()[0], ymd(2023, 1, 1));
        assert_eq!(forecast.months()[11], ymd(2023, 12, 1));
        // The upward trend should carry into the forecast.
        let mean_forecast: f64 = forecast.predictions().iter().sum::<f64>() / 12.0;
        let mean_last_year: f64 = train.totals()[36..].iter().sum::<f64>() / 12.0;
        assert!(mean_forecast > mean_last_year);
    }

    #[test]
    fn forecast_is_repeatable_and_horizon_independent() {
        let train = monthly_from(seasonal_data(48, 500.0, 5.0, 50.0));
        let config = ModelConfig::default();
        let model = HoltWinters::fit(&train, &config).unwrap();

        let short = model.forecast(6).unwrap();
        let long = model.forecast(24).unwrap();
        let again = model.forecast(6).unwrap();

        assert_eq!(short, again);
        assert_eq!(short.predictions(), &long.predictions()[..6]);
        assert_eq!(short.months(), &long.months()[..6]);
    }

    #[test]
    fn fit_is_deterministic() {
        let train = monthly_from(seasonal_data(36, 800.0, 4.0, 60.0));
        let config = ModelConfig::from_strategy(Strategy::AddMul);

        let a = HoltWinters::fit(&train, &config).unwrap();
        let b = HoltWinters::fit(&train, &config).unwrap();

        assert_relative_eq!(a.alpha(), b.alpha(), epsilon = 1e-15);
        assert_eq!(a.forecast(12).unwrap(), b.forecast(12).unwrap());
    }

    #[test]
    fn multiplicative_seasonal_tracks_proportional_swing() {
        let values: Vec<f64> = (0..48)
            .map(|i| {
                let base = 1000.0 + 20.0 * i as f64;
                let factor =
                    1.0 + 0.25 * (2.0 * std::f64::consts::PI * (i % 12) as f64 / 12.0).sin();
                base * factor
            })
            .collect();
        let train = monthly_from(values);
        let config = ModelConfig::from_strategy(Strategy::AddMul);

        let model = HoltWinters::fit(&train, &config).unwrap();
        let forecast = model.forecast(12).unwrap();
        assert_eq!(forecast.horizon(), 12);
        assert!(forecast.predictions().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn multiplicative_trend_compounds_growth() {
        // 2% monthly growth with mild additive seasonality.
        let values: Vec<f64> = (0..48)
            .map(|i| {
                1000.0 * 1.02_f64.powi(i as i32)
                    + 30.0 * (2.0 * std::f64::consts::PI * (i % 12) as f64 / 12.0).sin()
            })
            .collect();
        let train = monthly_from(values);
        let config = ModelConfig::from_strategy(Strategy::MulAdd);

        let model = HoltWinters::fit(&train, &config).unwrap();
        assert!(model.trend() > 1.0);

        let forecast = model.forecast(24).unwrap();
        // Compounding growth keeps the long end above the short end.
        assert!(forecast.predictions()[23] > forecast.predictions()[0]);
    }

    #[test]
    fn all_four_strategies_fit_positive_data() {
        let train = monthly_from(seasonal_data(48, 2000.0, 15.0, 200.0));
        for strategy in [
            Strategy::AddAdd,
            Strategy::AddMul,
            Strategy::MulAdd,
            Strategy::MulMul,
        ] {
            let config = ModelConfig::from_strategy(strategy);
            let model = HoltWinters::fit(&train, &config).unwrap();
            let forecast = model.forecast(12).unwrap();
            assert_eq!(forecast.horizon(), 12, "strategy {strategy}");
        }
    }

    #[test]
    fn too_few_cycles_fails() {
        let train = monthly_from(seasonal_data(23, 100.0, 1.0, 10.0));
        let result = HoltWinters::fit(&train, &ModelConfig::default());
        match result {
            Err(ForecastError::Fit(reason)) => {
                assert!(reason.contains("24"));
                assert!(reason.contains("23"));
            }
            other => panic!("expected fit error, got {other:?}"),
        }
    }

    #[test]
    fn multiplicative_mode_rejects_non_positive_values() {
        let mut values = seasonal_data(48, 1000.0, 10.0, 100.0);
        values[20] = 0.0;
        let train = monthly_from(values);

        for strategy in [Strategy::AddMul, Strategy::MulAdd, Strategy::MulMul] {
            let config = ModelConfig::from_strategy(strategy);
            let result = HoltWinters::fit(&train, &config);
            assert!(
                matches!(result, Err(ForecastError::Fit(_))),
                "strategy {strategy} should reject non-positive data"
            );
        }

        // The fully additive structure accepts the same data.
        let config = ModelConfig::from_strategy(Strategy::AddAdd);
        assert!(HoltWinters::fit(&train, &config).is_ok());
    }

    #[test]
    fn zero_seasonal_periods_is_invalid() {
        let train = monthly_from(seasonal_data(24, 100.0, 1.0, 5.0));
        let config = ModelConfig {
            seasonal_periods: 0,
            ..ModelConfig::default()
        };
        assert!(matches!(
            HoltWinters::fit(&train, &config),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn fitted_values_and_residuals_are_consistent() {
        let values = seasonal_data(36, 500.0, 3.0, 40.0);
        let train = monthly_from(values.clone());
        let model = HoltWinters::fit(&train, &ModelConfig::default()).unwrap();

        let fitted = model.fitted_values();
        let residuals = model.residuals();
        assert_eq!(fitted.len(), 36);
        assert_eq!(residuals.len(), 36);

        for i in 12..36 {
            assert_relative_eq!(residuals[i], values[i] - fitted[i], epsilon = 1e-10);
        }
        // Initialization cycle has no one-step forecast.
        for i in 0..12 {
            assert_relative_eq!(residuals[i], 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn seasonals_have_period_length_and_are_normalized() {
        let train = monthly_from(seasonal_data(48, 900.0, 8.0, 120.0));
        let model = HoltWinters::fit(&train, &ModelConfig::default()).unwrap();
        assert_eq!(model.seasonals().len(), 12);

        let params = [model.alpha(), model.beta(), model.gamma()];
        for p in params {
            assert!(p > 0.0 && p < 1.0);
        }
    }

    #[test]
    fn forecast_zero_horizon_is_empty() {
        let train = monthly_from(seasonal_data(36, 500.0, 3.0, 40.0));
        let model = HoltWinters::fit(&train, &ModelConfig::default()).unwrap();
        let forecast = model.forecast(0).unwrap();
        assert!(forecast.is_empty());
    }

    #[test]
    fn captures_seasonal_shape() {
        // Strong fixed pattern: first half of the year high, second half low.
        let values: Vec<f64> = (0..48)
            .map(|i| if i % 12 < 6 { 2000.0 } else { 1000.0 })
            .collect();
        let train = monthly_from(values);
        let model = HoltWinters::fit(&train, &ModelConfig::default()).unwrap();

        let forecast = model.forecast(12).unwrap();
        let preds = forecast.predictions();
        let first_half: f64 = preds[..6].iter().sum();
        let second_half: f64 = preds[6..].iter().sum();
        assert!(first_half > second_half);
    }
}
