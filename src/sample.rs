//! Synthetic monthly sales data for demos and end-to-end testing.

use crate::core::{add_months, Series};
use chrono::NaiveDate;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Shape of the generated series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleConfig {
    /// First month of the series.
    pub start: NaiveDate,
    /// Number of monthly observations.
    pub periods: usize,
    /// Amount in the first month, before seasonality and noise.
    pub trend_start: f64,
    /// Amount in the last month, before seasonality and noise.
    pub trend_end: f64,
    /// Amplitude of the 12-month sine seasonality.
    pub seasonal_amplitude: f64,
    /// Standard deviation of the Gaussian noise.
    pub noise_std: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            // NaiveDate::from_ymd_opt(2019, 1, 1) is a valid date.
            start: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default(),
            periods: 72,
            trend_start: 1000.0,
            trend_end: 5000.0,
            seasonal_amplitude: 300.0,
            noise_std: 200.0,
        }
    }
}

/// Generate a synthetic monthly sales series: linear trend plus annual sine
/// seasonality plus Gaussian noise, floored at zero and rounded to cents.
///
/// The rng is caller-supplied so seeding stays explicit; a seeded rng makes
/// the output reproducible.
pub fn generate_sample<R: Rng>(rng: &mut R, config: &SampleConfig) -> Series {
    let n = config.periods;
    // A non-finite or negative std disables the noise term.
    let noise = Normal::new(0.0, config.noise_std.max(0.0)).ok();
    let slope = if n > 1 {
        (config.trend_end - config.trend_start) / (n - 1) as f64
    } else {
        0.0
    };

    let rows = (0..n)
        .map(|i| {
            let trend = config.trend_start + slope * i as f64;
            let seasonal = config.seasonal_amplitude
                * (2.0 * std::f64::consts::PI * (i % 12) as f64 / 12.0).sin();
            let eps = noise.as_ref().map(|d| d.sample(rng)).unwrap_or(0.0);
            let amount = (trend + seasonal + eps).max(0.0);
            (add_months(config.start, i as u32), (amount * 100.0).round() / 100.0)
        })
        .collect();
    Series::new(rows)
}
