//! Quickstart: generate sample sales data, run the forecasting pipeline,
//! and print the metrics and forecast CSV.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sales_forecast::prelude::*;
use sales_forecast::sample::{generate_sample, SampleConfig};

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let series = generate_sample(&mut rng, &SampleConfig::default());
    println!(
        "generated {} monthly observations from {:?}",
        series.len(),
        series.first_date()
    );

    let pipeline = ForecastPipeline::new(PipelineConfig {
        test_periods: 12,
        forecast_horizon: 12,
        strategy: Strategy::AddAdd,
    })?;
    let output = pipeline.run(&series)?;

    println!(
        "history: {} months, last month {:?}",
        output.monthly.len(),
        output.monthly.last_month()
    );
    println!(
        "test metrics: mae={:.2} rmse={:.2}",
        output.metrics.mae, output.metrics.rmse
    );
    println!("\nforecast:");
    print!("{}", output.forecast.to_csv_string()?);

    Ok(())
}
