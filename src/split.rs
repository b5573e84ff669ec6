//! Chronological train/test partitioning of a monthly series.

use crate::core::MonthlySeries;
use crate::error::{ForecastError, Result};

/// Minimum training observations required beyond the test window.
const MIN_TRAIN_BEYOND_TEST: usize = 6;

/// Split a monthly series into a training prefix and a trailing test window.
///
/// The test window is exactly the final `test_periods` months; everything
/// before it is training data. The cut is purely chronological, never a
/// random sample. Requires more than `test_periods + 6` months so the fit
/// stays minimally meaningful.
pub fn train_test_split(
    monthly: &MonthlySeries,
    test_periods: usize,
) -> Result<(MonthlySeries, MonthlySeries)> {
    let needed = test_periods + MIN_TRAIN_BEYOND_TEST + 1;
    if monthly.len() < needed {
        return Err(ForecastError::InsufficientData {
            needed,
            got: monthly.len(),
        });
    }
    monthly.split_at(monthly.len() - test_periods)
}
