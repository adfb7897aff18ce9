//! Mood series analysis.
//!
//! Pure, synchronous computations over one subject's ordered mood
//! observations: a rolling smoother, an outlier detector, and the
//! `ObservationSource` seam through which callers supply the series.
//! Nothing in here touches the database or knows about HTTP.

pub mod analyzer;
pub mod outliers;
pub mod rolling;
pub mod source;
pub mod types;
mod window;

pub use analyzer::{analyze_moods, outliers_for, smoothed_for, MoodAnalysis};
pub use outliers::{detect_outliers, DEFAULT_OUTLIER_WINDOW, GLOBAL_STDDEV_MULTIPLIER};
pub use rolling::rolling_stat;
pub use source::ObservationSource;
pub use types::*;

pub use crate::models::enums::{OutlierMode, Statistic};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Observations out of order: {next} does not follow {previous}")]
    UnorderedSeries {
        previous: chrono::NaiveDate,
        next: chrono::NaiveDate,
    },
}

/// Rejects window sizes the smoother and detector cannot work with.
pub(crate) fn validate_window(window: usize) -> Result<(), AnalysisError> {
    if window == 0 {
        return Err(AnalysisError::InvalidArgument(
            "window must be at least 1".into(),
        ));
    }
    Ok(())
}

/// Converts a caller-supplied signed window size, rejecting zero and
/// negative values instead of clamping them.
pub fn window_from_i64(window: i64) -> Result<usize, AnalysisError> {
    let size = usize::try_from(window).map_err(|_| {
        AnalysisError::InvalidArgument(format!("window must be positive, got {window}"))
    })?;
    validate_window(size)?;
    Ok(size)
}
