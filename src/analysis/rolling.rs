//! Rolling smoother.
//!
//! Each position from `window - 1` onward carries the statistic of the
//! trailing window ending there. Earlier positions have no full window and
//! carry the raw mood instead of a partial-window average. Undefined
//! results at the end of the series are trimmed off together with their
//! dates; values are truncated toward zero.

use super::types::{MoodSeries, SmoothedPoint, SmoothedSeries};
use super::window::{trailing_windows, WindowStats};
use super::{validate_window, AnalysisError, Statistic};

impl Statistic {
    fn apply(&self, stats: &WindowStats) -> Option<i64> {
        match self {
            Statistic::Mean => stats.truncated_mean(),
            Statistic::StdDev => stats.sample_std().map(|s| s as i64),
        }
    }
}

/// Windowed moving statistic over a mood series.
///
/// The result is not index-aligned with the input. Trailing undefined values
/// are trimmed, and a position whose window holds an undefined mood is left
/// out even mid-series. Match points to observations by `date`.
///
/// Returns an empty series for empty input. Fails only when `window` is 0.
pub fn rolling_stat(
    series: &MoodSeries,
    window: usize,
    statistic: Statistic,
) -> Result<SmoothedSeries, AnalysisError> {
    validate_window(window)?;

    let moods: Vec<Option<i32>> = series.moods().collect();
    let windows = trailing_windows(&moods, window);

    let mut values: Vec<Option<i64>> = moods
        .iter()
        .zip(&windows)
        .enumerate()
        .map(|(i, (raw, stats))| {
            if i + 1 < window {
                raw.map(i64::from)
            } else {
                stats.as_ref().and_then(|s| statistic.apply(s))
            }
        })
        .collect();

    while matches!(values.last(), Some(None)) {
        values.pop();
    }
    let trimmed = series.len() - values.len();

    // Zipping against the trimmed values drops the trailing dates in step.
    // Interior gaps have no value to chart and are skipped.
    let smoothed: SmoothedSeries = series
        .iter()
        .zip(values)
        .filter_map(|(obs, value)| value.map(|value| SmoothedPoint { date: obs.date, value }))
        .collect();

    tracing::debug!(
        window,
        statistic = statistic.as_str(),
        input = series.len(),
        trimmed,
        output = smoothed.len(),
        "Rolling statistic computed"
    );

    Ok(smoothed)
}
