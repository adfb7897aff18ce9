//! Outlier detection over a mood series.

use super::types::{MoodSeries, Outlier, OutlierSet};
use super::window::{trailing_windows, WindowStats};
use super::{validate_window, AnalysisError, OutlierMode};

/// Window used by local detection when the caller does not pick one.
pub const DEFAULT_OUTLIER_WINDOW: usize = 5;

/// Global mode flags moods whose magnitude exceeds this many deviations.
pub const GLOBAL_STDDEV_MULTIPLIER: f64 = 2.0;

/// Flags observations that deviate from a dispersion threshold.
///
/// `window` is validated in both modes but only used by local detection.
pub fn detect_outliers(
    series: &MoodSeries,
    mode: OutlierMode,
    window: usize,
) -> Result<OutlierSet, AnalysisError> {
    validate_window(window)?;

    let outliers = match mode {
        OutlierMode::Global => global_outliers(series),
        OutlierMode::Local => local_outliers(series, window),
    };

    tracing::debug!(
        mode = mode.as_str(),
        window,
        input = series.len(),
        flagged = outliers.len(),
        "Outlier detection finished"
    );

    Ok(outliers)
}

/// `|mood| > 2σ`, with σ taken once over the whole series.
/// A flat series (σ = 0) or one with a single rating has no outliers.
fn global_outliers(series: &MoodSeries) -> OutlierSet {
    let stats = WindowStats::of(series.moods().flatten());
    let Some(std) = stats.sample_std().filter(|s| *s > 0.0) else {
        return Vec::new();
    };
    let threshold = GLOBAL_STDDEV_MULTIPLIER * std;

    series
        .iter()
        .filter_map(|obs| {
            let mood = obs.mood?;
            (f64::from(mood).abs() > threshold).then_some(Outlier { date: obs.date, mood })
        })
        .collect()
}

/// `|mood[i] - baseline| > local_std[i]` for every `i >= window - 1`.
///
/// The baseline is one fixed mean over `series[window - 1..]`, not a
/// per-position rolling mean.
fn local_outliers(series: &MoodSeries, window: usize) -> OutlierSet {
    if series.len() < window {
        return Vec::new();
    }

    let moods: Vec<Option<i32>> = series.moods().collect();
    let windows = trailing_windows(&moods, window);
    let start = window - 1;

    let Some(baseline) = WindowStats::of(moods[start..].iter().flatten().copied()).mean() else {
        return Vec::new();
    };

    series.observations()[start..]
        .iter()
        .zip(&windows[start..])
        .filter_map(|(obs, stats)| {
            let mood = obs.mood?;
            let local_std = stats.as_ref()?.sample_std()?;
            ((f64::from(mood) - baseline).abs() > local_std)
                .then_some(Outlier { date: obs.date, mood })
        })
        .collect()
}
