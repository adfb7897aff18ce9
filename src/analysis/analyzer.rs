//! Fetch-then-analyze helpers for callers holding an `ObservationSource`.

use serde::Serialize;

use super::outliers::detect_outliers;
use super::rolling::rolling_stat;
use super::source::ObservationSource;
use super::types::{OutlierSet, SmoothedSeries};
use super::{AnalysisError, OutlierMode, Statistic};

/// Window of the two-week mood report.
pub const REPORT_WINDOW: usize = 14;

/// Rolling mean and deviation for one subject, computed from one fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodAnalysis {
    pub subject_id: i64,
    pub window: usize,
    pub mean: SmoothedSeries,
    pub stddev: SmoothedSeries,
}

pub fn analyze_moods<S>(
    source: &S,
    subject_id: i64,
    window: usize,
) -> Result<MoodAnalysis, S::Error>
where
    S: ObservationSource,
    S::Error: From<AnalysisError>,
{
    let series = source.observations_for(subject_id)?;
    let mean = rolling_stat(&series, window, Statistic::Mean)?;
    let stddev = rolling_stat(&series, window, Statistic::StdDev)?;

    tracing::info!(subject_id, window, days = series.len(), "Mood analysis complete");

    Ok(MoodAnalysis {
        subject_id,
        window,
        mean,
        stddev,
    })
}

pub fn smoothed_for<S>(
    source: &S,
    subject_id: i64,
    window: usize,
    statistic: Statistic,
) -> Result<SmoothedSeries, S::Error>
where
    S: ObservationSource,
    S::Error: From<AnalysisError>,
{
    let series = source.observations_for(subject_id)?;
    Ok(rolling_stat(&series, window, statistic)?)
}

pub fn outliers_for<S>(
    source: &S,
    subject_id: i64,
    mode: OutlierMode,
    window: usize,
) -> Result<OutlierSet, S::Error>
where
    S: ObservationSource,
    S::Error: From<AnalysisError>,
{
    let series = source.observations_for(subject_id)?;
    Ok(detect_outliers(&series, mode, window)?)
}
