//! Seam between the analyzer and whatever stores observations.

use std::collections::HashMap;

use super::types::MoodSeries;
use super::AnalysisError;

/// Supplies a subject's observations, ascending by date with one entry per
/// date. Placeholder days come through with an undefined mood.
pub trait ObservationSource {
    type Error;

    fn observations_for(&self, subject_id: i64) -> Result<MoodSeries, Self::Error>;
}

/// In-memory source. Subjects without observations get an empty series.
///
/// Lookups never fail; `AnalysisError` is the error type so the map can be
/// handed straight to the analyzer helpers.
impl ObservationSource for HashMap<i64, MoodSeries> {
    type Error = AnalysisError;

    fn observations_for(&self, subject_id: i64) -> Result<MoodSeries, Self::Error> {
        Ok(self.get(&subject_id).cloned().unwrap_or_default())
    }
}
