use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AnalysisError;

/// One dated mood rating. `mood` is `None` for a placeholder day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub mood: Option<i32>,
}

impl Observation {
    pub fn new(date: NaiveDate, mood: Option<i32>) -> Self {
        Self { date, mood }
    }
}

/// Chronological observations for a single subject.
///
/// Dates are strictly increasing; gaps between dates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MoodSeries {
    observations: Vec<Observation>,
}

impl MoodSeries {
    /// Builds a series, rejecting duplicated or descending dates.
    pub fn new(observations: Vec<Observation>) -> Result<Self, AnalysisError> {
        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(AnalysisError::UnorderedSeries {
                    previous: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        Ok(Self { observations })
    }

    /// Series of consecutive days starting at `start`.
    pub fn from_daily(start: NaiveDate, moods: impl IntoIterator<Item = Option<i32>>) -> Self {
        let observations = moods
            .into_iter()
            .zip(start.iter_days())
            .map(|(mood, date)| Observation { date, mood })
            .collect();
        Self { observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn moods(&self) -> impl Iterator<Item = Option<i32>> + '_ {
        self.observations.iter().map(|o| o.mood)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Observations dated within `from..=to`.
    pub fn clip(&self, from: NaiveDate, to: NaiveDate) -> MoodSeries {
        let observations = self
            .observations
            .iter()
            .filter(|o| o.date >= from && o.date <= to)
            .copied()
            .collect();
        Self { observations }
    }
}

impl TryFrom<Vec<Observation>> for MoodSeries {
    type Error = AnalysisError;

    fn try_from(observations: Vec<Observation>) -> Result<Self, Self::Error> {
        Self::new(observations)
    }
}

impl<'a> IntoIterator for &'a MoodSeries {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

/// A smoothed value for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothedPoint {
    pub date: NaiveDate,
    pub value: i64,
}

/// Result of the rolling smoother. Never holds an undefined value.
pub type SmoothedSeries = Vec<SmoothedPoint>;

/// An observation flagged by the outlier detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlier {
    pub date: NaiveDate,
    pub mood: i32,
}

/// Flagged observations, ordered by date.
pub type OutlierSet = Vec<Outlier>;
