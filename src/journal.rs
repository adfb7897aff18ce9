//! Mood journal: recording, listing and removing logged days.
//!
//! Input types for the day log plus the validation that sits in front of
//! the `days` repository functions.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::{self, DatabaseError, NewDay};
use crate::models::{DayLog, MOOD_MAX, MOOD_MIN};

// ═══════════════════════════════════════════
// View types
// ═══════════════════════════════════════════

/// Input for logging a day. Leave `overall_mood` empty to create a
/// placeholder day that will be rated later.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub overall_mood: Option<i32>,
    #[serde(default)]
    pub max_mood: Option<i32>,
    #[serde(default)]
    pub min_mood: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Result of logging a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResult {
    pub day_id: i64,
    pub date: NaiveDate,
    pub placeholder: bool,
}

/// Inclusive date bounds for a history query. Open on either side when unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

// ═══════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════

fn check_range(field: &str, value: Option<i32>) -> Result<(), DatabaseError> {
    match value {
        Some(v) if !(MOOD_MIN..=MOOD_MAX).contains(&v) => {
            Err(DatabaseError::ConstraintViolation(format!(
                "{field} must be between {MOOD_MIN} and {MOOD_MAX}, got {v}"
            )))
        }
        _ => Ok(()),
    }
}

/// Checks mood bounds and that `min_mood <= overall_mood <= max_mood`.
pub fn validate_entry(entry: &DayEntry) -> Result<(), DatabaseError> {
    check_range("overall_mood", entry.overall_mood)?;
    check_range("max_mood", entry.max_mood)?;
    check_range("min_mood", entry.min_mood)?;

    if let (Some(min), Some(max)) = (entry.min_mood, entry.max_mood) {
        if min > max {
            return Err(DatabaseError::ConstraintViolation(format!(
                "min_mood {min} is above max_mood {max}"
            )));
        }
    }
    if let Some(overall) = entry.overall_mood {
        if entry.min_mood.is_some_and(|min| overall < min)
            || entry.max_mood.is_some_and(|max| overall > max)
        {
            return Err(DatabaseError::ConstraintViolation(
                "overall_mood must lie between min_mood and max_mood".into(),
            ));
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════
// Repository functions
// ═══════════════════════════════════════════

/// Logs a day for a subject. A second entry for the same date replaces the first.
pub fn record_day(
    conn: &Connection,
    subject_id: i64,
    entry: &DayEntry,
) -> Result<RecordResult, DatabaseError> {
    validate_entry(entry)?;
    db::ensure_subject_exists(conn, subject_id)?;

    let notes = entry
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let day_id = db::upsert_day(
        conn,
        &NewDay {
            subject_id,
            date: entry.date,
            overall_mood: entry.overall_mood,
            max_mood: entry.max_mood,
            min_mood: entry.min_mood,
            notes,
        },
    )?;

    tracing::info!(subject_id, day_id, date = %entry.date, "Day recorded");

    Ok(RecordResult {
        day_id,
        date: entry.date,
        placeholder: entry.overall_mood.is_none(),
    })
}

/// Logged days for a subject, oldest first.
pub fn fetch_days(
    conn: &Connection,
    subject_id: i64,
    range: &DayRange,
) -> Result<Vec<DayLog>, DatabaseError> {
    db::ensure_subject_exists(conn, subject_id)?;
    db::get_days_for_subject(conn, subject_id, range.from, range.to)
}

/// Removes the day logged on `date`.
pub fn remove_day(
    conn: &Connection,
    subject_id: i64,
    date: NaiveDate,
) -> Result<(), DatabaseError> {
    db::delete_day(conn, subject_id, date)?;
    tracing::info!(subject_id, %date, "Day removed");
    Ok(())
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
