//! Check-in reminder: decides whether a subject should be nudged to log
//! today's mood.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::db::{self, DatabaseError};
use crate::models::CheckInKind;

/// Days without a rating before a daily check-in nudge is shown.
pub const CHECK_IN_AFTER_DAYS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckInDecision {
    pub should_nudge: bool,
    pub kind: Option<CheckInKind>,
    pub message: Option<String>,
    pub days_since_last_rating: Option<i64>,
}

impl CheckInDecision {
    fn none(days_since: i64) -> Self {
        Self {
            should_nudge: false,
            kind: None,
            message: None,
            days_since_last_rating: Some(days_since),
        }
    }
}

/// Determines whether to show a check-in nudge as of `today`.
pub fn check_in(
    conn: &Connection,
    subject_id: i64,
    today: NaiveDate,
) -> Result<CheckInDecision, DatabaseError> {
    db::ensure_subject_exists(conn, subject_id)?;

    let Some(last) = db::last_rated_date(conn, subject_id)? else {
        return Ok(CheckInDecision {
            should_nudge: true,
            kind: Some(CheckInKind::FirstEntry),
            message: Some("Log your first mood to start your chart.".into()),
            days_since_last_rating: None,
        });
    };

    let days_since = (today - last).num_days();
    if days_since >= CHECK_IN_AFTER_DAYS {
        tracing::debug!(subject_id, days_since, "Check-in nudge due");
        return Ok(CheckInDecision {
            should_nudge: true,
            kind: Some(CheckInKind::DailyCheckIn),
            message: Some(format!(
                "Your last mood was logged on {}. How are you feeling today?",
                last.format("%B %d")
            )),
            days_since_last_rating: Some(days_since),
        });
    }

    Ok(CheckInDecision::none(days_since))
}
