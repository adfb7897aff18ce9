use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::analysis::{MoodSeries, Observation, ObservationSource};
use crate::db::DatabaseError;
use crate::models::DayLog;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields written for a day. Validation happens in the journal layer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDay<'a> {
    pub subject_id: i64,
    pub date: NaiveDate,
    pub overall_mood: Option<i32>,
    pub max_mood: Option<i32>,
    pub min_mood: Option<i32>,
    pub notes: Option<&'a str>,
}

/// Inserts a day, replacing any existing row for the same subject and date.
/// Returns the row id.
pub fn upsert_day(conn: &Connection, day: &NewDay<'_>) -> Result<i64, DatabaseError> {
    let id = conn.query_row(
        "INSERT INTO days (subject_id, date, overall_mood, max_mood, min_mood, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT (subject_id, date) DO UPDATE SET
             overall_mood = excluded.overall_mood,
             max_mood = excluded.max_mood,
             min_mood = excluded.min_mood,
             notes = excluded.notes
         RETURNING id",
        params![
            day.subject_id,
            day.date.format(DATE_FORMAT).to_string(),
            day.overall_mood,
            day.max_mood,
            day.min_mood,
            day.notes,
        ],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(id)
}

/// Days for a subject, ascending by date, limited to the inclusive bounds given.
pub fn get_days_for_subject(
    conn: &Connection,
    subject_id: i64,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<DayLog>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, subject_id, date, overall_mood, max_mood, min_mood, notes
         FROM days
         WHERE subject_id = ?1
           AND (?2 IS NULL OR date >= ?2)
           AND (?3 IS NULL OR date <= ?3)
         ORDER BY date ASC",
    )?;

    let rows = stmt.query_map(
        params![
            subject_id,
            from.map(|d| d.format(DATE_FORMAT).to_string()),
            to.map(|d| d.format(DATE_FORMAT).to_string()),
        ],
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<i32>>(3)?,
                row.get::<_, Option<i32>>(4)?,
                row.get::<_, Option<i32>>(5)?,
                row.get::<_, Option<String>>(6)?,
            ))
        },
    )?;

    let mut days = Vec::new();
    for row in rows {
        let (id, subject_id, date, overall_mood, max_mood, min_mood, notes) = row?;
        days.push(DayLog {
            id,
            subject_id,
            date: parse_date(&date)?,
            overall_mood,
            max_mood,
            min_mood,
            notes,
        });
    }
    Ok(days)
}

pub fn delete_day(
    conn: &Connection,
    subject_id: i64,
    date: NaiveDate,
) -> Result<(), DatabaseError> {
    let date = date.format(DATE_FORMAT).to_string();
    let deleted = conn.execute(
        "DELETE FROM days WHERE subject_id = ?1 AND date = ?2",
        params![subject_id, date],
    )?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Day".into(),
            id: format!("{subject_id}/{date}"),
        });
    }
    Ok(())
}

/// Most recent date on which the subject gave an actual rating.
pub fn last_rated_date(
    conn: &Connection,
    subject_id: i64,
) -> Result<Option<NaiveDate>, DatabaseError> {
    let last: Option<String> = conn
        .query_row(
            "SELECT MAX(date) FROM days WHERE subject_id = ?1 AND overall_mood IS NOT NULL",
            params![subject_id],
            |row| row.get(0),
        )
        .optional()?
        .flatten();
    last.as_deref().map(parse_date).transpose()
}

fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| DatabaseError::ConstraintViolation(format!("invalid stored date {s}: {e}")))
}

/// `ObservationSource` over the `days` table.
///
/// Unknown subjects read as an empty series; callers that need a 404
/// check existence first.
pub struct SqliteObservations<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteObservations<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl ObservationSource for SqliteObservations<'_> {
    type Error = DatabaseError;

    fn observations_for(&self, subject_id: i64) -> Result<MoodSeries, DatabaseError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT date, overall_mood FROM days WHERE subject_id = ?1 ORDER BY date ASC",
        )?;
        let rows = stmt.query_map(params![subject_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<i32>>(1)?))
        })?;

        let mut observations = Vec::new();
        for row in rows {
            let (date, mood) = row?;
            observations.push(Observation::new(parse_date(&date)?, mood));
        }

        tracing::debug!(subject_id, count = observations.len(), "Observations loaded");
        Ok(MoodSeries::new(observations)?)
    }
}
