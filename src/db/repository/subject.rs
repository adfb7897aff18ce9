use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::Subject;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn insert_subject(conn: &Connection, display_name: &str) -> Result<i64, DatabaseError> {
    let name = display_name.trim();
    if name.is_empty() {
        return Err(DatabaseError::ConstraintViolation(
            "display name is required".into(),
        ));
    }
    conn.execute(
        "INSERT INTO subjects (display_name) VALUES (?1)",
        params![name],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_subject(conn: &Connection, id: i64) -> Result<Subject, DatabaseError> {
    conn.query_row(
        "SELECT id, display_name, created_at FROM subjects WHERE id = ?1",
        params![id],
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        },
    )
    .optional()?
    .ok_or_else(|| DatabaseError::NotFound {
        entity_type: "Subject".into(),
        id: id.to_string(),
    })
    .and_then(|(id, display_name, created_at)| subject_from_row(id, display_name, &created_at))
}

pub fn list_subjects(conn: &Connection) -> Result<Vec<Subject>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id, display_name, created_at FROM subjects ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut subjects = Vec::new();
    for row in rows {
        let (id, display_name, created_at) = row?;
        subjects.push(subject_from_row(id, display_name, &created_at)?);
    }
    Ok(subjects)
}

/// Fails with `NotFound` unless the subject exists.
pub fn ensure_subject_exists(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM subjects WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(DatabaseError::NotFound {
            entity_type: "Subject".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

fn subject_from_row(
    id: i64,
    display_name: String,
    created_at: &str,
) -> Result<Subject, DatabaseError> {
    let created_at = NaiveDateTime::parse_from_str(created_at, TIMESTAMP_FORMAT)
        .map_err(|e| DatabaseError::ConstraintViolation(format!("created_at: {e}")))?;
    Ok(Subject {
        id,
        display_name,
        created_at,
    })
}
