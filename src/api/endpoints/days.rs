//! Day log endpoints.
//!
//! - `POST /api/subjects/:id/days`: log (or re-log) a day
//! - `GET /api/subjects/:id/days`: logged days, optionally bounded by `from`/`to`
//! - `DELETE /api/subjects/:id/days/:date`: remove a logged day

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::journal::{self, DayEntry, DayRange, RecordResult};
use crate::models::DayLog;

/// `POST /api/subjects/:id/days`
pub async fn record(
    State(ctx): State<ApiContext>,
    Path(subject_id): Path<i64>,
    Json(entry): Json<DayEntry>,
) -> Result<(StatusCode, Json<RecordResult>), ApiError> {
    let conn = ctx.core.open_db()?;
    let result = journal::record_day(&conn, subject_id, &entry)?;
    Ok((StatusCode::CREATED, Json(result)))
}

#[derive(Serialize)]
pub struct DayHistoryResponse {
    pub subject_id: i64,
    pub days: Vec<DayLog>,
}

/// `GET /api/subjects/:id/days?from=YYYY-MM-DD&to=YYYY-MM-DD`
pub async fn history(
    State(ctx): State<ApiContext>,
    Path(subject_id): Path<i64>,
    Query(range): Query<DayRange>,
) -> Result<Json<DayHistoryResponse>, ApiError> {
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(ApiError::BadRequest("from must not be after to".into()));
        }
    }
    let conn = ctx.core.open_db()?;
    let days = journal::fetch_days(&conn, subject_id, &range)?;
    Ok(Json(DayHistoryResponse { subject_id, days }))
}

/// `DELETE /api/subjects/:id/days/:date`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path((subject_id, date)): Path<(i64, NaiveDate)>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.core.open_db()?;
    journal::remove_day(&conn, subject_id, date)?;
    Ok(StatusCode::NO_CONTENT)
}
