//! Mood chart and analysis endpoints.
//!
//! - `GET /api/subjects/:id/moods`: raw moods for a calendar span
//! - `GET /api/subjects/:id/smoothed`: rolling mean or deviation
//! - `GET /api/subjects/:id/outliers`: flagged days
//! - `GET /api/subjects/:id/report`: rolling mean and deviation together
//! - `GET /api/subjects/:id/checkin`: whether to nudge for a rating

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analysis::{
    self, window_from_i64, MoodAnalysis, ObservationSource, OutlierMode, Statistic,
    DEFAULT_OUTLIER_WINDOW,
};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::chart::{self, ChartPoint, MoodChart};
use crate::checkin::{self, CheckInDecision};
use crate::db::{self, SqliteObservations};
use crate::models::ChartWindow;

fn parse_window(raw: Option<i64>, default: usize) -> Result<usize, ApiError> {
    match raw {
        Some(w) => Ok(window_from_i64(w)?),
        None => Ok(default),
    }
}

// ── Raw chart ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct MoodsQuery {
    pub window: Option<String>,
    /// Spans to step back from the current one (0 or negative).
    pub offset: Option<i32>,
}

/// `GET /api/subjects/:id/moods?window=month&offset=-1`
pub async fn moods(
    State(ctx): State<ApiContext>,
    Path(subject_id): Path<i64>,
    Query(query): Query<MoodsQuery>,
) -> Result<Json<MoodChart>, ApiError> {
    let window = match query.window.as_deref() {
        Some(raw) => raw.parse::<ChartWindow>()?,
        None => ChartWindow::Month,
    };

    let conn = ctx.core.open_db()?;
    db::ensure_subject_exists(&conn, subject_id)?;
    let series = SqliteObservations::new(&conn).observations_for(subject_id)?;

    let offset = query.offset.unwrap_or(0);
    let bounds = window
        .bounds(ctx.today(), offset, series.first_date())
        .ok_or_else(|| {
            ApiError::BadRequest(format!("no {window} span at offset {offset}"))
        })?;

    Ok(Json(chart::mood_chart(&series, window, bounds)))
}

// ── Smoothed series ───────────────────────────────────────

#[derive(Deserialize)]
pub struct SmoothedQuery {
    pub window: Option<i64>,
    pub statistic: Option<String>,
}

#[derive(Serialize)]
pub struct SmoothedResponse {
    pub subject_id: i64,
    pub window: usize,
    pub statistic: Statistic,
    pub points: Vec<ChartPoint>,
}

/// `GET /api/subjects/:id/smoothed?window=14&statistic=mean`
pub async fn smoothed(
    State(ctx): State<ApiContext>,
    Path(subject_id): Path<i64>,
    Query(query): Query<SmoothedQuery>,
) -> Result<Json<SmoothedResponse>, ApiError> {
    let window = parse_window(query.window, ctx.core.analysis_window)?;
    let statistic = match query.statistic.as_deref() {
        Some(raw) => raw.parse::<Statistic>()?,
        None => Statistic::Mean,
    };

    let conn = ctx.core.open_db()?;
    db::ensure_subject_exists(&conn, subject_id)?;
    let source = SqliteObservations::new(&conn);
    let series = analysis::smoothed_for(&source, subject_id, window, statistic)?;

    Ok(Json(SmoothedResponse {
        subject_id,
        window,
        statistic,
        points: chart::smoothed_points(&series),
    }))
}

// ── Outliers ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct OutliersQuery {
    pub mode: Option<String>,
    pub window: Option<i64>,
}

#[derive(Serialize)]
pub struct OutliersResponse {
    pub subject_id: i64,
    pub mode: OutlierMode,
    pub window: usize,
    pub points: Vec<ChartPoint>,
}

/// `GET /api/subjects/:id/outliers?mode=local&window=5`
pub async fn outliers(
    State(ctx): State<ApiContext>,
    Path(subject_id): Path<i64>,
    Query(query): Query<OutliersQuery>,
) -> Result<Json<OutliersResponse>, ApiError> {
    let mode = match query.mode.as_deref() {
        Some(raw) => raw.parse::<OutlierMode>()?,
        None => OutlierMode::Global,
    };
    let window = parse_window(query.window, DEFAULT_OUTLIER_WINDOW)?;

    let conn = ctx.core.open_db()?;
    db::ensure_subject_exists(&conn, subject_id)?;
    let source = SqliteObservations::new(&conn);
    let flagged = analysis::outliers_for(&source, subject_id, mode, window)?;

    Ok(Json(OutliersResponse {
        subject_id,
        mode,
        window,
        points: chart::outlier_points(&flagged),
    }))
}

// ── Report / check-in ─────────────────────────────────────

/// `GET /api/subjects/:id/report`
pub async fn report(
    State(ctx): State<ApiContext>,
    Path(subject_id): Path<i64>,
) -> Result<Json<MoodAnalysis>, ApiError> {
    let conn = ctx.core.open_db()?;
    db::ensure_subject_exists(&conn, subject_id)?;
    let source = SqliteObservations::new(&conn);
    Ok(Json(analysis::analyze_moods(
        &source,
        subject_id,
        ctx.core.analysis_window,
    )?))
}

/// `GET /api/subjects/:id/checkin`
pub async fn check_in(
    State(ctx): State<ApiContext>,
    Path(subject_id): Path<i64>,
) -> Result<Json<CheckInDecision>, ApiError> {
    let conn = ctx.core.open_db()?;
    Ok(Json(checkin::check_in(&conn, subject_id, ctx.today())?))
}
