//! Subject endpoints.
//!
//! - `POST /api/subjects`: register a subject
//! - `GET /api/subjects/:id`: fetch one subject

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::Subject;

#[derive(Deserialize)]
pub struct CreateSubject {
    pub display_name: String,
}

/// `POST /api/subjects`: create a subject and return it.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(body): Json<CreateSubject>,
) -> Result<(StatusCode, Json<Subject>), ApiError> {
    let conn = ctx.core.open_db()?;
    let id = db::insert_subject(&conn, &body.display_name)?;
    let subject = db::get_subject(&conn, id)?;

    tracing::info!(subject_id = id, "Subject created");

    Ok((StatusCode::CREATED, Json(subject)))
}

/// `GET /api/subjects/:id`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Subject>, ApiError> {
    let conn = ctx.core.open_db()?;
    Ok(Json(db::get_subject(&conn, id)?))
}
