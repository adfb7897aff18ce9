//! Application state shared by the HTTP handlers.
//!
//! Holds where the database lives and the analysis defaults. Each request
//! opens its own SQLite connection, so handlers never share one.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::db;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),
}

pub struct CoreState {
    db_path: PathBuf,
    /// Window used when a report request does not pick one.
    pub analysis_window: usize,
}

impl CoreState {
    pub fn new(db_path: impl Into<PathBuf>, analysis_window: usize) -> Self {
        Self {
            db_path: db_path.into(),
            analysis_window,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.db_path.clone(), settings.analysis_window)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a database connection, running pending migrations.
    pub fn open_db(&self) -> Result<rusqlite::Connection, CoreError> {
        db::open_database(&self.db_path).map_err(CoreError::Database)
    }
}
