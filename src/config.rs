use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Moodline";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Address the HTTP server binds to unless `MOODLINE_BIND` says otherwise.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Rolling window (days) used for the mood report.
pub const DEFAULT_ANALYSIS_WINDOW: usize = crate::analysis::analyzer::REPORT_WINDOW;

pub const ENV_BIND: &str = "MOODLINE_BIND";
pub const ENV_DB: &str = "MOODLINE_DB";
pub const ENV_WINDOW: &str = "MOODLINE_WINDOW";

/// Get the application data directory
/// ~/Moodline/ on all platforms; the working directory when no home is known.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the default database file
pub fn default_db_path() -> PathBuf {
    app_data_dir().join("moodline.db")
}

/// Log filter used when `RUST_LOG` is unset
pub fn default_log_filter() -> &'static str {
    "moodline=info,moodline_lib=info,tower_http=info"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings for the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub analysis_window: usize,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse::<SocketAddr>().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidValue {
                key: ENV_BIND,
                value: bind.clone(),
                reason: e.to_string(),
            }
        })?;

        let db_path = lookup(ENV_DB)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let analysis_window = match lookup(ENV_WINDOW) {
            None => DEFAULT_ANALYSIS_WINDOW,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(w) if w > 0 => w,
                Ok(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_WINDOW,
                        value: raw,
                        reason: "window must be at least 1".into(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_WINDOW,
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            bind_addr,
            db_path,
            analysis_window,
        })
    }
}
