pub mod analysis;
pub mod api;
pub mod chart;
pub mod checkin;
pub mod config;
pub mod core_state;
pub mod db;
pub mod journal;
pub mod models;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::core_state::CoreState;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Core(#[from] core_state::CoreError),
    #[error(transparent)]
    Server(#[from] api::server::ServerError),
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Open the database, serve the API and block until Ctrl-C.
pub async fn run(settings: Settings) -> Result<(), RunError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let core = Arc::new(CoreState::from_settings(&settings));

    // Migrate up front so a broken database fails at startup, not on the first request.
    core.open_db()?;
    tracing::info!(path = %core.db_path().display(), "Database ready");

    let server = api::start_api_server(core, settings.bind_addr).await?;
    tracing::info!(addr = %server.session.server_addr, "Listening");

    tokio::signal::ctrl_c().await.map_err(RunError::Signal)?;
    tracing::info!("Ctrl-C received, shutting down");

    server.stop().await;
    Ok(())
}
