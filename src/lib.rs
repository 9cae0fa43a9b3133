pub mod commands;
pub mod config;
pub mod content;
pub mod editor;
pub mod error;
pub mod notify;
pub mod projects;
pub mod session;
pub mod store;
pub mod views;

#[cfg(test)]
mod testing;

pub use commands::AppState;
pub use config::AppConfig;
pub use error::{AuthError, CommandError, EditorError, StoreError, ValidationError};

use tracing_subscriber::EnvFilter;

/// Installs the global log subscriber. Later calls are ignored.
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Loads config from the environment, starts logging and connects the
/// configured backend.
pub fn bootstrap() -> Result<AppState, StoreError> {
    let config = AppConfig::from_env();
    init_logging(&config.log_filter);
    AppState::from_config(config)
}
