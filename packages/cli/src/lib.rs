//! Flashdeck command line client
//!
//! Configuration, terminal sinks and form helpers shared by the `flashdeck`
//! binary.

pub mod config;
pub mod console;
pub mod forms;


use flashdeck_client::{ApiClient, ClientResult};
use flashdeck_storage::AppState;
use std::sync::Arc;
use tracing::debug;

use config::Config;
use console::{ConsoleNavigator, ConsoleNotifier};

/// Open the persisted state under the configured data directory
pub fn open_state(config: &Config) -> Arc<AppState> {
    debug!("Using data directory {}", config.data_dir.display());
    Arc::new(AppState::open(&config.data_dir))
}

/// API client printing toasts to the terminal
pub fn build_client(config: &Config) -> ClientResult<ApiClient> {
    ApiClient::new(
        config.api_url.clone(),
        open_state(config),
        Arc::new(ConsoleNotifier),
        Arc::new(ConsoleNavigator),
    )
}
