//! Application Factory
//!
//! Builds the `AppState` from configuration. Opening the store never fails
//! the factory: problems are logged and recorded in `StoreStatus` so the
//! diagnostic endpoint can report them.

use std::sync::Arc;

use crate::core::app_state::{AppState, Database, StoreStatus};
use crate::core::config::Config;
use crate::storage::open_store;

/// Create AppState based on configuration
pub fn create_app_state(config: Config) -> Arc<AppState> {
    let store = match config.database.connection() {
        None => {
            tracing::warn!("DATABASE_URL or DATABASE_NAME not set; starting without a document store");
            StoreStatus::NotConfigured
        }
        Some((url, name)) => match open_store(url, name) {
            Ok(store) => StoreStatus::Ready(Database { name: name.to_string(), store }),
            Err(e) => {
                tracing::error!(error = %e, "failed to open document store; starting without it");
                StoreStatus::Failed(e.to_string())
            }
        },
    };

    Arc::new(AppState::new(config, store))
}
