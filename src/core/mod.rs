//! Core application wiring: configuration, logging and shared state

/// Application configuration
pub mod config;

/// Application state management
pub mod app_state;

/// Factory pattern for app creation
pub mod factory;

/// Tracing subscriber setup
pub mod logging;

// Re-export commonly used items
pub use config::Config;
pub use app_state::{AppState, Database, StoreStatus};
pub use factory::create_app_state;
pub use logging::init_logging;
