//! Application State Management
//!
//! `AppState` holds the configuration and the shared document store handle.
//! The store is opened once at startup and reused by every request; when it
//! is missing, store-backed operations fail with `StorageError::Unavailable`
//! while the rest of the server keeps working.

use std::sync::Arc;

use crate::constants::DATABASE_NOT_AVAILABLE;
use crate::core::config::Config;
use crate::schemas::{Appointment, Consultation};
use crate::storage::{DocumentStore, Repository};
use crate::types::StorageError;

/// An opened document store and the database it serves
#[derive(Clone)]
pub struct Database {
    /// Database name within the store
    pub name: String,
    /// Shared store handle
    pub store: Arc<dyn DocumentStore>,
}

/// Outcome of opening the store at startup
#[derive(Clone)]
pub enum StoreStatus {
    /// Store opened and ready
    Ready(Database),
    /// `DATABASE_URL` or `DATABASE_NAME` not set
    NotConfigured,
    /// Store was configured but could not be opened
    Failed(String),
}

/// Central application state shared by all handlers
pub struct AppState {
    /// Application configuration
    pub config: Config,

    /// Document store, if one could be opened
    pub store: StoreStatus,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, store: StoreStatus) -> Self {
        Self { config, store }
    }

    /// Opened database, or the error handlers surface when there is none
    pub fn database(&self) -> Result<&Database, StorageError> {
        match &self.store {
            StoreStatus::Ready(db) => Ok(db),
            StoreStatus::NotConfigured | StoreStatus::Failed(_) => {
                Err(StorageError::Unavailable(DATABASE_NOT_AVAILABLE.to_string()))
            }
        }
    }

    /// Appointment repository over the shared store
    pub fn appointments(&self) -> Result<Repository<Appointment>, StorageError> {
        Ok(Repository::new(self.database()?.store.clone()))
    }

    /// Consultation repository over the shared store
    pub fn consultations(&self) -> Result<Repository<Consultation>, StorageError> {
        Ok(Repository::new(self.database()?.store.clone()))
    }
}
