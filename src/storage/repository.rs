//! Typed repositories.
//!
//! A `Repository<R>` binds a record type to its fixed collection so callers
//! never pass collection names around. Creation stamps `created_at` and
//! `updated_at`; listing hands back stored documents untouched.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::storage::{DocumentStore, Filter, StoredDocument};
use crate::types::{DocumentId, StorageError};

/// A validated record type persisted in its own collection
pub trait Record: Serialize + Send + Sync + 'static {
    /// Collection the record type is stored in
    const COLLECTION: &'static str;
}

/// Create and list operations for one record type
pub struct Repository<R: Record> {
    store: Arc<dyn DocumentStore>,
    _record: PhantomData<fn() -> R>,
}

// Manual Clone: only the Arc is cloned, R need not be Clone
impl<R: Record> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self { store: self.store.clone(), _record: PhantomData }
    }
}

impl<R: Record> Repository<R> {
    /// Repository over `store`
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, _record: PhantomData }
    }

    /// Collection this repository reads and writes
    pub fn collection(&self) -> &'static str {
        R::COLLECTION
    }

    /// Persist `record` and return its store-assigned id
    pub fn create(&self, record: &R) -> Result<DocumentId, StorageError> {
        let Value::Object(mut fields) = serde_json::to_value(record)? else {
            return Err(StorageError::Rejected(format!(
                "{} records must serialize to a JSON object",
                R::COLLECTION
            )));
        };
        let now = Value::String(chrono::Utc::now().to_rfc3339());
        fields.insert("created_at".to_string(), now.clone());
        fields.insert("updated_at".to_string(), now);

        let id = self.store.insert_document(R::COLLECTION, fields)?;
        tracing::info!(collection = R::COLLECTION, %id, "record created");
        Ok(id)
    }

    /// Up to `limit` records matching `filter`; 0 means no cap
    pub fn list(&self, filter: &Filter, limit: usize) -> Result<Vec<StoredDocument>, StorageError> {
        let docs = self.store.find_documents(R::COLLECTION, filter, limit)?;
        tracing::debug!(collection = R::COLLECTION, count = docs.len(), "records listed");
        Ok(docs)
    }
}
