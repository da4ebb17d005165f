//! Simple in-memory storage implementation using DashMap
//!
//! Collections are created on first insert. Each collection keeps its
//! documents in insertion order behind its own lock, so writers to different
//! collections never contend.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::storage::{DocumentStore, Filter, StoredDocument};
use crate::types::{DocumentId, StorageError};

type Collection = Arc<RwLock<Vec<StoredDocument>>>;

/// Simple storage implementation using DashMap and JSON
#[derive(Default)]
pub struct MemoryStore {
    /// Map of collection name to its documents
    collections: DashMap<String, Collection>,
}

impl MemoryStore {
    /// Create a new empty MemoryStore
    pub fn new() -> Self {
        Self { collections: DashMap::new() }
    }

    fn collection(&self, name: &str) -> Collection {
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(Vec::new())))
            .clone()
    }

    /// Append an already-identified document. Used when replaying persisted
    /// collections and by stores layered on top of this one.
    pub(crate) fn append(&self, collection: &str, document: StoredDocument) {
        self.collection(collection).write().push(document);
    }

    /// Total number of documents across all collections
    pub fn document_count(&self) -> usize {
        self.collections.iter().map(|c| c.value().read().len()).sum()
    }
}

pub(crate) fn check_insert(collection: &str, fields: &Map<String, Value>) -> Result<(), StorageError> {
    if collection.is_empty() {
        return Err(StorageError::Rejected("collection name must not be empty".to_string()));
    }
    if fields.contains_key("_id") {
        return Err(StorageError::Rejected("documents must not carry an _id field".to_string()));
    }
    Ok(())
}

impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn insert_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<DocumentId, StorageError> {
        check_insert(collection, &fields)?;
        let id = DocumentId::generate();
        self.append(collection, StoredDocument { id, fields });
        tracing::debug!(collection, %id, "document inserted");
        Ok(id)
    }

    fn find_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        let Some(docs) = self.collections.get(collection).map(|c| c.value().clone()) else {
            return Ok(Vec::new());
        };
        let cap = if limit == 0 { usize::MAX } else { limit };
        let docs = docs.read();
        Ok(docs
            .iter()
            .filter(|doc| filter.matches(&doc.fields))
            .take(cap)
            .cloned()
            .collect())
    }

    fn list_collection_names(&self) -> Result<Vec<String>, StorageError> {
        let mut names: Vec<String> = self
            .collections
            .iter()
            .filter(|c| !c.value().read().is_empty())
            .map(|c| c.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
