//! Storage layer for the Dentistry API
//!
//! This module provides the document store abstraction. Documents are
//! schema-flexible JSON objects grouped into named collections; the store
//! assigns each one a `DocumentId` on insert and never validates content.
//! Records are written once and never updated or deleted.

use serde_json::{Map, Value};

use crate::types::{DocumentId, StorageError};

/// Trait for document store implementations
pub trait DocumentStore: Send + Sync {
    /// Short backend name, for logs and diagnostics
    fn backend(&self) -> &'static str;

    /// Check that the store is reachable
    fn ping(&self) -> Result<(), StorageError>;

    /// Insert a document into `collection` and return its assigned id
    fn insert_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<DocumentId, StorageError>;

    /// Return up to `limit` documents of `collection` matching `filter`, in
    /// insertion order. A `limit` of 0 means no cap.
    fn find_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StorageError>;

    /// Names of every collection holding at least one document, sorted
    fn list_collection_names(&self) -> Result<Vec<String>, StorageError>;
}

/// A document as held by the store: its id plus the client fields
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Store-assigned id
    pub id: DocumentId,
    /// Document body, without the id
    pub fields: Map<String, Value>,
}

impl StoredDocument {
    /// Body with the store id exposed as a plain string `id` field
    pub fn into_json_with_id(self) -> Value {
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(self.id.to_hex()));
        Value::Object(fields)
    }
}

/// Equality filters
pub mod filter;

/// In-memory store
pub mod memory;

/// JSON-lines file store
pub mod file;

/// Typed repositories over a fixed collection
pub mod repository;

/// Store selection from a database URL
pub mod factory;

/// Re-export main storage types
pub use filter::Filter;
pub use memory::MemoryStore;
pub use file::FileStore;
pub use repository::{Record, Repository};
pub use factory::{open_store, DatabaseUrl};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn store_id_replaces_native_identifier() {
        let id = DocumentId::from_bytes([1; 12]);
        let doc = StoredDocument {
            id,
            fields: json!({"service": "Cleaning"}).as_object().cloned().unwrap(),
        };
        let value = doc.into_json_with_id();
        assert_eq!(value["id"], "010101010101010101010101");
        assert_eq!(value["service"], "Cleaning");
        assert!(value.get("_id").is_none());
    }
}
