//! JSON-lines file store.
//!
//! Each collection lives in `<root>/<collection>.jsonl`, one document per
//! line with the id under `_id`. The whole database is replayed into a
//! `MemoryStore` on open; inserts append to the file before becoming visible
//! in memory, so a document is never listed unless it was persisted.
//!
//! An unterminated, unparseable last line is a torn append: it is cut off on
//! open. A bad line anywhere else is corruption and fails the open.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::storage::memory::check_insert;
use crate::storage::{DocumentStore, Filter, MemoryStore, StoredDocument};
use crate::types::{DocumentId, StorageError};

const EXTENSION: &str = "jsonl";

/// File-backed document store
pub struct FileStore {
    root: PathBuf,
    index: MemoryStore,
    // Serializes appends so file order matches in-memory order
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (creating if needed) the database directory at `root`
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;

        let index = MemoryStore::new();
        let mut loaded = 0usize;
        for entry in fs::read_dir(&root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(collection) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            for document in read_collection(&path)? {
                index.append(collection, document);
                loaded += 1;
            }
        }

        tracing::info!(root = %root.display(), documents = loaded, "file store opened");
        Ok(Self { root, index, write_lock: Mutex::new(()) })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{}.{}", collection, EXTENSION))
    }
}

fn encode_line(document: &StoredDocument) -> Result<String, StorageError> {
    let mut object = Map::with_capacity(document.fields.len() + 1);
    object.insert("_id".to_string(), Value::String(document.id.to_hex()));
    object.extend(document.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(serde_json::to_string(&Value::Object(object))?)
}

fn decode_line(line: &str) -> Result<StoredDocument, String> {
    let value: Value = serde_json::from_str(line).map_err(|e| e.to_string())?;
    let Value::Object(mut fields) = value else {
        return Err("line is not a JSON object".to_string());
    };
    let raw_id = fields.remove("_id").ok_or_else(|| "missing _id".to_string())?;
    let id = DocumentId::deserialize(raw_id).map_err(|e| format!("invalid _id: {}", e))?;
    Ok(StoredDocument { id, fields })
}

fn decode_chunk(chunk: &[u8]) -> Result<Option<StoredDocument>, String> {
    let line = std::str::from_utf8(chunk).map_err(|e| e.to_string())?.trim();
    if line.is_empty() {
        return Ok(None);
    }
    decode_line(line).map(Some)
}

fn read_collection(path: &Path) -> Result<Vec<StoredDocument>, StorageError> {
    let bytes = fs::read(path)?;
    let mut documents = Vec::new();
    let mut offset = 0u64;

    for (index, chunk) in bytes.split_inclusive(|b| *b == b'\n').enumerate() {
        // Only the final chunk can lack a newline
        let terminated = chunk.ends_with(b"\n");
        match decode_chunk(chunk) {
            Ok(Some(document)) => {
                documents.push(document);
                if !terminated {
                    OpenOptions::new().append(true).open(path)?.write_all(b"\n")?;
                }
            }
            Ok(None) => {}
            Err(e) if !terminated => {
                tracing::warn!(
                    path = %path.display(),
                    line = index + 1,
                    error = %e,
                    "discarding torn write at end of collection file"
                );
                OpenOptions::new().write(true).open(path)?.set_len(offset)?;
            }
            Err(e) => {
                return Err(StorageError::Corrupted(format!(
                    "{}:{}: {}",
                    path.display(),
                    index + 1,
                    e
                )));
            }
        }
        offset += chunk.len() as u64;
    }
    Ok(documents)
}

impl DocumentStore for FileStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    fn ping(&self) -> Result<(), StorageError> {
        let meta = fs::metadata(&self.root)?;
        if meta.is_dir() {
            Ok(())
        } else {
            Err(StorageError::Unavailable(format!("{} is not a directory", self.root.display())))
        }
    }

    fn insert_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<DocumentId, StorageError> {
        check_insert(collection, &fields)?;
        if collection.contains(['/', '\\', '.']) {
            return Err(StorageError::Rejected(format!("invalid collection name: {}", collection)));
        }

        let document = StoredDocument { id: DocumentId::generate(), fields };
        let mut line = encode_line(&document)?;
        line.push('\n');

        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.collection_path(collection))?;
        let before = file.metadata()?.len();
        if let Err(e) = file.write_all(line.as_bytes()).and_then(|()| file.flush()) {
            if let Err(rollback) = file.set_len(before) {
                tracing::error!(collection, error = %rollback, "failed to roll back partial append");
            }
            return Err(e.into());
        }

        let id = document.id;
        self.index.append(collection, document);
        tracing::debug!(collection, %id, "document persisted");
        Ok(id)
    }

    fn find_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        self.index.find_documents(collection, filter, limit)
    }

    fn list_collection_names(&self) -> Result<Vec<String>, StorageError> {
        self.index.list_collection_names()
    }
}
