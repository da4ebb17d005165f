//! Storage factory for opening a document store from a database URL

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::storage::{DocumentStore, FileStore, MemoryStore};
use crate::types::{Error, Result};

/// Supported database URL schemes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `memory://...` - process-local store, lost on exit
    Memory,
    /// `file://<dir>` - JSON-lines files under `<dir>/<database name>`
    File(PathBuf),
}

impl FromStr for DatabaseUrl {
    type Err = Error;

    fn from_str(url: &str) -> Result<Self> {
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| Error::config(format!("Invalid database URL (missing scheme): {}", url)))?;

        match scheme.to_ascii_lowercase().as_str() {
            "memory" => Ok(DatabaseUrl::Memory),
            "file" if rest.is_empty() => {
                Err(Error::config("file:// database URL needs a directory path"))
            }
            "file" => Ok(DatabaseUrl::File(PathBuf::from(rest))),
            other => Err(Error::config(format!(
                "Unsupported database URL scheme '{}'. Valid options: memory://, file://",
                other
            ))),
        }
    }
}

/// Open the store described by `url` for database `name`
pub fn open_store(url: &str, name: &str) -> Result<Arc<dyn DocumentStore>> {
    if name.trim().is_empty() {
        return Err(Error::config("Database name must not be empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::config(format!("Invalid database name: {}", name)));
    }

    let store: Arc<dyn DocumentStore> = match url.parse::<DatabaseUrl>()? {
        DatabaseUrl::Memory => Arc::new(MemoryStore::new()),
        DatabaseUrl::File(dir) => Arc::new(FileStore::open(dir.join(name))?),
    };
    tracing::info!(backend = store.backend(), database = name, "document store opened");
    Ok(store)
}
