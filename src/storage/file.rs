//! # Local Filesystem Backend

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use super::backend::{StorageBackend, StoreReceipt, STATUS_STORED};
use super::errors::{StorageError, StorageResult};
use super::identifier::Identifier;

/// Persists payloads as pretty-printed JSON files under a root directory.
#[derive(Debug)]
pub struct FileBackend {
    data_directory: PathBuf,
}

impl FileBackend {
    /// Create a new file backend, creating the root directory (including
    /// parents) if it does not exist yet.
    pub fn new(data_directory: impl Into<PathBuf>) -> StorageResult<Self> {
        let data_directory = data_directory.into();
        fs::create_dir_all(&data_directory).map_err(|e| StorageError::Io(e.to_string()))?;
        info!(directory = %data_directory.display(), "file backend initialized");
        Ok(Self { data_directory })
    }

    /// Root directory payload files are written under.
    pub fn data_directory(&self) -> &PathBuf {
        &self.data_directory
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn store(&self, payload: &Value) -> StorageResult<StoreReceipt> {
        let identifier = Identifier::generate();
        let file_name = format!("{}.json", identifier);
        let destination = self.data_directory.join(&file_name);

        let body = serde_json::to_vec_pretty(payload)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        debug!(file = %file_name, "storing payload to file");

        // Write to a temp name first and rename into place, so a crash
        // mid-write never leaves a partial document under the final name.
        let staging = self.data_directory.join(format!(".{}.tmp", file_name));
        tokio::fs::write(&staging, &body)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        tokio::fs::rename(&staging, &destination)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        info!(path = %destination.display(), "payload stored");

        Ok(StoreReceipt::File {
            status: STATUS_STORED.to_string(),
            path: destination.display().to_string(),
            filename: file_name,
            timestamp: identifier.timestamp,
        })
    }
}
