//! # Storage Factory
//!
//! Resolves the configuration record to the single process-wide backend
//! instance. Runs once at startup, before any request is served; an
//! unsupported backend kind is a fatal configuration error.

use std::sync::Arc;

use tracing::info;

use crate::config::{ConfigError, StorageConfig, BACKEND_FILE, BACKEND_OBJECT_STORE, BACKEND_S3};

use super::backend::StorageBackend;
use super::file::FileBackend;
use super::s3::S3Backend;

/// Build the storage backend selected by `config`.
pub async fn backend_from_config(
    config: &StorageConfig,
) -> Result<Arc<dyn StorageBackend>, ConfigError> {
    match config.backend_kind.as_str() {
        BACKEND_FILE => {
            let backend = FileBackend::new(&config.file.data_directory)
                .map_err(|e| ConfigError::Initialization(e.to_string()))?;
            info!(kind = BACKEND_FILE, "storage backend selected");
            Ok(Arc::new(backend))
        }
        BACKEND_S3 | BACKEND_OBJECT_STORE => {
            let backend = S3Backend::connect(&config.object_store).await?;
            info!(kind = BACKEND_S3, "storage backend selected");
            Ok(Arc::new(backend))
        }
        other => Err(ConfigError::UnsupportedBackend(other.to_string())),
    }
}
