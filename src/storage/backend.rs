//! # Storage Backend Trait

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::errors::StorageResult;

/// Status value reported for every successfully persisted payload.
pub const STATUS_STORED: &str = "stored";

/// Backend trait for payload persistence.
///
/// Implementations are constructed once at startup, hold no per-call state,
/// and are safe for concurrent use without coordination between calls.
#[async_trait]
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Persist a sanitized payload under a fresh identifier.
    async fn store(&self, payload: &Value) -> StorageResult<StoreReceipt>;
}

/// Metadata describing where a payload was persisted.
///
/// Immutable once produced. Serializes to the backend-specific shape the
/// caller sees: files report a path and filename, object stores report
/// bucket, key, and URL.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StoreReceipt {
    File {
        status: String,
        path: String,
        filename: String,
        timestamp: i64,
    },
    Object {
        status: String,
        bucket: String,
        key: String,
        url: String,
        timestamp: i64,
        storage_type: String,
    },
}

impl StoreReceipt {
    /// Storage status, `"stored"` on success.
    pub fn status(&self) -> &str {
        match self {
            StoreReceipt::File { status, .. } | StoreReceipt::Object { status, .. } => status,
        }
    }

    /// The unique name the payload was persisted under.
    pub fn identifier(&self) -> &str {
        match self {
            StoreReceipt::File { filename, .. } => filename,
            StoreReceipt::Object { key, .. } => key,
        }
    }

    /// Full destination: an absolute path or an object store URL.
    pub fn location(&self) -> &str {
        match self {
            StoreReceipt::File { path, .. } => path,
            StoreReceipt::Object { url, .. } => url,
        }
    }

    /// Seconds since the Unix epoch at store time.
    pub fn timestamp(&self) -> i64 {
        match self {
            StoreReceipt::File { timestamp, .. } | StoreReceipt::Object { timestamp, .. } => {
                *timestamp
            }
        }
    }

    /// Which backend kind produced this receipt.
    pub fn backend_type(&self) -> &str {
        match self {
            StoreReceipt::File { .. } => "file",
            StoreReceipt::Object { storage_type, .. } => storage_type,
        }
    }
}
