//! # Store Pipeline
//!
//! Orchestrates the transformation-and-persistence flow for one payload:
//! top-level shape check, key normalization, content sanitization, then the
//! configured backend's `store`. Holds no per-call state; the backend
//! instance is shared and read-only, so concurrent calls need no
//! coordination.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::sanitize::errors::json_type_name;
use crate::sanitize::{sanitize_value, strip_reserved_keys, SanitizeError, SanitizePolicy};
use crate::storage::{StorageBackend, StorageError, StoreReceipt};

/// Errors surfaced by [`StorePipeline::store`].
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Sanitize(#[from] SanitizeError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The transformation-and-persistence pipeline.
#[derive(Debug)]
pub struct StorePipeline {
    policy: SanitizePolicy,
    backend: Arc<dyn StorageBackend>,
}

impl StorePipeline {
    /// Build a pipeline around `backend` with the default sanitization
    /// policy.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_policy(SanitizePolicy::strict(), backend)
    }

    /// Build a pipeline with a custom sanitization policy.
    pub fn with_policy(policy: SanitizePolicy, backend: Arc<dyn StorageBackend>) -> Self {
        Self { policy, backend }
    }

    /// Normalize, sanitize, and persist one payload.
    ///
    /// The input is consumed; the caller receives only the storage receipt.
    /// No retries are attempted here; retry policy belongs to the caller.
    pub async fn store(&self, payload: Value) -> Result<StoreReceipt, PipelineError> {
        if !payload.is_object() {
            let err = SanitizeError::TypeMismatch(json_type_name(&payload));
            error!(error = %err, "rejected non-object payload");
            return Err(err.into());
        }

        let cleaned = sanitize_value(&self.policy, strip_reserved_keys(payload));
        debug!("payload normalized and sanitized");

        match self.backend.store(&cleaned).await {
            Ok(receipt) => Ok(receipt),
            Err(err) => {
                error!(error = %err, "failed to store payload");
                Err(err.into())
            }
        }
    }
}
