//! # Storage Errors
//!
//! Every backend-specific fault (I/O, network, authentication, permission,
//! not-found) is caught at the backend boundary and surfaced as this single
//! error kind, with the underlying cause's description preserved in the
//! message. Callers never see a raw SDK or I/O error type.

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage backend errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("failed to encode payload: {0}")]
    Serialization(String),

    #[error("object store bucket not found: {0}")]
    BucketNotFound(String),

    #[error("access denied to object store bucket: {0}")]
    AccessDenied(String),

    // Fixed message: credential values must never be echoed back.
    #[error("object store credentials missing or rejected")]
    CredentialsRejected,

    #[error("object store request timed out after {0}s")]
    Timeout(u64),

    #[error("object store error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_cause() {
        let err = StorageError::Io("permission denied (os error 13)".into());
        assert!(err.to_string().contains("permission denied"));

        let err = StorageError::BucketNotFound("payload-bucket".into());
        assert!(err.to_string().contains("payload-bucket"));
    }

    #[test]
    fn test_credentials_message_is_fixed() {
        assert_eq!(
            StorageError::CredentialsRejected.to_string(),
            "object store credentials missing or rejected"
        );
    }
}
