//! # Payload Storage
//!
//! Backend abstraction for durably persisting sanitized payloads, with two
//! interchangeable implementations: local filesystem and S3-compatible
//! object store. The factory resolves configuration to the single
//! process-wide backend instance at startup.

pub mod backend;
pub mod errors;
pub mod factory;
pub mod file;
pub mod identifier;
pub mod s3;

pub use backend::{StorageBackend, StoreReceipt, STATUS_STORED};
pub use errors::{StorageError, StorageResult};
pub use factory::backend_from_config;
pub use file::FileBackend;
pub use identifier::Identifier;
pub use s3::S3Backend;
