//! # Configuration
//!
//! Environment-derived configuration record, consumed exactly once at
//! startup by the storage factory and never mutated afterward.
//!
//! | Variable                | Meaning                                        | Default      |
//! |-------------------------|------------------------------------------------|--------------|
//! | `STORAGE_TYPE`          | Backend kind: `file`, `s3` (or `object-store`) | `file`       |
//! | `DATA_DIRECTORY`        | Root directory for the file backend            | `./data`     |
//! | `S3_BUCKET_NAME`        | Bucket name for the object store backend       | (required)   |
//! | `AWS_ACCESS_KEY_ID`     | Static access key (SDK default chain if unset) | (unset)      |
//! | `AWS_SECRET_ACCESS_KEY` | Static secret key (SDK default chain if unset) | (unset)      |
//! | `AWS_REGION`            | Object store region                            | `us-east-1`  |
//! | `S3_PREFIX`             | Key prefix for stored objects                  | `payloads/`  |
//! | `S3_TIMEOUT_SECS`       | Per-request network timeout in seconds         | `30`         |
//! | `LOG_LEVEL`             | Log filter (tracing `EnvFilter` syntax)        | `info`       |

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Backend kind value selecting the local filesystem backend.
pub const BACKEND_FILE: &str = "file";
/// Backend kind value selecting the object store backend.
pub const BACKEND_S3: &str = "s3";
/// Accepted alias for [`BACKEND_S3`].
pub const BACKEND_OBJECT_STORE: &str = "object-store";

/// Fatal configuration errors, detected at startup before any request is
/// served.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported storage backend: {0}")]
    UnsupportedBackend(String),

    #[error("a bucket name is required for the object store backend (set S3_BUCKET_NAME)")]
    MissingBucket,

    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },

    #[error("failed to initialize storage backend: {0}")]
    Initialization(String),
}

/// Immutable startup-time record selecting and parameterizing the backend.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Raw backend kind; validated by the storage factory.
    pub backend_kind: String,
    pub file: FileStoreSettings,
    pub object_store: ObjectStoreSettings,
}

/// Settings for the local filesystem backend.
#[derive(Debug, Clone)]
pub struct FileStoreSettings {
    /// Root directory payload files are written under.
    pub data_directory: PathBuf,
}

/// Settings for the object store backend.
#[derive(Clone)]
pub struct ObjectStoreSettings {
    pub bucket: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: String,
    /// Key prefix; normalized by the backend to end with `/`.
    pub prefix: String,
    /// Network timeout applied to each store request.
    pub request_timeout_secs: u64,
}

impl fmt::Debug for ObjectStoreSettings {
    // Credentials are redacted so debug logs never leak them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStoreSettings")
            .field("bucket", &self.bucket)
            .field("access_key_id", &self.access_key_id.as_deref().map(|_| "***"))
            .field(
                "secret_access_key",
                &self.secret_access_key.as_deref().map(|_| "***"),
            )
            .field("region", &self.region)
            .field("prefix", &self.prefix)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for FileStoreSettings {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("./data"),
        }
    }
}

impl Default for ObjectStoreSettings {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            access_key_id: None,
            secret_access_key: None,
            region: "us-east-1".to_string(),
            prefix: "payloads/".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl StorageConfig {
    /// Build the configuration record from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration record from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_kind = lookup("STORAGE_TYPE")
            .unwrap_or_else(|| BACKEND_FILE.to_string())
            .to_lowercase();

        let mut file = FileStoreSettings::default();
        if let Some(dir) = lookup("DATA_DIRECTORY") {
            file.data_directory = PathBuf::from(dir);
        }

        let mut object_store = ObjectStoreSettings::default();
        if let Some(bucket) = lookup("S3_BUCKET_NAME") {
            object_store.bucket = bucket;
        }
        object_store.access_key_id = lookup("AWS_ACCESS_KEY_ID");
        object_store.secret_access_key = lookup("AWS_SECRET_ACCESS_KEY");
        if let Some(region) = lookup("AWS_REGION") {
            object_store.region = region;
        }
        if let Some(prefix) = lookup("S3_PREFIX") {
            object_store.prefix = prefix;
        }
        if let Some(raw) = lookup("S3_TIMEOUT_SECS") {
            object_store.request_timeout_secs =
                raw.parse().map_err(|_| ConfigError::InvalidValue {
                    var: "S3_TIMEOUT_SECS".to_string(),
                    value: raw,
                })?;
        }

        Ok(Self {
            backend_kind,
            file,
            object_store,
        })
    }
}
