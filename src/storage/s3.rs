//! # Object Store Backend
//!
//! Persists payloads as JSON objects in an S3-compatible bucket. All
//! transport and service faults are mapped to [`StorageError`] at this
//! boundary so callers stay backend-agnostic; credential-related failures
//! map to a fixed message that never echoes the credential values.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::{ConfigError, ObjectStoreSettings};

use super::backend::{StorageBackend, StoreReceipt, STATUS_STORED};
use super::errors::{StorageError, StorageResult};
use super::identifier::Identifier;

/// Persists payloads under `{prefix}{identifier}.json` in a bucket.
#[derive(Debug)]
pub struct S3Backend {
    client: Client,
    bucket: String,
    prefix: String,
    request_timeout: Duration,
}

impl S3Backend {
    /// Build the backend from settings, resolving the SDK configuration.
    ///
    /// Fails fast with a configuration error when no bucket name is set.
    /// Static credentials are used when both keys are configured; otherwise
    /// the SDK default provider chain applies.
    pub async fn connect(settings: &ObjectStoreSettings) -> Result<Self, ConfigError> {
        if settings.bucket.trim().is_empty() {
            return Err(ConfigError::MissingBucket);
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()));
        if let (Some(key), Some(secret)) = (&settings.access_key_id, &settings.secret_access_key)
        {
            loader = loader
                .credentials_provider(Credentials::new(key, secret, None, None, "sealbox-config"));
        }
        let sdk_config = loader.load().await;

        info!(bucket = %settings.bucket, region = %settings.region, "object store backend initialized");

        Ok(Self {
            client: Client::new(&sdk_config),
            bucket: settings.bucket.clone(),
            prefix: normalize_prefix(&settings.prefix),
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
        })
    }

    fn classify_failure(&self, err: SdkError<PutObjectError>) -> StorageError {
        if let Some(service) = err.as_service_error() {
            let code = service.meta().code().unwrap_or("");
            classify_service_code(code, &self.bucket, DisplayErrorContext(&err).to_string())
        } else {
            classify_transport_failure(DisplayErrorContext(&err).to_string())
        }
    }
}

#[async_trait]
impl StorageBackend for S3Backend {
    async fn store(&self, payload: &Value) -> StorageResult<StoreReceipt> {
        let identifier = Identifier::generate();
        let key = format!("{}{}.json", self.prefix, identifier);

        let body = serde_json::to_vec_pretty(payload)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        debug!(key = %key, "storing payload to object store");

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type("application/json")
            .body(ByteStream::from(body));

        let outcome = tokio::time::timeout(self.request_timeout, request.send())
            .await
            .map_err(|_| StorageError::Timeout(self.request_timeout.as_secs()))?;

        if let Err(err) = outcome {
            let mapped = self.classify_failure(err);
            error!(key = %key, error = %mapped, "object store put failed");
            return Err(mapped);
        }

        info!(bucket = %self.bucket, key = %key, "payload stored");

        Ok(StoreReceipt::Object {
            status: STATUS_STORED.to_string(),
            bucket: self.bucket.clone(),
            url: format!("s3://{}/{}", self.bucket, key),
            key,
            timestamp: identifier.timestamp,
            storage_type: "s3".to_string(),
        })
    }
}

/// Normalize a key prefix to end with exactly one `/`.
fn normalize_prefix(prefix: &str) -> String {
    format!("{}/", prefix.trim_end_matches('/'))
}

/// Map an S3 service error code to the uniform storage error.
fn classify_service_code(code: &str, bucket: &str, description: String) -> StorageError {
    match code {
        "NoSuchBucket" => StorageError::BucketNotFound(bucket.to_string()),
        "AccessDenied" => StorageError::AccessDenied(bucket.to_string()),
        "InvalidAccessKeyId" | "SignatureDoesNotMatch" | "ExpiredToken"
        | "TokenRefreshRequired" => StorageError::CredentialsRejected,
        _ => StorageError::Backend(description),
    }
}

/// Map a non-service transport failure to the uniform storage error.
fn classify_transport_failure(description: String) -> StorageError {
    // Credential resolution failures surface as transport errors; keep the
    // fixed message so secrets cannot leak through the error chain.
    if description.to_lowercase().contains("credential") {
        StorageError::CredentialsRejected
    } else {
        StorageError::Backend(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_bucket_fails_fast() {
        let settings = ObjectStoreSettings::default();
        assert!(settings.bucket.is_empty());

        let result = S3Backend::connect(&settings).await;
        assert!(matches!(result, Err(ConfigError::MissingBucket)));
    }

    #[tokio::test]
    async fn test_blank_bucket_fails_fast() {
        let settings = ObjectStoreSettings {
            bucket: "   ".to_string(),
            ..Default::default()
        };
        let result = S3Backend::connect(&settings).await;
        assert!(matches!(result, Err(ConfigError::MissingBucket)));
    }

    #[test]
    fn test_prefix_always_ends_with_separator() {
        assert_eq!(normalize_prefix("payloads"), "payloads/");
        assert_eq!(normalize_prefix("payloads/"), "payloads/");
        assert_eq!(normalize_prefix("payloads///"), "payloads/");
        assert_eq!(normalize_prefix("a/b"), "a/b/");
    }

    #[test]
    fn test_bucket_not_found_mentions_bucket() {
        let err = classify_service_code("NoSuchBucket", "payload-bucket", "ignored".into());
        assert!(matches!(err, StorageError::BucketNotFound(_)));
        assert!(err.to_string().contains("payload-bucket"));
    }

    #[test]
    fn test_access_denied_classified() {
        let err = classify_service_code("AccessDenied", "payload-bucket", "ignored".into());
        assert!(matches!(err, StorageError::AccessDenied(_)));
    }

    #[test]
    fn test_credential_failures_never_echo_values() {
        let secret = "wJalrXUtnFEMI/K7MDENG";
        for code in ["InvalidAccessKeyId", "SignatureDoesNotMatch", "ExpiredToken"] {
            let err = classify_service_code(code, "payload-bucket", format!("raw: {}", secret));
            assert!(matches!(err, StorageError::CredentialsRejected));
            assert!(!err.to_string().contains(secret));
        }

        let err = classify_transport_failure(format!("no credentials loaded ({})", secret));
        assert!(matches!(err, StorageError::CredentialsRejected));
        assert!(!err.to_string().contains(secret));
    }

    #[test]
    fn test_unknown_service_code_falls_back_with_context() {
        let err = classify_service_code("SlowDown", "payload-bucket", "SlowDown: reduce rate".into());
        assert!(matches!(err, StorageError::Backend(_)));
        assert!(err.to_string().contains("SlowDown"));
    }
}
