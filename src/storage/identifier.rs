//! # Storage Identifiers
//!
//! Each stored payload gets a fresh name of the form
//! `{epoch-seconds}_{128-bit-random-hex}`. Uniqueness comes from the random
//! token, not the timestamp: concurrent calls within the same second still
//! produce distinct identifiers with overwhelming probability.

use std::fmt;

use chrono::Utc;
use uuid::Uuid;

/// A freshly generated storage identifier.
///
/// Generated exactly once per store call and never reused or cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Seconds since the Unix epoch at generation time.
    pub timestamp: i64,
    /// 128-bit random token rendered as 32 lowercase hex characters.
    pub token: String,
}

impl Identifier {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self {
            timestamp: Utc::now().timestamp(),
            token: Uuid::new_v4().simple().to_string(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.timestamp, self.token)
    }
}
