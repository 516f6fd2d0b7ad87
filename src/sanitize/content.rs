//! # Content Sanitization
//!
//! Recursively cleans every string leaf of a payload against embedded
//! markup. The heavy lifting is done by [`ammonia`]: script-executing
//! elements are removed together with their content, event-handler
//! attributes are stripped from retained elements, and dangerous URI
//! schemes are filtered. Tags outside the allowlist are unwrapped, so a
//! `data:` URI carrying an inline `<svg onload=...>` payload is truncated
//! to its harmless text prefix.

use std::fmt;

use ammonia::Builder;
use serde_json::{Map, Value};

/// Allowlist-based sanitization policy applied to string leaves.
///
/// Wraps a reusable [`ammonia::Builder`]. The default policy is ammonia's
/// conservative default allowlist; [`allow_tags`](Self::allow_tags) and
/// friends widen or narrow it per deployment.
pub struct SanitizePolicy {
    cleaner: Builder<'static>,
}

impl SanitizePolicy {
    /// The default policy.
    pub fn strict() -> Self {
        Self {
            cleaner: Builder::default(),
        }
    }

    /// Add tags to the allowlist.
    pub fn allow_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.cleaner.add_tags(tags);
        self
    }

    /// Remove tags from the allowlist.
    pub fn deny_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.cleaner.rm_tags(tags);
        self
    }

    /// Allow extra attributes on a specific tag.
    pub fn allow_tag_attributes<I>(mut self, tag: &'static str, attributes: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.cleaner.add_tag_attributes(tag, attributes);
        self
    }

    /// Clean a single string according to this policy.
    pub fn clean(&self, text: &str) -> String {
        self.cleaner.clean(text).to_string()
    }
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self::strict()
    }
}

impl fmt::Debug for SanitizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanitizePolicy").finish_non_exhaustive()
    }
}

/// Recursively sanitize every string leaf of `value` with `policy`.
///
/// Map and sequence structure is preserved; numbers, booleans, and null
/// pass through byte-for-byte.
pub fn sanitize_value(policy: &SanitizePolicy, value: Value) -> Value {
    match value {
        Value::String(text) => Value::String(policy.clean(&text)),
        Value::Object(map) => {
            let mut sanitized = Map::with_capacity(map.len());
            for (key, inner) in map {
                sanitized.insert(key, sanitize_value(policy, inner));
            }
            Value::Object(sanitized)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| sanitize_value(policy, item))
                .collect(),
        ),
        other => other,
    }
}
