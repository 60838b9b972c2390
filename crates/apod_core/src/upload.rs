//! Content-store upload results.

use serde::{Deserialize, Deserializer, Serialize};

/// What the content store reports after adding a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct UploadResult {
    /// Content hash, usable as a gateway retrieval key
    #[serde(rename = "Hash")]
    content_hash: String,
    /// Name the store recorded for the upload
    #[serde(rename = "Name", default)]
    reported_name: String,
    /// Size in bytes as reported by the store
    #[serde(rename = "Size", default, deserialize_with = "size_from_string_or_number")]
    reported_size: u64,
}

impl UploadResult {
    /// Create an upload result.
    pub fn new(
        content_hash: impl Into<String>,
        reported_name: impl Into<String>,
        reported_size: u64,
    ) -> Self {
        Self {
            content_hash: content_hash.into(),
            reported_name: reported_name.into(),
            reported_size,
        }
    }

    /// Public URL of the content behind `gateway_base`.
    pub fn gateway_url(&self, gateway_base: &str) -> String {
        format!("{}{}", gateway_base, self.content_hash)
    }
}

/// Outcome of an upload attempt.
///
/// Upload failures are not propagated as errors: callers only need to know
/// whether the content was stored, not why it wasn't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Content was stored
    Stored(UploadResult),
    /// Download, upload, or parsing failed
    Failed,
}

impl UploadOutcome {
    /// The stored result, if any.
    pub fn stored(self) -> Option<UploadResult> {
        match self {
            UploadOutcome::Stored(result) => Some(result),
            UploadOutcome::Failed => None,
        }
    }

    /// Whether the content was stored.
    pub fn is_stored(&self) -> bool {
        matches!(self, UploadOutcome::Stored(_))
    }
}

// Stores report sizes as strings ("12345"); accept plain numbers as well.
fn size_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Number(u64),
        Text(String),
    }

    match Size::deserialize(deserializer)? {
        Size::Number(n) => Ok(n),
        Size::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
