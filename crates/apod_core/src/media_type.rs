//! Media type of a picture-of-the-day entry.

use serde::{Deserialize, Serialize};

/// What a day's entry links to.
///
/// Anything other than `image` or `video` is kept verbatim so it survives a
/// snapshot round-trip and can be reported in diagnostics.
///
/// # Examples
///
/// ```
/// use apod_core::MediaType;
///
/// assert_eq!(MediaType::from("image".to_string()), MediaType::Image);
/// assert_eq!(MediaType::from("other".to_string()).as_str(), "other");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    /// A still image with standard and high resolution URLs
    Image,
    /// An embeddable video
    Video,
    /// Any other media type the endpoint reports
    Other(String),
}

impl MediaType {
    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Other(other) => other,
        }
    }
}

impl From<String> for MediaType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "image" => MediaType::Image,
            "video" => MediaType::Video,
            _ => MediaType::Other(value),
        }
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        match value {
            MediaType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
