//! Top-level error wrapper types.

use crate::{ConfigError, ContentStoreError, FetchError, JsonError, StorageError, StorageErrorKind};

/// Every error the workspace can raise.
///
/// # Examples
///
/// ```
/// use apod_error::{ApodError, ConfigError};
///
/// let err: ApodError = ConfigError::new("nasa.api_key is not set").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ApodErrorKind {
    /// Metadata fetch error
    #[from(FetchError)]
    Fetch(FetchError),
    /// Content-store error
    #[from(ContentStoreError)]
    ContentStore(ContentStoreError),
    /// Local storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// APOD error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("APOD Error: {}", _0)]
pub struct ApodError(Box<ApodErrorKind>);

impl ApodError {
    /// Create a new error from a kind.
    pub fn new(kind: ApodErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ApodErrorKind {
        &self.0
    }

    /// True when the error reports a missing file.
    ///
    /// Lets callers fall back to a fresh collection when no snapshot exists yet.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind(),
            ApodErrorKind::Storage(StorageError {
                kind: StorageErrorKind::NotFound(_),
                ..
            })
        )
    }
}

impl<T> From<T> for ApodError
where
    T: Into<ApodErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for APOD operations.
pub type ApodResult<T> = std::result::Result<T, ApodError>;
