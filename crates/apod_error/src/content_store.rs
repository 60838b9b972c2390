//! Content-store error types.

/// Kinds of content-store failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ContentStoreErrorKind {
    /// No host configured
    #[display("Content store is disabled (no host configured)")]
    Disabled,
    /// Could not pull the source bytes from a remote URL
    #[display("Failed to download source: {}", _0)]
    Download(String),
    /// Transport failure talking to the store
    #[display("HTTP request failed: {}", _0)]
    Http(String),
    /// Store answered with a non-success status
    #[display("Store returned {}: {}", status, message)]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },
    /// Reply did not match the expected JSON shape
    #[display("Failed to parse store response: {}", _0)]
    Parse(String),
    /// Local file to upload could not be read
    #[display("Failed to read local file: {}", _0)]
    FileRead(String),
}

/// Content-store error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Content Store Error: {} at line {} in {}", kind, line, file)]
pub struct ContentStoreError {
    /// The kind of error that occurred
    pub kind: ContentStoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ContentStoreError {
    /// Create a new content-store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ContentStoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
