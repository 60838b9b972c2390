//! Storage error types.

/// Kinds of local storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create a directory
    #[display("Failed to create directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Nothing exists at the requested path
    #[display("Not found: {}", _0)]
    NotFound(String),
    /// Asset download failed
    #[display("Failed to download asset: {}", _0)]
    Download(String),
    /// Snapshot file is empty or not a list of records
    #[display("Invalid snapshot: {}", _0)]
    InvalidSnapshot(String),
    /// Snapshot was written by a newer schema
    #[display("Unsupported snapshot schema version {}", _0)]
    UnsupportedVersion(u32),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use apod_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("apod_snapshot.json".to_string()));
/// assert!(format!("{}", err).contains("Not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
