//! Metadata fetch error types.

/// Ways a picture-of-the-day request can fail.
///
/// The backfill treats all of these the same way as a day with no
/// publication, so the kinds exist for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum FetchErrorKind {
    /// Transport failure before a response arrived
    #[display("HTTP request failed: {}", _0)]
    Http(String),
    /// Endpoint answered with a non-success status
    #[display("API returned {}: {}", status, message)]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },
    /// Body was empty or did not match the record shape
    #[display("Failed to parse response: {}", _0)]
    Parse(String),
    /// Endpoint returned an entry for a different day than requested
    #[display("Requested {} but received {}", requested, received)]
    DateMismatch {
        /// Date sent in the request
        requested: String,
        /// Date found in the response body
        received: String,
    },
}

/// Metadata fetch error with location tracking.
///
/// # Examples
///
/// ```
/// use apod_error::{FetchError, FetchErrorKind};
///
/// let err = FetchError::new(FetchErrorKind::Status {
///     status: 404,
///     message: "No data available for date".to_string(),
/// });
/// assert!(format!("{}", err).contains("404"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Fetch Error: {} at line {} in {}", kind, line, file)]
pub struct FetchError {
    /// The kind of error that occurred
    pub kind: FetchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl FetchError {
    /// Create a new fetch error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FetchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
