//! Error types for the APOD gallery tools.
//!
//! Every concern gets its own error struct that records where it was raised:
//! - `*ErrorKind` enums name the specific failure
//! - `*Error` structs wrap the kind (or a message) with the caller location
//! - [`ApodError`] boxes any of them behind a single type for `?` propagation
//!
//! # Examples
//!
//! ```
//! use apod_error::{ApodResult, ConfigError};
//!
//! fn api_key(raw: &str) -> ApodResult<&str> {
//!     if raw.is_empty() {
//!         Err(ConfigError::new("nasa.api_key is not set"))?
//!     }
//!     Ok(raw)
//! }
//!
//! assert!(api_key("").is_err());
//! assert_eq!(api_key("DEMO_KEY").unwrap(), "DEMO_KEY");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod content_store;
mod error;
mod fetch;
mod json;
mod storage;

pub use config::ConfigError;
pub use content_store::{ContentStoreError, ContentStoreErrorKind};
pub use error::{ApodError, ApodErrorKind, ApodResult};
pub use fetch::{FetchError, FetchErrorKind};
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
