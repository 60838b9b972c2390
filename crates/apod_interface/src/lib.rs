//! Trait definitions for the APOD gallery tools.
//!
//! The collector and renderer only talk to these traits, so the HTTP clients
//! can be swapped for fakes in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{AssetFetcher, ContentStore, PictureSource};
