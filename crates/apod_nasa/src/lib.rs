//! NASA Astronomy Picture of the Day client.
//!
//! One blocking GET per date against the APOD endpoint, mapped onto
//! [`apod_core::PictureRecord`]. Nothing is retried.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;

pub use client::{APOD_ENDPOINT, NasaClient};
