//! Core data types for the APOD gallery tools.
//!
//! These types are shared by the metadata client, the content-store client,
//! the local storage layer and the gallery renderer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod media_type;
mod peer;
mod quality;
mod record;
mod upload;

pub use backend::StorageBackend;
pub use media_type::MediaType;
pub use peer::PeerInfo;
pub use quality::Quality;
pub use record::{PictureRecord, PictureRecordBuilder, PictureRecordBuilderError};
pub use upload::{UploadOutcome, UploadResult};
