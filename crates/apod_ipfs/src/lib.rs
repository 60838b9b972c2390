//! Client for a content-addressed store speaking the IPFS HTTP API.
//!
//! Two calls are used: `swarm/peers` as a connectivity probe and `add` for
//! multipart file uploads. Upload failures surface as
//! [`apod_core::UploadOutcome::Failed`] through the
//! [`apod_interface::ContentStore`] trait; the `try_*` methods keep the
//! underlying error for callers that want it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod options;

pub use client::{ADD_PATH, IpfsClient, PEERS_PATH};
pub use options::AddOptions;
