//! Testing utilities for the APOD workspace.
//!
//! Shared fixtures and a scripted HTTP stub server, so client tests never
//! touch the network.

#![allow(missing_docs)]

mod fixtures;
mod stub_server;

pub use fixtures::{date, image_record, video_record};
pub use stub_server::{RecordedRequest, StubResponse, StubServer, StubServerBuilder};
