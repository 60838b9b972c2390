//! APOD - mirror NASA's Astronomy Picture of the Day.
//!
//! Walks backward through the picture-of-the-day archive, keeps a JSON
//! snapshot of what it found, and renders a single static HTML gallery.
//! Images are either downloaded next to the page or re-hosted on an IPFS
//! node and linked through a gateway.
//!
//! # Architecture
//!
//! - `apod_error` - Error types
//! - `apod_core` - Picture records and small value types
//! - `apod_interface` - `PictureSource`, `ContentStore`, `AssetFetcher`
//! - `apod_nasa` - Picture-of-the-day API client
//! - `apod_ipfs` - IPFS HTTP API client
//! - `apod_storage` - Image downloads, directory layout, snapshots
//! - `apod_gallery` - Backfill collection and HTML rendering
//!
//! This crate re-exports everything and adds layered configuration.
//!
//! # Quick Start
//!
//! ```no_run
//! use apod::{BackfillCollector, NasaClient, SnapshotStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NasaClient::new("DEMO_KEY");
//! let records = BackfillCollector::new(&client).collect(3);
//! SnapshotStore::new("apod_snapshot.json").save(&records)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::{ApodConfig, BackfillConfig, ContentStoreConfig, NasaConfig, StorageConfig};

pub use apod_core::*;
pub use apod_error::*;
pub use apod_gallery::*;
pub use apod_interface::*;
pub use apod_ipfs::*;
pub use apod_nasa::*;
pub use apod_storage::*;
