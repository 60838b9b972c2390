//! Local storage for the APOD gallery.
//!
//! - [`HttpAssetFetcher`] downloads images once and never overwrites them
//! - [`AssetLayout`] decides where each resolution of each day lives
//! - [`SnapshotStore`] persists the collected record list as one JSON file
//!
//! # Example
//!
//! ```rust
//! use apod_storage::SnapshotStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = std::env::temp_dir().join("apod-doc-snapshot");
//! let store = SnapshotStore::new(dir.join("apod_snapshot.json"));
//! store.save(&[])?;
//! assert!(store.load()?.is_empty());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fetcher;
mod layout;
mod snapshot;

pub use fetcher::HttpAssetFetcher;
pub use layout::AssetLayout;
pub use snapshot::{SNAPSHOT_SCHEMA_VERSION, SnapshotStore};
