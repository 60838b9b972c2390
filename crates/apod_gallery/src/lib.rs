//! Backfill collection and static gallery rendering.
//!
//! The [`BackfillCollector`] walks backward one day at a time from a start
//! date until it sees too many consecutive failures. The [`GalleryRenderer`]
//! turns the collected records into one static HTML page, storing images
//! locally or in a content store on the way.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collector;
mod filename;
mod html;
mod renderer;

pub use collector::{BackfillCollector, DEFAULT_MAX_CONSECUTIVE_FAILURES};
pub use filename::{asset_file_name, normalize_title};
pub use renderer::{GalleryBackend, GalleryRenderer, GalleryReport};
