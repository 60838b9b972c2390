//! Gallery storage backend selector.

use serde::{Deserialize, Serialize};

/// Where gallery images are kept.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StorageBackend {
    /// Download both resolutions under the local images root
    #[default]
    Local,
    /// Re-upload both resolutions to the content store and link through a gateway
    ContentStore,
}
