//! Query options for the `add` endpoint.

use serde::{Deserialize, Serialize};

/// Options sent as query parameters when adding a file.
///
/// Flags that change the reply format (`quiet`, `progress`, ...) are not
/// offered because the client expects the standard JSON reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "kebab-case")]
pub struct AddOptions {
    /// Pin the object when adding
    #[serde(default = "default_pin")]
    pin: bool,
    /// CID version
    #[serde(default)]
    cid_version: u8,
    /// Hash function
    #[serde(default = "default_hash")]
    hash: String,
    /// Chunking algorithm: `size-<bytes>`, `rabin-<min>-<avg>-<max>` or `buzhash`
    #[serde(default = "default_chunker")]
    chunker: String,
    /// Use raw blocks for leaf nodes
    #[serde(default)]
    raw_leaves: bool,
    /// Use trickle-dag format
    #[serde(default)]
    trickle: bool,
    /// Only chunk and hash, do not write to the store
    #[serde(default)]
    only_hash: bool,
    /// Wrap the file in a directory object
    #[serde(default)]
    wrap_with_directory: bool,
    /// Inline small blocks into CIDs
    #[serde(default)]
    inline: bool,
    /// Maximum block size to inline
    #[serde(default = "default_inline_limit")]
    inline_limit: u32,
}

fn default_pin() -> bool {
    true
}

fn default_hash() -> String {
    "sha2-256".to_string()
}

fn default_chunker() -> String {
    "size-262144".to_string()
}

fn default_inline_limit() -> u32 {
    32
}

impl Default for AddOptions {
    fn default() -> Self {
        Self {
            pin: default_pin(),
            cid_version: 0,
            hash: default_hash(),
            chunker: default_chunker(),
            raw_leaves: false,
            trickle: false,
            only_hash: false,
            wrap_with_directory: false,
            inline: false,
            inline_limit: default_inline_limit(),
        }
    }
}

impl AddOptions {
    /// Toggle pinning.
    pub fn with_pin(mut self, pin: bool) -> Self {
        self.pin = pin;
        self
    }

    /// Select the CID version.
    pub fn with_cid_version(mut self, version: u8) -> Self {
        self.cid_version = version;
        self
    }

    /// Only hash, never store.
    pub fn with_only_hash(mut self, only_hash: bool) -> Self {
        self.only_hash = only_hash;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_options_keep_defaults() {
        let options: AddOptions = serde_json::from_str(r#"{"cid-version": 1}"#).unwrap();
        assert_eq!(options.cid_version(), &1);
        assert!(*options.pin());
        assert_eq!(options.chunker(), "size-262144");
        assert_eq!(options.inline_limit(), &32);
    }
}
