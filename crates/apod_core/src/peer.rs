//! Connected content-store peers.

use serde::{Deserialize, Serialize};

/// One peer the content-store node is connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PeerInfo {
    /// Multiaddress of the peer
    #[serde(rename = "Addr", default)]
    address: String,
    /// Peer identifier
    #[serde(rename = "Peer", default)]
    peer_id: String,
}

impl PeerInfo {
    /// Create a peer entry.
    pub fn new(address: impl Into<String>, peer_id: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            peer_id: peer_id.into(),
        }
    }
}
