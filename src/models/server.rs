//! Server-side statistics passthrough.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A raw stat object as produced by the media server.
pub type ServerStat = Map<String, Value>;

/// Statistics of one server transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerTransportStats {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stats: Vec<ServerStat>,
    /// Producer id to its stats
    #[serde(default)]
    pub producers: BTreeMap<String, Vec<ServerStat>>,
    /// Consumer id to its stats
    #[serde(default)]
    pub consumers: BTreeMap<String, Vec<ServerStat>>,
}

/// Transport id to transport statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerStats {
    pub transports: BTreeMap<String, ServerTransportStats>,
}

impl ServerStats {
    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }
}
