//! Transport, producer, consumer and track projections.
//!
//! These mirror what the media adapter exposes as plain fields. Nothing here
//! is validated; the panel shows whatever it is given.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::device::{DeviceInfo, SignalingInfo};

/// Which of the two WebRTC transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportDirection {
    Send,
    Receive,
}

impl TransportDirection {
    /// Path segment (`send` or `recv`).
    pub fn as_path(&self) -> &'static str {
        match self {
            TransportDirection::Send => "send",
            TransportDirection::Receive => "recv",
        }
    }

    /// Section title.
    pub fn title(&self) -> &'static str {
        match self {
            TransportDirection::Send => "Send Transport",
            TransportDirection::Receive => "Receive Transport",
        }
    }
}

impl fmt::Display for TransportDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// A media track attached to a producer or consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    pub id: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub muted: bool,
    /// `live` or `ended`
    #[serde(default)]
    pub ready_state: String,
}

/// A local outgoing stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerInfo {
    pub id: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub track: Option<TrackInfo>,
}

/// A remote incoming stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerInfo {
    pub id: String,
    /// Peer that owns the remote producer
    #[serde(default)]
    pub peer_id: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub track: Option<TrackInfo>,
}

impl ConsumerInfo {
    /// Track kind, used for the panel title.
    pub fn kind(&self) -> &str {
        self.track.as_ref().map(|t| t.kind.as_str()).unwrap_or("")
    }
}

/// One transport as exposed by the adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportInfo {
    pub id: String,
    #[serde(default)]
    pub closed: bool,
    /// `new`, `connecting`, `connected`, `failed`, `disconnected`, `closed`
    #[serde(default)]
    pub connection_state: String,
    #[serde(default)]
    pub producers: Vec<ProducerInfo>,
    #[serde(default)]
    pub consumers: Vec<ConsumerInfo>,
}

/// Everything the adapter exposes as plain fields, read in one go.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterState {
    #[serde(default)]
    pub device: Option<DeviceInfo>,
    #[serde(default)]
    pub signaling: SignalingInfo,
    #[serde(default)]
    pub send_transport: Option<TransportInfo>,
    #[serde(default)]
    pub recv_transport: Option<TransportInfo>,
    #[serde(default)]
    pub mic_producer: Option<String>,
    #[serde(default)]
    pub video_producer: Option<String>,
    /// Ids of the currently active consumers
    #[serde(default)]
    pub consumers: Vec<String>,
    /// Peer id to display name, when the adapter carries presence data
    #[serde(default)]
    pub presences: BTreeMap<String, String>,
}

impl AdapterState {
    /// Send or receive transport, if created.
    pub fn transport(&self, direction: TransportDirection) -> Option<&TransportInfo> {
        match direction {
            TransportDirection::Send => self.send_transport.as_ref(),
            TransportDirection::Receive => self.recv_transport.as_ref(),
        }
    }
}
