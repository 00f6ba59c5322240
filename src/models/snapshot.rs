//! The application state published after each poll cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::device::{DeviceInfo, SignalingInfo};
use super::server::ServerStats;
use super::transport::{ProducerInfo, TrackInfo, TransportDirection};
use crate::stats::{SampleWindow, SelectedCandidates, StatsRecord, StreamDirection};

/// Display name used when the roster has no entry for a peer.
pub const UNKNOWN_PEER_NAME: &str = "N/A";

/// Consumer as shown in a transport panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumerView {
    pub id: String,
    pub opened: bool,
    pub peer_id: String,
    /// Roster display name or [`UNKNOWN_PEER_NAME`]
    pub name: String,
    pub track: Option<TrackInfo>,
}

impl ConsumerView {
    /// Track kind, empty without a track.
    pub fn kind(&self) -> &str {
        self.track.as_ref().map(|t| t.kind.as_str()).unwrap_or("")
    }
}

/// Consumers of a single remote peer.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerGroup<'a> {
    pub peer_id: &'a str,
    pub name: &'a str,
    pub consumers: Vec<&'a ConsumerView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportSnapshot {
    pub direction: TransportDirection,
    pub id: String,
    pub opened: bool,
    pub state: String,
    pub producers: Vec<ProducerInfo>,
    pub consumers: Vec<ConsumerView>,
    /// Only collected while the transport is open
    pub candidates: Option<SelectedCandidates>,
}

impl TransportSnapshot {
    /// Restarting ICE only makes sense on an open, connected transport.
    pub fn restart_ice_enabled(&self) -> bool {
        self.opened && self.state == "connected"
    }

    /// Consumers grouped by peer, groups in first-seen order.
    pub fn consumers_by_peer(&self) -> Vec<PeerGroup<'_>> {
        let mut groups: Vec<PeerGroup<'_>> = Vec::new();
        for consumer in &self.consumers {
            match groups.iter_mut().find(|g| g.peer_id == consumer.peer_id) {
                Some(group) => {
                    group.name = &consumer.name;
                    group.consumers.push(consumer);
                }
                None => groups.push(PeerGroup {
                    peer_id: &consumer.peer_id,
                    name: &consumer.name,
                    consumers: vec![consumer],
                }),
            }
        }
        groups
    }
}

/// RTP statistics and history of one tracked stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamStats {
    pub direction: StreamDirection,
    /// The `outbound-rtp` or `inbound-rtp` record of this cycle
    pub rtp: StatsRecord,
    pub window: SampleWindow,
    /// Kb/sec with two decimals
    pub speed: String,
}

/// One consistent view of the adapter, replaced wholesale every cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub taken_at: DateTime<Utc>,
    pub device: Option<DeviceInfo>,
    pub signaling: SignalingInfo,
    pub server: ServerStats,
    pub send_transport: Option<TransportSnapshot>,
    pub recv_transport: Option<TransportSnapshot>,
    /// Stream id to stats
    pub streams: BTreeMap<String, StreamStats>,
}

impl PanelSnapshot {
    /// The state shown before the first cycle lands.
    pub fn empty() -> Self {
        Self {
            taken_at: Utc::now(),
            device: None,
            signaling: SignalingInfo::default(),
            server: ServerStats::default(),
            send_transport: None,
            recv_transport: None,
            streams: BTreeMap::new(),
        }
    }

    /// Send or receive transport.
    pub fn transport(&self, direction: TransportDirection) -> Option<&TransportSnapshot> {
        match direction {
            TransportDirection::Send => self.send_transport.as_ref(),
            TransportDirection::Receive => self.recv_transport.as_ref(),
        }
    }

    /// Stats of a tracked stream.
    pub fn stream(&self, id: &str) -> Option<&StreamStats> {
        self.streams.get(id)
    }

    /// Sample window of a tracked stream.
    pub fn window(&self, id: &str) -> Option<&SampleWindow> {
        self.streams.get(id).map(|s| &s.window)
    }
}
