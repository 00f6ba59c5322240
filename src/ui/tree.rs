//! The panel as a tree of nodes.
//!
//! Rendering never looks at the snapshot directly. Each frame the snapshot,
//! the event log and the locale are projected into three column trees
//! (Local, Log, Remote); navigation and rendering work on those.
//!
//! Every node carries a slash separated `path` that is stable across
//! rebuilds, so collapse state and the selection survive new snapshots.

use std::collections::HashSet;

use crate::events::{EventLevel, EventLog};
use crate::i18n::{self, Locale};
use crate::models::{
    ConsumerView, DeviceInfo, PanelSnapshot, PeerGroup, ProducerInfo, ServerStat,
    ServerTransportStats, SignalingInfo, StreamStats, TrackInfo, TransportDirection,
    TransportSnapshot,
};
use crate::stats::{SelectedCandidates, StatsRecord};

use super::format::format_value;
use super::sparkline::window_lines;

pub const MEDIASOUP_DOC_BASE_URL: &str =
    "https://mediasoup.org/documentation/v3/libmediasoupclient/api/";
pub const MDN_DOC_BASE_URL: &str = "https://developer.mozilla.org/en-US/docs/Web/API/";

/// Documentation page attached to a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpLink {
    Device,
    Transport,
    Producer,
    Consumer,
    IceCandidate,
    StatsReport,
}

impl HelpLink {
    /// Full documentation URL.
    pub fn url(&self) -> String {
        match self {
            HelpLink::Device => format!("{}#Device", MEDIASOUP_DOC_BASE_URL),
            HelpLink::Transport => format!("{}#Transport", MEDIASOUP_DOC_BASE_URL),
            HelpLink::Producer => format!("{}#Producer", MEDIASOUP_DOC_BASE_URL),
            HelpLink::Consumer => format!("{}#Consumer", MEDIASOUP_DOC_BASE_URL),
            HelpLink::IceCandidate => format!("{}RTCIceCandidate", MDN_DOC_BASE_URL),
            HelpLink::StatsReport => format!("{}RTCStatsReport", MDN_DOC_BASE_URL),
        }
    }
}

/// What pressing a button asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    RestartIce(TransportDirection),
    ConnectSignaling,
    DisconnectSignaling,
}

/// Which series a sparkline row draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Bytes,
    Packets,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Section {
        title: String,
        subtitle: Option<String>,
        help: Option<HelpLink>,
    },
    Field {
        key: String,
        value: String,
    },
    Button {
        label: String,
        action: PanelAction,
        enabled: bool,
    },
    Sparkline {
        series: Series,
        glyphs: String,
    },
    Event {
        level: EventLevel,
        tag: String,
        msg: String,
    },
    Note(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelNode {
    pub path: String,
    pub kind: NodeKind,
    pub children: Vec<PanelNode>,
}

impl PanelNode {
    fn section(path: String, title: impl Into<String>) -> Self {
        Self {
            path,
            kind: NodeKind::Section {
                title: title.into(),
                subtitle: None,
                help: None,
            },
            children: Vec::new(),
        }
    }

    fn leaf(path: String, kind: NodeKind) -> Self {
        Self {
            path,
            kind,
            children: Vec::new(),
        }
    }

    fn with_help(mut self, link: HelpLink) -> Self {
        if let NodeKind::Section { help, .. } = &mut self.kind {
            *help = Some(link);
        }
        self
    }

    fn with_subtitle(mut self, text: String) -> Self {
        if let NodeKind::Section { subtitle, .. } = &mut self.kind {
            *subtitle = Some(text);
        }
        self
    }

    fn child_path(&self, key: &str) -> String {
        format!("{}/{}", self.path, key)
    }

    fn field(&mut self, key: &str, value: impl ToString) {
        let path = self.child_path(&format!("={}", key));
        self.children.push(PanelNode::leaf(
            path,
            NodeKind::Field {
                key: key.to_string(),
                value: value.to_string(),
            },
        ));
    }

    fn push(&mut self, node: PanelNode) {
        self.children.push(node);
    }

    pub fn is_section(&self) -> bool {
        matches!(self.kind, NodeKind::Section { .. })
    }

    /// Section title; `None` for leaves.
    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Section { title, .. } => Some(title),
            _ => None,
        }
    }

    /// Help link of a section, if any.
    pub fn help(&self) -> Option<HelpLink> {
        match &self.kind {
            NodeKind::Section { help, .. } => *help,
            _ => None,
        }
    }

    /// Depth-first search by path.
    pub fn find(&self, path: &str) -> Option<&PanelNode> {
        if self.path == path {
            return Some(self);
        }
        if !path.starts_with(&self.path) {
            return None;
        }
        self.children.iter().find_map(|c| c.find(path))
    }
}

/// The three top-level columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Column {
    #[default]
    Local,
    Log,
    Remote,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Local, Column::Log, Column::Remote];

    /// Position in display order.
    pub fn index(&self) -> usize {
        match self {
            Column::Local => 0,
            Column::Log => 1,
            Column::Remote => 2,
        }
    }

    /// Column to the right, wrapping.
    pub fn next(&self) -> Column {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Column to the left, wrapping.
    pub fn prev(&self) -> Column {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Column roots built from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelTree {
    pub local: PanelNode,
    pub log: PanelNode,
    pub remote: PanelNode,
}

impl PanelTree {
    /// Project everything the panel shows.
    ///
    /// `has_data` is false until the first cycle has been published; the
    /// Local column then shows a placeholder instead of empty sections.
    pub fn build(
        snapshot: &PanelSnapshot,
        events: &EventLog,
        locale: Locale,
        has_data: bool,
    ) -> Self {
        Self {
            local: local_column(snapshot, locale, has_data),
            log: log_column(events, locale),
            remote: remote_column(snapshot, locale),
        }
    }

    /// Root node of `column`.
    pub fn column(&self, column: Column) -> &PanelNode {
        match column {
            Column::Local => &self.local,
            Column::Log => &self.log,
            Column::Remote => &self.remote,
        }
    }
}

// ============================================================================
// Local column
// ============================================================================

fn local_column(snapshot: &PanelSnapshot, locale: Locale, has_data: bool) -> PanelNode {
    let mut root = PanelNode::section("local".to_string(), locale.message(i18n::LOCAL_SECTION));
    if !has_data {
        let path = root.child_path("waiting");
        root.push(PanelNode::leaf(
            path,
            NodeKind::Note(locale.message(i18n::WAITING_FOR_DATA).to_string()),
        ));
        return root;
    }

    if let Some(device) = &snapshot.device {
        let path = root.child_path("device");
        root.push(device_section(path, device));
    }
    let path = root.child_path("signaling");
    root.push(signaling_section(path, &snapshot.signaling, locale));

    for direction in [TransportDirection::Send, TransportDirection::Receive] {
        if let Some(transport) = snapshot.transport(direction) {
            let path = root.child_path(direction.as_path());
            root.push(transport_section(path, transport, snapshot, locale));
        }
    }
    root
}

fn device_section(path: String, device: &DeviceInfo) -> PanelNode {
    let mut node = PanelNode::section(path, "Device").with_help(HelpLink::Device);
    node.field("loaded", device.loaded);
    if !device.codecs.is_empty() {
        node.field("codecs", device.codec_labels().join(" "));
    }
    node
}

fn signaling_section(path: String, signaling: &SignalingInfo, locale: Locale) -> PanelNode {
    let mut node = PanelNode::section(path, "Signaling");
    node.field("connected", signaling.connected);

    let (label, action) = if signaling.connected {
        (i18n::DISCONNECT_SIGNALING_BUTTON, PanelAction::DisconnectSignaling)
    } else {
        (i18n::CONNECT_SIGNALING_BUTTON, PanelAction::ConnectSignaling)
    };
    let path = node.child_path("!signaling");
    node.push(PanelNode::leaf(
        path,
        NodeKind::Button {
            label: locale.message(label).to_string(),
            action,
            enabled: true,
        },
    ));
    node
}

fn transport_section(
    path: String,
    transport: &TransportSnapshot,
    snapshot: &PanelSnapshot,
    locale: Locale,
) -> PanelNode {
    let mut node =
        PanelNode::section(path, transport.direction.title()).with_help(HelpLink::Transport);
    node.field("id", &transport.id);
    node.field("opened", transport.opened);
    node.field("state", &transport.state);

    let button_path = node.child_path("!restart-ice");
    node.push(PanelNode::leaf(
        button_path,
        NodeKind::Button {
            label: locale.message(i18n::RESTART_ICE_BUTTON).to_string(),
            action: PanelAction::RestartIce(transport.direction),
            enabled: transport.restart_ice_enabled(),
        },
    ));

    if let Some(candidates) = transport.candidates.as_ref().filter(|c| !c.is_empty()) {
        let path = node.child_path("candidates");
        node.push(candidates_section(path, candidates));
    }

    if !transport.producers.is_empty() {
        let mut producers = PanelNode::section(node.child_path("producers"), "Local producers")
            .with_help(HelpLink::Producer);
        for producer in &transport.producers {
            let path = producers.child_path(&producer.id);
            producers.push(producer_section(path, producer, snapshot.stream(&producer.id)));
        }
        node.push(producers);
    }

    for group in transport.consumers_by_peer() {
        let path = node.child_path(&format!("peer:{}", group.peer_id));
        node.push(peer_section(path, &group, snapshot));
    }
    node
}

fn candidates_section(path: String, candidates: &SelectedCandidates) -> PanelNode {
    let mut node = PanelNode::section(path, "Candidates").with_help(HelpLink::IceCandidate);
    if let Some(local) = &candidates.local {
        let path = node.child_path("local");
        node.push(record_section(path, "Local candidate", local));
    }
    if let Some(remote) = &candidates.remote {
        let path = node.child_path("remote");
        node.push(record_section(path, "Remote candidate", remote));
    }
    node
}

fn producer_section(path: String, producer: &ProducerInfo, stats: Option<&StreamStats>) -> PanelNode {
    let mut node = PanelNode::section(path, format!("{} producer", producer.kind));
    node.field("id", &producer.id);
    node.field("paused", producer.paused);
    node.field("kind", &producer.kind);
    if let Some(track) = &producer.track {
        let path = node.child_path("track");
        node.push(track_section(path, track));
    }
    if let Some(stats) = stats {
        let path = node.child_path("stats");
        node.push(stream_section(path, stats));
    }
    node
}

fn peer_section(path: String, group: &PeerGroup<'_>, snapshot: &PanelSnapshot) -> PanelNode {
    let mut node = PanelNode::section(path, group.name)
        .with_subtitle(format!("peerId: {}", group.peer_id))
        .with_help(HelpLink::Consumer);
    for consumer in &group.consumers {
        let path = node.child_path(&consumer.id);
        node.push(consumer_section(path, consumer, snapshot.stream(&consumer.id)));
    }
    node
}

fn consumer_section(path: String, consumer: &ConsumerView, stats: Option<&StreamStats>) -> PanelNode {
    let mut node = PanelNode::section(path, format!("{} consumer", consumer.kind()));
    node.field("opened", consumer.opened);
    node.field("id", &consumer.id);
    if let Some(track) = &consumer.track {
        let path = node.child_path("track");
        node.push(track_section(path, track));
    }
    if let Some(stats) = stats {
        let path = node.child_path("stats");
        node.push(stream_section(path, stats));
    }
    node
}

fn track_section(path: String, track: &TrackInfo) -> PanelNode {
    let mut node = PanelNode::section(path, "track");
    node.field("id", &track.id);
    node.field("enabled", track.enabled);
    node.field("kind", &track.kind);
    node.field("muted", track.muted);
    node.field("state", &track.ready_state);
    node
}

fn stream_section(path: String, stats: &StreamStats) -> PanelNode {
    let mut node = PanelNode::section(path, "stats");
    let (bytes, packets) = window_lines(&stats.window, stats.direction);
    for (key, series, glyphs) in [("~bytes", Series::Bytes, bytes), ("~packets", Series::Packets, packets)] {
        let path = node.child_path(key);
        node.push(PanelNode::leaf(path, NodeKind::Sparkline { series, glyphs }));
    }
    node.field("speed", format!("{} Kb/sec", stats.speed));
    for (key, value) in stats.rtp.display_fields() {
        node.field(&key, format_value(&value));
    }
    node
}

fn record_section(path: String, title: &str, record: &StatsRecord) -> PanelNode {
    let mut node = PanelNode::section(path, title);
    for (key, value) in record.display_fields() {
        node.field(&key, format_value(&value));
    }
    node
}

// ============================================================================
// Log column
// ============================================================================

fn log_column(events: &EventLog, locale: Locale) -> PanelNode {
    let mut root = PanelNode::section("log".to_string(), locale.message(i18n::LOG_SECTION));
    let total = events.len();
    for (i, event) in events.newest_first().enumerate() {
        // index from the oldest end keeps paths stable while new events arrive
        let path = root.child_path(&format!("#{}", total - i));
        root.push(PanelNode::leaf(
            path,
            NodeKind::Event {
                level: event.level,
                tag: event.tag.clone(),
                msg: event.msg.clone(),
            },
        ));
    }
    root
}

// ============================================================================
// Remote column
// ============================================================================

fn remote_column(snapshot: &PanelSnapshot, locale: Locale) -> PanelNode {
    let mut root = PanelNode::section("remote".to_string(), locale.message(i18n::REMOTE_SECTION));
    for (transport_id, transport) in &snapshot.server.transports {
        let path = root.child_path(transport_id);
        root.push(server_transport_section(path, transport_id, transport));
    }
    root
}

fn server_transport_section(path: String, id: &str, transport: &ServerTransportStats) -> PanelNode {
    let mut node = PanelNode::section(path, format!("{} Transport", transport.name))
        .with_help(HelpLink::StatsReport);
    node.field("id", id);

    for (i, stat) in transport.stats.iter().enumerate() {
        let path = node.child_path(&format!("stats{}", i));
        node.push(server_stat_section(path, "Stats".to_string(), stat));
    }

    for (key, title, streams) in [
        ("producers", "Producer Stats", &transport.producers),
        ("consumers", "Consumer Stats", &transport.consumers),
    ] {
        let mut group =
            PanelNode::section(node.child_path(key), title).with_help(HelpLink::StatsReport);
        for (stream_id, stats) in streams {
            for (i, stat) in stats.iter().enumerate() {
                let kind = stat.get("kind").map(format_value).unwrap_or_default();
                let path = group.child_path(&format!("{}:{}", stream_id, i));
                group.push(server_stat_section(path, format!("{} stats", kind), stat));
            }
        }
        if !group.children.is_empty() {
            node.push(group);
        }
    }
    node
}

fn server_stat_section(path: String, title: String, stat: &ServerStat) -> PanelNode {
    let mut node = PanelNode::section(path, title);
    for (key, value) in stat {
        node.field(key, format_value(value));
    }
    node
}

// ============================================================================
// Flattening
// ============================================================================

/// Paths of collapsed sections. Sections start expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseState {
    collapsed: HashSet<String>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the section at `path` is folded.
    pub fn is_collapsed(&self, path: &str) -> bool {
        self.collapsed.contains(path)
    }

    /// Flip a section; returns true when it is now collapsed.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.collapsed.remove(path) {
            false
        } else {
            self.collapsed.insert(path.to_string());
            true
        }
    }
}

/// A visible row of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatRow<'a> {
    pub node: &'a PanelNode,
    pub depth: usize,
    /// Help link of the nearest enclosing section
    pub help: Option<HelpLink>,
}

/// Visible rows of `root` in display order, skipping collapsed subtrees.
pub fn flatten<'a>(root: &'a PanelNode, collapse: &CollapseState) -> Vec<FlatRow<'a>> {
    let mut rows = Vec::new();
    flatten_into(root, collapse, 0, None, &mut rows);
    rows
}

fn flatten_into<'a>(
    node: &'a PanelNode,
    collapse: &CollapseState,
    depth: usize,
    inherited: Option<HelpLink>,
    rows: &mut Vec<FlatRow<'a>>,
) {
    let help = node.help().or(inherited);
    rows.push(FlatRow { node, depth, help });
    if node.is_section() && collapse.is_collapsed(&node.path) {
        return;
    }
    for child in &node.children {
        flatten_into(child, collapse, depth + 1, help, rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RtcEvent;
    use crate::models::{CodecInfo, ServerStats};
    use crate::stats::{RtpCounters, SampleWindow, StatsType, StreamDirection};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn track(kind: &str) -> TrackInfo {
        TrackInfo {
            id: format!("{}-track", kind),
            enabled: true,
            kind: kind.to_string(),
            muted: false,
            ready_state: "live".to_string(),
        }
    }

    fn snapshot() -> PanelSnapshot {
        let mut snapshot = PanelSnapshot::empty();
        snapshot.device = Some(DeviceInfo {
            loaded: true,
            codecs: vec![CodecInfo::new("audio/opus", 48_000)],
        });
        snapshot.signaling = SignalingInfo { connected: true };
        snapshot.send_transport = Some(TransportSnapshot {
            direction: TransportDirection::Send,
            id: "send-1".into(),
            opened: true,
            state: "connected".into(),
            producers: vec![ProducerInfo {
                id: "mic".into(),
                kind: "audio".into(),
                paused: false,
                track: Some(track("audio")),
            }],
            consumers: vec![],
            candidates: Some(SelectedCandidates {
                local: Some(
                    StatsRecord::new("L1", StatsType::LocalCandidate).with_field("port", 5000),
                ),
                remote: None,
            }),
        });
        snapshot.recv_transport = Some(TransportSnapshot {
            direction: TransportDirection::Receive,
            id: "recv-1".into(),
            opened: true,
            state: "connecting".into(),
            producers: vec![],
            consumers: vec![ConsumerView {
                id: "c1".into(),
                opened: true,
                peer_id: "p1".into(),
                name: "Alice".into(),
                track: Some(track("video")),
            }],
            candidates: None,
        });
        let window = SampleWindow::first(RtpCounters::default());
        snapshot.streams.insert(
            "mic".into(),
            StreamStats {
                direction: StreamDirection::Outbound,
                rtp: StatsRecord::new("out", StatsType::OutboundRtp).with_field("jitter", 0.123),
                window,
                speed: "8.00".into(),
            },
        );
        snapshot
    }

    fn titles(node: &PanelNode) -> Vec<&str> {
        node.children.iter().filter_map(|c| c.title()).collect()
    }

    fn field<'a>(node: &'a PanelNode, key: &str) -> Option<&'a str> {
        node.children.iter().find_map(|c| match &c.kind {
            NodeKind::Field { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    fn button(node: &PanelNode) -> Option<(&str, PanelAction, bool)> {
        node.children.iter().find_map(|c| match &c.kind {
            NodeKind::Button {
                label,
                action,
                enabled,
            } => Some((label.as_str(), *action, *enabled)),
            _ => None,
        })
    }

    #[test]
    fn test_local_column_structure() {
        let tree = PanelTree::build(&snapshot(), &EventLog::new(), Locale::En, true);
        assert_eq!(
            titles(&tree.local),
            vec!["Device", "Signaling", "Send Transport", "Receive Transport"]
        );

        let device = tree.local.find("local/device").unwrap();
        assert_eq!(field(device, "codecs"), Some("[audio/opus/48000]"));
        assert_eq!(device.help(), Some(HelpLink::Device));
    }

    #[test]
    fn test_restart_button_enabled_only_when_connected() {
        let tree = PanelTree::build(&snapshot(), &EventLog::new(), Locale::En, true);
        let send = tree.local.find("local/send").unwrap();
        assert_eq!(
            button(send),
            Some(("Restart ICE", PanelAction::RestartIce(TransportDirection::Send), true))
        );
        let recv = tree.local.find("local/recv").unwrap();
        assert!(!button(recv).unwrap().2);
    }

    #[test]
    fn test_signaling_button_follows_state() {
        let mut snap = snapshot();
        let tree = PanelTree::build(&snap, &EventLog::new(), Locale::Es, true);
        let signaling = tree.local.find("local/signaling").unwrap();
        assert_eq!(
            button(signaling),
            Some(("Desconectar", PanelAction::DisconnectSignaling, true))
        );

        snap.signaling.connected = false;
        let tree = PanelTree::build(&snap, &EventLog::new(), Locale::En, true);
        let signaling = tree.local.find("local/signaling").unwrap();
        assert_eq!(button(signaling).unwrap().1, PanelAction::ConnectSignaling);
        assert_eq!(field(signaling, "connected"), Some("false"));
    }

    #[test]
    fn test_producer_panel_has_track_and_stats() {
        let tree = PanelTree::build(&snapshot(), &EventLog::new(), Locale::En, true);
        let producer = tree.local.find("local/send/producers/mic").unwrap();
        assert_eq!(producer.title(), Some("audio producer"));
        assert_eq!(titles(producer), vec!["track", "stats"]);

        let stats = tree.local.find("local/send/producers/mic/stats").unwrap();
        assert_eq!(field(stats, "speed"), Some("8.00 Kb/sec"));
        assert_eq!(field(stats, "type"), Some("outbound-rtp"));
        assert_eq!(field(stats, "jitter"), Some("0.12"));
        assert!(stats
            .children
            .iter()
            .any(|c| matches!(c.kind, NodeKind::Sparkline { series: Series::Bytes, .. })));
    }

    #[test]
    fn test_consumers_grouped_under_peer_name() {
        let tree = PanelTree::build(&snapshot(), &EventLog::new(), Locale::En, true);
        let peer = tree.local.find("local/recv/peer:p1").unwrap();
        match &peer.kind {
            NodeKind::Section {
                title, subtitle, ..
            } => {
                assert_eq!(title, "Alice");
                assert_eq!(subtitle.as_deref(), Some("peerId: p1"));
            }
            other => panic!("unexpected node {:?}", other),
        }
        let consumer = tree.local.find("local/recv/peer:p1/c1").unwrap();
        assert_eq!(consumer.title(), Some("video consumer"));
        // no stream stats for c1 yet
        assert_eq!(titles(consumer), vec!["track"]);
    }

    #[test]
    fn test_candidates_only_listed_when_present() {
        let tree = PanelTree::build(&snapshot(), &EventLog::new(), Locale::En, true);
        let candidates = tree.local.find("local/send/candidates").unwrap();
        assert_eq!(titles(candidates), vec!["Local candidate"]);
        assert!(tree.local.find("local/recv/candidates").is_none());
    }

    #[test]
    fn test_waiting_placeholder() {
        let tree = PanelTree::build(&PanelSnapshot::empty(), &EventLog::new(), Locale::En, false);
        assert_eq!(tree.local.children.len(), 1);
        assert_eq!(
            tree.local.children[0].kind,
            NodeKind::Note("Waiting for data...".to_string())
        );
    }

    #[test]
    fn test_log_newest_first() {
        let mut log = EventLog::new();
        log.push(RtcEvent::info("Signaling", "connected"));
        log.push(RtcEvent::error("Transport", "ICE failed"));
        let tree = PanelTree::build(&snapshot(), &log, Locale::En, true);

        assert_eq!(tree.log.title(), Some("Log"));
        match &tree.log.children[0].kind {
            NodeKind::Event { level, tag, msg } => {
                assert_eq!(*level, EventLevel::Error);
                assert_eq!(tag, "Transport");
                assert_eq!(msg, "ICE failed");
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_remote_column() {
        let mut snap = snapshot();
        let stat = |v: serde_json::Value| match v {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let mut producers = BTreeMap::new();
        producers.insert(
            "prod-1".to_string(),
            vec![stat(json!({"kind": "audio", "score": 10}))],
        );
        let mut transports = BTreeMap::new();
        transports.insert(
            "t-1".to_string(),
            ServerTransportStats {
                name: "Send".into(),
                stats: vec![stat(json!({"type": "webrtc-transport", "rtt": 12.5}))],
                producers,
                consumers: BTreeMap::new(),
            },
        );
        snap.server = ServerStats { transports };

        let tree = PanelTree::build(&snap, &EventLog::new(), Locale::Es, true);
        assert_eq!(tree.remote.title(), Some("Remoto"));
        let transport = tree.remote.find("remote/t-1").unwrap();
        assert_eq!(transport.title(), Some("Send Transport"));
        assert_eq!(field(transport, "id"), Some("t-1"));
        assert_eq!(titles(transport), vec!["Stats", "Producer Stats"]);

        let stats = transport.find("remote/t-1/stats0").unwrap();
        assert_eq!(field(stats, "rtt"), Some("12.50"));
        let producer = transport.find("remote/t-1/producers/prod-1:0").unwrap();
        assert_eq!(producer.title(), Some("audio stats"));
    }

    #[test]
    fn test_flatten_skips_collapsed_sections() {
        let tree = PanelTree::build(&snapshot(), &EventLog::new(), Locale::En, true);
        let mut collapse = CollapseState::new();
        let expanded = flatten(&tree.local, &collapse).len();

        assert!(collapse.toggle("local/send"));
        let rows = flatten(&tree.local, &collapse);
        assert!(rows.len() < expanded);
        assert!(rows.iter().any(|r| r.node.path == "local/send"));
        assert!(!rows.iter().any(|r| r.node.path.starts_with("local/send/")));

        assert!(!collapse.toggle("local/send"));
        assert_eq!(flatten(&tree.local, &collapse).len(), expanded);
    }

    #[test]
    fn test_rows_inherit_help_link() {
        let tree = PanelTree::build(&snapshot(), &EventLog::new(), Locale::En, true);
        let rows = flatten(&tree.local, &CollapseState::new());
        let track = rows
            .iter()
            .find(|r| r.node.path == "local/send/producers/mic/track")
            .unwrap();
        assert_eq!(track.help, Some(HelpLink::Producer));
        assert_eq!(
            track.help.unwrap().url(),
            "https://mediasoup.org/documentation/v3/libmediasoupclient/api/#Producer"
        );
    }
}
