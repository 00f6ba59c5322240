//! Shared fixtures for integration tests.

#![allow(dead_code)]

use rtc_debug_panel::adapters::mock::MockAdapter;
use rtc_debug_panel::models::{
    AdapterState, CodecInfo, ConsumerInfo, DeviceInfo, ProducerInfo, SignalingInfo, TrackInfo,
    TransportInfo,
};
use rtc_debug_panel::stats::{StatsRecord, StatsReport, StatsType};
use rtc_debug_panel::traits::StatsTarget;

pub fn track(kind: &str) -> TrackInfo {
    TrackInfo {
        id: format!("{}-track", kind),
        enabled: true,
        kind: kind.to_string(),
        muted: false,
        ready_state: "live".to_string(),
    }
}

/// A connected call: mic producer on the send side, one consumer from
/// peer `p1` on the receive side.
pub fn call_state() -> AdapterState {
    AdapterState {
        device: Some(DeviceInfo {
            loaded: true,
            codecs: vec![CodecInfo::new("audio/opus", 48_000)],
        }),
        signaling: SignalingInfo { connected: true },
        send_transport: Some(TransportInfo {
            id: "send-1".into(),
            closed: false,
            connection_state: "connected".into(),
            producers: vec![ProducerInfo {
                id: "mic".into(),
                kind: "audio".into(),
                paused: false,
                track: Some(track("audio")),
            }],
            consumers: vec![],
        }),
        recv_transport: Some(TransportInfo {
            id: "recv-1".into(),
            closed: false,
            connection_state: "connected".into(),
            producers: vec![],
            consumers: vec![ConsumerInfo {
                id: "c1".into(),
                peer_id: "p1".into(),
                closed: false,
                track: Some(track("video")),
            }],
        }),
        mic_producer: Some("mic".into()),
        video_producer: None,
        consumers: vec!["c1".into()],
        presences: [("p1".to_string(), "Alice".to_string())].into_iter().collect(),
    }
}

pub fn outbound(bytes: u64, timestamp: f64) -> StatsReport {
    StatsReport::new(vec![StatsRecord::new("out-1", StatsType::OutboundRtp)
        .with_field("bytesSent", bytes)
        .with_field("packetsSent", bytes / 1000)
        .with_field("timestamp", timestamp)])
}

pub fn inbound(bytes: u64, timestamp: f64) -> StatsReport {
    StatsReport::new(vec![StatsRecord::new("in-1", StatsType::InboundRtp)
        .with_field("bytesReceived", bytes)
        .with_field("packetsReceived", bytes / 1000)
        .with_field("timestamp", timestamp)])
}

/// Mock adapter primed with [`call_state`] and first-cycle counters.
pub fn call_adapter() -> MockAdapter {
    let adapter = MockAdapter::new();
    adapter.set_state(call_state());
    adapter.set_stats(StatsTarget::Producer("mic".into()), outbound(1_000, 1_000.0));
    adapter.set_stats(StatsTarget::Consumer("c1".into()), inbound(500, 1_000.0));
    adapter
}
