//! Synthetic media adapter for `--demo` runs.
//!
//! Produces a plausible call: one loaded device, a send transport carrying a
//! microphone and a camera, and a receive transport with two remote peers.
//! Byte counters grow with wall-clock time at a wobbling rate so that the
//! speed figures and sparklines move.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tokio::sync::mpsc;

use crate::error::{AdapterError, AdapterResult};
use crate::events::RtcEvent;
use crate::models::{
    AdapterState, CodecInfo, ConsumerInfo, DeviceInfo, ProducerInfo, ServerStats,
    ServerTransportStats, SignalingInfo, TrackInfo, TransportInfo,
};
use crate::stats::{StatsRecord, StatsReport, StatsType};
use crate::traits::{MediaAdapter, StatsTarget};

const MIC_PRODUCER: &str = "prod-mic";
const VIDEO_PRODUCER: &str = "prod-cam";

/// A simulated stream: id, kind, owning peer and mean bytes per second.
struct SimStream {
    id: &'static str,
    kind: &'static str,
    peer: Option<&'static str>,
    rate: f64,
}

const STREAMS: &[SimStream] = &[
    SimStream { id: MIC_PRODUCER, kind: "audio", peer: None, rate: 4_096.0 },
    SimStream { id: VIDEO_PRODUCER, kind: "video", peer: None, rate: 122_880.0 },
    SimStream { id: "cons-alice-audio", kind: "audio", peer: Some("peer-alice"), rate: 3_584.0 },
    SimStream { id: "cons-alice-video", kind: "video", peer: Some("peer-alice"), rate: 94_208.0 },
    SimStream { id: "cons-bob-audio", kind: "audio", peer: Some("peer-bob"), rate: 3_072.0 },
];

struct SimState {
    connected: bool,
    closed: bool,
    events_tx: Option<mpsc::UnboundedSender<RtcEvent>>,
    events_rx: Option<mpsc::UnboundedReceiver<RtcEvent>>,
}

/// In-process [`MediaAdapter`] that needs no browser or media server.
#[derive(Clone)]
pub struct SimulatedAdapter {
    started: Instant,
    inner: Arc<Mutex<SimState>>,
}

impl SimulatedAdapter {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            started: Instant::now(),
            inner: Arc::new(Mutex::new(SimState {
                connected: true,
                closed: false,
                events_tx: Some(tx),
                events_rx: Some(rx),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Stop answering; every later call fails with [`AdapterError::Closed`].
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        inner.events_tx = None;
    }

    fn ensure_open(&self) -> AdapterResult<()> {
        if self.lock().closed {
            Err(AdapterError::Closed)
        } else {
            Ok(())
        }
    }

    fn emit(&self, event: RtcEvent) {
        if let Some(tx) = &self.lock().events_tx {
            let _ = tx.send(event);
        }
    }

    /// Cumulative bytes of a stream after `secs` seconds.
    fn bytes_after(rate: f64, secs: f64) -> u64 {
        // rate * (t + 0.3 * (1 - cos t)) has derivative rate * (1 + 0.3 sin t) > 0
        (rate * (secs + 0.3 * (1.0 - secs.cos()))).max(0.0) as u64
    }

    fn rtp_record(&self, stream: &SimStream) -> StatsRecord {
        let secs = self.started.elapsed().as_secs_f64();
        let bytes = Self::bytes_after(stream.rate, secs);
        let packets = bytes / 1_100 + 1;
        let timestamp = Utc::now().timestamp_millis() as f64;

        let (kind, bytes_key, packets_key) = match stream.peer {
            None => (StatsType::OutboundRtp, "bytesSent", "packetsSent"),
            Some(_) => (StatsType::InboundRtp, "bytesReceived", "packetsReceived"),
        };
        StatsRecord::new(format!("RTP_{}", stream.id), kind)
            .with_field("timestamp", timestamp)
            .with_field("kind", stream.kind)
            .with_field("ssrc", 1_000 + stream.id.len() as u64)
            .with_field(bytes_key, bytes)
            .with_field(packets_key, packets)
    }

    fn transport_report(local_port: u16) -> StatsReport {
        StatsReport::new(vec![
            StatsRecord::new("CP1", StatsType::CandidatePair)
                .with_field("localCandidateId", "LC1")
                .with_field("remoteCandidateId", "RC1")
                .with_field("nominated", true)
                .with_field("state", "succeeded"),
            StatsRecord::new("LC1", StatsType::LocalCandidate)
                .with_field("address", "192.168.1.20")
                .with_field("port", local_port)
                .with_field("protocol", "udp")
                .with_field("candidateType", "host"),
            StatsRecord::new("RC1", StatsType::RemoteCandidate)
                .with_field("address", "203.0.113.7")
                .with_field("port", 40_000)
                .with_field("protocol", "udp")
                .with_field("candidateType", "host"),
        ])
    }

    fn track(stream: &SimStream) -> TrackInfo {
        TrackInfo {
            id: format!("track-{}", stream.id),
            enabled: true,
            kind: stream.kind.to_string(),
            muted: false,
            ready_state: "live".to_string(),
        }
    }
}

impl Default for SimulatedAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaAdapter for SimulatedAdapter {
    async fn state(&self) -> AdapterResult<AdapterState> {
        self.ensure_open()?;
        let connected = self.lock().connected;

        let producers = STREAMS
            .iter()
            .filter(|s| s.peer.is_none())
            .map(|s| ProducerInfo {
                id: s.id.to_string(),
                kind: s.kind.to_string(),
                paused: false,
                track: Some(Self::track(s)),
            })
            .collect();
        let consumers: Vec<ConsumerInfo> = STREAMS
            .iter()
            .filter_map(|s| {
                s.peer.map(|peer| ConsumerInfo {
                    id: s.id.to_string(),
                    peer_id: peer.to_string(),
                    closed: false,
                    track: Some(Self::track(s)),
                })
            })
            .collect();

        let mut presences = BTreeMap::new();
        presences.insert("peer-alice".to_string(), "Alice".to_string());

        Ok(AdapterState {
            device: Some(DeviceInfo {
                loaded: true,
                codecs: vec![
                    CodecInfo::new("audio/opus", 48_000),
                    CodecInfo::new("video/VP8", 90_000),
                    CodecInfo::new("video/H264", 90_000),
                ],
            }),
            signaling: SignalingInfo { connected },
            send_transport: Some(TransportInfo {
                id: "send-transport-1".to_string(),
                closed: false,
                connection_state: "connected".to_string(),
                producers,
                consumers: vec![],
            }),
            recv_transport: Some(TransportInfo {
                id: "recv-transport-1".to_string(),
                closed: false,
                connection_state: "connected".to_string(),
                producers: vec![],
                consumers: consumers.clone(),
            }),
            mic_producer: Some(MIC_PRODUCER.to_string()),
            video_producer: Some(VIDEO_PRODUCER.to_string()),
            consumers: consumers.into_iter().map(|c| c.id).collect(),
            // peer-bob has no presence entry and shows up as unknown
            presences,
        })
    }

    async fn server_stats(&self) -> AdapterResult<ServerStats> {
        self.ensure_open()?;
        let secs = self.started.elapsed().as_secs_f64();
        let mut transports = BTreeMap::new();
        for (id, name) in [
            ("send-transport-1", "Send Transport"),
            ("recv-transport-1", "Receive Transport"),
        ] {
            let stat = json!({
                "type": "webrtc-transport",
                "timestamp": Utc::now().timestamp_millis(),
                "iceState": "completed",
                "dtlsState": "connected",
                "bytesReceived": Self::bytes_after(60_000.0, secs),
                "bytesSent": Self::bytes_after(90_000.0, secs),
            });
            let stats = match stat {
                serde_json::Value::Object(map) => vec![map],
                _ => vec![],
            };
            transports.insert(
                id.to_string(),
                ServerTransportStats {
                    name: name.to_string(),
                    stats,
                    producers: BTreeMap::new(),
                    consumers: BTreeMap::new(),
                },
            );
        }
        Ok(ServerStats { transports })
    }

    async fn stats(&self, target: &StatsTarget) -> AdapterResult<StatsReport> {
        self.ensure_open()?;
        match target {
            StatsTarget::Transport(direction) => Ok(Self::transport_report(match direction {
                crate::models::TransportDirection::Send => 50_001,
                crate::models::TransportDirection::Receive => 50_002,
            })),
            StatsTarget::Producer(id) | StatsTarget::Consumer(id) => STREAMS
                .iter()
                .find(|s| s.id == id)
                .map(|s| StatsReport::new(vec![self.rtp_record(s)]))
                .ok_or_else(|| AdapterError::Unavailable(target.to_string())),
        }
    }

    async fn restart_send_ice(&self) -> AdapterResult<()> {
        self.ensure_open()?;
        self.emit(RtcEvent::info("Transport", "send transport ICE restarted"));
        Ok(())
    }

    async fn restart_recv_ice(&self) -> AdapterResult<()> {
        self.ensure_open()?;
        self.emit(RtcEvent::info("Transport", "receive transport ICE restarted"));
        Ok(())
    }

    async fn connect(&self) -> AdapterResult<()> {
        self.ensure_open()?;
        self.lock().connected = true;
        self.emit(RtcEvent::info("Signaling", "connected"));
        Ok(())
    }

    async fn disconnect(&self) -> AdapterResult<()> {
        self.ensure_open()?;
        self.lock().connected = false;
        self.emit(RtcEvent::warn("Signaling", "disconnected"));
        Ok(())
    }

    fn take_event_receiver(&self) -> Option<mpsc::UnboundedReceiver<RtcEvent>> {
        self.lock().events_rx.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::RtpCounters;

    #[test]
    fn test_bytes_grow_monotonically() {
        let mut last = 0;
        for step in 0..200 {
            let bytes = SimulatedAdapter::bytes_after(4_096.0, step as f64 * 0.25);
            assert!(bytes >= last);
            last = bytes;
        }
        assert!(last > 0);
    }

    #[tokio::test]
    async fn test_state_lists_every_stream() {
        let adapter = SimulatedAdapter::new();
        let state = adapter.state().await.unwrap();

        assert!(state.device.as_ref().unwrap().loaded);
        assert_eq!(state.mic_producer.as_deref(), Some(MIC_PRODUCER));
        assert_eq!(state.consumers.len(), 3);
        assert_eq!(state.recv_transport.unwrap().consumers.len(), 3);
    }

    #[tokio::test]
    async fn test_rtp_stats_carry_counters() {
        let adapter = SimulatedAdapter::new();
        let report = adapter
            .stats(&StatsTarget::Consumer("cons-bob-audio".into()))
            .await
            .unwrap();
        let rtp = report.first_or_empty(StatsType::InboundRtp);
        let counters = RtpCounters::from_record(&rtp);
        assert!(counters.timestamp > 0.0);
        assert!(counters.packets_received >= 1);

        let err = adapter
            .stats(&StatsTarget::Producer("nope".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_signaling_actions_emit_events() {
        let adapter = SimulatedAdapter::new();
        let mut rx = adapter.take_event_receiver().unwrap();
        assert!(adapter.take_event_receiver().is_none());

        adapter.disconnect().await.unwrap();
        assert!(!adapter.state().await.unwrap().signaling.connected);
        assert_eq!(rx.recv().await.unwrap().msg, "disconnected");

        adapter.connect().await.unwrap();
        assert!(adapter.state().await.unwrap().signaling.connected);
    }

    #[tokio::test]
    async fn test_closed_adapter_refuses_calls() {
        let adapter = SimulatedAdapter::new();
        adapter.close();
        assert_eq!(adapter.state().await.unwrap_err(), AdapterError::Closed);
    }
}
