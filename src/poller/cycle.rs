//! One poll cycle: read the adapter, derive stream stats, build a snapshot.

use chrono::Utc;
use std::collections::BTreeMap;

use crate::error::{PollError, PollStage};
use crate::models::{
    AdapterState, ConsumerView, PanelSnapshot, StreamStats, TransportDirection,
    TransportSnapshot, UNKNOWN_PEER_NAME,
};
use crate::stats::{
    selected_candidates, RtpCounters, SampleWindow, StatsType, StreamDirection,
};
use crate::traits::{MediaAdapter, Roster, StatsTarget};

/// A stream whose RTP counters are tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedStream {
    pub id: String,
    pub target: StatsTarget,
    pub direction: StreamDirection,
}

/// Streams of interest, in fetch order: microphone, camera, then consumers.
pub fn tracked_streams(state: &AdapterState) -> Vec<TrackedStream> {
    let producers = [&state.mic_producer, &state.video_producer]
        .into_iter()
        .flatten()
        .map(|id| TrackedStream {
            id: id.clone(),
            target: StatsTarget::Producer(id.clone()),
            direction: StreamDirection::Outbound,
        });
    let consumers = state.consumers.iter().map(|id| TrackedStream {
        id: id.clone(),
        target: StatsTarget::Consumer(id.clone()),
        direction: StreamDirection::Inbound,
    });
    producers.chain(consumers).collect()
}

fn rtp_type(direction: StreamDirection) -> StatsType {
    match direction {
        StreamDirection::Outbound => StatsType::OutboundRtp,
        StreamDirection::Inbound => StatsType::InboundRtp,
    }
}

fn peer_name(roster: &dyn Roster, state: &AdapterState, peer_id: &str) -> String {
    roster
        .display_name(peer_id)
        .or_else(|| state.presences.get(peer_id).cloned())
        .unwrap_or_else(|| UNKNOWN_PEER_NAME.to_string())
}

async fn transport_snapshot(
    adapter: &dyn MediaAdapter,
    roster: &dyn Roster,
    state: &AdapterState,
    direction: TransportDirection,
) -> Result<Option<TransportSnapshot>, PollError> {
    let Some(info) = state.transport(direction) else {
        return Ok(None);
    };
    let opened = !info.closed;

    let candidates = if opened {
        let target = StatsTarget::Transport(direction);
        let report = adapter.stats(&target).await.stage(&target.to_string())?;
        Some(selected_candidates(&report))
    } else {
        None
    };

    let consumers = info
        .consumers
        .iter()
        .map(|consumer| ConsumerView {
            id: consumer.id.clone(),
            opened: !consumer.closed,
            peer_id: consumer.peer_id.clone(),
            name: peer_name(roster, state, &consumer.peer_id),
            track: consumer.track.clone(),
        })
        .collect();

    Ok(Some(TransportSnapshot {
        direction,
        id: info.id.clone(),
        opened,
        state: info.connection_state.clone(),
        producers: info.producers.clone(),
        consumers,
        candidates,
    }))
}

async fn stream_stats(
    adapter: &dyn MediaAdapter,
    stream: &TrackedStream,
    previous: Option<&SampleWindow>,
) -> Result<StreamStats, PollError> {
    let report = adapter
        .stats(&stream.target)
        .await
        .stage(&stream.target.to_string())?;
    let rtp = report.first_or_empty(rtp_type(stream.direction));
    let window = SampleWindow::observe(previous, RtpCounters::from_record(&rtp));
    let speed = window.speed(stream.direction);

    Ok(StreamStats {
        direction: stream.direction,
        rtp,
        window,
        speed,
    })
}

/// Assemble a full snapshot.
///
/// Sample windows continue from `previous`. Streams missing from this cycle
/// are not carried over. The first adapter error aborts the whole cycle.
pub async fn collect_snapshot(
    adapter: &dyn MediaAdapter,
    roster: &dyn Roster,
    previous: &PanelSnapshot,
) -> Result<PanelSnapshot, PollError> {
    let state = adapter.state().await.stage("adapter state")?;
    let server = adapter.server_stats().await.stage("server stats")?;

    let send_transport =
        transport_snapshot(adapter, roster, &state, TransportDirection::Send).await?;
    let recv_transport =
        transport_snapshot(adapter, roster, &state, TransportDirection::Receive).await?;

    let mut streams = BTreeMap::new();
    for stream in tracked_streams(&state) {
        let stats = stream_stats(adapter, &stream, previous.window(&stream.id)).await?;
        streams.insert(stream.id, stats);
    }

    Ok(PanelSnapshot {
        taken_at: Utc::now(),
        device: state.device,
        signaling: state.signaling,
        server,
        send_transport,
        recv_transport,
        streams,
    })
}
