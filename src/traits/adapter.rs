//! The media adapter capability.
//!
//! The panel never owns the WebRTC machinery. It reads state from, and
//! forwards user actions to, whatever implements [`MediaAdapter`]. Injecting
//! it as `Arc<dyn MediaAdapter>` lets tests substitute
//! [`MockAdapter`](crate::adapters::mock::MockAdapter).

use async_trait::async_trait;
use std::fmt;
use tokio::sync::mpsc;

use crate::error::AdapterResult;
use crate::events::RtcEvent;
use crate::models::{AdapterState, ServerStats, TransportDirection};
use crate::stats::StatsReport;

/// Object whose `getStats()` is requested.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatsTarget {
    Transport(TransportDirection),
    Producer(String),
    Consumer(String),
}

impl fmt::Display for StatsTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsTarget::Transport(direction) => write!(f, "{} transport", direction),
            StatsTarget::Producer(id) => write!(f, "producer {}", id),
            StatsTarget::Consumer(id) => write!(f, "consumer {}", id),
        }
    }
}

#[async_trait]
pub trait MediaAdapter: Send + Sync {
    /// Plain fields: device, signaling, transports and active streams.
    async fn state(&self) -> AdapterResult<AdapterState>;

    /// Server-side statistics, passed through unmodified.
    async fn server_stats(&self) -> AdapterResult<ServerStats>;

    /// Raw stats report of a transport, producer or consumer.
    async fn stats(&self, target: &StatsTarget) -> AdapterResult<StatsReport>;

    async fn restart_send_ice(&self) -> AdapterResult<()>;

    async fn restart_recv_ice(&self) -> AdapterResult<()>;

    /// Open the signaling channel.
    async fn connect(&self) -> AdapterResult<()>;

    /// Close the signaling channel.
    async fn disconnect(&self) -> AdapterResult<()>;

    /// Adapter event feed for the log panel. Taken once; later calls get `None`.
    fn take_event_receiver(&self) -> Option<mpsc::UnboundedReceiver<RtcEvent>> {
        None
    }
}
