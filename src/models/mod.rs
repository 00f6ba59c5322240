//! Read-only projections of media adapter state, and the published snapshot.

mod device;
mod server;
mod snapshot;
mod transport;

pub use device::{CodecInfo, DeviceInfo, SignalingInfo};
pub use server::{ServerStat, ServerStats, ServerTransportStats};
pub use snapshot::{
    ConsumerView, PanelSnapshot, PeerGroup, StreamStats, TransportSnapshot, UNKNOWN_PEER_NAME,
};
pub use transport::{
    AdapterState, ConsumerInfo, ProducerInfo, TrackInfo, TransportDirection, TransportInfo,
};
