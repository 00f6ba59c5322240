//! WebRTC statistics: records, candidate selection and rolling windows.

mod candidates;
mod record;
mod window;

pub use candidates::{selected_candidates, SelectedCandidates};
pub use record::{StatsRecord, StatsReport, StatsType};
pub use window::{
    format_speed, DeltaSample, RtpCounters, SampleWindow, StreamDirection, WINDOW_LEN,
};
