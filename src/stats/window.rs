//! Rolling per-stream sample window.
//!
//! Every poll cycle reads the raw RTP counters of a stream, turns them into a
//! delta against the previous observation and appends that delta to a fixed
//! size FIFO. The window is immutable from the poller's point of view: each
//! observation produces a fresh window that replaces the old one in the next
//! published snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;

use super::record::StatsRecord;

/// Number of delta samples kept per stream.
pub const WINDOW_LEN: usize = 20;

/// Which byte counter drives the speed figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamDirection {
    /// Local producer, measured on `bytesSent`
    Outbound,
    /// Remote consumer, measured on `bytesReceived`
    Inbound,
}

/// Raw cumulative counters read from one RTP stats record.
///
/// Missing fields read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RtpCounters {
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub packets_sent: u64,
    pub packets_received: u64,
    /// Milliseconds, as reported by the stats source (may be fractional)
    pub timestamp: f64,
}

fn counter(record: &StatsRecord, key: &str) -> u64 {
    match record.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| *v > 0.0).map(|v| v as u64))
            .unwrap_or(0),
        _ => 0,
    }
}

impl RtpCounters {
    /// Read the counters of an `outbound-rtp` or `inbound-rtp` record.
    pub fn from_record(record: &StatsRecord) -> Self {
        Self {
            bytes_sent: counter(record, "bytesSent"),
            bytes_received: counter(record, "bytesReceived"),
            packets_sent: counter(record, "packetsSent"),
            packets_received: counter(record, "packetsReceived"),
            timestamp: record.number("timestamp").unwrap_or(0.0),
        }
    }
}

/// Difference between two consecutive observations of a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaSample {
    pub bytes_sent: i64,
    pub bytes_received: i64,
    pub packets_sent: i64,
    pub packets_received: i64,
    pub time_delta: f64,
}

/// Signed difference, saturating at the `i64` range.
fn delta(current: u64, previous: u64) -> i64 {
    let diff = i128::from(current) - i128::from(previous);
    diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

impl DeltaSample {
    /// `current - previous` for every field.
    pub fn between(previous: &RtpCounters, current: &RtpCounters) -> Self {
        Self {
            bytes_sent: delta(current.bytes_sent, previous.bytes_sent),
            bytes_received: delta(current.bytes_received, previous.bytes_received),
            packets_sent: delta(current.packets_sent, previous.packets_sent),
            packets_received: delta(current.packets_received, previous.packets_received),
            time_delta: current.timestamp - previous.timestamp,
        }
    }

    /// Byte delta of the counter that matters for `direction`.
    pub fn bytes(&self, direction: StreamDirection) -> i64 {
        match direction {
            StreamDirection::Outbound => self.bytes_sent,
            StreamDirection::Inbound => self.bytes_received,
        }
    }

    /// Packet delta for `direction`.
    pub fn packets(&self, direction: StreamDirection) -> i64 {
        match direction {
            StreamDirection::Outbound => self.packets_sent,
            StreamDirection::Inbound => self.packets_received,
        }
    }
}

/// Kilobytes per second, two decimals, `"0.00"` for anything non-finite.
pub fn format_speed(delta_bytes: i64, time_delta_ms: f64) -> String {
    let speed = (delta_bytes as f64 / 1024.0) / (time_delta_ms / 1000.0);
    if !speed.is_finite() {
        return "0.00".to_string();
    }
    let formatted = format!("{:.2}", speed);
    if formatted == "-0.00" {
        return "0.00".to_string();
    }
    formatted
}

/// The rolling history of one stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleWindow {
    last: RtpCounters,
    samples: VecDeque<DeltaSample>,
    capacity: usize,
}

impl SampleWindow {
    /// Window for the first observation of a stream: one all-zero sample.
    pub fn first(counters: RtpCounters) -> Self {
        Self::first_with_capacity(counters, WINDOW_LEN)
    }

    /// Like [`SampleWindow::first`] with a custom length.
    pub fn first_with_capacity(counters: RtpCounters, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut samples = VecDeque::with_capacity(capacity);
        samples.push_back(DeltaSample::default());
        Self {
            last: counters,
            samples,
            capacity,
        }
    }

    /// Produce the window that follows `previous` after observing `counters`.
    ///
    /// Without a previous window this is the first observation.
    pub fn observe(previous: Option<&SampleWindow>, counters: RtpCounters) -> Self {
        match previous {
            Some(prev) => prev.next(counters),
            None => Self::first(counters),
        }
    }

    /// Append the delta to `counters`, dropping the oldest sample when full.
    pub fn next(&self, counters: RtpCounters) -> Self {
        let mut samples = self.samples.clone();
        while samples.len() >= self.capacity {
            samples.pop_front();
        }
        samples.push_back(DeltaSample::between(&self.last, &counters));
        Self {
            last: counters,
            samples,
            capacity: self.capacity,
        }
    }

    /// Counters of the newest observation.
    pub fn last_counters(&self) -> &RtpCounters {
        &self.last
    }

    /// Maximum number of samples kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of real observations held (at most the capacity).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = &DeltaSample> {
        self.samples.iter()
    }

    /// Newest sample.
    pub fn latest(&self) -> Option<&DeltaSample> {
        self.samples.back()
    }

    /// Exactly `capacity` points for graphing, left-padded with zero samples.
    pub fn graph(&self) -> Vec<DeltaSample> {
        let padding = self.capacity.saturating_sub(self.samples.len());
        std::iter::repeat(DeltaSample::default())
            .take(padding)
            .chain(self.samples.iter().copied())
            .collect()
    }

    /// Current speed in Kb/sec, from the newest sample.
    pub fn speed(&self, direction: StreamDirection) -> String {
        match self.latest() {
            Some(sample) => format_speed(sample.bytes(direction), sample.time_delta),
            None => "0.00".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::record::StatsType;

    fn sent(bytes: u64, timestamp: f64) -> RtpCounters {
        RtpCounters {
            bytes_sent: bytes,
            timestamp,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_observation_has_zero_speed() {
        let window = SampleWindow::observe(None, sent(5000, 1000.0));
        assert_eq!(window.len(), 1);
        assert_eq!(window.latest(), Some(&DeltaSample::default()));
        assert_eq!(window.speed(StreamDirection::Outbound), "0.00");
        assert_eq!(window.speed(StreamDirection::Inbound), "0.00");
    }

    #[test]
    fn test_speed_example_eight_kb_per_second() {
        let first = SampleWindow::observe(None, sent(1000, 1000.0));
        let second = SampleWindow::observe(Some(&first), sent(9192, 2000.0));

        let latest = second.latest().unwrap();
        assert_eq!(latest.bytes_sent, 8192);
        assert_eq!(latest.time_delta, 1000.0);
        assert_eq!(second.speed(StreamDirection::Outbound), "8.00");
    }

    #[test]
    fn test_deltas_are_exact_per_field() {
        let prev = RtpCounters {
            bytes_sent: 10,
            bytes_received: 200,
            packets_sent: 3,
            packets_received: 7,
            timestamp: 500.0,
        };
        let cur = RtpCounters {
            bytes_sent: 15,
            bytes_received: 260,
            packets_sent: 4,
            packets_received: 9,
            timestamp: 1000.5,
        };
        let d = DeltaSample::between(&prev, &cur);
        assert_eq!(d.bytes_sent, 5);
        assert_eq!(d.bytes_received, 60);
        assert_eq!(d.packets_sent, 1);
        assert_eq!(d.packets_received, 2);
        assert_eq!(d.time_delta, 500.5);
    }

    #[test]
    fn test_counter_reset_gives_negative_delta() {
        let d = DeltaSample::between(&sent(9000, 10.0), &sent(100, 20.0));
        assert_eq!(d.bytes_sent, -8900);
    }

    #[test]
    fn test_window_holds_min_n_20_samples() {
        let mut window: Option<SampleWindow> = None;
        for n in 1..=25u64 {
            let next = SampleWindow::observe(window.as_ref(), sent(n * 100, n as f64 * 500.0));
            assert_eq!(next.len(), n.min(WINDOW_LEN as u64) as usize);
            assert_eq!(next.graph().len(), WINDOW_LEN);
            window = Some(next);
        }
    }

    #[test]
    fn test_oldest_sample_is_discarded_first() {
        let mut window = SampleWindow::first(sent(0, 0.0));
        for n in 1..=WINDOW_LEN as u64 {
            // delta n*10 on tick n
            let prev = window.last_counters().bytes_sent;
            window = window.next(sent(prev + n * 10, n as f64));
        }
        // 21 observations, the zero first sample is gone
        let deltas: Vec<i64> = window.samples().map(|s| s.bytes_sent).collect();
        assert_eq!(deltas.len(), WINDOW_LEN);
        assert_eq!(deltas[0], 10);
        assert_eq!(deltas[WINDOW_LEN - 1], WINDOW_LEN as i64 * 10);
    }

    #[test]
    fn test_graph_is_left_padded() {
        let window = SampleWindow::first(sent(0, 0.0)).next(sent(2048, 1000.0));
        let graph = window.graph();
        assert_eq!(graph.len(), WINDOW_LEN);
        assert!(graph[..WINDOW_LEN - 1].iter().all(|s| s.bytes_sent == 0));
        assert_eq!(graph[WINDOW_LEN - 1].bytes_sent, 2048);
    }

    #[test]
    fn test_format_speed_always_two_decimals() {
        assert_eq!(format_speed(0, 0.0), "0.00");
        assert_eq!(format_speed(1024, 0.0), "0.00");
        assert_eq!(format_speed(0, 500.0), "0.00");
        assert_eq!(format_speed(1536, 1000.0), "1.50");
        assert_eq!(format_speed(1000, 3000.0), "0.33");
        assert_eq!(format_speed(-2048, 1000.0), "-2.00");
    }

    #[test]
    fn test_inbound_speed_uses_bytes_received() {
        let first = SampleWindow::first(RtpCounters {
            bytes_received: 0,
            timestamp: 0.0,
            ..Default::default()
        });
        let second = first.next(RtpCounters {
            bytes_received: 4096,
            bytes_sent: 999_999,
            timestamp: 500.0,
            ..Default::default()
        });
        assert_eq!(second.speed(StreamDirection::Inbound), "8.00");
    }

    #[test]
    fn test_counters_from_record_default_to_zero() {
        let record = StatsRecord::new("x", StatsType::OutboundRtp)
            .with_field("bytesSent", 4096)
            .with_field("timestamp", 1234.5);
        let counters = RtpCounters::from_record(&record);
        assert_eq!(counters.bytes_sent, 4096);
        assert_eq!(counters.bytes_received, 0);
        assert_eq!(counters.packets_sent, 0);
        assert_eq!(counters.timestamp, 1234.5);
    }

    #[test]
    fn test_small_negative_speed_formats_as_zero() {
        assert_eq!(format_speed(-1, 1000.0), "0.00");
        assert_eq!(format_speed(-2048, 1000.0), "-2.00");
    }

    #[test]
    fn test_deltas_saturate_for_counters_beyond_i64() {
        let huge = u64::MAX;
        assert_eq!(delta(huge, 0), i64::MAX);
        assert_eq!(delta(0, huge), i64::MIN);
        assert_eq!(delta(huge, huge - 5), 5);
        assert_eq!(delta(1u64 << 63, (1u64 << 63) - 1), 1);
    }
}
