//! RTC event log shown in the Log panel.
//!
//! Adapters may push short diagnostic events (ICE restarts, transport state
//! flips, producer pauses). They are kept in a bounded log and rendered
//! newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of events retained.
pub const EVENT_LOG_CAPACITY: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// One adapter event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtcEvent {
    pub level: EventLevel,
    /// Emitting subsystem, e.g. `Transport`, `Signaling`
    pub tag: String,
    pub msg: String,
    #[serde(default = "Utc::now")]
    pub at: DateTime<Utc>,
}

impl RtcEvent {
    pub fn new(level: EventLevel, tag: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            level,
            tag: tag.into(),
            msg: msg.into(),
            at: Utc::now(),
        }
    }

    /// Informational event.
    pub fn info(tag: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(EventLevel::Info, tag, msg)
    }

    /// Warning event.
    pub fn warn(tag: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(EventLevel::Warn, tag, msg)
    }

    /// Error event.
    pub fn error(tag: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(EventLevel::Error, tag, msg)
    }
}

/// Bounded FIFO of events.
#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<RtcEvent>,
    capacity: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }

    /// Log keeping at most `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append, dropping the oldest event when full.
    pub fn push(&mut self, event: RtcEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events, most recent first.
    pub fn newest_first(&self) -> impl Iterator<Item = &RtcEvent> {
        self.events.iter().rev()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
