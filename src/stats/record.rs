//! Statistics records as reported by `getStats()`-style calls.
//!
//! A record keeps its `id` and `type` discriminator as typed fields and every
//! other field untouched, in the order the adapter reported them, so the panel
//! can show whatever the browser (or the bridge) put in there.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// The `type` discriminator of a stats record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatsType {
    InboundRtp,
    OutboundRtp,
    LocalCandidate,
    RemoteCandidate,
    CandidatePair,
    /// Any other W3C stats type (`transport`, `codec`, `media-source`, ...)
    Other(String),
}

impl StatsType {
    /// W3C type string.
    pub fn as_str(&self) -> &str {
        match self {
            StatsType::InboundRtp => "inbound-rtp",
            StatsType::OutboundRtp => "outbound-rtp",
            StatsType::LocalCandidate => "local-candidate",
            StatsType::RemoteCandidate => "remote-candidate",
            StatsType::CandidatePair => "candidate-pair",
            StatsType::Other(other) => other,
        }
    }

    /// Unknown strings become `Other`.
    pub fn parse(s: &str) -> Self {
        match s {
            "inbound-rtp" => StatsType::InboundRtp,
            "outbound-rtp" => StatsType::OutboundRtp,
            "local-candidate" => StatsType::LocalCandidate,
            "remote-candidate" => StatsType::RemoteCandidate,
            "candidate-pair" => StatsType::CandidatePair,
            other => StatsType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for StatsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatsType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatsType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(StatsType::parse(&raw))
    }
}

/// One keyed statistics record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: StatsType,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl StatsRecord {
    pub fn new(id: impl Into<String>, kind: StatsType) -> Self {
        Self {
            id: id.into(),
            kind,
            fields: Map::new(),
        }
    }

    /// Builder-style field setter, mostly for fakes and tests.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// An empty record of the given type.
    ///
    /// Stands in when a report has no record of the requested type; every
    /// counter read from it is missing.
    pub fn empty(kind: StatsType) -> Self {
        Self::new(String::new(), kind)
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.fields.is_empty()
    }

    /// Raw field value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Numeric field, `None` when absent or not a number.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    /// String field, `None` when missing or not a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Boolean field; missing reads as false.
    pub fn flag(&self, key: &str) -> bool {
        self.fields
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Display rows: `id` and `type` first, then the remaining fields in
    /// reporting order.
    pub fn display_fields(&self) -> Vec<(String, Value)> {
        let mut rows = Vec::with_capacity(self.fields.len() + 2);
        if !self.id.is_empty() {
            rows.push(("id".to_string(), Value::String(self.id.clone())));
        }
        rows.push(("type".to_string(), Value::String(self.kind.to_string())));
        rows.extend(self.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        rows
    }
}

/// The collection returned by one stats call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsReport {
    pub records: Vec<StatsRecord>,
}

impl StatsReport {
    pub fn new(records: Vec<StatsRecord>) -> Self {
        Self { records }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatsRecord> {
        self.records.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record with the given `id`.
    pub fn by_id(&self, id: &str) -> Option<&StatsRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// First record of the given type, in report order.
    pub fn first_of(&self, kind: &StatsType) -> Option<&StatsRecord> {
        self.records.iter().find(|r| &r.kind == kind)
    }

    /// Like [`first_of`](Self::first_of) but falls back to an empty record.
    pub fn first_or_empty(&self, kind: StatsType) -> StatsRecord {
        self.first_of(&kind)
            .cloned()
            .unwrap_or_else(|| StatsRecord::empty(kind))
    }
}

impl FromIterator<StatsRecord> for StatsReport {
    fn from_iter<T: IntoIterator<Item = StatsRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
