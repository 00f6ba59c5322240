//! Device and signaling projections.

use serde::{Deserialize, Serialize};

/// A codec the device can receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodecInfo {
    pub mime_type: String,
    pub clock_rate: u32,
}

impl CodecInfo {
    pub fn new(mime_type: impl Into<String>, clock_rate: u32) -> Self {
        Self {
            mime_type: mime_type.into(),
            clock_rate,
        }
    }

    /// `[audio/opus/48000]`
    pub fn label(&self) -> String {
        format!("[{}/{}]", self.mime_type, self.clock_rate)
    }
}

/// The media device of the adapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(default)]
    pub loaded: bool,
    #[serde(default)]
    pub codecs: Vec<CodecInfo>,
}

impl DeviceInfo {
    /// Codecs rendered as `[mime/clockRate]`.
    pub fn codec_labels(&self) -> Vec<String> {
        self.codecs.iter().map(CodecInfo::label).collect()
    }
}

/// Signaling channel state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalingInfo {
    #[serde(default)]
    pub connected: bool,
}
