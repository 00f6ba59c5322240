//! Color theme constants for the debug panel
//!
//! Defines the minimal dark palette used throughout the UI.

use ratatui::style::Color;

// ============================================================================
// Chrome
// ============================================================================

/// Column borders
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border of the focused column
pub const COLOR_BORDER_FOCUSED: Color = Color::White;

/// Section titles
pub const COLOR_TITLE: Color = Color::White;

/// Dim text (subtitles, placeholders, footer)
pub const COLOR_DIM: Color = Color::DarkGray;

/// Background of the selected row
pub const COLOR_SELECTED_BG: Color = Color::Rgb(30, 34, 52);

/// Help marker next to documented sections
pub const COLOR_HELP: Color = Color::Rgb(0, 122, 204); // blue #007ACC

// ============================================================================
// Key/value rows
// ============================================================================

pub const COLOR_KEY: Color = Color::Gray;

pub const COLOR_VALUE: Color = Color::Cyan;

// ============================================================================
// Buttons
// ============================================================================

pub const COLOR_BUTTON: Color = Color::LightGreen;

pub const COLOR_BUTTON_DISABLED: Color = Color::DarkGray;

// ============================================================================
// Sparklines
// ============================================================================

/// Byte deltas, green as in the browser panel
pub const COLOR_SPARK_BYTES: Color = Color::Rgb(0, 255, 0);

/// Packet deltas
pub const COLOR_SPARK_PACKETS: Color = Color::Rgb(64, 96, 255);

// ============================================================================
// Log levels
// ============================================================================

pub const COLOR_LOG_TAG: Color = Color::Gray;

pub const COLOR_LOG_WARN: Color = Color::Yellow;

pub const COLOR_LOG_ERROR: Color = Color::Red;

pub const COLOR_LOG_DEFAULT: Color = Color::White;

/// Footer badge while polling is paused
pub const COLOR_PAUSED: Color = Color::Yellow;
