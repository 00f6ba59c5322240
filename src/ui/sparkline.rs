//! Text sparklines for sample windows.

use ratatui::symbols::bar::NINE_LEVELS;

use crate::stats::{SampleWindow, StreamDirection};

fn glyph(level: u64) -> &'static str {
    match level {
        0 => NINE_LEVELS.empty,
        1 => NINE_LEVELS.one_eighth,
        2 => NINE_LEVELS.one_quarter,
        3 => NINE_LEVELS.three_eighths,
        4 => NINE_LEVELS.half,
        5 => NINE_LEVELS.five_eighths,
        6 => NINE_LEVELS.three_quarters,
        7 => NINE_LEVELS.seven_eighths,
        _ => NINE_LEVELS.full,
    }
}

/// One glyph per value, scaled against the largest value.
///
/// Negative values (counter resets) draw as empty.
pub fn sparkline(values: &[i64]) -> String {
    let max = values.iter().copied().max().unwrap_or(0).max(0);
    values
        .iter()
        .map(|&v| {
            if max == 0 || v <= 0 {
                glyph(0)
            } else {
                // non-zero values get at least the lowest bar
                let level = (v as f64 / max as f64 * 8.0).ceil() as u64;
                glyph(level.clamp(1, 8))
            }
        })
        .collect()
}

/// Byte and packet sparklines of a window, padded to its capacity.
pub fn window_lines(window: &SampleWindow, direction: StreamDirection) -> (String, String) {
    let graph = window.graph();
    let bytes: Vec<i64> = graph.iter().map(|s| s.bytes(direction)).collect();
    let packets: Vec<i64> = graph.iter().map(|s| s.packets(direction)).collect();
    (sparkline(&bytes), sparkline(&packets))
}
