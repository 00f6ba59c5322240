//! Responsive layout for the three panel columns.
//!
//! Wide terminals show Local, Log and Remote side by side. Below
//! [`breakpoints::SINGLE_COLUMN_WIDTH`] only the focused column is drawn and
//! Tab pages between them.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::tree::Column;

/// Width/height thresholds in terminal cells.
pub mod breakpoints {
    /// Below this width a single column is shown
    pub const SINGLE_COLUMN_WIDTH: u16 = 90;
    /// Smallest terminal the panel draws into
    pub const MIN_WIDTH: u16 = 30;
    pub const MIN_HEIGHT: u16 = 8;
}

/// Rows reserved below the columns for the key hints.
pub const FOOTER_HEIGHT: u16 = 1;

/// Terminal dimensions plus the layout decisions derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext {
    pub width: u16,
    pub height: u16,
}

impl LayoutContext {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn from_rect(area: Rect) -> Self {
        Self::new(area.width, area.height)
    }

    /// Below the minimum drawable size.
    pub fn is_too_small(&self) -> bool {
        self.width < breakpoints::MIN_WIDTH || self.height < breakpoints::MIN_HEIGHT
    }

    /// Narrow enough that only the focused column is drawn.
    pub fn is_single_column(&self) -> bool {
        self.width < breakpoints::SINGLE_COLUMN_WIDTH
    }

    /// Split `area` into the column body and the footer line.
    pub fn body_and_footer(&self, area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(FOOTER_HEIGHT)])
            .split(area);
        (chunks[0], chunks[1])
    }

    /// Areas of the visible columns, in display order.
    pub fn column_areas(&self, body: Rect, focus: Column) -> Vec<(Column, Rect)> {
        if self.is_single_column() {
            return vec![(focus, body)];
        }
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(20),
                Constraint::Percentage(40),
            ])
            .split(body);
        Column::ALL
            .iter()
            .zip(chunks.iter())
            .map(|(c, r)| (*c, *r))
            .collect()
    }
}
