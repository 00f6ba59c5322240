//! UI rendering for the debug panel
//!
//! Three bordered columns and a footer:
//!
//! ```text
//! ╭ Local ──────────╮╭ Log ───╮╭ Remote ─────────╮
//! │ ▾ Device [?]    ││ [ICE] …││ ▾ Send Transport│
//! │   loaded: true  ││        ││   id: …         │
//! ╰─────────────────╯╰────────╯╰─────────────────╯
//!  ↑/↓ move  Tab column  Enter toggle/press  …
//! ```
//!
//! Everything drawn comes from [`PanelTree`], rebuilt by the app whenever
//! the snapshot, the event log or the locale changes.

mod columns;
mod format;
mod layout;
mod sparkline;
mod theme;
mod tree;

pub use columns::{render_column, row_line};
pub use format::{fit_width, format_value};
pub use layout::{breakpoints, LayoutContext, FOOTER_HEIGHT};
pub use sparkline::{sparkline, window_lines};
pub use theme::*;
pub use tree::{
    flatten, CollapseState, Column, FlatRow, HelpLink, NodeKind, PanelAction, PanelNode,
    PanelTree, Series, MDN_DOC_BASE_URL, MEDIASOUP_DOC_BASE_URL,
};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::i18n;

/// Render the whole panel
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let ctx = LayoutContext::from_rect(area);
    if ctx.is_too_small() {
        frame.render_widget(
            Paragraph::new("Terminal too small").style(Style::default().fg(COLOR_DIM)),
            area,
        );
        return;
    }

    let (body, footer) = ctx.body_and_footer(area);
    for (column, rect) in ctx.column_areas(body, app.focus) {
        render_column(frame, rect, app, column);
    }
    render_footer(frame, footer, app);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let localizer = app.localizer();
    let mut spans = Vec::new();
    if app.paused {
        spans.push(Span::styled(
            format!(" {} ", localizer.t(i18n::PAUSED_BADGE)),
            Style::default()
                .fg(COLOR_PAUSED)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ));
        spans.push(Span::raw(" "));
    }
    match &app.status {
        Some(status) => spans.push(Span::styled(
            fit_width(status, area.width as usize),
            Style::default().fg(COLOR_LOG_ERROR),
        )),
        None => spans.push(Span::styled(
            localizer.t(i18n::HELP_FOOTER).to_string(),
            Style::default().fg(COLOR_DIM),
        )),
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
