//! Column rendering: one bordered list per column.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::events::EventLevel;

use super::format::fit_width;
use super::theme::*;
use super::tree::{Column, FlatRow, NodeKind, Series};

const INDENT: usize = 2;

fn level_color(level: EventLevel) -> ratatui::style::Color {
    match level {
        EventLevel::Error => COLOR_LOG_ERROR,
        EventLevel::Warn => COLOR_LOG_WARN,
        _ => COLOR_LOG_DEFAULT,
    }
}

/// Styled line for one row, fitted to `width` cells.
pub fn row_line(row: &FlatRow<'_>, collapsed: bool, width: usize) -> Line<'static> {
    let indent = " ".repeat(row.depth.saturating_sub(1) * INDENT);
    let avail = width.saturating_sub(indent.width());
    let mut spans = vec![Span::raw(indent)];

    match &row.node.kind {
        NodeKind::Section {
            title,
            subtitle,
            help,
        } => {
            let marker = if collapsed { "▸ " } else { "▾ " };
            spans.push(Span::styled(marker, Style::default().fg(COLOR_DIM)));
            spans.push(Span::styled(
                fit_width(title, avail.saturating_sub(2)),
                Style::default()
                    .fg(COLOR_TITLE)
                    .add_modifier(Modifier::BOLD),
            ));
            if let Some(subtitle) = subtitle {
                spans.push(Span::styled(
                    format!("  {}", subtitle),
                    Style::default().fg(COLOR_DIM),
                ));
            }
            if help.is_some() {
                spans.push(Span::styled(" [?]", Style::default().fg(COLOR_HELP)));
            }
        }
        NodeKind::Field { key, value } => {
            let label = format!("{}: ", key);
            let room = avail.saturating_sub(label.width());
            spans.push(Span::styled(label, Style::default().fg(COLOR_KEY)));
            spans.push(Span::styled(
                fit_width(value, room),
                Style::default().fg(COLOR_VALUE),
            ));
        }
        NodeKind::Button {
            label,
            enabled,
            ..
        } => {
            let style = if *enabled {
                Style::default()
                    .fg(COLOR_BUTTON)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(COLOR_BUTTON_DISABLED)
                    .add_modifier(Modifier::CROSSED_OUT)
            };
            spans.push(Span::styled(format!("[ {} ]", label), style));
        }
        NodeKind::Sparkline { series, glyphs } => {
            let (label, color) = match series {
                Series::Bytes => ("bytes   ", COLOR_SPARK_BYTES),
                Series::Packets => ("packets ", COLOR_SPARK_PACKETS),
            };
            spans.push(Span::styled(label, Style::default().fg(COLOR_DIM)));
            spans.push(Span::styled(glyphs.clone(), Style::default().fg(color)));
        }
        NodeKind::Event { level, tag, msg } => {
            let tag = format!("[{}] ", tag);
            let room = avail.saturating_sub(tag.width());
            spans.push(Span::styled(tag, Style::default().fg(COLOR_LOG_TAG)));
            spans.push(Span::styled(
                fit_width(msg, room),
                Style::default().fg(level_color(*level)),
            ));
        }
        NodeKind::Note(text) => {
            spans.push(Span::styled(
                fit_width(text, avail),
                Style::default()
                    .fg(COLOR_DIM)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
    }
    Line::from(spans)
}

/// Render one column into `area`.
pub fn render_column(frame: &mut Frame, area: Rect, app: &App, column: Column) {
    let focused = app.focus == column;
    let title = app
        .tree()
        .column(column)
        .title()
        .unwrap_or_default()
        .to_string();

    let border_color = if focused {
        COLOR_BORDER_FOCUSED
    } else {
        COLOR_BORDER
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(COLOR_TITLE)
                .add_modifier(Modifier::BOLD),
        ));

    let width = area.width.saturating_sub(2) as usize;
    let rows = app.rows(column);
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let collapsed = app.collapse.is_collapsed(&row.node.path);
            ListItem::new(row_line(row, collapsed, width))
        })
        .collect();

    let highlight = if focused {
        Style::default().bg(COLOR_SELECTED_BG)
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight);

    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(app.selected_index(column)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
