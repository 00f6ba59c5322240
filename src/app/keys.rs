//! Keyboard handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::App;

/// Rows moved by PageUp/PageDown.
const PAGE_ROWS: isize = 10;

impl App {
    /// Handle one key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_ROWS),
            KeyCode::PageDown => self.move_selection(PAGE_ROWS),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::Tab | KeyCode::Right => self.focus_next(),
            KeyCode::BackTab | KeyCode::Left => self.focus_prev(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selected(),
            KeyCode::Char('?') => self.open_help(),
            KeyCode::Char('l') => self.cycle_locale(),
            KeyCode::Char('p') => self.toggle_pause(),
            _ => {}
        }
    }
}
