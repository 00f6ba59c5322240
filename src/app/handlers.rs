//! Message handling for the App.

use super::{App, AppMessage};

impl App {
    /// Handle an incoming async message
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::StateChanged { sequence } => {
                tracing::trace!(sequence, "redrawing for new snapshot");
                self.rebuild_tree();
            }
            AppMessage::LocaleChanged(locale) => {
                tracing::debug!(locale = %locale, "relabelling panel");
                self.rebuild_tree();
            }
            AppMessage::Rtc(event) => {
                tracing::debug!(tag = %event.tag, level = ?event.level, "rtc event: {}", event.msg);
                self.events.push(event);
                self.rebuild_tree();
            }
            AppMessage::ActionFinished { action, error } => {
                self.record_action_result(action, error);
            }
        }
        self.mark_dirty();
    }
}
