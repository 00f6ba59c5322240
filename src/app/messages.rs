//! AppMessage enum for async communication within the application.

use crate::events::RtcEvent;
use crate::i18n::Locale;
use crate::ui::PanelAction;

/// Messages delivered to the UI loop from background tasks and listeners
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    /// The poller published a new snapshot
    StateChanged { sequence: u64 },
    /// The display locale changed
    LocaleChanged(Locale),
    /// The adapter reported an event for the log column
    Rtc(RtcEvent),
    /// A button action returned from the adapter
    ActionFinished {
        action: PanelAction,
        /// Error text on failure
        error: Option<String>,
    },
}
