//! Panic hook that hands the terminal back before the panic report prints.

use std::panic;

use super::setup::emergency_restore;

/// Chain a terminal-restoring hook in front of the current panic hook.
///
/// Call before [`TerminalManager::new`](super::TerminalManager::new). When
/// color-eyre is in use, install its hooks first so the report is kept.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        emergency_restore();
        previous(info);
    }));
}
