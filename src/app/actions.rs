//! Button actions, help links and pausing.

use crate::events::RtcEvent;
use crate::models::TransportDirection;
use crate::ui::{NodeKind, PanelAction};

use super::{App, AppMessage};

impl App {
    /// Activate the selected row: sections toggle, enabled buttons fire.
    pub fn activate_selected(&mut self) {
        let (path, action) = match self.selected_row() {
            Some(row) => match &row.node.kind {
                NodeKind::Section { .. } => (row.node.path.clone(), None),
                NodeKind::Button {
                    action,
                    enabled: true,
                    ..
                } => (row.node.path.clone(), Some(*action)),
                _ => return,
            },
            None => return,
        };
        match action {
            Some(action) => self.dispatch(action),
            None => {
                let collapsed = self.collapse.toggle(&path);
                tracing::debug!(path = %path, collapsed, "section toggled");
                self.mark_dirty();
            }
        }
    }

    /// Run `action` against the adapter in the background.
    ///
    /// The result comes back as [`AppMessage::ActionFinished`].
    pub fn dispatch(&mut self, action: PanelAction) {
        tracing::info!(?action, "dispatching panel action");
        let adapter = self.adapter.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = match action {
                PanelAction::RestartIce(TransportDirection::Send) => adapter.restart_send_ice().await,
                PanelAction::RestartIce(TransportDirection::Receive) => {
                    adapter.restart_recv_ice().await
                }
                PanelAction::ConnectSignaling => adapter.connect().await,
                PanelAction::DisconnectSignaling => adapter.disconnect().await,
            };
            let _ = tx.send(AppMessage::ActionFinished {
                action,
                error: result.err().map(|e| e.to_string()),
            });
        });
    }

    /// Open the documentation page of the selected row's section.
    pub fn open_help(&mut self) {
        let Some(url) = self.selected_row().and_then(|r| r.help).map(|h| h.url()) else {
            return;
        };
        match (self.opener)(&url) {
            Ok(()) => tracing::debug!(url = %url, "opened help page"),
            Err(err) => {
                tracing::warn!(url = %url, "failed to open help page: {}", err);
                self.status = Some(format!("{}: {}", url, err));
            }
        }
        self.mark_dirty();
    }

    /// Stop or resume polling. The last snapshot stays on screen while paused.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.start_polling();
        } else {
            self.poller.stop();
            self.paused = true;
        }
        tracing::info!(paused = self.paused, "polling toggled");
        self.mark_dirty();
    }

    /// Switch to the next locale and re-label the panel.
    pub fn cycle_locale(&mut self) {
        self.localizer.cycle();
        self.rebuild_tree();
    }

    pub(super) fn record_action_result(&mut self, action: PanelAction, error: Option<String>) {
        match error {
            None => {
                tracing::info!(?action, "panel action completed");
                self.status = None;
            }
            Some(err) => {
                tracing::warn!(?action, "panel action failed: {}", err);
                self.events
                    .push(RtcEvent::error("Panel", format!("{:?} failed: {}", action, err)));
                self.status = Some(err);
                self.rebuild_tree();
            }
        }
    }
}
