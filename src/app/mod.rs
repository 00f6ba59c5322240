//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`AppMessage`] - Messages for async communication
//! - key handling, navigation and button actions in submodules

mod actions;
mod handlers;
mod keys;
mod messages;
mod navigation;

pub use messages::AppMessage;

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::events::EventLog;
use crate::i18n::Localizer;
use crate::poller::StatsPoller;
use crate::store::{SnapshotStore, Subscription};
use crate::traits::MediaAdapter;
use crate::ui::{CollapseState, Column, PanelTree};

/// Opens a documentation URL. Swappable for tests.
pub type LinkOpener = Box<dyn Fn(&str) -> std::io::Result<()> + Send>;

fn open_in_browser(url: &str) -> std::io::Result<()> {
    open::that(url)
}

/// Main application state
pub struct App {
    /// Flag to indicate if the app should quit
    pub should_quit: bool,
    /// Set when visible state changed; the loop redraws and clears it
    pub needs_redraw: bool,
    /// Column receiving navigation keys
    pub focus: Column,
    pub collapse: CollapseState,
    pub events: EventLog,
    /// One-line status shown in the footer (action errors and the like)
    pub status: Option<String>,
    pub paused: bool,
    /// Sender handed to background tasks
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Receiver taken by the UI loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Selected node path per column
    selected: [Option<String>; 3],
    tree: PanelTree,
    store: SnapshotStore,
    localizer: Localizer,
    adapter: Arc<dyn MediaAdapter>,
    poller: StatsPoller,
    opener: LinkOpener,
    event_forwarder: Option<JoinHandle<()>>,
    _subscriptions: Vec<Subscription>,
}

impl App {
    /// Wire the app to its poller and adapter.
    ///
    /// Must be called from within a tokio runtime: adapter events are
    /// forwarded by a spawned task. Polling starts with [`App::start_polling`].
    pub fn new(adapter: Arc<dyn MediaAdapter>, poller: StatsPoller, localizer: Localizer) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let store = poller.store().clone();

        let mut subscriptions = Vec::new();
        let tx = message_tx.clone();
        subscriptions.push(store.subscribe(move |changed| {
            let _ = tx.send(AppMessage::StateChanged {
                sequence: changed.sequence,
            });
        }));
        let tx = message_tx.clone();
        subscriptions.push(localizer.subscribe(move |changed| {
            let _ = tx.send(AppMessage::LocaleChanged(changed.0));
        }));

        let event_forwarder = adapter.take_event_receiver().map(|mut rx| {
            let tx = message_tx.clone();
            tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    if tx.send(AppMessage::Rtc(event)).is_err() {
                        break;
                    }
                }
            })
        });

        let events = EventLog::new();
        let tree = PanelTree::build(&store.current(), &events, localizer.locale(), false);

        Self {
            should_quit: false,
            needs_redraw: true,
            focus: Column::default(),
            collapse: CollapseState::new(),
            events,
            status: None,
            paused: false,
            message_tx,
            message_rx: Some(message_rx),
            selected: [None, None, None],
            tree,
            store,
            localizer,
            adapter,
            poller,
            opener: Box::new(open_in_browser),
            event_forwarder,
            _subscriptions: subscriptions,
        }
    }

    /// Replace the browser launcher.
    pub fn with_link_opener(mut self, opener: LinkOpener) -> Self {
        self.opener = opener;
        self
    }

    /// Request a redraw.
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Leave the event loop after this iteration.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Tree built from the latest snapshot.
    pub fn tree(&self) -> &PanelTree {
        &self.tree
    }

    /// Shared localizer.
    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Snapshot store the poller publishes into.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// True unless paused or shut down.
    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    /// Start (or resume) the poller.
    pub fn start_polling(&mut self) {
        self.poller.start();
        self.paused = false;
    }

    /// Re-project the current snapshot, events and locale.
    pub fn rebuild_tree(&mut self) {
        let has_data = self.store.sequence() > 0;
        self.tree = PanelTree::build(
            &self.store.current(),
            &self.events,
            self.localizer.locale(),
            has_data,
        );
        self.mark_dirty();
    }

    /// Handle every message already queued, without waiting.
    pub fn drain_messages(&mut self) {
        let Some(mut rx) = self.message_rx.take() else {
            return;
        };
        while let Ok(msg) = rx.try_recv() {
            self.handle_message(msg);
        }
        self.message_rx = Some(rx);
    }

    /// Stop polling and background forwarding.
    pub fn shutdown(&mut self) {
        self.poller.stop();
        if let Some(task) = self.event_forwarder.take() {
            task.abort();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}
