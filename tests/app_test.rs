//! App behaviour: navigation, collapsing, buttons, locale and pausing.

mod common;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rtc_debug_panel::adapters::mock::MockAdapter;
use rtc_debug_panel::app::{App, AppMessage};
use rtc_debug_panel::error::AdapterError;
use rtc_debug_panel::events::RtcEvent;
use rtc_debug_panel::i18n::{Locale, Localizer};
use rtc_debug_panel::models::TransportDirection;
use rtc_debug_panel::poller::StatsPoller;
use rtc_debug_panel::store::SnapshotStore;
use rtc_debug_panel::traits::SharedRoster;
use rtc_debug_panel::ui::{Column, NodeKind, PanelAction};
use std::sync::{Arc, Mutex};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

async fn app_with(adapter: &MockAdapter) -> App {
    let poller = StatsPoller::new(
        Arc::new(adapter.clone()),
        Arc::new(SharedRoster::new()),
        SnapshotStore::new(),
    );
    poller.poll_once().await.unwrap();
    let mut app = App::new(Arc::new(adapter.clone()), poller, Localizer::new(Locale::En));
    app.rebuild_tree();
    app
}

async fn next_action_result(app: &mut App) -> (PanelAction, Option<String>) {
    let mut rx = app.message_rx.take().unwrap();
    loop {
        match rx.recv().await.unwrap() {
            AppMessage::ActionFinished { action, error } => {
                app.message_rx = Some(rx);
                app.handle_message(AppMessage::ActionFinished {
                    action,
                    error: error.clone(),
                });
                return (action, error);
            }
            other => app.handle_message(other),
        }
    }
}

#[tokio::test]
async fn test_tree_lists_local_sections() {
    let adapter = common::call_adapter();
    let app = app_with(&adapter).await;

    let titles: Vec<&str> = app
        .tree()
        .local
        .children
        .iter()
        .filter_map(|c| c.title())
        .collect();
    assert_eq!(
        titles,
        vec!["Device", "Signaling", "Send Transport", "Receive Transport"]
    );
    assert!(app.needs_redraw);
}

#[tokio::test]
async fn test_navigation_moves_within_column() {
    let adapter = common::call_adapter();
    let mut app = app_with(&adapter).await;

    assert_eq!(app.selected_row().unwrap().node.path, "local/device");
    app.handle_key_event(key(KeyCode::Down));
    assert_eq!(app.selected_row().unwrap().node.path, "local/device/=loaded");
    app.handle_key_event(key(KeyCode::Char('k')));
    app.handle_key_event(key(KeyCode::Up));
    assert_eq!(app.selected_row().unwrap().node.path, "local/device");

    app.handle_key_event(key(KeyCode::End));
    let last = app.rows(Column::Local).len() - 1;
    assert_eq!(app.selected_index(Column::Local), last);
}

#[tokio::test]
async fn test_tab_cycles_columns() {
    let adapter = common::call_adapter();
    let mut app = app_with(&adapter).await;

    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.focus, Column::Log);
    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.focus, Column::Remote);
    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.focus, Column::Local);
    app.handle_key_event(key(KeyCode::BackTab));
    assert_eq!(app.focus, Column::Remote);
}

#[tokio::test]
async fn test_enter_collapses_and_selection_survives() {
    let adapter = common::call_adapter();
    let mut app = app_with(&adapter).await;
    let expanded = app.rows(Column::Local).len();

    app.select_path("local/send/=state");
    app.select_path("local/send");
    app.handle_key_event(key(KeyCode::Enter));
    assert!(app.collapse.is_collapsed("local/send"));
    assert!(app.rows(Column::Local).len() < expanded);

    // a selection inside a collapsed section falls back to the section
    app.select_path("local/send/=state");
    assert_eq!(app.selected_row().unwrap().node.path, "local/send");

    app.handle_key_event(key(KeyCode::Char(' ')));
    assert_eq!(app.rows(Column::Local).len(), expanded);
}

#[tokio::test]
async fn test_restart_button_calls_adapter() {
    let adapter = common::call_adapter();
    let mut app = app_with(&adapter).await;

    app.select_path("local/send/!restart-ice");
    match &app.selected_row().unwrap().node.kind {
        NodeKind::Button { label, enabled, .. } => {
            assert_eq!(label, "Restart ICE");
            assert!(enabled);
        }
        other => panic!("expected button, got {:?}", other),
    }
    app.handle_key_event(key(KeyCode::Enter));

    let (action, error) = next_action_result(&mut app).await;
    assert_eq!(action, PanelAction::RestartIce(TransportDirection::Send));
    assert!(error.is_none());
    assert_eq!(adapter.call_count("restart_send_ice"), 1);
}

#[tokio::test]
async fn test_disabled_button_does_nothing() {
    let adapter = common::call_adapter();
    adapter.update_state(|s| {
        if let Some(t) = s.recv_transport.as_mut() {
            t.connection_state = "connecting".into();
        }
    });
    let mut app = app_with(&adapter).await;

    app.select_path("local/recv/!restart-ice");
    app.handle_key_event(key(KeyCode::Enter));
    tokio::task::yield_now().await;
    assert_eq!(adapter.call_count("restart_recv_ice"), 0);
}

#[tokio::test]
async fn test_signaling_toggle_and_failure_logging() {
    let adapter = common::call_adapter();
    let mut app = app_with(&adapter).await;

    app.select_path("local/signaling/!signaling");
    app.handle_key_event(key(KeyCode::Enter));
    let (action, _) = next_action_result(&mut app).await;
    assert_eq!(action, PanelAction::DisconnectSignaling);
    assert_eq!(adapter.call_count("disconnect"), 1);

    adapter.fail_with(AdapterError::Closed);
    app.dispatch(PanelAction::ConnectSignaling);
    let (_, error) = next_action_result(&mut app).await;
    assert_eq!(error.as_deref(), Some("adapter closed"));
    assert_eq!(app.status.as_deref(), Some("adapter closed"));
    assert_eq!(app.events.len(), 1);
}

#[tokio::test]
async fn test_locale_key_relabels_buttons() {
    let adapter = common::call_adapter();
    let mut app = app_with(&adapter).await;

    app.handle_key_event(key(KeyCode::Char('l')));
    assert_eq!(app.localizer().locale(), Locale::Es);
    assert_eq!(app.tree().log.title(), Some("Registro"));

    let send = app.tree().local.find("local/send/!restart-ice").unwrap();
    match &send.kind {
        NodeKind::Button { label, .. } => assert_eq!(label, "Reiniciar ICE"),
        other => panic!("expected button, got {:?}", other),
    }
}

#[tokio::test]
async fn test_help_key_opens_section_docs() {
    let adapter = common::call_adapter();
    let opened = Arc::new(Mutex::new(Vec::new()));
    let sink = opened.clone();
    let mut app = app_with(&adapter).await.with_link_opener(Box::new(move |url| {
        sink.lock().unwrap().push(url.to_string());
        Ok(())
    }));

    // fields inherit the link of their section; signaling has none
    app.select_path("local/send/=state");
    app.handle_key_event(key(KeyCode::Char('?')));
    app.select_path("local/signaling");
    app.handle_key_event(key(KeyCode::Char('?')));

    assert_eq!(
        *opened.lock().unwrap(),
        vec!["https://mediasoup.org/documentation/v3/libmediasoupclient/api/#Transport".to_string()]
    );
}

#[tokio::test]
async fn test_pause_stops_and_resumes_polling() {
    let adapter = common::call_adapter();
    let mut app = app_with(&adapter).await;
    app.start_polling();
    assert!(app.is_polling());

    app.handle_key_event(key(KeyCode::Char('p')));
    assert!(app.paused);
    assert!(!app.is_polling());

    app.handle_key_event(key(KeyCode::Char('p')));
    assert!(!app.paused);
    assert!(app.is_polling());
    app.shutdown();
}

#[tokio::test]
async fn test_adapter_events_reach_log_column() {
    let adapter = common::call_adapter();
    let events = adapter.event_sender();
    let mut app = app_with(&adapter).await;

    events.send(RtcEvent::warn("Transport", "ICE disconnected")).unwrap();
    let mut rx = app.message_rx.take().unwrap();
    let msg = rx.recv().await.unwrap();
    app.handle_message(msg);

    assert_eq!(app.events.len(), 1);
    assert_eq!(app.tree().log.children.len(), 1);
}

#[tokio::test]
async fn test_quit_keys() {
    let adapter = common::call_adapter();
    let mut app = app_with(&adapter).await;
    app.handle_key_event(key(KeyCode::Char('q')));
    assert!(app.should_quit);

    let mut app = app_with(&adapter).await;
    app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
}
