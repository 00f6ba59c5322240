//! rtc-debug-panel - a terminal debug panel for WebRTC media sessions
//!
//! A [`poller::StatsPoller`] reads a [`traits::MediaAdapter`] every 500ms,
//! derives per-stream rolling windows and speeds, and publishes a
//! [`models::PanelSnapshot`] into a [`store::SnapshotStore`]. The
//! [`app::App`] turns snapshots into a collapsible tree drawn by [`ui`].
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod i18n;
pub mod logging;
pub mod models;
pub mod poller;
pub mod stats;
pub mod store;
pub mod terminal;
pub mod traits;
pub mod ui;
