//! Scriptable in-memory media adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::error::{AdapterError, AdapterResult};
use crate::events::RtcEvent;
use crate::models::{AdapterState, ServerStats};
use crate::stats::StatsReport;
use crate::traits::{MediaAdapter, StatsTarget};

#[derive(Default)]
struct MockState {
    state: AdapterState,
    server: ServerStats,
    reports: HashMap<StatsTarget, StatsReport>,
    failure: Option<AdapterError>,
    delay: Option<Duration>,
    calls: Vec<String>,
    events: Option<mpsc::UnboundedReceiver<RtcEvent>>,
}

/// A [`MediaAdapter`] whose answers are set by the test.
///
/// Clones share state, so a test can keep a handle while the poller owns
/// another.
///
/// ```ignore
/// let adapter = MockAdapter::new();
/// adapter.set_state(state);
/// adapter.set_stats(StatsTarget::Producer("mic".into()), report);
/// adapter.fail_with(AdapterError::Closed); // every call fails until cleared
/// ```
#[derive(Clone, Default)]
pub struct MockAdapter {
    inner: Arc<Mutex<MockState>>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Answer for `state()`.
    pub fn set_state(&self, state: AdapterState) {
        self.lock().state = state;
    }

    /// Mutate the current state in place.
    pub fn update_state(&self, f: impl FnOnce(&mut AdapterState)) {
        f(&mut self.lock().state);
    }

    pub fn set_server_stats(&self, server: ServerStats) {
        self.lock().server = server;
    }

    /// Answer for `stats(target)`.
    pub fn set_stats(&self, target: StatsTarget, report: StatsReport) {
        self.lock().reports.insert(target, report);
    }

    /// Make every following call fail with `err`.
    pub fn fail_with(&self, err: AdapterError) {
        self.lock().failure = Some(err);
    }

    /// Undo [`MockAdapter::fail_with`].
    pub fn clear_failure(&self) {
        self.lock().failure = None;
    }

    /// Delay every `state()` call, to simulate a slow adapter.
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.lock().delay = delay;
    }

    /// Names of the calls made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// How often a call was made.
    pub fn call_count(&self, name: &str) -> usize {
        self.lock().calls.iter().filter(|c| c.as_str() == name).count()
    }

    /// Install an event channel and return its sending side.
    pub fn event_sender(&self) -> mpsc::UnboundedSender<RtcEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().events = Some(rx);
        tx
    }

    fn record(&self, call: impl Into<String>) -> AdapterResult<()> {
        let mut inner = self.lock();
        inner.calls.push(call.into());
        match &inner.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MediaAdapter for MockAdapter {
    async fn state(&self) -> AdapterResult<AdapterState> {
        let delay = self.lock().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.record("state")?;
        Ok(self.lock().state.clone())
    }

    async fn server_stats(&self) -> AdapterResult<ServerStats> {
        self.record("server_stats")?;
        Ok(self.lock().server.clone())
    }

    async fn stats(&self, target: &StatsTarget) -> AdapterResult<StatsReport> {
        self.record(format!("stats:{}", target))?;
        Ok(self.lock().reports.get(target).cloned().unwrap_or_default())
    }

    async fn restart_send_ice(&self) -> AdapterResult<()> {
        self.record("restart_send_ice")
    }

    async fn restart_recv_ice(&self) -> AdapterResult<()> {
        self.record("restart_recv_ice")
    }

    async fn connect(&self) -> AdapterResult<()> {
        self.record("connect")?;
        self.lock().state.signaling.connected = true;
        Ok(())
    }

    async fn disconnect(&self) -> AdapterResult<()> {
        self.record("disconnect")?;
        self.lock().state.signaling.connected = false;
        Ok(())
    }

    fn take_event_receiver(&self) -> Option<mpsc::UnboundedReceiver<RtcEvent>> {
        self.lock().events.take()
    }
}
