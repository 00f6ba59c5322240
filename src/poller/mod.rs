//! Stats poller.
//!
//! A single repeating timer drives all data fetching. Every tick spawns an
//! independent fetch cycle; cycles may overlap when the adapter is slower
//! than the refresh interval, and whichever finishes last wins.
//!
//! ```text
//!  interval tick ──► spawn cycle ──► adapter.state / server_stats / stats(..)
//!                                         │
//!                                         ▼
//!                         still running & same generation?
//!                              │ yes               │ no
//!                              ▼                   ▼
//!                      store.publish()        discard
//! ```
//!
//! `stop()` cancels the timer only. Cycles already in flight run to the end
//! but are refused at the publish gate.

mod cycle;

pub use cycle::{collect_snapshot, tracked_streams, TrackedStream};

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::error::PollError;
use crate::store::SnapshotStore;
use crate::traits::{MediaAdapter, Roster};

/// Default refresh period.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(500);

struct PollerShared {
    running: AtomicBool,
    generation: AtomicU64,
    /// Held while deciding to publish and while stopping
    gate: Mutex<()>,
}

impl PollerShared {
    fn publish_if_current(&self, generation: u64, publish: impl FnOnce()) -> bool {
        let _gate = self.gate.lock().unwrap_or_else(|p| p.into_inner());
        if self.running.load(Ordering::SeqCst)
            && self.generation.load(Ordering::SeqCst) == generation
        {
            publish();
            true
        } else {
            false
        }
    }
}

#[derive(Clone)]
struct CycleContext {
    adapter: Arc<dyn MediaAdapter>,
    roster: Arc<dyn Roster>,
    store: SnapshotStore,
    shared: Arc<PollerShared>,
}

impl CycleContext {
    async fn run(self, generation: u64) {
        let previous = self.store.current();
        match collect_snapshot(self.adapter.as_ref(), self.roster.as_ref(), &previous).await {
            Ok(snapshot) => {
                let streams = snapshot.streams.len();
                let store = &self.store;
                let published = self
                    .shared
                    .publish_if_current(generation, || {
                        store.publish(snapshot);
                    });
                if published {
                    tracing::trace!(streams, "poll cycle published");
                } else {
                    tracing::debug!(generation, "poller stopped, discarding late cycle result");
                }
            }
            Err(err) => {
                tracing::warn!(
                    stage = %err.stage,
                    code = err.source.error_code(),
                    "Run stats error: {}",
                    err
                );
            }
        }
    }
}

/// Periodically refreshes a [`SnapshotStore`] from a [`MediaAdapter`].
pub struct StatsPoller {
    ctx: CycleContext,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl StatsPoller {
    /// Poller over `adapter`, publishing into `store`. Not started.
    pub fn new(
        adapter: Arc<dyn MediaAdapter>,
        roster: Arc<dyn Roster>,
        store: SnapshotStore,
    ) -> Self {
        Self {
            ctx: CycleContext {
                adapter,
                roster,
                store,
                shared: Arc::new(PollerShared {
                    running: AtomicBool::new(false),
                    generation: AtomicU64::new(0),
                    gate: Mutex::new(()),
                }),
            },
            period: REFRESH_INTERVAL,
            task: None,
        }
    }

    /// Override the refresh period (takes effect on the next `start`).
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period.max(Duration::from_millis(1));
        self
    }

    /// Period between ticks.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Store the cycles publish into.
    pub fn store(&self) -> &SnapshotStore {
        &self.ctx.store
    }

    /// True between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        self.ctx.shared.running.load(Ordering::SeqCst)
    }

    /// Start the repeating timer. No-op when already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let generation = {
            let _gate = self.ctx.shared.gate.lock().unwrap_or_else(|p| p.into_inner());
            let generation = self.ctx.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            self.ctx.shared.running.store(true, Ordering::SeqCst);
            generation
        };

        let ctx = self.ctx.clone();
        let period = self.period;
        tracing::info!(period_ms = period.as_millis() as u64, "stats poller started");

        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tokio::spawn(ctx.clone().run(generation));
            }
        }));
    }

    /// Cancel the timer. Safe to call when not running.
    pub fn stop(&mut self) {
        {
            let _gate = self.ctx.shared.gate.lock().unwrap_or_else(|p| p.into_inner());
            if self.ctx.shared.running.swap(false, Ordering::SeqCst) {
                self.ctx.shared.generation.fetch_add(1, Ordering::SeqCst);
            }
        }
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::info!("stats poller stopped");
        }
    }

    /// Run one cycle inline and publish its result, running or not.
    pub async fn poll_once(&self) -> Result<u64, PollError> {
        let previous = self.ctx.store.current();
        let snapshot = collect_snapshot(
            self.ctx.adapter.as_ref(),
            self.ctx.roster.as_ref(),
            &previous,
        )
        .await?;
        Ok(self.ctx.store.publish(snapshot))
    }
}

impl Drop for StatsPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
