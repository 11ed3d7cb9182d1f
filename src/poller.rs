//! Periodic refresh of the three API endpoints.
//!
//! The poller runs on the tokio runtime and hands finished cycles to the UI
//! thread through a channel, the same way the terminal loop drains any other
//! data source: non-blocking, once per frame.
//!
//! ```text
//!  interval tick ──┐
//!  refresh_now() ──┴─▶ spawn cycle ─▶ join(status, performance, comparison)
//!                                                  │
//!                                                  ▼
//!                           mpsc ─▶ Poller::poll() ─▶ updater::apply_outcome
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::api::{
    ComparisonPayload, FetchError, MetricsApi, PerformancePayload, StatusPayload,
};

/// Default time between cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Results of one cycle, one per endpoint.
#[derive(Debug)]
pub struct CycleOutcome {
    pub status: Result<StatusPayload, FetchError>,
    pub performance: Result<PerformancePayload, FetchError>,
    pub comparison: Result<ComparisonPayload, FetchError>,
}

impl CycleOutcome {
    /// First failure in endpoint order, if any.
    pub fn first_error(&self) -> Option<&FetchError> {
        self.status
            .as_ref()
            .err()
            .or(self.performance.as_ref().err())
            .or(self.comparison.as_ref().err())
    }

    pub fn failure_count(&self) -> usize {
        [
            self.status.is_err(),
            self.performance.is_err(),
            self.comparison.is_err(),
        ]
        .into_iter()
        .filter(|failed| *failed)
        .count()
    }

    pub fn is_success(&self) -> bool {
        self.first_error().is_none()
    }
}

/// Run a single cycle: all three requests concurrently, none cancelling another.
pub async fn run_cycle(api: &dyn MetricsApi) -> CycleOutcome {
    let (status, performance, comparison) =
        tokio::join!(api.status(), api.performance(), api.comparison());
    CycleOutcome {
        status,
        performance,
        comparison,
    }
}

/// Schedules cycles on a fixed interval and collects their outcomes.
///
/// The first cycle fires immediately on [`Poller::start`]. Each cycle runs in
/// its own task, so a slow response never delays the next tick and is never
/// cancelled by a newer cycle.
#[derive(Debug)]
pub struct Poller {
    api: Arc<dyn MetricsApi>,
    interval: Duration,
    sender: mpsc::Sender<CycleOutcome>,
    receiver: mpsc::Receiver<CycleOutcome>,
    trigger: Option<mpsc::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn new(api: Arc<dyn MetricsApi>, interval: Duration) -> Self {
        let (sender, receiver) = mpsc::channel(16);
        Self {
            api,
            interval,
            sender,
            receiver,
            trigger: None,
            task: None,
        }
    }

    /// Start the schedule on the given runtime. No-op if already running.
    pub fn start(&mut self, handle: &Handle) {
        if self.is_running() {
            return;
        }

        let (trigger_tx, trigger_rx) = mpsc::channel(1);
        let api = self.api.clone();
        let sender = self.sender.clone();
        let interval = self.interval;

        info!(api = api.description(), ?interval, "starting poller");
        self.task = Some(handle.spawn(schedule(api, interval, sender, trigger_rx)));
        self.trigger = Some(trigger_tx);
    }

    /// Stop scheduling new cycles. Cycles already in flight still report.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("poller stopped");
        }
        self.trigger = None;
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Request an immediate cycle. Returns false if the poller is stopped or
    /// a manual refresh is already pending.
    pub fn refresh_now(&self) -> bool {
        match self.trigger {
            Some(ref trigger) => trigger.try_send(()).is_ok(),
            None => false,
        }
    }

    /// Take the next finished cycle without blocking.
    pub fn poll(&mut self) -> Option<CycleOutcome> {
        self.receiver.try_recv().ok()
    }

    /// Wait for the next finished cycle.
    pub async fn next_outcome(&mut self) -> Option<CycleOutcome> {
        self.receiver.recv().await
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn description(&self) -> &str {
        self.api.description()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn schedule(
    api: Arc<dyn MetricsApi>,
    period: Duration,
    sender: mpsc::Sender<CycleOutcome>,
    mut trigger: mpsc::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            Some(()) = trigger.recv() => debug!("manual refresh"),
        }

        if sender.is_closed() {
            break;
        }

        let api = api.clone();
        let sender = sender.clone();
        tokio::spawn(async move {
            let outcome = run_cycle(api.as_ref()).await;
            debug!(failures = outcome.failure_count(), "cycle finished");
            let _ = sender.send(outcome).await;
        });
    }
}
