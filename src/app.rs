//! Application state and lifecycle.
//!
//! [`App`] owns everything that used to be ambient: the view state, the
//! poller handle, the simulator timers and the clock. The terminal loop
//! calls [`App::tick`] once per frame and renders whatever the state holds.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::runtime::Handle;
use tracing::info;

use crate::config::Settings;
use crate::data::duration::format_duration;
use crate::data::{updater, Severity};
use crate::poller::{CycleOutcome, Poller};
use crate::sim::{CircuitAnimation, DemoMode};
use crate::timer::Timer;
use crate::ui::Theme;
use crate::view::{DashboardState, DashboardView};

/// How often the header clock is refreshed.
const CLOCK_INTERVAL: Duration = Duration::from_secs(1);

/// How long a status bar message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Default path for the `e` key export.
pub const EXPORT_FILE: &str = "dashboard_export.json";

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    /// Hide the header and status bar to maximize the panels.
    pub fullscreen: bool,

    pub state: DashboardState,
    pub theme: Theme,

    /// Local time shown in the header, `HH:MM:SS`.
    pub clock: String,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,

    poller: Poller,
    animation: CircuitAnimation,
    demo: DemoMode,
    clock_timer: Timer,
    demo_on_start: bool,
}

impl App {
    /// Create a new App around a poller that has not been started yet.
    pub fn new(poller: Poller, settings: &Settings, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            fullscreen: false,
            state: DashboardState::new(),
            theme,
            clock: local_clock(),
            status_message: None,
            poller,
            animation: CircuitAnimation::new(),
            demo: DemoMode::new(),
            clock_timer: Timer::new(CLOCK_INTERVAL),
            demo_on_start: settings.demo_on_start,
        }
    }

    /// Start polling on the given runtime and begin the local timers.
    pub fn start(&mut self, handle: &Handle) {
        self.poller.start(handle);
        self.begin(Instant::now());
    }

    /// Begin the clock and the circuit animation, and record startup.
    pub fn begin(&mut self, now: Instant) {
        self.clock = local_clock();
        self.clock_timer.start(now);
        self.animation.start(&mut self.state, now);

        self.state.append_log(Severity::Info, "System initialized".to_string());
        self.state.append_log(
            Severity::Success,
            format!(
                "Polling {} every {}",
                self.poller.description(),
                format_duration(self.poller.interval())
            ),
        );

        if self.demo_on_start {
            self.demo.start(&mut self.state, now);
        }
    }

    /// Stop every timer and the poller.
    pub fn stop(&mut self) {
        self.poller.stop();
        self.animation.stop();
        self.demo.stop(&mut self.state);
        self.clock_timer.stop();
    }

    /// Advance the app to `now`: apply finished cycles and fire due timers.
    pub fn tick(&mut self, now: Instant) {
        self.drain_outcomes();
        self.animation.poll(&mut self.state, now);
        self.demo.poll(&mut self.state, now);
        if self.clock_timer.fire(now) {
            self.clock = local_clock();
        }
    }

    /// Apply every cycle the poller has finished since the last frame.
    pub fn drain_outcomes(&mut self) -> usize {
        let mut applied = 0;
        while let Some(outcome) = self.poller.poll() {
            self.apply_outcome(&outcome);
            applied += 1;
        }
        applied
    }

    /// Apply a single cycle to the view.
    pub fn apply_outcome(&mut self, outcome: &CycleOutcome) {
        updater::apply_outcome(&mut self.state, outcome);
    }

    /// Returns a description of the API being polled.
    pub fn api_description(&self) -> &str {
        self.poller.description()
    }

    pub fn poll_interval(&self) -> Duration {
        self.poller.interval()
    }

    pub fn demo_running(&self) -> bool {
        self.demo.is_running()
    }

    pub fn animation_running(&self) -> bool {
        self.animation.is_running()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Run a cycle now instead of waiting for the next tick.
    pub fn refresh_now(&mut self) {
        if !self.poller.is_running() {
            self.set_status_message("Poller not running".to_string());
        } else if self.poller.refresh_now() {
            self.set_status_message("Refreshing...".to_string());
        } else {
            self.set_status_message("Refresh already pending".to_string());
        }
    }

    /// Start demo mode, or stop it if it is running.
    pub fn toggle_demo(&mut self, now: Instant) {
        if self.demo.is_running() {
            self.demo.stop(&mut self.state);
        } else {
            info!("demo mode enabled");
            self.demo.start(&mut self.state, now);
        }
    }

    pub fn clear_logs(&mut self) {
        self.state.logs.clear_logs();
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn scroll_logs_up(&mut self, n: usize) {
        self.state.logs.scroll_up(n);
    }

    pub fn scroll_logs_down(&mut self, n: usize) {
        self.state.logs.scroll_down(n);
    }

    pub fn scroll_logs_oldest(&mut self) {
        self.state.logs.scroll_to_oldest();
    }

    pub fn scroll_logs_newest(&mut self) {
        self.state.logs.follow();
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        write_export(&self.state, path)
    }
}

/// Write a JSON snapshot of the dashboard to `path`.
pub fn write_export(state: &DashboardState, path: &Path) -> Result<()> {
    let json = state.to_json()?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    info!(path = %path.display(), "exported dashboard state");
    Ok(())
}

fn local_clock() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::{ComparisonPayload, FetchError, PerformancePayload, StatusPayload};
    use crate::poller::tests::FakeApi;
    use crate::sim::circuit::STAGE_INTERVAL;
    use crate::sim::demo::DEMO_INTERVAL;
    use crate::view::{Hop, HopState};

    fn app() -> App {
        let poller = Poller::new(Arc::new(FakeApi::default()), Duration::from_secs(5));
        App::new(poller, &Settings::default(), Theme::dark())
    }

    #[test]
    fn test_begin_logs_startup_and_starts_animation() {
        let mut app = app();
        let now = Instant::now();
        app.begin(now);

        let messages: Vec<&str> = app.state.logs.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["System initialized", "Polling fake every 5.0s"]);
        assert!(app.animation_running());
        assert!(!app.demo_running());
    }

    #[test]
    fn test_tick_drives_animation_to_completion() {
        let mut app = app();
        let start = Instant::now();
        app.begin(start);

        for i in 1..=5 {
            app.tick(start + STAGE_INTERVAL * i);
        }

        assert!(!app.animation_running());
        assert_eq!(app.state.hop_state(Hop::Exit), HopState::Active);
    }

    #[test]
    fn test_toggle_demo() {
        let mut app = app();
        let start = Instant::now();
        app.begin(start);

        app.toggle_demo(start);
        assert!(app.demo_running());
        app.tick(start + DEMO_INTERVAL);
        assert!(app.state.logs.latest().unwrap().message.starts_with("Network switched to "));

        app.toggle_demo(start + DEMO_INTERVAL);
        assert!(!app.demo_running());
    }

    #[test]
    fn test_demo_on_start() {
        let poller = Poller::new(Arc::new(FakeApi::default()), Duration::from_secs(5));
        let settings = Settings {
            demo_on_start: true,
            ..Settings::default()
        };
        let mut app = App::new(poller, &settings, Theme::dark());
        app.begin(Instant::now());
        assert!(app.demo_running());
    }

    #[test]
    fn test_failed_outcome_clears_liveness() {
        let mut app = app();
        app.state.set_live(true);

        app.apply_outcome(&CycleOutcome {
            status: Ok(StatusPayload::default()),
            performance: Err(FetchError::Transport {
                url: "fake/performance".to_string(),
                message: "connection reset".to_string(),
            }),
            comparison: Ok(ComparisonPayload::new()),
        });
        assert!(!app.state.live);

        app.apply_outcome(&CycleOutcome {
            status: Ok(StatusPayload::default()),
            performance: Ok(PerformancePayload::default()),
            comparison: Ok(ComparisonPayload::new()),
        });
        assert!(app.state.live);
    }

    #[test]
    fn test_export_state() {
        let mut app = app();
        app.begin(Instant::now());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        app.export_state(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["live"], false);
        assert_eq!(value["logs"]["entries"][0]["message"], "System initialized");
    }

    #[test]
    fn test_refresh_without_poller_sets_message() {
        let mut app = app();
        app.refresh_now();
        assert_eq!(app.get_status_message(), Some("Poller not running"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_drains_first_cycle() {
        let mut app = app();
        app.start(&Handle::current());

        // Let the first cycle run
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(app.drain_outcomes(), 1);
        assert!(app.state.live);
        assert_eq!(app.state.progress, 100.0);
        assert_eq!(app.state.network, "LEO");
        app.stop();
    }
}
