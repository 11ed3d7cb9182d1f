//! Demo mode: random but plausible metrics for unattended displays.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::updater::{format_handshake, format_latency_ms, format_percent};
use crate::data::{Scenario, Severity};
use crate::timer::Timer;
use crate::view::{DashboardView, Metric};

/// Time between two generated updates.
pub const DEMO_INTERVAL: Duration = Duration::from_secs(8);

/// Repeating generator that overwrites the metric texts.
///
/// It only writes to the view and never looks at polled data. It keeps
/// running until [`DemoMode::stop`] is called.
#[derive(Debug, Clone)]
pub struct DemoMode<R = StdRng> {
    rng: R,
    timer: Timer,
}

impl Default for DemoMode<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoMode<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> DemoMode<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            timer: Timer::new(DEMO_INTERVAL),
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Begin generating. The first update arrives one interval later.
    pub fn start<V: DashboardView + ?Sized>(&mut self, view: &mut V, now: Instant) {
        if self.is_running() {
            return;
        }
        view.append_log(Severity::Info, "Demo mode started".to_string());
        self.timer.start(now);
    }

    /// Cancel the generator.
    pub fn stop<V: DashboardView + ?Sized>(&mut self, view: &mut V) {
        if !self.is_running() {
            return;
        }
        self.timer.stop();
        view.append_log(Severity::Info, "Demo mode stopped".to_string());
    }

    /// Generate an update if one is due. Returns true if the view changed.
    pub fn poll<V: DashboardView + ?Sized>(&mut self, view: &mut V, now: Instant) -> bool {
        if !self.timer.fire(now) {
            return false;
        }
        self.generate(view);
        true
    }

    fn generate<V: DashboardView + ?Sized>(&mut self, view: &mut V) {
        let scenario = Scenario::ALL[self.rng.gen_range(0..Scenario::ALL.len())];
        let label = scenario.key().to_uppercase();

        let handshake_us: f64 = self.rng.gen_range(40.0..60.0);
        let latency_ms: f64 = self.rng.gen_range(200.0..500.0);
        let success: f64 = self.rng.gen_range(0.90..1.0);

        view.set_metric(Metric::NetworkType, label.clone());
        view.set_metric(Metric::Handshake, format_handshake(handshake_us));
        view.set_metric(Metric::CircuitLatency, format_latency_ms(latency_ms));
        view.set_metric(Metric::SuccessRate, format_percent(success));
        view.append_log(Severity::Info, format!("Network switched to {}", label));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::DashboardState;

    fn seeded() -> DemoMode<StdRng> {
        DemoMode::with_rng(StdRng::seed_from_u64(7))
    }

    fn number(text: &str, suffix: &str) -> f64 {
        text.strip_suffix(suffix).unwrap().parse().unwrap()
    }

    #[test]
    fn test_generates_plausible_values() {
        let start = Instant::now();
        let mut view = DashboardState::new();
        let mut demo = seeded();
        demo.start(&mut view, start);

        assert!(!demo.poll(&mut view, start + Duration::from_secs(7)));
        for i in 1..=20u32 {
            assert!(demo.poll(&mut view, start + DEMO_INTERVAL * i));

            let handshake = number(&view.handshake, "μs");
            assert!((40.0..=60.0).contains(&handshake));
            let latency = number(&view.circuit_latency, "ms");
            assert!((200.0..=500.0).contains(&latency));
            let success = number(&view.success_rate, "%");
            assert!((90.0..=100.0).contains(&success));
            assert!(["BASELINE", "LEO", "MEO", "GEO"].contains(&view.network.as_str()));
            assert_eq!(
                view.logs.latest().unwrap().message,
                format!("Network switched to {}", view.network)
            );
        }
        assert!(demo.is_running());
    }

    #[test]
    fn test_start_is_idempotent_and_stop_cancels() {
        let start = Instant::now();
        let mut view = DashboardState::new();
        let mut demo = seeded();

        demo.start(&mut view, start);
        demo.start(&mut view, start);
        assert_eq!(view.logs.len(), 1);
        assert_eq!(view.logs.latest().unwrap().message, "Demo mode started");

        demo.stop(&mut view);
        assert!(!demo.is_running());
        assert_eq!(view.logs.latest().unwrap().message, "Demo mode stopped");
        assert!(!demo.poll(&mut view, start + DEMO_INTERVAL * 3));
    }
}
