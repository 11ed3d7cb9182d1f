//! One-shot circuit building animation.

use std::time::{Duration, Instant};

use crate::data::Severity;
use crate::timer::Timer;
use crate::view::{DashboardView, Hop, HopState};

/// Time between two stages of the animation.
pub const STAGE_INTERVAL: Duration = Duration::from_millis(1500);

/// Walks the hop diagram through client, guard, middle and exit.
///
/// Each tick promotes the previous hop to [`HopState::Active`] and the current
/// one to [`HopState::Building`]. The tick that reaches the exit hop also marks
/// it active and stops the timer; later ticks have no effect.
#[derive(Debug, Clone)]
pub struct CircuitAnimation {
    timer: Timer,
    next_stage: usize,
}

impl Default for CircuitAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl CircuitAnimation {
    pub fn new() -> Self {
        Self::with_interval(STAGE_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            timer: Timer::new(interval),
            next_stage: 0,
        }
    }

    /// Reset every hop to pending and begin the sequence.
    pub fn start<V: DashboardView + ?Sized>(&mut self, view: &mut V, now: Instant) {
        for hop in Hop::ALL {
            view.set_hop_state(hop, HopState::Pending);
        }
        self.next_stage = 0;
        self.timer.start(now);
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Number of stages reached so far.
    pub fn completed_stages(&self) -> usize {
        self.next_stage
    }

    /// Advance if a tick is due. Returns true if a tick was applied.
    pub fn poll<V: DashboardView + ?Sized>(&mut self, view: &mut V, now: Instant) -> bool {
        if !self.timer.fire(now) {
            return false;
        }
        self.advance(view);
        true
    }

    fn advance<V: DashboardView + ?Sized>(&mut self, view: &mut V) {
        let Some(&hop) = Hop::ALL.get(self.next_stage) else {
            self.timer.stop();
            return;
        };

        if self.next_stage > 0 {
            view.set_hop_state(Hop::ALL[self.next_stage - 1], HopState::Active);
        }
        view.set_hop_state(hop, HopState::Building);

        self.next_stage += 1;
        let progress = self.next_stage as f64 / Hop::ALL.len() as f64 * 100.0;
        view.set_progress(progress);
        view.append_log(Severity::Info, format!("Building circuit: {} hop", hop.name()));

        if self.next_stage == Hop::ALL.len() {
            view.set_hop_state(hop, HopState::Active);
            view.append_log(Severity::Success, "Circuit established successfully!".to_string());
            self.timer.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::DashboardState;

    fn at(start: Instant, ticks: u32) -> Instant {
        start + STAGE_INTERVAL * ticks
    }

    #[test]
    fn test_stages_advance_in_order() {
        let start = Instant::now();
        let mut view = DashboardState::new();
        let mut anim = CircuitAnimation::new();
        anim.start(&mut view, start);

        assert!(!anim.poll(&mut view, start));
        assert!(anim.poll(&mut view, at(start, 1)));
        assert_eq!(view.hop_state(Hop::Client), HopState::Building);
        assert_eq!(view.progress, 25.0);

        assert!(anim.poll(&mut view, at(start, 2)));
        assert_eq!(view.hop_state(Hop::Client), HopState::Active);
        assert_eq!(view.hop_state(Hop::Guard), HopState::Building);
        assert_eq!(view.hop_state(Hop::Middle), HopState::Pending);
        assert_eq!(view.progress, 50.0);
        assert_eq!(view.logs.latest().unwrap().message, "Building circuit: guard hop");
    }

    #[test]
    fn test_four_ticks_complete_and_stop() {
        let start = Instant::now();
        let mut view = DashboardState::new();
        let mut anim = CircuitAnimation::new();
        anim.start(&mut view, start);

        for tick in 1..=4 {
            assert!(anim.poll(&mut view, at(start, tick)));
        }

        assert!(Hop::ALL.iter().all(|h| view.hop_state(*h) == HopState::Active));
        assert_eq!(view.progress, 100.0);
        assert!(!anim.is_running());
        assert_eq!(anim.completed_stages(), 4);

        let logs_before = view.logs.len();
        assert!(!anim.poll(&mut view, at(start, 5)));
        assert_eq!(view.logs.len(), logs_before);
        assert_eq!(
            view.logs.latest().unwrap().message,
            "Circuit established successfully!"
        );
    }

    #[test]
    fn test_restart_resets_hops() {
        let start = Instant::now();
        let mut view = DashboardState::new();
        let mut anim = CircuitAnimation::new();
        anim.start(&mut view, start);
        for tick in 1..=4 {
            anim.poll(&mut view, at(start, tick));
        }

        let later = at(start, 10);
        anim.start(&mut view, later);
        assert!(anim.is_running());
        assert_eq!(anim.completed_stages(), 0);
        assert!(Hop::ALL.iter().all(|h| view.hop_state(*h) == HopState::Pending));
    }
}
