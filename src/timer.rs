//! Deadline-based repeating timer driven by the UI loop.

use std::time::{Duration, Instant};

/// A repeating timer checked once per frame.
///
/// Like a browser interval, the first fire happens one full period after
/// [`Timer::start`]. If the loop falls behind by more than one period, the
/// missed fires are collapsed into one.
#[derive(Debug, Clone)]
pub struct Timer {
    period: Duration,
    next_due: Option<Instant>,
}

impl Timer {
    /// Create a stopped timer.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true if the timer is due at `now`, and schedules the next fire.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_period() {
        let start = Instant::now();
        let mut timer = Timer::new(Duration::from_millis(1500));
        assert!(!timer.fire(start));

        timer.start(start);
        assert!(!timer.fire(start + Duration::from_millis(1499)));
        assert!(timer.fire(start + Duration::from_millis(1500)));
        assert!(!timer.fire(start + Duration::from_millis(2000)));
        assert!(timer.fire(start + Duration::from_millis(3000)));
    }

    #[test]
    fn test_missed_fires_collapse() {
        let start = Instant::now();
        let mut timer = Timer::new(Duration::from_secs(1));
        timer.start(start);

        assert!(timer.fire(start + Duration::from_secs(10)));
        assert!(!timer.fire(start + Duration::from_millis(10_500)));
        assert!(timer.fire(start + Duration::from_secs(11)));
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let start = Instant::now();
        let mut timer = Timer::new(Duration::from_secs(1));
        timer.start(start);
        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.fire(start + Duration::from_secs(5)));
    }
}
