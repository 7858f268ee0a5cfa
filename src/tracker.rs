use std::time::{Duration, Instant};

/// Elapsed-time tracker with a single active interval at most.
///
/// The host loop refreshes the display once per second while running; this
/// type only does the bookkeeping, against injected instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracker {
    Idle,
    Running { since: Instant, banked: Duration },
    Paused { banked: Duration },
}

impl Default for Tracker {
    fn default() -> Self {
        Tracker::Idle
    }
}

impl Tracker {
    pub fn new() -> Self {
        Tracker::Idle
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Tracker::Running { .. })
    }

    /// Starts (or resumes) the clock. Starting while already running is a
    /// no-op, so there is never more than one interval ticking.
    pub fn start(&mut self, now: Instant) {
        *self = match *self {
            Tracker::Idle => Tracker::Running {
                since: now,
                banked: Duration::ZERO,
            },
            Tracker::Paused { banked } => Tracker::Running { since: now, banked },
            running @ Tracker::Running { .. } => running,
        };
    }

    /// Pauses the clock, banking the elapsed time and clearing the interval.
    pub fn pause(&mut self, now: Instant) {
        if let Tracker::Running { since, banked } = *self {
            *self = Tracker::Paused {
                banked: banked + now.saturating_duration_since(since),
            };
        }
    }

    /// Stops and resets; always clears any active interval.
    pub fn stop(&mut self) {
        *self = Tracker::Idle;
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match *self {
            Tracker::Idle => Duration::ZERO,
            Tracker::Paused { banked } => banked,
            Tracker::Running { since, banked } => {
                banked + now.saturating_duration_since(since)
            }
        }
    }

    pub fn display(&self, now: Instant) -> String {
        let secs = self.elapsed(now).as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_from_zero_and_accumulates() {
        let t0 = Instant::now();
        let mut tracker = Tracker::new();
        assert_eq!(tracker.elapsed(t0), Duration::ZERO);
        tracker.start(t0);
        assert_eq!(tracker.elapsed(t0 + Duration::from_secs(5)), Duration::from_secs(5));
    }

    #[test]
    fn starting_twice_keeps_the_original_interval() {
        let t0 = Instant::now();
        let mut tracker = Tracker::new();
        tracker.start(t0);
        tracker.start(t0 + Duration::from_secs(3));
        assert_eq!(tracker.elapsed(t0 + Duration::from_secs(10)), Duration::from_secs(10));
    }

    #[test]
    fn pause_banks_time_and_freezes() {
        let t0 = Instant::now();
        let mut tracker = Tracker::new();
        tracker.start(t0);
        tracker.pause(t0 + Duration::from_secs(4));
        assert!(!tracker.is_running());
        assert_eq!(tracker.elapsed(t0 + Duration::from_secs(60)), Duration::from_secs(4));
        tracker.start(t0 + Duration::from_secs(60));
        assert_eq!(tracker.elapsed(t0 + Duration::from_secs(62)), Duration::from_secs(6));
    }

    #[test]
    fn stop_resets_to_zero() {
        let t0 = Instant::now();
        let mut tracker = Tracker::new();
        tracker.start(t0);
        tracker.stop();
        assert_eq!(tracker, Tracker::Idle);
        assert_eq!(tracker.elapsed(t0 + Duration::from_secs(9)), Duration::ZERO);
    }

    #[test]
    fn display_formats_hh_mm_ss() {
        let t0 = Instant::now();
        let mut tracker = Tracker::new();
        tracker.start(t0);
        let later = t0 + Duration::from_secs(3661);
        assert_eq!(tracker.display(later), "01:01:01");
    }
}
