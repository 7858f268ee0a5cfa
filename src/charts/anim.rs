use std::time::{Duration, Instant};

/// Entrance-animation clock for one chart instance.
///
/// The host event loop calls `tick(now)` once per frame; rendering reads
/// `eased()`. Keeping the timestamps injected makes the curve testable
/// without sleeping, and the `alive` flag lets a torn-down chart stop
/// requesting frames instead of looping uselessly.
#[derive(Debug, Clone, Copy)]
pub struct AnimationSession {
    started_at: Instant,
    duration: Duration,
    progress: f64,
    alive: bool,
}

impl AnimationSession {
    pub fn start(now: Instant, duration: Duration) -> Self {
        AnimationSession {
            started_at: now,
            duration,
            progress: 0.0,
            alive: true,
        }
    }

    /// Advances the clock. Returns true while another frame is wanted.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.alive {
            return false;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        self.progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        self.progress < 1.0
    }

    /// Raw linear progress in [0, 1].
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Progress mapped through the ease-out curve.
    pub fn eased(&self) -> f64 {
        ease_out(self.progress)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Marks the chart as torn down; no further frames will be requested.
    pub fn retire(&mut self) {
        self.alive = false;
    }
}

/// Cubic ease-out: decelerates monotonically toward 1.0.
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_hits_endpoints_and_decelerates() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        // Front-loaded: halfway through time, most of the distance is done.
        assert!(ease_out(0.5) > 0.8);
        // Monotonic.
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = ease_out(i as f64 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn tick_advances_with_synthetic_instants() {
        let start = Instant::now();
        let mut anim = AnimationSession::start(start, Duration::from_secs(2));
        assert!(anim.tick(start + Duration::from_secs(1)));
        assert!((anim.progress() - 0.5).abs() < 1e-9);
        assert!(!anim.tick(start + Duration::from_secs(2)));
        assert_eq!(anim.progress(), 1.0);
        assert_eq!(anim.eased(), 1.0);
    }

    #[test]
    fn progress_clamps_past_the_end() {
        let start = Instant::now();
        let mut anim = AnimationSession::start(start, Duration::from_secs(1));
        anim.tick(start + Duration::from_secs(10));
        assert_eq!(anim.progress(), 1.0);
    }

    #[test]
    fn retired_session_requests_no_frames() {
        let start = Instant::now();
        let mut anim = AnimationSession::start(start, Duration::from_secs(2));
        anim.retire();
        assert!(!anim.tick(start + Duration::from_millis(100)));
        assert!(!anim.is_alive());
    }
}
