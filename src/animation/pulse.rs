//! Scroll-driven noise intensity with debounced decay.
//!
//! Scrolling pulses the intensity target to 1; after a fixed quiet period
//! with no further scroll events the target resets to 0. The displayed value
//! chases the target via exponential smoothing, so rapid scrolling holds the
//! effect near full strength and stopping decays it back within the settle
//! window plus the smoothing tail.

use web_time::{Duration, Instant};

/// Smoothed noise intensity scalar driven by scroll activity.
#[derive(Debug, Clone)]
pub struct NoisePulse {
    /// Displayed intensity, fed to the noise pass each frame.
    current: f32,
    /// Target intensity (0 or 1).
    aim: f32,
    /// Pending decay deadline. Replaced on every scroll event; replacing it
    /// is the cancellation.
    decay_at: Option<Instant>,
    /// Quiet period before the target decays back to 0.
    settle: Duration,
    /// Fraction of the remaining distance covered per update step.
    smoothing: f32,
}

impl NoisePulse {
    /// Create a pulse with the given settle window and smoothing factor.
    #[must_use]
    pub fn new(settle: Duration, smoothing: f32) -> Self {
        Self {
            current: 0.0,
            aim: 0.0,
            decay_at: None,
            settle,
            smoothing,
        }
    }

    /// Register a scroll event: raise the target to 1 immediately and re-arm
    /// the decay deadline.
    pub fn on_scroll(&mut self, now: Instant) {
        self.aim = 1.0;
        self.decay_at = Some(now + self.settle);
    }

    /// Per-frame update: expire the decay deadline, then ease the displayed
    /// value toward the target.
    pub fn update(&mut self, now: Instant) {
        if self.decay_at.is_some_and(|deadline| now >= deadline) {
            self.aim = 0.0;
            self.decay_at = None;
        }
        self.current += (self.aim - self.current) * self.smoothing;
    }

    /// The displayed intensity.
    #[must_use]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// The target intensity (0 or 1).
    #[must_use]
    pub fn aim(&self) -> f32 {
        self.aim
    }
}

impl Default for NoisePulse {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), 0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse() -> NoisePulse {
        NoisePulse::new(Duration::from_millis(300), 0.05)
    }

    #[test]
    fn test_scroll_raises_aim_immediately() {
        let mut p = pulse();
        let t0 = Instant::now();
        assert_eq!(p.aim(), 0.0);
        p.on_scroll(t0);
        assert_eq!(p.aim(), 1.0);
    }

    #[test]
    fn test_aim_decays_after_settle_window() {
        let mut p = pulse();
        let t0 = Instant::now();
        p.on_scroll(t0);

        // Just inside the window the target holds
        p.update(t0 + Duration::from_millis(299));
        assert_eq!(p.aim(), 1.0);

        // At the deadline it resets
        p.update(t0 + Duration::from_millis(300));
        assert_eq!(p.aim(), 0.0);
    }

    #[test]
    fn test_second_scroll_cancels_pending_decay() {
        let mut p = pulse();
        let t0 = Instant::now();
        p.on_scroll(t0);

        // Second scroll 200ms in replaces the deadline
        let t1 = t0 + Duration::from_millis(200);
        p.on_scroll(t1);

        // The original deadline (t0 + 300ms) must no longer fire
        p.update(t0 + Duration::from_millis(350));
        assert_eq!(p.aim(), 1.0);

        // The replacement deadline (t1 + 300ms) does
        p.update(t1 + Duration::from_millis(300));
        assert_eq!(p.aim(), 0.0);
    }

    #[test]
    fn test_exponential_convergence_rate() {
        let mut p = pulse();
        let t0 = Instant::now();
        p.on_scroll(t0);

        // N steps inside the settle window: residual = 0.95^N
        let steps = 20;
        for _ in 0..steps {
            p.update(t0);
        }
        let expected = 1.0 - 0.95_f32.powi(steps);
        assert!((p.current() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_convergence_is_monotonic() {
        let mut p = pulse();
        let t0 = Instant::now();
        p.on_scroll(t0);

        let mut prev = p.current();
        for _ in 0..100 {
            p.update(t0);
            assert!(p.current() >= prev);
            prev = p.current();
        }
        assert!(prev < 1.0); // asymptotic, never overshoots
    }
}
