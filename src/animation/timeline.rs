//! Entrance timeline: the staggered reveal sequence after the model loads.
//!
//! Four tweens fire with distinct delays so the page elements appear in
//! sequence rather than all at once: the model rises from below, the
//! preloader slides out, the new-drop card drops in, then the header bar.

use web_time::{Duration, Instant};

use super::easing::EasingFunction;

/// Which page element a tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntranceChannel {
    /// Header bar vertical offset and opacity.
    Header,
    /// New-drop card vertical offset and opacity.
    NewDrop,
    /// Model group vertical rise (world units).
    ModelRise,
    /// Preloader vertical offset (fraction of viewport height).
    PreloaderExit,
}

/// A single delayed, eased interpolation on one channel.
#[derive(Debug, Clone)]
pub struct Tween {
    /// The element this tween drives.
    pub channel: EntranceChannel,
    /// When the owning timeline was scheduled.
    pub start: Instant,
    /// Delay before the interpolation begins.
    pub delay: Duration,
    /// Interpolation duration.
    pub duration: Duration,
    /// Easing applied to the progress.
    pub easing: EasingFunction,
    /// Value at progress 0.
    pub from: f32,
    /// Value at progress 1.
    pub to: f32,
}

impl Tween {
    /// Raw progress in [0, 1]. Zero-duration tweens snap to 1 once the
    /// delay has elapsed.
    #[inline]
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start + self.delay);
        if self.duration.is_zero() {
            return if elapsed.is_zero() { 0.0 } else { 1.0 };
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Interpolated value at `now`.
    #[inline]
    #[must_use]
    pub fn value(&self, now: Instant) -> f32 {
        let t = self.easing.evaluate(self.progress(now));
        self.from + (self.to - self.from) * t
    }
}

/// Header/new-drop offset before their entrance tweens run (pixels).
pub const HIDDEN_OFFSET: f32 = -100.0;
/// Model rise start position (world units below the origin).
pub const MODEL_RISE_FROM: f32 = -10.0;

/// The four-tween entrance sequence, scheduled once on load success.
///
/// Until [`schedule`](Self::schedule) is called every channel reports its
/// pre-entrance value: header and new-drop hidden above the viewport at
/// opacity 0, the model 10 units below the origin, the preloader in place.
#[derive(Debug, Default)]
pub struct EntranceTimeline {
    tweens: Vec<Tween>,
}

impl EntranceTimeline {
    /// Create an unscheduled timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the entrance sequence at `now`. Called exactly once, on
    /// load success; calling it again restarts the sequence.
    pub fn schedule(&mut self, now: Instant) {
        let ease = EasingFunction::QuadraticOut;
        self.tweens = vec![
            Tween {
                channel: EntranceChannel::Header,
                start: now,
                delay: Duration::from_millis(2500),
                duration: Duration::from_secs(1),
                easing: ease,
                from: HIDDEN_OFFSET,
                to: 0.0,
            },
            Tween {
                channel: EntranceChannel::NewDrop,
                start: now,
                delay: Duration::from_millis(2000),
                duration: Duration::from_secs(1),
                easing: ease,
                from: HIDDEN_OFFSET,
                to: 0.0,
            },
            Tween {
                channel: EntranceChannel::ModelRise,
                start: now,
                delay: Duration::from_secs(1),
                duration: Duration::from_secs(2),
                easing: EasingFunction::Linear,
                from: MODEL_RISE_FROM,
                to: 0.0,
            },
            Tween {
                channel: EntranceChannel::PreloaderExit,
                start: now,
                delay: Duration::from_secs(1),
                duration: Duration::from_secs(1),
                easing: ease,
                from: 0.0,
                to: -1.0,
            },
        ];
    }

    /// Whether the entrance sequence has been scheduled.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        !self.tweens.is_empty()
    }

    /// The scheduled tweens (empty before load success).
    #[must_use]
    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    fn channel_value(
        &self,
        channel: EntranceChannel,
        now: Instant,
        unscheduled: f32,
    ) -> f32 {
        self.tweens
            .iter()
            .find(|t| t.channel == channel)
            .map_or(unscheduled, |t| t.value(now))
    }

    fn channel_alpha(&self, channel: EntranceChannel, now: Instant) -> f32 {
        self.tweens
            .iter()
            .find(|t| t.channel == channel)
            .map_or(0.0, |t| t.easing.evaluate(t.progress(now)))
    }

    /// Header vertical offset in pixels (−100 hidden → 0 in place).
    #[must_use]
    pub fn header_offset(&self, now: Instant) -> f32 {
        self.channel_value(EntranceChannel::Header, now, HIDDEN_OFFSET)
    }

    /// Header opacity (0 → 1, eased alongside the slide).
    #[must_use]
    pub fn header_alpha(&self, now: Instant) -> f32 {
        self.channel_alpha(EntranceChannel::Header, now)
    }

    /// New-drop card vertical offset in pixels.
    #[must_use]
    pub fn new_drop_offset(&self, now: Instant) -> f32 {
        self.channel_value(EntranceChannel::NewDrop, now, HIDDEN_OFFSET)
    }

    /// New-drop card opacity.
    #[must_use]
    pub fn new_drop_alpha(&self, now: Instant) -> f32 {
        self.channel_alpha(EntranceChannel::NewDrop, now)
    }

    /// Model vertical rise in world units (−10 → 0, linear over 2s).
    #[must_use]
    pub fn model_rise(&self, now: Instant) -> f32 {
        self.channel_value(EntranceChannel::ModelRise, now, MODEL_RISE_FROM)
    }

    /// Preloader vertical offset as a fraction of viewport height
    /// (0 in place → −1 fully off-screen).
    #[must_use]
    pub fn preloader_offset(&self, now: Instant) -> f32 {
        self.channel_value(EntranceChannel::PreloaderExit, now, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscheduled_reports_pre_entrance_values() {
        let tl = EntranceTimeline::new();
        let now = Instant::now();
        assert!(!tl.is_scheduled());
        assert_eq!(tl.header_offset(now), HIDDEN_OFFSET);
        assert_eq!(tl.header_alpha(now), 0.0);
        assert_eq!(tl.new_drop_offset(now), HIDDEN_OFFSET);
        assert_eq!(tl.model_rise(now), MODEL_RISE_FROM);
        assert_eq!(tl.preloader_offset(now), 0.0);
    }

    #[test]
    fn test_schedules_exactly_four_tweens_with_expected_delays() {
        let mut tl = EntranceTimeline::new();
        tl.schedule(Instant::now());
        assert_eq!(tl.tweens().len(), 4);

        let delay_of = |c: EntranceChannel| {
            tl.tweens()
                .iter()
                .find(|t| t.channel == c)
                .map(|t| t.delay)
        };
        assert_eq!(
            delay_of(EntranceChannel::Header),
            Some(Duration::from_millis(2500))
        );
        assert_eq!(
            delay_of(EntranceChannel::NewDrop),
            Some(Duration::from_millis(2000))
        );
        assert_eq!(
            delay_of(EntranceChannel::ModelRise),
            Some(Duration::from_secs(1))
        );
        assert_eq!(
            delay_of(EntranceChannel::PreloaderExit),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_model_rise_is_linear_from_minus_ten_over_two_seconds() {
        let mut tl = EntranceTimeline::new();
        let t0 = Instant::now();
        tl.schedule(t0);

        // Still waiting out the 1s delay
        assert_eq!(tl.model_rise(t0 + Duration::from_millis(500)), -10.0);

        // Linear: halfway through the 2s duration = -5
        let mid = t0 + Duration::from_secs(2);
        assert!((tl.model_rise(mid) - (-5.0)).abs() < 1e-4);

        // Complete at delay + duration
        let end = t0 + Duration::from_secs(3);
        assert!((tl.model_rise(end)).abs() < 1e-4);

        // Clamped past the end
        let past = end + Duration::from_secs(5);
        assert!((tl.model_rise(past)).abs() < 1e-4);
    }

    #[test]
    fn test_header_hidden_until_delay_elapses() {
        let mut tl = EntranceTimeline::new();
        let t0 = Instant::now();
        tl.schedule(t0);

        let early = t0 + Duration::from_secs(2);
        assert_eq!(tl.header_offset(early), HIDDEN_OFFSET);
        assert_eq!(tl.header_alpha(early), 0.0);

        let done = t0 + Duration::from_millis(3500);
        assert!(tl.header_offset(done).abs() < 1e-4);
        assert!((tl.header_alpha(done) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_preloader_slides_fully_out() {
        let mut tl = EntranceTimeline::new();
        let t0 = Instant::now();
        tl.schedule(t0);

        assert_eq!(tl.preloader_offset(t0), 0.0);
        let done = t0 + Duration::from_secs(2);
        assert!((tl.preloader_offset(done) - (-1.0)).abs() < 1e-4);
    }

    #[test]
    fn test_zero_duration_tween_snaps_after_delay() {
        let t0 = Instant::now();
        let tween = Tween {
            channel: EntranceChannel::Header,
            start: t0,
            delay: Duration::from_millis(100),
            duration: Duration::ZERO,
            easing: EasingFunction::Linear,
            from: 0.0,
            to: 1.0,
        };
        assert_eq!(tween.value(t0), 0.0);
        assert_eq!(tween.value(t0 + Duration::from_millis(101)), 1.0);
    }
}
