//! Per-transition timing: frame subscription, staggered progress, end
//! condition.
//!
//! A transition runs `interpolating -> settled -> complete`. Point `i`
//! starts moving `delay_by_index * i` ms after the transition's first frame
//! and takes `duration` ms; the transition ends once the last point has
//! arrived and `delay_at_end` has passed.

use glam::Vec2;

use super::easing::EasingFunction;
use super::point::Point;

/// Where a transition is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Some point is still moving.
    Interpolating,
    /// Every point has arrived; holding for `delay_at_end`.
    Settled,
    /// Past the hold; the next transition may start.
    Complete,
}

/// Timing constants of one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTiming {
    /// Per-point move time.
    pub duration_ms: f64,
    /// Start offset between consecutive points.
    pub delay_by_index: f64,
    /// Hold after the last point arrives.
    pub delay_at_end_ms: f64,
    /// Points in the animation.
    pub num_points: usize,
}

impl TransitionTiming {
    /// Spread `stagger_ms` evenly over `num_points` start offsets.
    #[must_use]
    pub fn new(
        duration_ms: f64,
        stagger_ms: f64,
        num_points: usize,
        delay_at_end_ms: f64,
    ) -> Self {
        let delay_by_index = if num_points > 0 {
            stagger_ms / num_points as f64
        } else {
            0.0
        };
        Self {
            duration_ms,
            delay_by_index,
            delay_at_end_ms,
            num_points,
        }
    }

    /// Time until the last point has arrived.
    #[must_use]
    pub fn max_duration(&self) -> f64 {
        self.duration_ms + self.delay_by_index * self.num_points as f64
    }

    /// Elapsed time after which the transition is complete.
    #[must_use]
    pub fn end_ms(&self) -> f64 {
        self.max_duration() + self.delay_at_end_ms
    }

    /// Start offset of point `index`.
    #[inline]
    #[must_use]
    pub fn point_delay(&self, index: usize) -> f64 {
        self.delay_by_index * index as f64
    }

    /// Phase at `elapsed` ms into the transition.
    #[must_use]
    pub fn phase(&self, elapsed: f64) -> Phase {
        if elapsed > self.end_ms() {
            Phase::Complete
        } else if elapsed >= self.max_duration() {
            Phase::Settled
        } else {
            Phase::Interpolating
        }
    }
}

/// A transition's frame clock. The start time is taken from the first
/// frame it sees, not from when it was created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionClock {
    timing: TransitionTiming,
    start_ms: Option<f64>,
}

impl TransitionClock {
    /// Clock waiting for its first frame.
    #[must_use]
    pub fn new(timing: TransitionTiming) -> Self {
        Self {
            timing,
            start_ms: None,
        }
    }

    /// Milliseconds since the first frame, capturing it if this is it.
    pub fn elapsed(&mut self, now_ms: f64) -> f64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        (now_ms - start).max(0.0)
    }

    /// Timing constants.
    #[must_use]
    pub fn timing(&self) -> &TransitionTiming {
        &self.timing
    }
}

/// What a subscribed frame observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    /// Milliseconds since the transition's first frame.
    pub elapsed: f64,
    /// Phase at `elapsed`.
    pub phase: Phase,
}

/// Holds at most one frame subscription.
///
/// A new transition may only subscribe after the previous subscription is
/// cancelled, so two interpolation passes never overlap on one point set.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    subscription: Option<TransitionClock>,
}

impl RenderScheduler {
    /// Idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a new transition to frames. Any previous subscription is
    /// withdrawn first.
    pub fn subscribe(&mut self, timing: TransitionTiming) {
        if self.subscription.is_some() {
            log::debug!("scheduler: replacing an active subscription");
            self.cancel();
        }
        self.subscription = Some(TransitionClock::new(timing));
    }

    /// Withdraw the frame subscription. Later frames are ignored until the
    /// next `subscribe`.
    pub fn cancel(&mut self) {
        self.subscription = None;
    }

    /// Whether a transition is subscribed.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Timing of the subscribed transition.
    #[must_use]
    pub fn timing(&self) -> Option<&TransitionTiming> {
        self.subscription.as_ref().map(TransitionClock::timing)
    }

    /// Advance to `now_ms`. `None` if nothing is subscribed.
    pub fn frame(&mut self, now_ms: f64) -> Option<FrameState> {
        let clock = self.subscription.as_mut()?;
        let elapsed = clock.elapsed(now_ms);
        Some(FrameState {
            elapsed,
            phase: clock.timing().phase(elapsed),
        })
    }
}

/// CPU mirror of the vertex shader's interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolator {
    /// Transition timing.
    pub timing: TransitionTiming,
    /// Easing curve.
    pub easing: EasingFunction,
}

impl Interpolator {
    /// Eased progress of point `index` at `elapsed` ms.
    #[must_use]
    pub fn progress(&self, index: usize, elapsed: f64) -> f32 {
        if self.timing.duration_ms <= 0.0 {
            return 1.0;
        }
        let delay = self.timing.point_delay(index);
        if elapsed < delay {
            return 0.0;
        }
        let raw = (elapsed - delay) / self.timing.duration_ms;
        self.easing.evaluate(raw as f32)
    }

    /// Position and color of `point` (at `index`) at `elapsed` ms.
    #[must_use]
    pub fn sample(
        &self,
        point: &Point,
        index: usize,
        elapsed: f64,
    ) -> (Vec2, [f32; 3]) {
        point.interpolate(self.progress(index, elapsed))
    }
}

/// 32-byte per-frame uniform block for the point shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    /// Stage size in pixels.
    pub stage_size: [f32; 2],
    /// Point side length in pixels.
    pub point_width: f32,
    /// Milliseconds since the transition's first frame.
    pub elapsed: f32,
    /// Per-point move time.
    pub duration: f32,
    /// Start offset between consecutive points.
    pub delay_by_index: f32,
    /// Easing branch, see [`EasingFunction::shader_code`].
    pub easing: f32,
    /// Keeps the block 16-byte aligned.
    pub _pad: f32,
}

impl FrameUniforms {
    /// Uniforms for one frame of a transition.
    #[must_use]
    pub fn new(
        stage_size: (f32, f32),
        point_width: f32,
        interpolator: &Interpolator,
        elapsed: f64,
    ) -> Self {
        Self {
            stage_size: [stage_size.0, stage_size.1],
            point_width,
            elapsed: elapsed as f32,
            duration: interpolator.timing.duration_ms as f32,
            delay_by_index: interpolator.timing.delay_by_index as f32,
            easing: interpolator.easing.shader_code(),
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classification;

    fn timing() -> TransitionTiming {
        TransitionTiming::new(5000.0, 500.0, 1000, 1000.0)
    }

    #[test]
    fn end_condition_for_thousand_points() {
        let t = timing();
        assert_eq!(t.delay_by_index, 0.5);
        assert_eq!(t.max_duration(), 5500.0);
        assert_eq!(t.end_ms(), 6500.0);
        assert_eq!(t.phase(5499.0), Phase::Interpolating);
        assert_eq!(t.phase(5500.0), Phase::Settled);
        assert_eq!(t.phase(6500.0), Phase::Settled);
        assert_eq!(t.phase(6500.1), Phase::Complete);
    }

    #[test]
    fn clock_starts_on_first_frame() {
        let mut scheduler = RenderScheduler::new();
        assert_eq!(scheduler.frame(10.0), None);

        scheduler.subscribe(timing());
        let first = scheduler.frame(1000.0).unwrap();
        assert_eq!(first.elapsed, 0.0);
        assert_eq!(first.phase, Phase::Interpolating);
        assert_eq!(scheduler.frame(7600.0).unwrap().phase, Phase::Complete);
    }

    #[test]
    fn cancelled_subscription_ignores_frames() {
        let mut scheduler = RenderScheduler::new();
        scheduler.subscribe(timing());
        let _ = scheduler.frame(0.0);
        scheduler.cancel();
        assert!(!scheduler.is_subscribed());
        assert_eq!(scheduler.frame(100.0), None);
    }

    #[test]
    fn resubscribing_restarts_the_clock() {
        let mut scheduler = RenderScheduler::new();
        scheduler.subscribe(timing());
        let _ = scheduler.frame(0.0);
        scheduler.subscribe(timing());
        assert_eq!(scheduler.frame(9000.0).unwrap().elapsed, 0.0);
    }

    fn moving_point() -> Point {
        let mut p = Point::classified(Classification {
            index: Some(0),
            class: Some(0.0),
            color: [0.0, 0.0, 0.0],
        });
        p.target = Vec2::new(100.0, 0.0);
        p.color_end = [1.0, 1.0, 1.0];
        p
    }

    #[test]
    fn zero_duration_shows_target_on_first_frame() {
        let interp = Interpolator {
            timing: TransitionTiming::new(0.0, 500.0, 10, 0.0),
            easing: EasingFunction::CubicInOut,
        };
        let p = moving_point();
        // Even the last, most delayed point.
        assert_eq!(interp.sample(&p, 9, 0.0), (p.target, p.color_end));
    }

    #[test]
    fn staggered_points_hold_then_ease() {
        let interp = Interpolator {
            timing: timing(),
            easing: EasingFunction::CubicInOut,
        };
        let p = moving_point();
        // Point 100 starts at 50 ms.
        assert_eq!(interp.sample(&p, 100, 49.0).0, p.start);
        assert_eq!(interp.progress(100, 50.0), 0.0);
        assert_eq!(interp.progress(100, 2550.0), 0.5);
        assert_eq!(interp.sample(&p, 100, 5050.0).0, p.target);
        assert_eq!(interp.progress(100, 99_999.0), 1.0);
    }

    #[test]
    fn uniform_block_is_32_bytes() {
        assert_eq!(size_of::<FrameUniforms>(), 32);
        let interp = Interpolator {
            timing: timing(),
            easing: EasingFunction::Linear,
        };
        let u = FrameUniforms::new((800.0, 600.0), 2.0, &interp, 12.0);
        assert_eq!(u.delay_by_index, 0.5);
        assert_eq!(u.easing, 0.0);
    }
}
