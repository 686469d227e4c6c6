use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Timer;

/// Values that can be linearly interpolated.
pub trait Interpolate: Copy {
    /// Interpolates from `self` (at `t = 0`) to `other` (at `t = 1`).
    #[must_use]
    fn lerp(self, t: f32, other: Self) -> Self;
}

impl Interpolate for f32 {
    fn lerp(self, t: f32, other: Self) -> Self {
        self + (other - self) * t
    }
}

/// Easing curve applied to the normalized timer progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LerpCurve {
    /// Straight line from start to end.
    #[default]
    Linear,
    /// Smoothstep from start to end.
    SmoothStep01,
    /// Smoothstep from start to end and back to start.
    SmoothStep00,
    /// Two full start → end → start cycles.
    SmoothStep01010,
}

fn smooth_step(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

impl LerpCurve {
    /// Maps normalized time to an interpolation factor.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmoothStep01 => smooth_step(t),
            Self::SmoothStep00 => {
                if t < 0.5 {
                    smooth_step(2.0 * t)
                } else {
                    smooth_step(2.0 - 2.0 * t)
                }
            }
            Self::SmoothStep01010 => {
                let scaled = t * 4.0;
                let segment = scaled.floor();
                let local = scaled - segment;
                if segment >= 4.0 {
                    0.0
                } else if segment % 2.0 == 0.0 {
                    smooth_step(local)
                } else {
                    smooth_step(1.0 - local)
                }
            }
        }
    }

    /// Whether the curve settles back on the start value when it completes.
    #[must_use]
    pub fn returns_to_start(self) -> bool {
        matches!(self, Self::SmoothStep00 | Self::SmoothStep01010)
    }
}

/// A value animated between two endpoints over a [`Timer`].
///
/// On completion the value snaps to the curve's resting value (the end for
/// [`LerpCurve::Linear`]/[`LerpCurve::SmoothStep01`], the start for the
/// curves that return) and the timer stops.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use fitris_engine::anim::{Lerp, LerpCurve};
///
/// let mut lerp = Lerp::new(0.0_f32, 10.0, Duration::from_millis(100), LerpCurve::Linear);
/// lerp.update(Duration::from_millis(50));
/// assert!((lerp.value() - 5.0).abs() < 1e-4);
/// assert!(lerp.update(Duration::from_millis(50)));
/// assert!((lerp.value() - 10.0).abs() < f32::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lerp<T> {
    start: T,
    end: T,
    value: T,
    curve: LerpCurve,
    timer: Timer,
}

impl<T> Lerp<T>
where
    T: Interpolate,
{
    /// Starts animating from `start` to `end`.
    #[must_use]
    pub fn new(start: T, end: T, period: Duration, curve: LerpCurve) -> Self {
        Self {
            start,
            end,
            value: start,
            curve,
            timer: Timer::new(period),
        }
    }

    /// A lerp holding `value` with no animation running.
    #[must_use]
    pub fn idle(value: T) -> Self {
        Self {
            start: value,
            end: value,
            value,
            curve: LerpCurve::Linear,
            timer: Timer::stopped(Duration::ZERO),
        }
    }

    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }

    /// Advances the animation. Returns `true` on the update that completes it.
    pub fn update(&mut self, dt: Duration) -> bool {
        if !self.timer.is_running() {
            return false;
        }
        let tick = self.timer.update(dt);
        if tick.finished {
            self.value = if self.curve.returns_to_start() {
                self.start
            } else {
                self.end
            };
            return true;
        }
        self.value = self.start.lerp(self.curve.apply(tick.progress), self.end);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_curve_endpoints() {
        for curve in [LerpCurve::Linear, LerpCurve::SmoothStep01] {
            assert_close(curve.apply(0.0), 0.0);
            assert_close(curve.apply(1.0), 1.0);
        }
        for curve in [LerpCurve::SmoothStep00, LerpCurve::SmoothStep01010] {
            assert_close(curve.apply(0.0), 0.0);
            assert_close(curve.apply(1.0), 0.0);
        }
    }

    #[test]
    fn test_smooth_step_00_peaks_at_midpoint() {
        assert_close(LerpCurve::SmoothStep00.apply(0.5), 1.0);
        assert_close(LerpCurve::SmoothStep01010.apply(0.25), 1.0);
        assert_close(LerpCurve::SmoothStep01010.apply(0.5), 0.0);
        assert_close(LerpCurve::SmoothStep01010.apply(0.75), 1.0);
    }

    #[test]
    fn test_returning_curve_finishes_at_start() {
        let mut lerp = Lerp::new(2.0_f32, 8.0, MS_100, LerpCurve::SmoothStep00);
        lerp.update(Duration::from_millis(50));
        assert_close(lerp.value(), 8.0);
        assert!(lerp.update(Duration::from_millis(60)));
        assert_close(lerp.value(), 2.0);
        assert!(!lerp.update(Duration::from_millis(60)));
        assert_close(lerp.value(), 2.0);
    }

    #[test]
    fn test_idle_lerp_never_finishes() {
        let mut lerp = Lerp::idle(3.0_f32);
        assert!(!lerp.update(Duration::from_secs(5)));
        assert_close(lerp.value(), 3.0);
    }
}
