use std::time::Duration;

/// Period used when a timer is created with a zero period.
const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

/// A one-shot timer counting elapsed frame time against a fixed period.
///
/// A timer is either *running* (accumulating time) or *stopped*. When the
/// accumulated time reaches the period the timer reports a single
/// `finished` edge and stops itself; [`restart`](Self::restart) arms it again.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use fitris_engine::anim::Timer;
///
/// let mut timer = Timer::new(Duration::from_millis(100));
/// assert!(!timer.update(Duration::from_millis(60)).finished);
/// assert!(timer.update(Duration::from_millis(60)).finished);
/// assert!(!timer.is_running());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    elapsed: Option<Duration>,
    period: Duration,
}

/// Result of advancing a [`Timer`] by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimerTick {
    /// True exactly on the update that completed the period.
    pub finished: bool,
    /// Normalized progress in `0.0..=1.0`. Reads `1.0` on the finishing update
    /// and `0.0` when the timer was stopped.
    pub progress: f32,
}

impl Timer {
    /// Creates a running timer.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            elapsed: Some(Duration::ZERO),
            period: normalize_period(period),
        }
    }

    /// Creates a stopped timer that starts counting after [`restart`](Self::restart).
    #[must_use]
    pub const fn stopped(period: Duration) -> Self {
        Self {
            elapsed: None,
            period: normalize_period(period),
        }
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Resets elapsed time to zero and starts counting.
    pub const fn restart(&mut self) {
        self.elapsed = Some(Duration::ZERO);
    }

    pub const fn stop(&mut self) {
        self.elapsed = None;
    }

    /// Normalized progress of a running timer, `0.0` when stopped.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.elapsed
            .map_or(0.0, |elapsed| elapsed.as_secs_f32() / self.period.as_secs_f32())
    }

    /// Advances the timer by `dt`.
    ///
    /// A stopped timer is left untouched and reports no progress.
    pub fn update(&mut self, dt: Duration) -> TimerTick {
        let Some(elapsed) = &mut self.elapsed else {
            return TimerTick::default();
        };
        *elapsed += dt;
        if *elapsed >= self.period {
            self.elapsed = None;
            return TimerTick {
                finished: true,
                progress: 1.0,
            };
        }
        TimerTick {
            finished: false,
            progress: self.progress(),
        }
    }
}

const fn normalize_period(period: Duration) -> Duration {
    if period.is_zero() {
        DEFAULT_PERIOD
    } else {
        period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn test_new_timer_is_running() {
        let timer = Timer::new(MS_100);
        assert!(timer.is_running());
        assert!(timer.progress().abs() < f32::EPSILON);
    }

    #[test]
    fn test_finished_edge_fires_once() {
        let mut timer = Timer::new(MS_100);
        let tick = timer.update(Duration::from_millis(50));
        assert!(!tick.finished);
        assert!((tick.progress - 0.5).abs() < 1e-6);

        let tick = timer.update(Duration::from_millis(50));
        assert!(tick.finished);
        assert!((tick.progress - 1.0).abs() < f32::EPSILON);

        // Stopped afterwards: no further edges.
        let tick = timer.update(Duration::from_millis(500));
        assert_eq!(tick, TimerTick::default());
    }

    #[test]
    fn test_stopped_timer_does_not_advance() {
        let mut timer = Timer::stopped(MS_100);
        assert!(!timer.is_running());
        assert!(!timer.update(Duration::from_secs(10)).finished);

        timer.restart();
        assert!(timer.update(MS_100).finished);
    }

    #[test]
    fn test_zero_period_uses_default() {
        let timer = Timer::new(Duration::ZERO);
        assert_eq!(timer.period(), DEFAULT_PERIOD);
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut timer = Timer::new(MS_100);
        timer.update(Duration::from_millis(80));
        timer.restart();
        assert!(timer.progress().abs() < f32::EPSILON);
        assert!(!timer.update(Duration::from_millis(80)).finished);
    }
}
