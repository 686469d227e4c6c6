use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// When the loop emits render events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Every `Duration`, whether or not anything changed.
    Interval(Duration),
    /// After each tick or terminal event.
    #[default]
    OnDirty,
    /// After changes, at most once per `Duration`.
    Throttled(Duration),
}

impl RenderMode {
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Tick and render deadlines, evaluated against an explicit clock.
#[derive(Debug)]
struct Schedule {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Schedule {
    fn new(now: Instant) -> Self {
        let past = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: past,
            last_render: past,
            dirty: true,
        }
    }

    /// Returns the tick or render event due at `now`, ticks first.
    ///
    /// A tick's `dt` is the time since the previous tick, clamped to the tick
    /// interval so a stalled terminal never produces one huge step.
    fn due(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(interval) = self.tick_interval {
            let elapsed = now.duration_since(self.last_tick);
            if elapsed >= interval {
                self.last_tick = now;
                self.dirty = true;
                return Some(TuiEvent::Tick {
                    dt: elapsed.min(interval),
                });
            }
        }

        let render = match self.render_mode {
            RenderMode::Interval(interval) => now.duration_since(self.last_render) >= interval,
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if render {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// How long to wait for terminal input before the next deadline.
    ///
    /// `None` means nothing is scheduled and the loop may block indefinitely.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::Interval(interval) => Some(self.last_render + interval),
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_at.saturating_duration_since(now))
    }
}

/// Produces the next [`TuiEvent`], blocking on terminal input in between.
#[derive(Debug)]
pub(super) struct EventLoop {
    schedule: Schedule,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            schedule: Schedule::new(Instant::now()),
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.schedule.tick_interval = interval;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.schedule.render_mode = render_mode;
    }

    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.schedule.due(now) {
                return Ok(event);
            }
            if let Some(timeout) = self.schedule.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }
            self.schedule.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
