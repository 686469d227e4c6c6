use std::time::Duration;

use super::{GameMode, LevelTier};
use crate::anim::{Lerp, LerpCurve};

/// A deferred state change applied while the screen is fully covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Re-initialize the board with a freshly generated level.
    ChangeLevel { tier: LevelTier, block_count: usize },
    /// Switch game mode. `from` is the mode at request time.
    ChangeMode { mode: GameMode, from: GameMode },
    /// Restart the level, then show the death screen.
    GameOver { tier: LevelTier, block_count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TransitionPhase {
    Idle,
    /// Wipe moving in; the old state is still shown.
    Covering,
    /// Screen fully covered; the pending action has just been handed out.
    Invoking,
    /// Wipe moving out over the new state.
    Uncovering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("a transition is already in progress")]
pub struct TransitionBusyError;

/// Result of advancing a [`TransitionGate`] by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTick {
    /// Whether a transition is still running after this tick.
    pub in_transition: bool,
    /// The action to apply now. `Some` on exactly one tick per request.
    pub fired: Option<PendingAction>,
}

/// Serializes global state changes behind a cover/uncover screen wipe.
///
/// ```text
/// Idle --request--> Covering --full--> Invoking --next tick--> Uncovering --clear--> Idle
/// ```
///
/// Only one transition runs at a time: requests made while the gate is busy
/// are rejected.
#[derive(Debug, Clone)]
pub struct TransitionGate {
    phase: TransitionPhase,
    coverage: Lerp<f32>,
    half_duration: Duration,
    pending: Option<PendingAction>,
}

impl TransitionGate {
    /// Creates an idle gate whose wipe takes `half_duration` each way.
    #[must_use]
    pub fn new(half_duration: Duration) -> Self {
        Self {
            phase: TransitionPhase::Idle,
            coverage: Lerp::idle(0.0),
            half_duration,
            pending: None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> TransitionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase.is_idle()
    }

    /// Fraction of the screen covered by the wipe, in `0.0..=1.0`.
    #[must_use]
    pub fn coverage(&self) -> f32 {
        match self.phase {
            TransitionPhase::Idle => 0.0,
            TransitionPhase::Invoking => 1.0,
            TransitionPhase::Covering | TransitionPhase::Uncovering => {
                self.coverage.value().clamp(0.0, 1.0)
            }
        }
    }

    /// Starts a transition that will hand out `action` at full coverage.
    pub fn request(&mut self, action: PendingAction) -> Result<(), TransitionBusyError> {
        if !self.phase.is_idle() {
            tracing::warn!(?action, phase = ?self.phase, "transition request rejected");
            return Err(TransitionBusyError);
        }
        tracing::debug!(?action, "transition requested");
        self.pending = Some(action);
        self.phase = TransitionPhase::Covering;
        self.coverage = Lerp::new(0.0, 1.0, self.half_duration, LerpCurve::SmoothStep01);
        Ok(())
    }

    pub fn tick(&mut self, dt: Duration) -> TransitionTick {
        let mut fired = None;
        match self.phase {
            TransitionPhase::Idle => {}
            TransitionPhase::Covering => {
                if self.coverage.update(dt) {
                    self.phase = TransitionPhase::Invoking;
                    fired = self.pending.take();
                }
            }
            TransitionPhase::Invoking => {
                self.phase = TransitionPhase::Uncovering;
                self.coverage = Lerp::new(1.0, 0.0, self.half_duration, LerpCurve::SmoothStep01);
            }
            TransitionPhase::Uncovering => {
                if self.coverage.update(dt) {
                    self.phase = TransitionPhase::Idle;
                }
            }
        }
        TransitionTick {
            in_transition: !self.phase.is_idle(),
            fired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: Duration = Duration::from_millis(100);
    const STEP: Duration = Duration::from_millis(25);

    fn action() -> PendingAction {
        PendingAction::ChangeMode {
            mode: GameMode::Play,
            from: GameMode::Menu,
        }
    }

    #[test]
    fn test_action_fires_exactly_once() {
        let mut gate = TransitionGate::new(HALF);
        gate.request(action()).unwrap();

        let mut fired = Vec::new();
        let mut ticks = 0;
        loop {
            let tick = gate.tick(STEP);
            fired.extend(tick.fired);
            ticks += 1;
            if !tick.in_transition {
                break;
            }
            assert!(ticks < 100, "transition never finished");
        }
        assert_eq!(fired, vec![action()]);
        assert!(gate.is_idle());
        assert!(gate.coverage().abs() < f32::EPSILON);
    }

    #[test]
    fn test_phases_in_order() {
        let mut gate = TransitionGate::new(HALF);
        assert!(!gate.tick(STEP).in_transition);

        gate.request(action()).unwrap();
        assert!(gate.phase().is_covering());
        for _ in 0..3 {
            let tick = gate.tick(STEP);
            assert!(tick.in_transition);
            assert!(tick.fired.is_none());
        }
        let tick = gate.tick(STEP);
        assert_eq!(tick.fired, Some(action()));
        assert!(gate.phase().is_invoking());
        assert!((gate.coverage() - 1.0).abs() < f32::EPSILON);

        assert!(gate.tick(STEP).in_transition);
        assert!(gate.phase().is_uncovering());
    }

    #[test]
    fn test_busy_gate_rejects_requests() {
        let mut gate = TransitionGate::new(HALF);
        gate.request(action()).unwrap();
        let other = PendingAction::ChangeLevel {
            tier: LevelTier::Static,
            block_count: 4,
        };
        assert_eq!(gate.request(other), Err(TransitionBusyError));

        let fired = (0..20)
            .filter_map(|_| gate.tick(STEP).fired)
            .collect::<Vec<_>>();
        assert_eq!(fired, vec![action()]);
        assert!(gate.is_idle());
        assert!(gate.request(other).is_ok());
    }

    #[test]
    fn test_coverage_rises_while_covering() {
        let mut gate = TransitionGate::new(HALF);
        gate.request(action()).unwrap();
        gate.tick(Duration::from_millis(50));
        let half = gate.coverage();
        assert!(half > 0.0 && half < 1.0);
    }
}
