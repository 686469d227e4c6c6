use std::time::Duration;

use crate::anim::{Interpolate as _, Rgba, Timer};

/// Occupancy state of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum CellState {
    /// Nothing in the cell.
    #[default]
    Empty,
    /// A locked block: a level obstacle or a solidified shape cell.
    Static,
    /// Occupied by the live falling shape.
    Shape,
    /// An obstacle that does not block the shape; the shape destroys it.
    Explosive,
    /// Returned for out-of-bounds queries. Never stored in a cell.
    Invalid,
}

impl CellState {
    /// Whether a shape cell may move into a cell in this state.
    #[must_use]
    pub fn is_passable(self) -> bool {
        matches!(self, Self::Empty | Self::Shape | Self::Explosive)
    }
}

/// Why a cell holds its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum CellTag {
    /// Untouched since the board was reset.
    #[default]
    None,
    /// Locked in place by solidifying the player's shape. Cleared by full rows.
    Permanent,
    /// Placed by level generation. Survives row clears.
    Always,
    /// Occupied or vacated by the moving shape.
    Transient,
}

/// A single board position with its visual state.
///
/// Every state change records the previous state and re-arms the fade
/// timer, so the renderer can cross-fade from `previous_state` to `state`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    state: CellState,
    previous_state: CellState,
    tag: CellTag,
    color: Rgba,
    fade: Timer,
}

impl Cell {
    pub(crate) const fn new(fade_interval: Duration) -> Self {
        Self {
            state: CellState::Empty,
            previous_state: CellState::Empty,
            tag: CellTag::None,
            color: Rgba::WHITE,
            fade: Timer::stopped(fade_interval),
        }
    }

    #[must_use]
    pub const fn state(&self) -> CellState {
        self.state
    }

    #[must_use]
    pub const fn previous_state(&self) -> CellState {
        self.previous_state
    }

    #[must_use]
    pub const fn tag(&self) -> CellTag {
        self.tag
    }

    #[must_use]
    pub const fn color(&self) -> Rgba {
        self.color
    }

    pub const fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    #[must_use]
    pub const fn is_fading(&self) -> bool {
        self.fade.is_running()
    }

    /// Fade progress in `0.0..=1.0`; `1.0` when no fade is running.
    #[must_use]
    pub fn fade_progress(&self) -> f32 {
        if self.fade.is_running() {
            self.fade.progress().clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub(crate) fn change_state(&mut self, state: CellState, tag: CellTag) {
        assert!(
            !state.is_invalid(),
            "`CellState::Invalid` must never be stored in a cell"
        );
        self.previous_state = self.state;
        self.state = state;
        self.tag = tag;
        self.fade.restart();
    }

    /// Advances the fade. Collapses `previous_state` when it completes.
    pub(crate) fn update_fade(&mut self, dt: Duration) {
        if self.fade.update(dt).finished {
            self.previous_state = self.state;
        }
    }

    /// Layers to draw for this cell, bottom first.
    #[must_use]
    pub fn visual(&self) -> CellVisual {
        let layer = |state: CellState, color: Rgba| {
            (!state.is_empty()).then_some(CellLayer {
                state,
                tag: self.tag,
                color,
            })
        };
        if !self.is_fading() {
            return CellVisual {
                previous: None,
                current: layer(self.state, self.color),
            };
        }
        let t = self.fade_progress();
        CellVisual {
            previous: layer(
                self.previous_state,
                self.color.lerp(t, Rgba::TRANSPARENT),
            ),
            current: layer(self.state, Rgba::TRANSPARENT.lerp(t, self.color)),
        }
    }
}

/// One drawable layer of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayer {
    pub state: CellState,
    pub tag: CellTag,
    /// Tint with the fade applied to the alpha channel.
    pub color: Rgba,
}

/// What a renderer should draw for a cell this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellVisual {
    /// The fading-out state, present only while a fade is running.
    pub previous: Option<CellLayer>,
    /// The fading-in (or settled) state. `None` for empty cells.
    pub current: Option<CellLayer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FADE: Duration = Duration::from_millis(200);

    #[test]
    fn test_new_cell_is_settled() {
        let cell = Cell::new(FADE);
        assert_eq!(cell.state(), CellState::Empty);
        assert_eq!(cell.previous_state(), CellState::Empty);
        assert_eq!(cell.tag(), CellTag::None);
        assert!(!cell.is_fading());
        assert_eq!(cell.visual(), CellVisual::default());
    }

    #[test]
    fn test_fade_collapses_previous_state() {
        let mut cell = Cell::new(FADE);
        cell.change_state(CellState::Static, CellTag::Always);
        assert!(cell.is_fading());
        assert_eq!(cell.previous_state(), CellState::Empty);

        cell.update_fade(Duration::from_millis(100));
        assert!(cell.is_fading());
        cell.update_fade(Duration::from_millis(100));
        assert!(!cell.is_fading());
        assert_eq!(cell.previous_state(), CellState::Static);
    }

    #[test]
    fn test_visual_cross_fades() {
        let mut cell = Cell::new(FADE);
        cell.change_state(CellState::Shape, CellTag::Transient);
        cell.update_fade(Duration::from_millis(200));
        cell.change_state(CellState::Static, CellTag::Permanent);
        cell.update_fade(Duration::from_millis(50));

        let visual = cell.visual();
        let previous = visual.previous.unwrap();
        let current = visual.current.unwrap();
        assert_eq!(previous.state, CellState::Shape);
        assert_eq!(current.state, CellState::Static);
        assert!((previous.color.a - 0.75).abs() < 1e-4);
        assert!((current.color.a - 0.25).abs() < 1e-4);
    }

    #[test]
    #[should_panic(expected = "must never be stored")]
    fn test_storing_invalid_panics() {
        let mut cell = Cell::new(FADE);
        cell.change_state(CellState::Invalid, CellTag::None);
    }

    #[test]
    fn test_passable_states() {
        assert!(CellState::Empty.is_passable());
        assert!(CellState::Shape.is_passable());
        assert!(CellState::Explosive.is_passable());
        assert!(!CellState::Static.is_passable());
        assert!(!CellState::Invalid.is_passable());
    }
}
