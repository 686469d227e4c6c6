use std::time::Duration;

use super::{
    cell::{Cell, CellState, CellTag, CellVisual},
    position::BoardPos,
};
use crate::anim::Rgba;

/// The playing field: a fixed-size grid of [`Cell`]s.
///
/// Cells are stored row-major with row `0` at the bottom. Positions outside
/// the grid never hold data:
///
/// - **Queries** ([`state_at`](Self::state_at), [`cell_at`](Self::cell_at))
///   report [`CellState::Invalid`] / `None`.
/// - **Mutations** ([`set_state`](Self::set_state)) panic, since only a logic
///   bug can produce them.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use fitris_engine::{Board, BoardPos, CellState, CellTag};
///
/// let mut board = Board::new(4, 6, Duration::from_millis(300));
/// board.set_state(BoardPos::new(0, 0), CellState::Static, CellTag::Always);
///
/// assert_eq!(board.state_at(BoardPos::new(0, 0)), CellState::Static);
/// assert_eq!(board.state_at(BoardPos::new(-1, 0)), CellState::Invalid);
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    fade_interval: Duration,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new(width: usize, height: usize, fade_interval: Duration) -> Self {
        let mut board = Self {
            width: 0,
            height: 0,
            fade_interval,
            cells: Vec::new(),
        };
        board.initialize(width, height);
        board
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn fade_interval(&self) -> Duration {
        self.fade_interval
    }

    /// Resizes the board and resets every cell to Empty/None/white with no fade.
    pub fn initialize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width * height, Cell::new(self.fade_interval));
    }

    /// Resets every cell, keeping the current dimensions.
    pub fn reset(&mut self) {
        self.initialize(self.width, self.height);
    }

    #[must_use]
    pub fn contains(&self, pos: BoardPos) -> bool {
        self.index(pos).is_some()
    }

    fn index(&self, pos: BoardPos) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Returns the state at `pos`, or [`CellState::Invalid`] when out of bounds.
    #[must_use]
    pub fn state_at(&self, pos: BoardPos) -> CellState {
        let Some(cell) = self.cell_at(pos) else {
            return CellState::Invalid;
        };
        let state = cell.state();
        assert!(!state.is_invalid(), "cell at {pos} holds an invalid state");
        state
    }

    #[must_use]
    pub fn cell_at(&self, pos: BoardPos) -> Option<&Cell> {
        self.index(pos).map(|idx| &self.cells[idx])
    }

    pub fn cell_at_mut(&mut self, pos: BoardPos) -> Option<&mut Cell> {
        self.index(pos).map(|idx| &mut self.cells[idx])
    }

    /// Changes the state of the cell at `pos` and restarts its fade.
    ///
    /// The old state becomes the cell's previous state even when `state` is
    /// unchanged, so every call produces a fresh fade.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    pub fn set_state(&mut self, pos: BoardPos, state: CellState, tag: CellTag) {
        let (width, height) = (self.width, self.height);
        let Some(cell) = self.cell_at_mut(pos) else {
            panic!("set_state out of bounds: {pos} on a {width}x{height} board");
        };
        cell.change_state(state, tag);
    }

    /// Sets the display tint of the cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    pub fn set_color(&mut self, pos: BoardPos, color: Rgba) {
        let (width, height) = (self.width, self.height);
        let Some(cell) = self.cell_at_mut(pos) else {
            panic!("set_color out of bounds: {pos} on a {width}x{height} board");
        };
        cell.set_color(color);
    }

    /// Returns every board position, bottom row first.
    pub fn positions(&self) -> impl Iterator<Item = BoardPos> + use<> {
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        (0..height).flat_map(move |y| (0..width).map(move |x| BoardPos::new(x, y)))
    }

    /// Returns the positions of all cells currently in `state`.
    pub fn positions_in_state(&self, state: CellState) -> impl Iterator<Item = BoardPos> + '_ {
        self.positions()
            .filter(move |&pos| self.state_at(pos) == state)
    }

    /// What the renderer should draw at `pos`; empty for out-of-bounds positions.
    #[must_use]
    pub fn cell_visual(&self, pos: BoardPos) -> CellVisual {
        self.cell_at(pos).map(Cell::visual).unwrap_or_default()
    }

    /// Maps a board-relative point to the nearest in-bounds cell.
    ///
    /// The point is clamped to the board first, so the result is always a
    /// valid position of a non-empty board.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn nearest_pos(&self, (px, py): (f32, f32)) -> BoardPos {
        let max_x = self.width.saturating_sub(1) as f32;
        let max_y = self.height.saturating_sub(1) as f32;
        let x = (px.clamp(0.0, max_x) + 0.5) as usize;
        let y = (py.clamp(0.0, max_y) + 0.5) as usize;
        BoardPos::new(
            i32::try_from(x.min(self.width.saturating_sub(1))).unwrap_or(0),
            i32::try_from(y.min(self.height.saturating_sub(1))).unwrap_or(0),
        )
    }

    /// Clears player-built blocks from every full row.
    ///
    /// A row is full when none of its cells is `Empty` or `Shape`. In a full
    /// row, each `Static` cell tagged [`CellTag::Permanent`] fades out to
    /// `Empty`; level obstacles and explosives stay.
    ///
    /// # Returns
    ///
    /// The number of full rows that had cells removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        for row in self.cells.chunks_mut(self.width.max(1)) {
            let full = row
                .iter()
                .all(|cell| !matches!(cell.state(), CellState::Empty | CellState::Shape));
            if !full {
                continue;
            }
            let mut removed = false;
            for cell in row
                .iter_mut()
                .filter(|cell| cell.state().is_static() && cell.tag().is_permanent())
            {
                cell.change_state(CellState::Empty, CellTag::Permanent);
                removed = true;
            }
            if removed {
                cleared += 1;
            }
        }
        cleared
    }

    /// Advances all running fades by `dt`.
    pub fn update_fades(&mut self, dt: Duration) {
        for cell in &mut self.cells {
            cell.update_fade(dt);
        }
    }
}
