use std::{collections::VecDeque, time::Duration};

use arrayvec::ArrayVec;

use super::{
    board::Board,
    cell::{CellState, CellTag},
    position::BoardPos,
};
use crate::anim::{Rgba, Timer};

/// Maximum number of cells a shape can hold.
pub const MAX_SHAPE_CELLS: usize = 16;

/// Direction the player or gravity can move a shape in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    /// Unit offset of this direction. `Down` decreases `y`.
    #[must_use]
    pub const fn vector(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Down => (0, -1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("spawn blocked at {pos}")]
pub struct SpawnBlockedError {
    #[error(not(source))]
    pub pos: BoardPos,
}

/// Result of advancing shape gravity by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GravityOutcome {
    /// The gravity period has not elapsed, or there is no live shape.
    Idle,
    /// The shape moved down one row, destroying `exploded` explosive cells.
    Fell { exploded: usize },
    /// The shape could not move down and must be solidified.
    Landed,
}

/// The single falling shape controlled by the player.
///
/// A shape owns its cell coordinates while the board owns the occupancy. Every
/// operation keeps the two in sync: each live coordinate reads
/// [`CellState::Shape`] on the board.
#[derive(Debug, Clone)]
pub struct Shape {
    cells: ArrayVec<BoardPos, MAX_SHAPE_CELLS>,
    valid: bool,
    gravity: Timer,
}

impl Shape {
    /// Creates an invalid (not yet spawned) shape.
    #[must_use]
    pub fn new(gravity_period: Duration) -> Self {
        Self {
            cells: ArrayVec::new(),
            valid: false,
            gravity: Timer::stopped(gravity_period),
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[BoardPos] {
        &self.cells
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Forgets the shape without touching the board.
    ///
    /// Used when the board is about to be re-initialized anyway.
    pub fn discard(&mut self) {
        self.cells.clear();
        self.valid = false;
        self.gravity.stop();
    }

    /// Places a new shape of `count` cells along the top of the board.
    ///
    /// Cell `i` goes to `(i % width, height - 1 - i / width)`. When any of those
    /// cells is occupied (or off the board) nothing is written and the shape
    /// stays invalid.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero or exceeds [`MAX_SHAPE_CELLS`].
    pub fn spawn(&mut self, board: &mut Board, count: usize) -> Result<(), SpawnBlockedError> {
        assert!(
            (1..=MAX_SHAPE_CELLS).contains(&count),
            "shape cell count must be in 1..={MAX_SHAPE_CELLS}, got {count}"
        );
        let width = board.width().max(1);
        let top = i32::try_from(board.height()).unwrap_or(i32::MAX) - 1;
        let cells = (0..count)
            .map(|i| {
                let x = i32::try_from(i % width).unwrap_or(i32::MAX);
                let y = top - i32::try_from(i / width).unwrap_or(i32::MAX);
                BoardPos::new(x, y)
            })
            .collect::<ArrayVec<_, MAX_SHAPE_CELLS>>();

        if let Some(&pos) = cells
            .iter()
            .find(|&&pos| !board.state_at(pos).is_empty())
        {
            self.discard();
            return Err(SpawnBlockedError { pos });
        }

        for &pos in &cells {
            board.set_state(pos, CellState::Shape, CellTag::Transient);
        }
        self.cells = cells;
        self.valid = true;
        self.gravity.restart();
        tracing::debug!(count, "shape spawned");
        Ok(())
    }

    /// Positions the shape would occupy after moving in `dir`.
    pub fn destinations(&self, dir: MoveDirection) -> impl Iterator<Item = BoardPos> + '_ {
        self.cells.iter().map(move |pos| pos.offset(dir.vector()))
    }

    /// Number of explosive cells the shape would destroy by moving in `dir`.
    #[must_use]
    pub fn explosives_ahead(&self, board: &Board, dir: MoveDirection) -> usize {
        let mut targets = self
            .destinations(dir)
            .filter(|&pos| board.state_at(pos).is_explosive())
            .collect::<ArrayVec<_, MAX_SHAPE_CELLS>>();
        targets.sort_unstable_by_key(|pos| (pos.x, pos.y));
        let mut unique = targets.len();
        for pair in targets.windows(2) {
            if pair[0] == pair[1] {
                unique -= 1;
            }
        }
        unique
    }

    /// Whether every cell of the shape can move one step in `dir`.
    #[must_use]
    pub fn can_move(&self, board: &Board, dir: MoveDirection) -> bool {
        if self.cells.is_empty() {
            return false;
        }
        let within_edge = match dir {
            MoveDirection::Left => self.cells.iter().all(|pos| pos.x > 0),
            MoveDirection::Right => {
                let last = i32::try_from(board.width()).unwrap_or(i32::MAX) - 1;
                self.cells.iter().all(|pos| pos.x < last)
            }
            MoveDirection::Down => self.cells.iter().all(|pos| pos.y > 0),
        };
        within_edge
            && self
                .destinations(dir)
                .all(|pos| board.state_at(pos).is_passable())
    }

    /// Moves the shape one step in `dir` if possible.
    ///
    /// Cells are moved one at a time. A vacated coordinate is only cleared
    /// when no other shape cell currently holds it, so overlapping old and
    /// new positions stay occupied. Explosive cells in the way are destroyed.
    ///
    /// # Panics
    ///
    /// Panics if a shape coordinate does not read [`CellState::Shape`] on the
    /// board.
    pub fn move_by(&mut self, board: &mut Board, dir: MoveDirection) -> bool {
        if !self.can_move(board, dir) {
            return false;
        }
        for i in 0..self.cells.len() {
            let old = self.cells[i];
            let new = old.offset(dir.vector());
            let state = board.state_at(old);
            assert!(
                state.is_shape(),
                "shape cell {i} at {old} reads {state:?} instead of Shape"
            );
            let shared = self
                .cells
                .iter()
                .enumerate()
                .any(|(j, &pos)| j != i && pos == old);
            if !shared {
                board.set_state(old, CellState::Empty, CellTag::Transient);
            }
            board.set_state(new, CellState::Shape, CellTag::Transient);
            self.cells[i] = new;
        }
        true
    }

    /// Locks the shape into the board as white permanent blocks.
    ///
    /// # Panics
    ///
    /// Panics if any shape coordinate does not read [`CellState::Shape`].
    pub fn solidify(&mut self, board: &mut Board) {
        for &pos in &self.cells {
            let state = board.state_at(pos);
            assert!(
                state.is_shape(),
                "cannot solidify cell at {pos}: reads {state:?} instead of Shape"
            );
            board.set_state(pos, CellState::Static, CellTag::Permanent);
            board.set_color(pos, Rgba::WHITE);
        }
        tracing::debug!(cells = self.cells.len(), "shape solidified");
        self.discard();
    }

    /// Whether moving cell `index` to `target` keeps the shape in one piece.
    ///
    /// `target` must be on the board, free of other shape cells and `Empty`.
    /// The shape with `index` replaced by `target` must then be 4-connected.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a cell of this shape.
    #[must_use]
    pub fn still_connected(&self, board: &Board, index: usize, target: BoardPos) -> bool {
        assert!(
            index < self.cells.len(),
            "shape cell index {index} out of range for {} cells",
            self.cells.len()
        );
        if !board.contains(target)
            || self.cells.contains(&target)
            || !board.state_at(target).is_empty()
        {
            return false;
        }

        let mut cells = self.cells.clone();
        cells[index] = target;

        let mut visited = [false; MAX_SHAPE_CELLS];
        let mut queue = VecDeque::from([0]);
        visited[0] = true;
        let mut reached = 1;
        while let Some(current) = queue.pop_front() {
            let neighbors = cells[current].neighbors();
            for (next, pos) in cells.iter().enumerate() {
                if !visited[next] && neighbors.contains(pos) {
                    visited[next] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }
        reached == cells.len()
    }

    /// Moves cell `index` to `target` when [`still_connected`](Self::still_connected) allows it.
    pub fn drag_cell_to(&mut self, board: &mut Board, index: usize, target: BoardPos) -> bool {
        if !self.still_connected(board, index, target) {
            return false;
        }
        let old = self.cells[index];
        board.set_state(old, CellState::Empty, CellTag::Transient);
        board.set_state(target, CellState::Shape, CellTag::Transient);
        self.cells[index] = target;
        true
    }

    /// Index of the shape cell under a board-relative point.
    ///
    /// When cells overlap on their shared edge the last one wins.
    #[must_use]
    pub fn hovered_cell(&self, point: (f32, f32)) -> Option<usize> {
        self.cells.iter().rposition(|pos| pos.covers(point))
    }

    /// Restarts the gravity period, e.g. after the player moved down.
    pub fn reset_gravity(&mut self) {
        if self.valid {
            self.gravity.restart();
        }
    }

    /// Advances gravity and drops the shape one row when the period elapses.
    pub fn gravity_step(&mut self, board: &mut Board, dt: Duration) -> GravityOutcome {
        if !self.valid || !self.gravity.update(dt).finished {
            return GravityOutcome::Idle;
        }
        self.gravity.restart();
        let exploded = self.explosives_ahead(board, MoveDirection::Down);
        if self.move_by(board, MoveDirection::Down) {
            GravityOutcome::Fell { exploded }
        } else {
            GravityOutcome::Landed
        }
    }
}
