/// A board coordinate. `y = 0` is the bottom row.
///
/// Coordinates are signed so that neighbours of edge cells can be queried;
/// such positions simply read as [`CellState::Invalid`](super::CellState::Invalid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
#[display("({x}, {y})")]
pub struct BoardPos {
    pub x: i32,
    pub y: i32,
}

impl BoardPos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four edge-adjacent positions.
    #[must_use]
    pub const fn neighbors(self) -> [Self; 4] {
        [
            self.offset((-1, 0)),
            self.offset((1, 0)),
            self.offset((0, -1)),
            self.offset((0, 1)),
        ]
    }

    /// Whether `point` (in board units, cells centred on integer
    /// coordinates) lies within this cell's unit square.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn covers(self, (px, py): (f32, f32)) -> bool {
        (px - self.x as f32).abs() <= 0.5 && (py - self.y as f32).abs() <= 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_neighbors() {
        let pos = BoardPos::new(2, 3);
        assert_eq!(pos.offset((0, -1)), BoardPos::new(2, 2));
        assert!(pos.neighbors().contains(&BoardPos::new(1, 3)));
        assert!(pos.neighbors().contains(&BoardPos::new(2, 4)));
        assert!(!pos.neighbors().contains(&BoardPos::new(3, 4)));
    }

    #[test]
    fn test_covers_unit_square() {
        let pos = BoardPos::new(1, 1);
        assert!(pos.covers((1.0, 1.0)));
        assert!(pos.covers((1.4, 0.6)));
        assert!(!pos.covers((1.6, 1.0)));
    }

    #[test]
    fn test_display() {
        assert_eq!(BoardPos::new(-1, 4).to_string(), "(-1, 4)");
    }
}
