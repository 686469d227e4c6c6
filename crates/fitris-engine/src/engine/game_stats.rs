/// Counters tracked over a game session.
///
/// - **Shapes solidified**: shapes locked into the board
/// - **Rows cleared**: full rows whose player blocks were removed
/// - **Levels started**: boards generated, including restarts
/// - **Lives lost**: spawns blocked by a full board
///
/// # Example
///
/// ```
/// use fitris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.solidify_shape();
/// stats.clear_rows(2);
///
/// assert_eq!(stats.shapes_solidified(), 1);
/// assert_eq!(stats.rows_cleared(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStats {
    shapes_solidified: usize,
    rows_cleared: usize,
    levels_started: usize,
    lives_lost: usize,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shapes_solidified: 0,
            rows_cleared: 0,
            levels_started: 0,
            lives_lost: 0,
        }
    }

    #[must_use]
    pub const fn shapes_solidified(&self) -> usize {
        self.shapes_solidified
    }

    #[must_use]
    pub const fn rows_cleared(&self) -> usize {
        self.rows_cleared
    }

    #[must_use]
    pub const fn levels_started(&self) -> usize {
        self.levels_started
    }

    #[must_use]
    pub const fn lives_lost(&self) -> usize {
        self.lives_lost
    }

    pub const fn solidify_shape(&mut self) {
        self.shapes_solidified += 1;
    }

    pub const fn clear_rows(&mut self, count: usize) {
        self.rows_cleared += count;
    }

    pub const fn start_level(&mut self) {
        self.levels_started += 1;
    }

    pub const fn lose_life(&mut self) {
        self.lives_lost += 1;
    }
}
