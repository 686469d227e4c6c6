use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Time to advance the game by `dt`.
    Tick { dt: Duration },
    /// Time to redraw.
    Render,
    #[from]
    Crossterm(CrosstermEvent),
}
