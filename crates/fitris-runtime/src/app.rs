use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// A game driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Configure the tick rate and render mode here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles key, mouse and resize events.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the game by `dt`, the time since the previous tick clamped to
    /// the tick interval.
    fn update(&mut self, runtime: &mut Runtime, dt: Duration);
}
