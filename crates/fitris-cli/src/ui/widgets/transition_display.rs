use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Widget},
};

use crate::ui::widgets::style;

/// Screen wipe drawn from the top down while a transition covers the screen.
#[derive(Debug, Clone, Copy)]
pub struct TransitionDisplay {
    coverage: f32,
}

impl TransitionDisplay {
    pub fn new(coverage: f32) -> Self {
        Self {
            coverage: coverage.clamp(0.0, 1.0),
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "coverage is clamped to 0..=1"
    )]
    fn covered_rows(self, height: u16) -> u16 {
        (f32::from(height) * self.coverage).ceil() as u16
    }
}

impl Widget for TransitionDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = self.covered_rows(area.height).min(area.height);
        if height == 0 {
            return;
        }
        Block::new()
            .style(style::WIPE)
            .render(Rect { height, ..area }, buf);
    }
}
