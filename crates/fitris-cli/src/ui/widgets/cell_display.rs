use fitris_engine::{CellLayer, CellState, CellTag, CellVisual, anim::Rgba};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::{color, from_color, style, to_color};

/// One board cell: two terminal columns, one row.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    /// Blends the fading-out layer and the fading-in layer over the
    /// background.
    pub fn from_visual(visual: CellVisual) -> Self {
        let background = Rgba::BLACK;
        let fill = [visual.previous, visual.current]
            .into_iter()
            .flatten()
            .fold(background, |below, layer| layer_color(layer).over(below));

        let front = match (visual.previous, visual.current) {
            (Some(previous), Some(current)) if current.color.a < 0.5 => Some(previous),
            (None, Some(current)) if current.color.a < 0.5 => None,
            (Some(previous), None) if previous.color.a >= 0.5 => Some(previous),
            (_, current) => current,
        };
        let Some(front) = front else {
            return Self::new(style::EMPTY_DOT.bg(to_color(fill)), " .");
        };
        let symbol = match front.state {
            CellState::Shape => "[]",
            CellState::Explosive => "<>",
            CellState::Static | CellState::Empty | CellState::Invalid => "",
        };
        Self::new(Style::new().fg(color::BLACK).bg(to_color(fill)), symbol)
    }
}

fn layer_color(layer: CellLayer) -> Rgba {
    let base = match (layer.state, layer.tag) {
        (CellState::Static, CellTag::Always) => from_color(color::GRAY),
        (CellState::Static, _) => Rgba::new(0.8, 0.8, 0.8, 1.0),
        (CellState::Explosive, _) => Rgba::RED,
        (CellState::Shape | CellState::Empty | CellState::Invalid, _) => Rgba::WHITE,
    };
    base.tint(layer.color)
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
