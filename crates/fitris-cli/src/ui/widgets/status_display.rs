use std::iter;

use fitris_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// Side panel with the level, lives and running counters.
pub struct StatusDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatusDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        16 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    Lives,
    LabelValue(&'static str, &'static dyn Fn(&GameSession) -> String),
}

const ROWS: &[Row] = &[
    Row::LabelValue("LEVEL:", &|session| session.tier().to_string()),
    Row::Lives,
    Row::Empty,
    Row::LabelValue("SHAPES:", &|session| {
        session.stats().shapes_solidified().to_string()
    }),
    Row::LabelValue("ROWS:", &|session| session.stats().rows_cleared().to_string()),
    Row::LabelValue("LEVELS:", &|session| {
        session.stats().levels_started().to_string()
    }),
    Row::LabelValue("LOST:", &|session| session.stats().lives_lost().to_string()),
];

impl Widget for StatusDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;
        let rows = Layout::vertical(ROWS.iter().map(|_| Constraint::Length(1))).split(area);
        for (row, area) in iter::zip(ROWS, rows.iter()) {
            match row {
                Row::Empty => {}
                Row::Lives => {
                    let hearts = "♥ ".repeat(usize::try_from(self.session.lives()).unwrap_or(0));
                    Line::from(vec![
                        Span::styled("LIVES:", style),
                        Span::raw(" "),
                        Span::styled(hearts.trim_end().to_owned(), style::LIVES),
                    ])
                    .render(*area, buf);
                }
                Row::LabelValue(label, value_fn) => {
                    let [label_area, value_area] =
                        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
                            .areas(*area);
                    Line::styled(*label, style).render(label_area, buf);
                    Line::styled(value_fn(self.session), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
