use fitris_engine::{GameSession, Settings};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::Line,
    widgets::{Block, Padding, Widget},
};

use crate::ui::widgets::{
    BoardDisplay, MenuDisplay, StatusDisplay, TransitionDisplay, color, style,
};

/// Where the pieces of a [`SessionDisplay`] landed, for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionLayout {
    /// The board widget including its border.
    pub board: Rect,
    /// The cells of the board.
    pub grid: Rect,
}

#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    settings: &'a Settings,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, settings: &'a Settings) -> Self {
        Self { session, settings }
    }

    fn board(&self) -> BoardDisplay<'a> {
        let border_style = if self.session.mode().is_play() {
            color::WHITE
        } else {
            color::GRAY
        };
        BoardDisplay::new(self.session.board())
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT))
    }

    fn status(&self) -> StatusDisplay<'a> {
        StatusDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATUS").centered())
                .padding(Padding::horizontal(1))
                .style(style::DEFAULT),
        )
    }

    pub fn menu(&self) -> MenuDisplay<'a> {
        MenuDisplay::new(self.session.menu(), self.settings)
    }

    /// Splits `area` the same way [`render`](Widget::render) does.
    pub fn layout(&self, area: Rect) -> SessionLayout {
        let board = self.board();
        let status = self.status();
        let [_, board_column] = Layout::horizontal([
            Constraint::Length(status.width()),
            Constraint::Length(board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(board_column);
        SessionLayout {
            board: board_area,
            grid: board.grid_area(board_area),
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let board = self.board();
        let status = self.status();

        let [status_column, board_column] = Layout::horizontal([
            Constraint::Length(status.width()),
            Constraint::Length(board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);
        let [status_area] =
            Layout::vertical([Constraint::Length(status.height())]).areas(status_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(board_column);

        status.render(status_area, buf);
        board.render(board_area, buf);
        self.menu().render(board_area, buf);
        TransitionDisplay::new(self.session.transition_coverage()).render(board_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use fitris_engine::{GameConfig, GameMode};

    use super::*;

    #[test]
    fn test_layout_matches_render() {
        let config = GameConfig {
            start_mode: GameMode::Pause,
            ..GameConfig::default()
        };
        let session = GameSession::new(&config).unwrap();
        let settings = Settings::default();
        let display = SessionDisplay::new(&session, &settings);
        let area = Rect::new(0, 0, 80, 24);
        let layout = display.layout(area);
        assert_eq!(layout.grid.width, 20);
        assert_eq!(layout.grid.height, 16);

        let mut buf = Buffer::empty(area);
        Widget::render(&display, area, &mut buf);
        let corner = buf[(layout.board.x, layout.board.y)].symbol().to_owned();
        assert_eq!(corner, "┌");

        let popup = display.menu().popup_area(layout.board).unwrap();
        let title_row: String = (popup.left()..popup.right())
            .map(|x| buf[(x, popup.y + 1)].symbol())
            .collect();
        assert!(title_row.contains("PAUSED"), "{title_row:?}");
    }
}
