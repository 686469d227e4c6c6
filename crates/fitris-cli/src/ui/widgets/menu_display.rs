use fitris_engine::{GameMode, MenuState, Settings};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Position, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Clear, Widget},
};

use crate::ui::widgets::{style, to_color};

const POPUP_WIDTH: u16 = 20;
/// Rows above the first option: border, title, blank line.
const HEADER_ROWS: u16 = 3;

/// Popup listing the current mode's title and options.
///
/// Draws nothing while playing.
#[derive(Debug)]
pub struct MenuDisplay<'a> {
    menu: &'a MenuState,
    settings: &'a Settings,
}

impl<'a> MenuDisplay<'a> {
    pub fn new(menu: &'a MenuState, settings: &'a Settings) -> Self {
        Self { menu, settings }
    }

    fn title(&self) -> Option<(&'static str, Style)> {
        let title = match self.menu.mode() {
            GameMode::Play => return None,
            GameMode::Menu => "FITRIS",
            GameMode::Pause => "PAUSED",
            GameMode::Settings => "SETTINGS",
            GameMode::Quit => "QUIT",
            GameMode::Died => "GAME OVER!!",
            GameMode::Save => "SAVE",
            GameMode::Load => "LOAD",
        };
        let style = match self.menu.mode() {
            GameMode::Pause => style::PAUSED,
            GameMode::Died => style::DIED,
            GameMode::Settings => style::SETTINGS,
            _ => style::DEFAULT,
        };
        Some((title, style))
    }

    fn rows(&self) -> u16 {
        let items = u16::try_from(self.menu.options().len()).unwrap_or(0);
        // the title screen shows its prompt in place of options
        HEADER_ROWS + items.max(1) + 1
    }

    /// Where the popup lands inside `area`, or `None` while playing.
    pub fn popup_area(&self, area: Rect) -> Option<Rect> {
        self.title()?;
        Some(area.centered(Constraint::Length(POPUP_WIDTH), Constraint::Length(self.rows())))
    }

    /// Index of the option drawn at `position`, given the area the widget
    /// renders to.
    pub fn item_at(&self, area: Rect, position: Position) -> Option<usize> {
        let popup = self.popup_area(area)?;
        (0..self.menu.options().len()).find(|&i| item_rect(popup, i).contains(position))
    }
}

fn item_rect(popup: Rect, index: usize) -> Rect {
    let offset = HEADER_ROWS + u16::try_from(index).unwrap_or(u16::MAX - HEADER_ROWS);
    Rect::new(
        popup.x + 1,
        popup.y.saturating_add(offset),
        popup.width.saturating_sub(2),
        1,
    )
    .intersection(popup)
}

impl Widget for MenuDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &MenuDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (Some((title, title_style)), Some(popup)) = (self.title(), self.popup_area(area))
        else {
            return;
        };

        Clear.render(popup, buf);
        let block = Block::bordered().style(title_style);
        let inner = block.inner(popup);
        block.render(popup, buf);
        Line::styled(title, title_style)
            .centered()
            .render(Rect { height: 1, ..inner }, buf);

        let options = self.menu.options();
        if options.is_empty() {
            let prompt = Style::new().fg(to_color(self.menu.title_color()));
            Line::styled("Click To Start", prompt)
                .centered()
                .render(item_rect(popup, 0), buf);
            return;
        }
        for (i, option) in options.iter().enumerate() {
            let style = if i == self.menu.cursor() {
                style::MENU_SELECTED
            } else {
                style::MENU_ITEM
            };
            Line::styled(option.label(self.settings), style)
                .centered()
                .style(style)
                .render(item_rect(popup, i), buf);
        }
    }
}
