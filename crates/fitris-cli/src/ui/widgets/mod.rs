use fitris_engine::anim::Rgba;
use ratatui::{layout::Rect, style::Color, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, cell_display::*, menu_display::*, session_display::*,
    status_display::*, transition_display::*,
};

mod board_display;
mod cell_display;
mod menu_display;
mod session_display;
mod status_display;
mod transition_display;

mod color {
    use ratatui::style::Color;

    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(60, 60, 60);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::BLACK);
    pub const HELP: Style = Style::new().fg(color::GRAY);
    pub const MENU_ITEM: Style = fg_bg(color::WHITE, color::BLACK);
    pub const MENU_SELECTED: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const PAUSED: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const DIED: Style = fg_bg(color::WHITE, color::RED);
    pub const SETTINGS: Style = fg_bg(color::WHITE, color::BLUE);
    pub const WIPE: Style = fg_bg(color::GRAY, color::DARK_GRAY);
    pub const LIVES: Style = Style::new().fg(color::RED);
}

fn to_color(rgba: Rgba) -> Color {
    let (r, g, b) = rgba.to_rgb8();
    Color::Rgb(r, g, b)
}

fn from_color(color: Color) -> Rgba {
    match color {
        Color::Rgb(r, g, b) => Rgba::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        ),
        _ => Rgba::WHITE,
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion() {
        assert_eq!(to_color(Rgba::YELLOW), color::YELLOW);
        assert_eq!(from_color(color::BLUE), Rgba::BLUE);
        assert_eq!(to_color(from_color(color::GRAY)), color::GRAY);
    }
}
