use std::time::Duration;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{Button, InputState, Settings};
use crate::anim::{Lerp, LerpCurve, Rgba};

/// Period of the "Click To Start" color pulse.
const TITLE_PULSE_PERIOD: Duration = Duration::from_secs(3);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum GameMode {
    /// Title screen.
    #[default]
    Menu,
    Play,
    Pause,
    Settings,
    Quit,
    Died,
    Save,
    Load,
}

/// An entry of a mode's option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Resume,
    OpenSettings,
    OpenQuit,
    ToggleFullscreen,
    ToggleSound,
    ReallyQuit,
    SaveProgress,
    GoBack,
}

impl MenuOption {
    /// Text shown for this option given the current settings.
    #[must_use]
    pub fn label(self, settings: &Settings) -> &'static str {
        match self {
            Self::Resume => "Resume",
            Self::OpenSettings => "Settings",
            Self::OpenQuit => "Quit",
            Self::ToggleFullscreen if settings.fullscreen => "Exit Full Screen",
            Self::ToggleFullscreen => "Full Screen",
            Self::ToggleSound if settings.sound_on => "Turn Off Sound",
            Self::ToggleSound => "Turn On Sound",
            Self::ReallyQuit => "Really Quit?",
            Self::SaveProgress => "Save Progress",
            Self::GoBack => "Go Back",
        }
    }
}

impl GameMode {
    /// Options listed in this mode, top to bottom. Empty for the title
    /// screen and for play.
    #[must_use]
    pub fn options(self) -> &'static [MenuOption] {
        match self {
            Self::Menu | Self::Play => &[],
            Self::Pause => &[
                MenuOption::Resume,
                MenuOption::OpenSettings,
                MenuOption::OpenQuit,
            ],
            Self::Settings => &[
                MenuOption::ToggleFullscreen,
                MenuOption::ToggleSound,
                MenuOption::GoBack,
            ],
            Self::Quit | Self::Died => &[MenuOption::ReallyQuit, MenuOption::GoBack],
            Self::Save => &[MenuOption::SaveProgress, MenuOption::GoBack],
            Self::Load => &[MenuOption::GoBack],
        }
    }
}

/// What the menu asked for during one frame of input handling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuOutcome {
    /// Mode changes to route through the transition gate, in order.
    pub requests: ArrayVec<GameMode, 2>,
    /// The cursor moved by keyboard.
    pub cursor_moved: bool,
    /// The player confirmed quitting.
    pub exit: bool,
}

/// Current game mode plus menu navigation state.
#[derive(Debug, Clone)]
pub struct MenuState {
    mode: GameMode,
    last_mode: GameMode,
    cursor: usize,
    last_mouse: Option<(i32, i32)>,
    title_pulse: Lerp<Rgba>,
}

impl MenuState {
    #[must_use]
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            last_mode: mode,
            cursor: 0,
            last_mouse: None,
            title_pulse: title_pulse(),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub const fn last_mode(&self) -> GameMode {
        self.last_mode
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn options(&self) -> &'static [MenuOption] {
        self.mode.options()
    }

    /// Current color of the "Click To Start" prompt.
    #[must_use]
    pub fn title_color(&self) -> Rgba {
        self.title_pulse.value()
    }

    /// Applies a mode change handed out by the transition gate.
    pub fn change_mode(&mut self, mode: GameMode, from: GameMode) {
        tracing::info!(%from, to = %mode, "game mode changed");
        self.mode = mode;
        self.last_mode = from;
        self.cursor = 0;
    }

    /// Advances the title pulse, restarting it when a cycle completes.
    pub fn update(&mut self, dt: Duration) {
        if self.title_pulse.update(dt) {
            self.title_pulse = title_pulse();
        }
    }

    /// Handles one frame of menu input.
    ///
    /// Settings toggles are applied to `settings` directly; mode changes are
    /// returned for the caller to schedule.
    pub fn handle_input(&mut self, input: &InputState, settings: &mut Settings) -> MenuOutcome {
        let mut outcome = MenuOutcome::default();

        if input.was_pressed(Button::Escape) {
            let target = if self.mode.is_play() {
                GameMode::Pause
            } else {
                GameMode::Play
            };
            outcome.requests.push(target);
        }

        let options = self.options();
        if !options.is_empty() {
            if input.was_pressed(Button::Down) {
                self.cursor = (self.cursor + 1) % options.len();
                outcome.cursor_moved = true;
            }
            if input.was_pressed(Button::Up) {
                self.cursor = self.cursor.checked_sub(1).unwrap_or(options.len() - 1);
                outcome.cursor_moved = true;
            }
            let mouse_moved = input.mouse_screen() != self.last_mouse;
            if mouse_moved
                && !outcome.cursor_moved
                && let Some(index) = input.hovered_menu_item().filter(|&i| i < options.len())
            {
                self.cursor = index;
            }
        }
        self.last_mouse = input.mouse_screen();

        let confirm = input.was_pressed(Button::Enter) || input.was_pressed(Button::LeftMouse);
        match self.mode {
            GameMode::Play => {}
            GameMode::Menu => {
                if input.was_pressed(Button::LeftMouse) {
                    outcome.requests.push(GameMode::Play);
                }
            }
            _ if confirm => self.confirm(options, settings, &mut outcome),
            _ => {}
        }
        outcome
    }

    fn confirm(
        &mut self,
        options: &'static [MenuOption],
        settings: &mut Settings,
        outcome: &mut MenuOutcome,
    ) {
        let Some(&option) = options.get(self.cursor) else {
            return;
        };
        match option {
            MenuOption::Resume => outcome.requests.push(GameMode::Play),
            MenuOption::OpenSettings => outcome.requests.push(GameMode::Settings),
            MenuOption::OpenQuit => outcome.requests.push(GameMode::Quit),
            MenuOption::ToggleFullscreen => {
                settings.fullscreen = !settings.fullscreen;
                tracing::info!(fullscreen = settings.fullscreen, "fullscreen toggled");
            }
            MenuOption::ToggleSound => {
                settings.sound_on = !settings.sound_on;
                tracing::info!(sound_on = settings.sound_on, "sound toggled");
            }
            MenuOption::ReallyQuit => outcome.exit = true,
            MenuOption::SaveProgress => {
                tracing::info!("save requested, but progress is not persisted");
            }
            MenuOption::GoBack => outcome.requests.push(self.last_mode),
        }
        if matches!(self.mode, GameMode::Pause | GameMode::Settings) {
            self.cursor = 0;
        }
    }
}

fn title_pulse() -> Lerp<Rgba> {
    Lerp::new(
        Rgba::WHITE,
        Rgba::BLUE,
        TITLE_PULSE_PERIOD,
        LerpCurve::SmoothStep00,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(buttons: &[Button]) -> InputState {
        let mut input = InputState::new();
        for &button in buttons {
            input.tap(button);
        }
        input
    }

    #[test]
    fn test_escape_toggles_pause() {
        let mut settings = Settings::default();
        let mut menu = MenuState::new(GameMode::Play);
        let outcome = menu.handle_input(&pressed(&[Button::Escape]), &mut settings);
        assert_eq!(outcome.requests.as_slice(), &[GameMode::Pause]);

        let mut menu = MenuState::new(GameMode::Settings);
        let outcome = menu.handle_input(&pressed(&[Button::Escape]), &mut settings);
        assert_eq!(outcome.requests.as_slice(), &[GameMode::Play]);
    }

    #[test]
    fn test_cursor_wraps_around() {
        let mut settings = Settings::default();
        let mut menu = MenuState::new(GameMode::Pause);

        let outcome = menu.handle_input(&pressed(&[Button::Up]), &mut settings);
        assert!(outcome.cursor_moved);
        assert_eq!(menu.cursor(), 2);

        menu.handle_input(&pressed(&[Button::Down]), &mut settings);
        assert_eq!(menu.cursor(), 0);
        menu.handle_input(&pressed(&[Button::Down]), &mut settings);
        menu.handle_input(&pressed(&[Button::Down]), &mut settings);
        menu.handle_input(&pressed(&[Button::Down]), &mut settings);
        assert_eq!(menu.cursor(), 0);
    }

    #[test]
    fn test_pause_options_request_modes() {
        let mut settings = Settings::default();
        let mut menu = MenuState::new(GameMode::Pause);
        menu.handle_input(&pressed(&[Button::Down]), &mut settings);
        let outcome = menu.handle_input(&pressed(&[Button::Enter]), &mut settings);
        assert_eq!(outcome.requests.as_slice(), &[GameMode::Settings]);
        assert_eq!(menu.cursor(), 0);
        assert_eq!(menu.mode(), GameMode::Pause);
    }

    #[test]
    fn test_settings_toggle_flags_and_labels() {
        let mut settings = Settings::default();
        let mut menu = MenuState::new(GameMode::Settings);
        assert_eq!(MenuOption::ToggleSound.label(&settings), "Turn Off Sound");

        menu.handle_input(&pressed(&[Button::Down]), &mut settings);
        let outcome = menu.handle_input(&pressed(&[Button::Enter]), &mut settings);
        assert!(outcome.requests.is_empty());
        assert!(!settings.sound_on);
        assert_eq!(MenuOption::ToggleSound.label(&settings), "Turn On Sound");

        menu.handle_input(&pressed(&[Button::Enter]), &mut settings);
        assert!(settings.fullscreen);
        assert_eq!(MenuOption::ToggleFullscreen.label(&settings), "Exit Full Screen");
    }

    #[test]
    fn test_go_back_returns_to_last_mode() {
        let mut settings = Settings::default();
        let mut menu = MenuState::new(GameMode::Pause);
        menu.change_mode(GameMode::Save, GameMode::Pause);
        menu.handle_input(&pressed(&[Button::Down]), &mut settings);
        let outcome = menu.handle_input(&pressed(&[Button::Enter]), &mut settings);
        assert_eq!(outcome.requests.as_slice(), &[GameMode::Pause]);
    }

    #[test]
    fn test_really_quit_exits() {
        let mut settings = Settings::default();
        let mut menu = MenuState::new(GameMode::Quit);
        let outcome = menu.handle_input(&pressed(&[Button::Enter]), &mut settings);
        assert!(outcome.exit);
        assert!(outcome.requests.is_empty());
    }

    #[test]
    fn test_title_screen_starts_on_click() {
        let mut settings = Settings::default();
        let mut menu = MenuState::new(GameMode::Menu);
        let outcome = menu.handle_input(&pressed(&[Button::Enter]), &mut settings);
        assert!(outcome.requests.is_empty());
        let outcome = menu.handle_input(&pressed(&[Button::LeftMouse]), &mut settings);
        assert_eq!(outcome.requests.as_slice(), &[GameMode::Play]);
    }

    #[test]
    fn test_hover_needs_mouse_motion() {
        let mut settings = Settings::default();
        let mut menu = MenuState::new(GameMode::Pause);
        let mut input = InputState::new();
        input.set_mouse_screen(Some((10, 4)));
        input.set_hovered_menu_item(Some(2));
        menu.handle_input(&input, &mut settings);
        assert_eq!(menu.cursor(), 2);

        // Same position: keyboard navigation wins.
        input.tap(Button::Up);
        menu.handle_input(&input, &mut settings);
        assert_eq!(menu.cursor(), 1);
        input.end_frame();
        menu.handle_input(&input, &mut settings);
        assert_eq!(menu.cursor(), 1);
    }

    #[test]
    fn test_title_pulse_cycles() {
        let mut menu = MenuState::new(GameMode::Menu);
        assert_eq!(menu.title_color(), Rgba::WHITE);
        menu.update(Duration::from_millis(1500));
        assert!((menu.title_color().b - 1.0).abs() < 1e-4);
        assert!(menu.title_color().r < 0.01);
        menu.update(Duration::from_millis(1500));
        assert_eq!(menu.title_color(), Rgba::WHITE);
    }
}
