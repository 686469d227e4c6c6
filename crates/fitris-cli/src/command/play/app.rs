use std::{cell::Cell, time::Duration};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use fitris_engine::{
    Button, ConfigError, FrameContext, GameConfig, GameMode, GameSession, InputState, Settings,
};
use fitris_runtime::{App, RenderMode, Runtime};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position},
    text::Text,
};

use crate::{
    audio::LoggedAudio,
    ui::widgets::{SessionDisplay, SessionLayout, screen_to_board, style},
};

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    input: InputState,
    settings: Settings,
    audio: LoggedAudio,
    fps: f64,
    /// Layout of the last drawn frame, for mouse hit-testing.
    layout: Cell<SessionLayout>,
    interrupted: bool,
}

impl PlayApp {
    pub fn new(config: &GameConfig, fps: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            session: GameSession::new(config)?,
            input: InputState::new(),
            settings: config.settings(),
            audio: LoggedAudio::new(),
            fps,
            layout: Cell::default(),
            interrupted: false,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn audio(&self) -> &LoggedAudio {
        &self.audio
    }

    fn handle_key(&mut self, event: KeyEvent) {
        if event.kind == KeyEventKind::Release {
            return;
        }
        let button = match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                tracing::info!("interrupted");
                self.interrupted = true;
                return;
            }
            KeyCode::Left | KeyCode::Char('h') => Button::Left,
            KeyCode::Right | KeyCode::Char('l') => Button::Right,
            KeyCode::Up | KeyCode::Char('k') => Button::Up,
            KeyCode::Down | KeyCode::Char('j') => Button::Down,
            KeyCode::Enter | KeyCode::Char(' ') => Button::Enter,
            KeyCode::Esc | KeyCode::Char('p') => Button::Escape,
            _ => return,
        };
        self.input.tap(button);
    }

    fn handle_mouse(&mut self, event: MouseEvent) {
        self.track_mouse(Position::new(event.column, event.row));
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.input.press(Button::LeftMouse),
            MouseEventKind::Up(MouseButton::Left) => self.input.release(Button::LeftMouse),
            _ => {}
        }
    }

    fn track_mouse(&mut self, position: Position) {
        let layout = self.layout.get();
        self.input
            .set_mouse_screen(Some((i32::from(position.x), i32::from(position.y))));

        let board = (!layout.grid.is_empty())
            .then(|| screen_to_board(layout.grid, self.session.board().height(), position));
        self.input.set_mouse_board(board);

        let hovered = SessionDisplay::new(&self.session, &self.settings)
            .menu()
            .item_at(layout.board, position);
        self.input.set_hovered_menu_item(hovered);
    }
}

fn help_text(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Menu => "Controls: Click (Start) | Esc (Play) | Ctrl-C (Quit)",
        GameMode::Play => {
            "Controls: ← → (Move) | ↓ (Drop) | Mouse (Drag Cells) | Esc (Pause) | Ctrl-C (Quit)"
        }
        _ => "Controls: ↑ ↓ (Select) | Enter (Confirm) | Esc (Play) | Ctrl-C (Quit)",
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(self.fps));
        runtime.set_render_mode(RenderMode::throttled_from_rate(self.fps));
        runtime.set_mouse_capture(true);
    }

    fn should_exit(&self) -> bool {
        self.interrupted || self.session.should_exit()
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        match event {
            Event::Key(event) => self.handle_key(event),
            Event::Mouse(event) => self.handle_mouse(event),
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        let display = SessionDisplay::new(&self.session, &self.settings);
        self.layout.set(display.layout(main_area));
        frame.render_widget(display, main_area);

        let help_text = Text::from(help_text(self.session.mode()))
            .style(style::HELP)
            .centered();
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime, dt: Duration) {
        let mut ctx = FrameContext {
            dt,
            input: &self.input,
            settings: &mut self.settings,
            audio: &mut self.audio,
        };
        self.session.update(&mut ctx);
        self.input.end_frame();
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::*;

    const FRAME: Duration = Duration::from_millis(25);

    fn app(start_mode: GameMode) -> PlayApp {
        let config = GameConfig {
            start_mode,
            ..GameConfig::default()
        };
        let app = PlayApp::new(&config, 40.0).unwrap();
        let layout =
            SessionDisplay::new(&app.session, &app.settings).layout(Rect::new(0, 0, 80, 23));
        app.layout.set(layout);
        app
    }

    fn key(app: &mut PlayApp, code: KeyCode) {
        app.handle_event(
            &mut Runtime::new(),
            Event::Key(KeyEvent::new(code, KeyModifiers::NONE)),
        );
    }

    fn mouse(app: &mut PlayApp, kind: MouseEventKind, position: Position) {
        let event = MouseEvent {
            kind,
            column: position.x,
            row: position.y,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_event(&mut Runtime::new(), Event::Mouse(event));
    }

    fn frames(app: &mut PlayApp, count: usize) {
        for _ in 0..count {
            app.update(&mut Runtime::new(), FRAME);
        }
    }

    #[test]
    fn test_keys_tap_buttons() {
        let mut app = app(GameMode::Play);
        key(&mut app, KeyCode::Left);
        key(&mut app, KeyCode::Char('p'));
        assert!(app.input.was_pressed(Button::Left));
        assert!(app.input.was_pressed(Button::Escape));
        assert!(!app.input.is_down(Button::Left));

        let release =
            KeyEvent::new_with_kind(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);
        app.handle_event(&mut Runtime::new(), Event::Key(release));
        assert!(!app.input.was_pressed(Button::Enter));

        frames(&mut app, 1);
        assert!(!app.input.was_pressed(Button::Left));
    }

    #[test]
    fn test_ctrl_c_exits() {
        let mut app = app(GameMode::Play);
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.handle_event(&mut Runtime::new(), Event::Key(event));
        assert!(app.should_exit());
    }

    #[test]
    fn test_click_starts_game() {
        let mut app = app(GameMode::Menu);
        let board = app.layout.get().board;
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), board.as_position());
        frames(&mut app, 40);
        assert_eq!(app.session.mode(), GameMode::Play);
        assert!(app.session.shape().is_valid());
        assert!(app.audio.played() > 0);
    }

    #[test]
    fn test_mouse_maps_to_board_and_menu() {
        let mut app = app(GameMode::Pause);
        let layout = app.layout.get();

        let bottom_left = Position::new(layout.grid.x, layout.grid.bottom() - 1);
        mouse(&mut app, MouseEventKind::Moved, bottom_left);
        let (x, y) = app.input.mouse_board().unwrap();
        assert!(x.abs() <= 0.5 && y.abs() <= 0.5, "{x} {y}");

        let popup = SessionDisplay::new(&app.session, &app.settings)
            .menu()
            .popup_area(layout.board)
            .unwrap();
        mouse(
            &mut app,
            MouseEventKind::Moved,
            Position::new(popup.x + 2, popup.y + 5),
        );
        assert_eq!(app.input.hovered_menu_item(), Some(2));
        frames(&mut app, 1);
        assert_eq!(app.session.menu().cursor(), 2);
    }
}
