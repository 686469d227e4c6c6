use std::time::Duration;

use crate::{
    anim::Rgba,
    core::{Board, GravityOutcome, MoveDirection, Shape, SpawnBlockedError},
};

use super::{
    AudioCategory, AudioSink, Button, ConfigError, GameConfig, GameMode, GameStats, InputState,
    LevelGenerator, LevelTier, MenuState, PendingAction, Settings, Sound, TransitionGate,
    TransitionPhase,
};

/// Everything a session needs from the outside world for one frame.
pub struct FrameContext<'a> {
    pub dt: Duration,
    pub input: &'a InputState,
    pub settings: &'a mut Settings,
    pub audio: &'a mut dyn AudioSink,
}

impl FrameContext<'_> {
    fn play(&mut self, category: AudioCategory, sound: Sound) {
        if self.settings.sound_on {
            self.audio.play(category, sound);
        }
    }
}

/// A running game: board, falling shape, menus and transitions.
///
/// [`update`](Self::update) runs one frame in a fixed order:
///
/// 1. Menu input (may request mode changes)
/// 2. Transition tick (may apply a pending action)
/// 3. When in play and not transitioning: spawn, keyboard moves, gravity,
///    mouse dragging, then the full-row check
/// 4. When in play: cell fades
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    shape: Shape,
    generator: LevelGenerator,
    gate: TransitionGate,
    menu: MenuState,
    stats: GameStats,
    shape_cells: usize,
    tier: LevelTier,
    block_count: usize,
    max_lives: u32,
    lives: u32,
    spawn_pending: bool,
    held: Option<usize>,
    should_exit: bool,
}

impl GameSession {
    /// Creates a session and generates its first level.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = config
            .seed
            .map_or_else(LevelGenerator::new, LevelGenerator::with_seed);
        let mut session = Self {
            board: Board::new(
                config.board_width,
                config.board_height,
                config.fade_interval()?,
            ),
            shape: Shape::new(config.gravity_period()?),
            generator,
            gate: TransitionGate::new(config.transition_half_duration()?),
            menu: MenuState::new(config.start_mode),
            stats: GameStats::new(),
            shape_cells: config.shape_cells,
            tier: config.start_tier,
            block_count: config.block_count,
            max_lives: config.lives,
            lives: config.lives,
            spawn_pending: false,
            held: None,
            should_exit: false,
        };
        session.load_level(config.start_tier, config.block_count);
        Ok(session)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.menu.mode()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub fn tier(&self) -> LevelTier {
        self.tier
    }

    /// Screen coverage of the running transition wipe, `0.0` when idle.
    #[must_use]
    pub fn transition_coverage(&self) -> f32 {
        self.gate.coverage()
    }

    #[must_use]
    pub fn transition_phase(&self) -> TransitionPhase {
        self.gate.phase()
    }

    /// Index of the shape cell held by the mouse.
    #[must_use]
    pub fn held_cell(&self) -> Option<usize> {
        self.held
    }

    /// Whether the player confirmed quitting.
    #[must_use]
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Runs one frame.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        let outcome = self.menu.handle_input(ctx.input, ctx.settings);
        self.menu.update(ctx.dt);
        if outcome.cursor_moved {
            ctx.play(AudioCategory::Background, Sound::MenuMove);
        }
        if outcome.exit {
            tracing::info!("quit confirmed");
            self.should_exit = true;
        }
        for mode in outcome.requests {
            let from = self.menu.mode();
            self.request(ctx, PendingAction::ChangeMode { mode, from });
        }

        let tick = self.gate.tick(ctx.dt);
        if let Some(action) = tick.fired {
            self.apply(action);
        }

        let playing = self.menu.mode().is_play();
        if playing && !tick.in_transition {
            self.update_play(ctx);
        }
        if playing {
            self.board.update_fades(ctx.dt);
        }
    }

    fn request(&mut self, ctx: &mut FrameContext<'_>, action: PendingAction) {
        if self.gate.request(action).is_ok() {
            ctx.play(AudioCategory::Foreground, Sound::Transition);
        }
    }

    fn apply(&mut self, action: PendingAction) {
        match action {
            PendingAction::ChangeLevel { tier, block_count } => {
                self.load_level(tier, block_count);
            }
            PendingAction::ChangeMode { mode, from } => {
                self.held = None;
                self.menu.change_mode(mode, from);
            }
            PendingAction::GameOver { tier, block_count } => {
                tracing::info!("game over");
                self.load_level(tier, block_count);
                self.lives = self.max_lives;
                self.menu.change_mode(GameMode::Died, GameMode::Play);
            }
        }
    }

    fn load_level(&mut self, tier: LevelTier, block_count: usize) {
        self.board.reset();
        self.shape.discard();
        self.generator.generate(&mut self.board, block_count, tier);
        self.tier = tier;
        self.block_count = block_count;
        self.spawn_pending = true;
        self.held = None;
        self.stats.start_level();
        tracing::info!(%tier, block_count, lives = self.lives, "level loaded");
    }

    fn update_play(&mut self, ctx: &mut FrameContext<'_>) {
        if self.spawn_pending {
            self.spawn_pending = false;
            self.held = None;
            if let Err(err) = self.shape.spawn(&mut self.board, self.shape_cells) {
                self.lose_life(ctx, err);
                return;
            }
        }

        for (button, dir) in [
            (Button::Left, MoveDirection::Left),
            (Button::Right, MoveDirection::Right),
            (Button::Down, MoveDirection::Down),
        ] {
            if ctx.input.was_pressed(button) && self.try_move(ctx, dir) && dir == MoveDirection::Down
            {
                self.shape.reset_gravity();
            }
        }

        match self.shape.gravity_step(&mut self.board, ctx.dt) {
            GravityOutcome::Idle => {}
            GravityOutcome::Fell { exploded } => {
                ctx.play(AudioCategory::Foreground, Sound::Move);
                if exploded > 0 {
                    ctx.play(AudioCategory::Foreground, Sound::Explosion);
                }
            }
            GravityOutcome::Landed => self.solidify(ctx),
        }

        self.update_drag(ctx.input);

        let rows = self.board.clear_full_rows();
        if rows > 0 {
            tracing::info!(rows, "rows cleared");
            self.stats.clear_rows(rows);
            for _ in 0..rows {
                ctx.play(AudioCategory::Foreground, Sound::Success);
            }
        }
    }

    fn try_move(&mut self, ctx: &mut FrameContext<'_>, dir: MoveDirection) -> bool {
        let exploded = self.shape.explosives_ahead(&self.board, dir);
        if !self.shape.move_by(&mut self.board, dir) {
            return false;
        }
        ctx.play(AudioCategory::Foreground, Sound::Move);
        if exploded > 0 {
            ctx.play(AudioCategory::Foreground, Sound::Explosion);
        }
        true
    }

    fn solidify(&mut self, ctx: &mut FrameContext<'_>) {
        self.shape.solidify(&mut self.board);
        self.stats.solidify_shape();
        self.spawn_pending = true;
        self.held = None;
        ctx.play(AudioCategory::Foreground, Sound::Solidify);
    }

    fn lose_life(&mut self, ctx: &mut FrameContext<'_>, err: SpawnBlockedError) {
        self.lives = self.lives.saturating_sub(1);
        self.stats.lose_life();
        tracing::info!(%err, lives = self.lives, "life lost");
        let (tier, block_count) = (self.tier, self.block_count);
        let action = if self.lives > 0 {
            PendingAction::ChangeLevel { tier, block_count }
        } else {
            PendingAction::GameOver { tier, block_count }
        };
        self.request(ctx, action);
    }

    /// Highlights the shape cell under the mouse and drags the held one.
    fn update_drag(&mut self, input: &InputState) {
        if input.was_released(Button::LeftMouse) {
            self.held = None;
        }
        if !self.shape.is_valid() {
            self.held = None;
            return;
        }

        let mouse = input.mouse_board();
        let hot = mouse.and_then(|point| self.shape.hovered_cell(point));
        for (i, &pos) in self.shape.cells().iter().enumerate() {
            let color = if self.held == Some(i) {
                Rgba::GREEN
            } else if self.held.is_none() && hot == Some(i) {
                Rgba::YELLOW
            } else {
                Rgba::WHITE
            };
            self.board.set_color(pos, color);
        }

        if input.was_pressed(Button::LeftMouse) {
            self.held = hot;
        }
        if let (Some(index), Some(point)) = (self.held, mouse) {
            let target = self.board.nearest_pos(point);
            self.shape.drag_cell_to(&mut self.board, index, target);
        }
        // press and release can arrive within one frame
        if !input.is_down(Button::LeftMouse) {
            self.held = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardPos, CellState, CellTag};

    const SECOND: Duration = Duration::from_secs(1);
    const MS_1: Duration = Duration::from_millis(1);

    type Played = Vec<(AudioCategory, Sound)>;

    fn config(start_mode: GameMode) -> GameConfig {
        GameConfig {
            board_width: 4,
            board_height: 6,
            start_tier: LevelTier::Clear,
            block_count: 0,
            transition_secs: 0.1,
            start_mode,
            seed: Some("0000000000000000000000000000002a".parse().unwrap()),
            ..GameConfig::default()
        }
    }

    struct Harness {
        session: GameSession,
        settings: Settings,
        played: Played,
    }

    impl Harness {
        fn new(config: &GameConfig) -> Self {
            Self {
                session: GameSession::new(config).unwrap(),
                settings: Settings::default(),
                played: Vec::new(),
            }
        }

        fn frame(&mut self, dt: Duration, input: &InputState) {
            let mut ctx = FrameContext {
                dt,
                input,
                settings: &mut self.settings,
                audio: &mut self.played,
            };
            self.session.update(&mut ctx);
        }

        fn idle(&mut self, dt: Duration) {
            self.frame(dt, &InputState::new());
        }

        fn tap(&mut self, dt: Duration, button: Button) {
            let mut input = InputState::new();
            input.tap(button);
            self.frame(dt, &input);
        }

        fn sounds(&self, sound: Sound) -> usize {
            self.played.iter().filter(|(_, s)| *s == sound).count()
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            board_height: 0,
            ..GameConfig::default()
        };
        assert!(GameSession::new(&config).is_err());
    }

    #[test]
    fn test_first_play_frame_spawns_shape() {
        let mut h = Harness::new(&config(GameMode::Play));
        assert!(!h.session.shape().is_valid());
        h.idle(MS_1);
        assert!(h.session.shape().is_valid());
        assert_eq!(h.session.shape().cells().len(), 4);
        assert_eq!(h.session.stats().levels_started(), 1);
    }

    #[test]
    fn test_no_play_logic_outside_play_mode() {
        let mut h = Harness::new(&config(GameMode::Pause));
        h.idle(SECOND);
        assert!(!h.session.shape().is_valid());
    }

    #[test]
    fn test_gravity_drops_shape_and_clears_full_row() {
        let mut h = Harness::new(&config(GameMode::Play));
        for _ in 0..5 {
            h.idle(SECOND);
        }
        assert!(h.session.shape().cells().iter().all(|pos| pos.y == 0));
        assert_eq!(h.sounds(Sound::Move), 5);

        h.idle(SECOND);
        assert!(!h.session.shape().is_valid());
        assert_eq!(h.session.stats().shapes_solidified(), 1);
        assert_eq!(h.session.stats().rows_cleared(), 1);
        assert_eq!(h.sounds(Sound::Solidify), 1);
        assert_eq!(h.sounds(Sound::Success), 1);
        for x in 0..4 {
            assert_eq!(h.session.board().state_at(BoardPos::new(x, 0)), CellState::Empty);
        }

        h.idle(MS_1);
        assert!(h.session.shape().is_valid());
    }

    #[test]
    fn test_down_key_moves_and_resets_gravity() {
        let mut h = Harness::new(&config(GameMode::Play));
        h.idle(Duration::from_millis(900));
        h.tap(MS_1, Button::Down);
        assert!(h.session.shape().cells().iter().all(|pos| pos.y == 4));
        h.idle(Duration::from_millis(900));
        assert!(h.session.shape().cells().iter().all(|pos| pos.y == 4));
    }

    #[test]
    fn test_sound_off_suppresses_playback() {
        let mut h = Harness::new(&config(GameMode::Play));
        h.settings.sound_on = false;
        for _ in 0..6 {
            h.idle(SECOND);
        }
        assert!(h.played.is_empty());
    }

    #[test]
    fn test_mode_changes_after_covering() {
        let mut h = Harness::new(&config(GameMode::Pause));
        h.tap(Duration::from_millis(25), Button::Enter);
        assert_eq!(h.sounds(Sound::Transition), 1);

        let mut frames = 0;
        while h.session.mode() == GameMode::Pause {
            assert!(h.session.transition_coverage() < 1.0);
            h.idle(Duration::from_millis(25));
            frames += 1;
            assert!(frames < 10, "mode never changed");
        }
        assert_eq!(h.session.mode(), GameMode::Play);
        assert_eq!(h.session.menu().last_mode(), GameMode::Pause);
        assert!(h.session.transition_phase().is_invoking());
        assert!(!h.session.shape().is_valid());

        while !h.session.transition_phase().is_idle() {
            h.idle(Duration::from_millis(25));
        }
        h.idle(MS_1);
        assert!(h.session.shape().is_valid());
    }

    #[test]
    fn test_escape_pauses_play() {
        let mut h = Harness::new(&config(GameMode::Play));
        h.tap(MS_1, Button::Escape);
        for _ in 0..20 {
            h.idle(Duration::from_millis(25));
        }
        assert_eq!(h.session.mode(), GameMode::Pause);
        assert_eq!(h.session.menu().last_mode(), GameMode::Play);
    }

    #[test]
    fn test_really_quit_requests_exit() {
        let mut h = Harness::new(&config(GameMode::Quit));
        h.tap(MS_1, Button::Enter);
        assert!(h.session.should_exit());
    }

    #[test]
    fn test_blocked_spawn_costs_a_life() {
        let mut h = Harness::new(&config(GameMode::Play));
        h.session
            .board
            .set_state(BoardPos::new(0, 5), CellState::Static, CellTag::Always);
        h.idle(MS_1);
        assert!(!h.session.shape().is_valid());
        assert_eq!(h.session.lives(), 2);
        assert_eq!(h.session.stats().lives_lost(), 1);

        for _ in 0..20 {
            h.idle(Duration::from_millis(25));
        }
        assert_eq!(h.session.mode(), GameMode::Play);
        assert_eq!(h.session.stats().levels_started(), 2);
        assert!(h.session.shape().is_valid());
    }

    #[test]
    fn test_last_life_leads_to_died_mode() {
        let config = GameConfig {
            lives: 1,
            ..config(GameMode::Play)
        };
        let mut h = Harness::new(&config);
        h.session
            .board
            .set_state(BoardPos::new(2, 5), CellState::Static, CellTag::Always);
        h.idle(MS_1);
        for _ in 0..20 {
            h.idle(Duration::from_millis(25));
        }
        assert_eq!(h.session.mode(), GameMode::Died);
        assert_eq!(h.session.menu().last_mode(), GameMode::Play);
        assert_eq!(h.session.lives(), 1);
        assert_eq!(
            h.session.board().state_at(BoardPos::new(2, 5)),
            CellState::Empty
        );
    }

    #[test]
    fn test_mouse_drag_moves_held_cell() {
        let mut h = Harness::new(&config(GameMode::Play));
        let mut input = InputState::new();
        input.set_mouse_board(Some((0.0, 5.0)));
        h.frame(MS_1, &input);
        let cell_color = |h: &Harness, pos| h.session.board().cell_at(pos).unwrap().color();
        assert_eq!(cell_color(&h, BoardPos::new(0, 5)), Rgba::YELLOW);

        input.press(Button::LeftMouse);
        h.frame(MS_1, &input);
        input.end_frame();
        assert_eq!(h.session.held_cell(), Some(0));

        input.set_mouse_board(Some((1.1, 3.8)));
        h.frame(MS_1, &input);
        assert_eq!(h.session.shape().cells()[0], BoardPos::new(1, 4));
        assert_eq!(h.session.board().state_at(BoardPos::new(0, 5)), CellState::Empty);
        assert_eq!(h.session.board().state_at(BoardPos::new(1, 4)), CellState::Shape);

        h.frame(MS_1, &input);
        assert_eq!(cell_color(&h, BoardPos::new(1, 4)), Rgba::GREEN);

        input.release(Button::LeftMouse);
        h.frame(MS_1, &input);
        input.end_frame();
        assert_eq!(h.session.held_cell(), None);
        assert_eq!(cell_color(&h, BoardPos::new(1, 4)), Rgba::YELLOW);
    }

    #[test]
    fn test_fades_advance_in_play() {
        let mut h = Harness::new(&config(GameMode::Play));
        h.idle(MS_1);
        let pos = BoardPos::new(0, 5);
        assert!(h.session.board().cell_at(pos).unwrap().is_fading());
        h.idle(SECOND / 2);
        assert!(!h.session.board().cell_at(pos).unwrap().is_fading());
    }
}
