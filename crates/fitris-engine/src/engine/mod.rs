//! Game logic built on top of the core board and shape.
//!
//! - [`GameSession`] - owns everything below and runs the per-frame update
//! - [`MenuState`] - current [`GameMode`], menu cursor and option handling
//! - [`TransitionGate`] - defers [`PendingAction`]s until the screen is covered
//! - [`LevelGenerator`] - seeded obstacle placement per [`LevelTier`]
//! - [`GameConfig`] / [`Settings`] - startup parameters and runtime flags
//! - [`InputState`] / [`AudioSink`] - seams to the front-end
//!
//! # Frame Flow
//!
//! 1. Front-end fills an [`InputState`] from its events
//! 2. [`GameSession::update`] handles menus, ticks the transition, and runs play logic
//! 3. Front-end reads [`GameSession::board`], [`GameSession::menu`] and
//!    [`GameSession::transition_coverage`] to draw the frame
//! 4. Front-end calls [`InputState::end_frame`]
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use fitris_engine::{FrameContext, GameConfig, GameMode, GameSession, InputState, NullAudio, Settings};
//!
//! let config = GameConfig {
//!     start_mode: GameMode::Play,
//!     ..GameConfig::default()
//! };
//! let mut session = GameSession::new(&config).unwrap();
//! let mut settings = config.settings();
//! let input = InputState::new();
//!
//! session.update(&mut FrameContext {
//!     dt: Duration::from_millis(16),
//!     input: &input,
//!     settings: &mut settings,
//!     audio: &mut NullAudio,
//! });
//! assert!(session.shape().is_valid());
//! ```

pub use self::{
    audio::*, config::*, game_session::*, game_stats::*, input::*, level::*, menu::*,
    transition::*,
};

mod audio;
mod config;
mod game_session;
mod game_stats;
mod input;
mod level;
mod menu;
mod transition;
