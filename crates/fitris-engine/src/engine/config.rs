use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{GameMode, LevelSeed, LevelTier};
use crate::core::MAX_SHAPE_CELLS;

/// Runtime flags the menus can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub sound_on: bool,
    pub fullscreen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_on: true,
            fullscreen: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board dimensions must be non-zero, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },
    #[display("shape cell count must be in 1..={MAX_SHAPE_CELLS}, got {cells}")]
    ShapeCells { cells: usize },
    #[display("a {cells}-cell shape does not fit on a {width}x{height} board")]
    ShapeTooLarge {
        cells: usize,
        width: usize,
        height: usize,
    },
    #[display("{name} must be a positive number of seconds, got {value}")]
    Duration { name: &'static str, value: f32 },
    #[display("a game needs at least one life")]
    NoLives,
}

/// Game parameters, loadable from JSON.
///
/// Missing fields take their default values, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: usize,
    pub board_height: usize,
    pub shape_cells: usize,
    pub start_tier: LevelTier,
    pub block_count: usize,
    pub lives: u32,
    pub gravity_secs: f32,
    pub fade_secs: f32,
    pub transition_secs: f32,
    pub start_mode: GameMode,
    pub sound_on: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<LevelSeed>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 10,
            board_height: 16,
            shape_cells: 4,
            start_tier: LevelTier::Static,
            block_count: 4,
            lives: 3,
            gravity_secs: 1.0,
            fade_secs: 0.35,
            transition_secs: 0.4,
            start_mode: GameMode::Menu,
            sound_on: true,
            seed: None,
        }
    }
}

fn secs(name: &'static str, value: f32) -> Result<Duration, ConfigError> {
    if value > 0.0 {
        Duration::try_from_secs_f32(value).map_err(|_| ConfigError::Duration { name, value })
    } else {
        Err(ConfigError::Duration { name, value })
    }
}

impl GameConfig {
    /// Checks that a session can be built from this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height, cells) = (self.board_width, self.board_height, self.shape_cells);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard { width, height });
        }
        if !(1..=MAX_SHAPE_CELLS).contains(&cells) {
            return Err(ConfigError::ShapeCells { cells });
        }
        if cells > width * height {
            return Err(ConfigError::ShapeTooLarge {
                cells,
                width,
                height,
            });
        }
        if self.lives == 0 {
            return Err(ConfigError::NoLives);
        }
        self.gravity_period()?;
        self.fade_interval()?;
        self.transition_half_duration()?;
        Ok(())
    }

    pub fn gravity_period(&self) -> Result<Duration, ConfigError> {
        secs("gravity_secs", self.gravity_secs)
    }

    pub fn fade_interval(&self) -> Result<Duration, ConfigError> {
        secs("fade_secs", self.fade_secs)
    }

    pub fn transition_half_duration(&self) -> Result<Duration, ConfigError> {
        secs("transition_secs", self.transition_secs)
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            sound_on: self.sound_on,
            ..Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: GameConfig = serde_json::from_str(
            r#"{"board_width": 6, "start_tier": 3, "start_mode": "Play", "seed": "0000000000000000000000000000002a"}"#,
        )
        .unwrap();
        assert_eq!(config.board_width, 6);
        assert_eq!(config.board_height, 16);
        assert_eq!(config.start_tier, LevelTier::Explosive);
        assert_eq!(config.start_mode, GameMode::Play);
        assert!(config.seed.is_some());
    }

    #[test]
    fn test_invalid_tier_is_rejected() {
        assert!(serde_json::from_str::<GameConfig>(r#"{"start_tier": 7}"#).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_boards() {
        let config = GameConfig {
            board_width: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyBoard { .. })
        ));

        let config = GameConfig {
            board_width: 1,
            board_height: 3,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ShapeTooLarge { .. })
        ));

        let config = GameConfig {
            shape_cells: 17,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ShapeCells { cells: 17 }));
    }

    #[test]
    fn test_validate_rejects_zero_lives() {
        let config = GameConfig {
            lives: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoLives));

        let config = GameConfig {
            lives: 1,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_durations() {
        let config = GameConfig {
            fade_secs: -1.0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Duration {
                name: "fade_secs",
                value: -1.0,
            })
        );
        let config = GameConfig {
            gravity_secs: f32::NAN,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
