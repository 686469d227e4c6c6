use std::path::PathBuf;

use anyhow::Context as _;
use fitris_engine::{GameConfig, GameMode, LevelSeed, LevelTier};

use crate::util;

/// Options shared by every command that builds a game config.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// Game config file (JSON). Missing fields take default values
    #[clap(long)]
    config: Option<PathBuf>,
    /// Starting level tier: 0 (clear) to 3 (explosives only)
    #[clap(long, value_parser = parse_level_tier)]
    level: Option<LevelTier>,
    /// Number of obstacles placed per level
    #[clap(long)]
    blocks: Option<usize>,
    /// Level seed as 32 hexadecimal characters
    #[clap(long)]
    seed: Option<LevelSeed>,
    /// Board width in cells
    #[clap(long)]
    width: Option<usize>,
    /// Board height in cells
    #[clap(long)]
    height: Option<usize>,
    /// Lives per game
    #[clap(long)]
    lives: Option<u32>,
    /// Start without sound
    #[clap(long)]
    mute: bool,
    /// Skip the title screen and start playing immediately
    #[clap(long)]
    skip_menu: bool,
}

fn parse_level_tier(s: &str) -> anyhow::Result<LevelTier> {
    let value = s
        .parse::<u8>()
        .with_context(|| format!("invalid level tier {s:?}"))?;
    Ok(LevelTier::try_from(value)?)
}

impl ConfigArg {
    /// Loads the config file (or defaults) and applies command-line overrides.
    pub(crate) fn load(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => GameConfig::default(),
        };
        self.apply(&mut config);
        config
            .validate()
            .context("Invalid game configuration")?;
        Ok(config)
    }

    fn apply(&self, config: &mut GameConfig) {
        if let Some(level) = self.level {
            config.start_tier = level;
        }
        if let Some(blocks) = self.blocks {
            config.block_count = blocks;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if let Some(lives) = self.lives {
            config.lives = lives;
        }
        if self.mute {
            config.sound_on = false;
        }
        if self.skip_menu {
            config.start_mode = GameMode::Play;
        }
    }
}
