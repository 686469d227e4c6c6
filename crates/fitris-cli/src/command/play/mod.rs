use std::path::PathBuf;

use anyhow::{Context as _, ensure};
use fitris_runtime::Runtime;

use crate::{command::config::ConfigArg, logging};

use self::app::PlayApp;

mod app;

const DEFAULT_FPS: f64 = 60.0;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    config: ConfigArg,
    /// Update and render rate in frames per second
    #[clap(long, default_value_t = DEFAULT_FPS, value_parser = parse_fps)]
    fps: f64,
    /// Write logs to this file (nothing is logged otherwise)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            config: ConfigArg::default(),
            fps: DEFAULT_FPS,
            log_file: None,
        }
    }
}

fn parse_fps(s: &str) -> anyhow::Result<f64> {
    let fps = s
        .parse::<f64>()
        .with_context(|| format!("invalid frame rate {s:?}"))?;
    ensure!(
        fps.is_finite() && fps > 0.0,
        "frame rate must be a positive number, got {fps}"
    );
    Ok(fps)
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        config,
        fps,
        log_file,
    } = arg;

    if let Some(path) = log_file {
        logging::init_file_logging(path)?;
    }
    let config = config.load()?;
    tracing::info!(?config, fps, "starting game");

    let mut app = PlayApp::new(&config, *fps)?;
    Runtime::new()
        .run(&mut app)
        .context("Terminal I/O failed")?;

    let stats = app.session().stats();
    tracing::info!(
        shapes = stats.shapes_solidified(),
        rows = stats.rows_cleared(),
        levels = stats.levels_started(),
        lives_lost = stats.lives_lost(),
        sounds = app.audio().played(),
        "game finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fps() {
        assert_eq!(parse_fps("30").unwrap(), 30.0);
        assert!(parse_fps("0").is_err());
        assert!(parse_fps("-5").is_err());
        assert!(parse_fps("inf").is_err());
        assert!(parse_fps("fast").is_err());
    }
}
