use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs a subscriber writing plain-text logs to `path`.
///
/// The terminal belongs to the TUI, so logs only go to a file. `RUST_LOG`
/// overrides the default `info` filter.
pub fn init_file_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to install the log subscriber")?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
