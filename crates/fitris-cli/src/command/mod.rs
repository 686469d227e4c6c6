use clap::{Parser, Subcommand};

use self::{dump_config::DumpConfigArg, play::PlayArg};

mod config;
mod dump_config;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (the default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the effective game config as JSON
    DumpConfig(#[clap(flatten)] DumpConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::DumpConfig(arg) => dump_config::run(&arg)?,
    }
    Ok(())
}
