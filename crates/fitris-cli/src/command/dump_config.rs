use std::path::PathBuf;

use crate::{command::config::ConfigArg, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DumpConfigArg {
    #[clap(flatten)]
    config: ConfigArg,
    /// Output file. Writes to stdout if omitted
    #[clap(long, short)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DumpConfigArg) -> anyhow::Result<()> {
    let DumpConfigArg { config, output } = arg;

    let config = config.load()?;
    let mut output = Output::from_output_path(output.clone())?;
    output.write_json(&config)?;

    if let Output::File { path, .. } = &output {
        eprintln!("Config written to {}", path.display());
    }
    Ok(())
}
