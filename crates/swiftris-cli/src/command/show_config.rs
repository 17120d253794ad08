use std::path::PathBuf;

use swiftris_engine::GameConfig;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShowConfigArg {
    /// Configuration file to check and print instead of the defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ShowConfigArg) -> anyhow::Result<()> {
    let config = match &arg.config {
        Some(path) => util::read_config_file(path)?,
        None => GameConfig::default(),
    };
    Output::save_json(&config, arg.output.clone())
}
