//! dirmirror - periodic one-way folder mirror
//!
//! Empties the output folder and copies the source folder into it again on
//! a fixed interval.

mod cli;
mod commands;
mod error;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use mirror_core::{ConfigLayer, SyncConfig};

use cli::Cli;
use error::Result;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    logging::init(&config.log_file, cli.verbose)?;

    if cli.once {
        commands::run_once(config, cli.json).await
    } else {
        commands::run_loop(config).await
    }
}

/// Merge the config file (if any) with the command line and validate.
fn build_config(cli: &Cli) -> Result<SyncConfig> {
    let file_layer = match &cli.config {
        Some(path) => ConfigLayer::load(path)?,
        None => ConfigLayer::default(),
    };
    let config = file_layer.merge(cli.layer()).resolve()?;
    config.validate()?;
    Ok(config)
}
