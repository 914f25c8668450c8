//! Terminal front end: wires stdin, the submission controller, and the engine.
mod app;
mod cli;
mod config;
mod effects;
mod input;
mod render;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

pub fn run() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    let config = config::load(cli.config.as_deref()).context("loading configuration")?;

    checker_logging::initialize(config.log_destination.into(), config.level_filter()?);
    app::run_app(&config, cli.output_mode())
}
