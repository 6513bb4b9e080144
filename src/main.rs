//! Stratus - compiles site build output into deployment artifacts.

#![allow(dead_code)]

mod cli;
mod config;
mod framework;
mod logger;
mod pipeline;
mod plan;
mod route;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::DeployConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = DeployConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Compile { output } => cli::compile::run(&config, output.as_deref()),
        Commands::Routes { output, request } => {
            cli::routes::run(&config, output.as_deref(), request.as_deref())
        }
        Commands::Validate { output } => cli::validate::run(&config, output.as_deref()),
    }
}
