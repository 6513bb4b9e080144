//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Stratus deployment artifact compiler CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: stratus.toml)
    #[arg(short = 'C', long, default_value = "stratus.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile the full deployment artifact set
    #[command(visible_alias = "c")]
    Compile {
        /// Build output directory (default: the configured site path)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,
    },

    /// Compile and print the routing artifact
    #[command(visible_alias = "r")]
    Routes {
        /// Build output directory (default: the configured site path)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,

        /// Simulate a request path against the compiled matcher
        #[arg(long, value_name = "PATH")]
        request: Option<String>,
    },

    /// Validate configuration and build output
    #[command(visible_alias = "v")]
    Validate {
        /// Build output directory (default: the configured site path)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,
    },
}
