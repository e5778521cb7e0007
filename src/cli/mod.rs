//! CLI argument parsing for pit.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::pipeline::RunMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Pit: provisions starter projects and drives their build and run commands.
///
/// Each preset is downloaded from the start service or generated locally,
/// committed to a fresh git repository, built, and started, with the tools'
/// output streamed to the terminal.
#[derive(Parser, Debug)]
#[command(name = "pit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options accepted by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Show debug output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./pit.yaml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands for pit.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Provision, build and run presets in order.
    ///
    /// Stops at the first preset that fails to provision, validate or build.
    /// A failing run command is reported and the next preset still runs.
    Run(RunArgs),

    /// Show what `run` would do for each preset without doing it.
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Preset names, comma-separated or repeated.
    #[arg(required = true, value_delimiter = ',')]
    pub presets: Vec<String>,

    /// Platform version to set in each project.
    #[arg(long = "version", value_name = "VERSION")]
    pub target_version: Option<String>,

    /// Port the applications listen on (overrides config).
    #[arg(long)]
    pub port: Option<u16>,

    /// Base directory for project directories (overrides config).
    #[arg(long, value_name = "DIR")]
    pub tmp: Option<PathBuf>,

    /// Run the development server or the production build.
    #[arg(long, value_enum, default_value_t = RunMode::Dev)]
    pub mode: RunMode,

    /// Reuse already provisioned project directories.
    #[arg(long)]
    pub offline: bool,

    /// Remove the base directory before running.
    #[arg(long)]
    pub clean: bool,

    /// Print the plan for each preset and execute nothing.
    #[arg(long)]
    pub test: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Preset names, comma-separated or repeated.
    #[arg(required = true, value_delimiter = ',')]
    pub presets: Vec<String>,

    /// Base directory for project directories (overrides config).
    #[arg(long, value_name = "DIR")]
    pub tmp: Option<PathBuf>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
