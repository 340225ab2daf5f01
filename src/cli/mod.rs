//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

/// skillgraph - track skills and the prerequisites between them
#[derive(Parser, Debug)]
#[command(name = "sg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Emit JSON on stdout instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/skillgraph/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data file to use instead of the configured storage path
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add, update, remove and inspect skills
    Skill(commands::skill::SkillArgs),

    /// Manage aspirational skills
    Aspire(commands::aspire::AspireArgs),

    /// Manage prerequisite edges between skills
    Dep(commands::dep::DepArgs),

    /// Query the dependency graph
    Graph(commands::graph::GraphArgs),

    /// Import skill pools and demo data
    Pool(commands::pool::PoolArgs),
}
