//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Terminal kanban board with a task editor and team chat.
/// Runs the board when no subcommand is given.
#[derive(Parser, Debug)]
#[command(name = "tb", version, about = "Terminal kanban board")]
pub struct Cli {
    /// Path to the config file (default: ~/.config/taskboard/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `taskboard=debug`. RUST_LOG wins if set.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log file path (default: <tmp>/taskboard.log).
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Start with an empty board.
    #[arg(long, global = true)]
    pub no_sample_tasks: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
