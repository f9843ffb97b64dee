//! Command-line interface definitions.
//!
//! Defines the CLI structure for solvewatch using `clap`: the long-running
//! `run` service plus one-shot commands that manage tracking and preview
//! the daily report.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Watches LeetCode accounts, announces new solves and posts a daily leaderboard
#[derive(Parser, Debug)]
#[command(name = "solvewatch")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: ~/.solvewatch/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll tracked users and post announcements until interrupted
    Run,

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Start announcing a user's solves in a channel
    Track(BindingArgs),

    /// Stop announcing a user's solves in a channel
    Untrack(BindingArgs),

    /// List users tracked in a scope
    Tracked(TrackedArgs),

    /// Print the daily leaderboard without sending it
    Report(ReportArgs),
}

/// Subcommands for `solvewatch check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config,
}

/// Arguments for `track` and `untrack`.
#[derive(Parser, Debug)]
pub struct BindingArgs {
    /// LeetCode username.
    pub username: String,

    /// Destination channel (a Telegram chat id).
    #[arg(long, allow_hyphen_values = true)]
    pub channel: String,
}

/// Arguments for `tracked`.
#[derive(Parser, Debug)]
pub struct TrackedArgs {
    /// Scope to list. With Telegram, a chat is its own scope.
    #[arg(long, allow_hyphen_values = true)]
    pub scope: String,
}

/// Arguments for `report`.
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Local date in the report timezone (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}
