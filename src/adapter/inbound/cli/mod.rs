//! CLI module graph and dispatch.

pub mod check;
pub mod command;
pub mod output;
pub mod paths;
pub mod report;
pub mod run;
pub mod tracking;

use std::path::PathBuf;

use command::{CheckCommand, Cli, Commands};
use output::OutputConfig;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute a parsed command line.
///
/// An explicit `--config` must exist; the default location falls back to
/// built-in defaults when absent.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let (path, config) = load_config(cli.config)?;
    config.init_logging();

    match cli.command {
        Commands::Run => run::execute(config).await,
        Commands::Check(CheckCommand::Config) => check::execute_config(&path, &config),
        Commands::Track(args) => tracking::execute_track(&config, &args).await,
        Commands::Untrack(args) => tracking::execute_untrack(&config, &args).await,
        Commands::Tracked(args) => tracking::execute_tracked(&config, &args).await,
        Commands::Report(args) => report::execute(&config, args.date).await,
    }
}

#[allow(clippy::result_large_err)]
fn load_config(explicit: Option<PathBuf>) -> Result<(PathBuf, Config)> {
    match explicit {
        Some(path) => {
            let config = Config::load(&path)?;
            Ok((path, config))
        }
        None => {
            let path = paths::default_config();
            let config = Config::load_or_default(&path)?;
            Ok((path, config))
        }
    }
}
