//! Handlers for `track`, `untrack` and `tracked`.

use crate::adapter::inbound::cli::command::{BindingArgs, TrackedArgs};
use crate::adapter::inbound::cli::output;
use crate::domain::{ChannelId, ScopeId, Username};
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::tracking::{TrackOutcome, TrackingCommands, UntrackOutcome};

/// Execute `track`.
pub async fn execute_track(config: &Config, args: &BindingArgs) -> Result<()> {
    let username = Username::parse(&args.username)?;
    let channel = ChannelId::parse(&args.channel)?;
    let services = Services::for_command(config)?;

    match services.tracking.track(&username, &channel).await? {
        TrackOutcome::Started => {
            output::success(&format!("Now tracking {username} in {channel}"));
        }
        TrackOutcome::AlreadyTracked => {
            output::warning(&format!("{username} is already tracked in {channel}"));
        }
    }
    Ok(())
}

/// Execute `untrack`.
pub async fn execute_untrack(config: &Config, args: &BindingArgs) -> Result<()> {
    let username = Username::parse(&args.username)?;
    let channel = ChannelId::parse(&args.channel)?;
    let services = Services::for_command(config)?;

    match services.tracking.untrack(&username, &channel).await? {
        UntrackOutcome::Stopped { deactivated } => {
            output::success(&format!("Stopped tracking {username} in {channel}"));
            if deactivated {
                output::note(&format!("{username} is no longer tracked anywhere"));
            }
        }
        UntrackOutcome::NotTracked => {
            output::warning(&format!("{username} is not tracked in {channel}"));
        }
    }
    Ok(())
}

/// Execute `tracked`.
pub async fn execute_tracked(config: &Config, args: &TrackedArgs) -> Result<()> {
    let scope = ScopeId::new(args.scope.trim());
    let services = Services::for_command(config)?;
    let users = services.tracking.list_tracked(&scope).await?;

    output::section("Tracked Users");
    if users.is_empty() {
        output::note(&format!("No users are tracked in {scope}"));
        return Ok(());
    }
    for (username, channels) in &users {
        output::field(username.as_str(), format!("{channels} channel(s)"));
    }
    output::field("Total", users.len());
    Ok(())
}
