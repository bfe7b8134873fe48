use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::{
    character::CharacterTracker,
    config::TrackerConfig,
    github::{client::GitHubGraphQlClient, ContributionSource},
    storage::state_store::JsonStateStore,
    utils::clock::DefaultClock,
};

use super::{output::state_summary, resolve_state_dir};

#[derive(Debug, Parser)]
pub struct SyncCommand {
    #[arg(long = "user", short, help = "GitHub account the companion feeds on")]
    username: String,
    #[arg(
        long,
        help = "GitHub access token. Falls back to $GITGOTCHI_GITHUB_TOKEN, then $GITHUB_TOKEN"
    )]
    token: Option<String>,
    #[arg(
        long = "decay-after",
        help = "Days without a contribution before the companion loses a stage"
    )]
    decay_after: Option<i64>,
    #[arg(
        long,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

/// Command to process `sync`. Fetches a fresh calendar, recomputes the companion and saves it.
pub async fn process_sync_command(
    SyncCommand {
        username,
        token,
        decay_after,
        dir,
    }: SyncCommand,
) -> Result<()> {
    let config = TrackerConfig::resolve(username, token, decay_after);
    let state_dir = resolve_state_dir(dir)?;

    let store = JsonStateStore::new(state_dir.join("state"))?;
    let mut tracker = CharacterTracker::load(
        store,
        Box::new(DefaultClock),
        config.inactivity_threshold_days,
    )
    .await?;

    let client = GitHubGraphQlClient::new(config.token.clone());
    let calendar = client.fetch_contributions(&config.username).await?;
    info!(
        "Fetched {} contribution days for {}",
        calendar.days().count(),
        config.username
    );

    let state = tracker.recompute(&calendar).await?;
    println!("{}", state_summary(&state));
    Ok(())
}
