use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::{
    character::CharacterTracker,
    config::TrackerConfig,
    github::{client::GitHubGraphQlClient, ContributionSource},
    storage::state_store::{JsonStateStore, StateStore},
    utils::clock::{Clock, DefaultClock},
};

use super::{output::state_summary, resolve_state_dir};

#[derive(Debug, Parser)]
pub struct WatchCommand {
    #[arg(long = "user", short, help = "GitHub account the companion feeds on")]
    username: String,
    #[arg(
        long,
        help = "GitHub access token. Falls back to $GITGOTCHI_GITHUB_TOKEN, then $GITHUB_TOKEN"
    )]
    token: Option<String>,
    #[arg(long = "every", default_value_t = 30, help = "Minutes between refreshes")]
    every_minutes: u64,
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

/// Command to process `watch`. Stands in for the original on-foreground refresh trigger:
/// keeps re-syncing on an interval until interrupted.
pub async fn process_watch_command(
    WatchCommand {
        username,
        token,
        every_minutes,
        decay_after,
        dir,
    }: WatchCommand,
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

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    println!(
        "Watching {} every {} minutes. Press ctrl-c to stop.",
        config.username, every_minutes
    );
    run_watch(
        &mut tracker,
        &client,
        &config.username,
        Duration::from_secs(every_minutes * 60),
        shutdown,
        &DefaultClock,
    )
    .await
}

/// Executes the refresh event loop. Refresh points advance by a fixed step from the start
/// instant so a slow fetch doesn't shift the schedule.
async fn run_watch<S: StateStore>(
    tracker: &mut CharacterTracker<S>,
    source: &dyn ContributionSource,
    username: &str,
    every: Duration,
    shutdown: CancellationToken,
    clock: &dyn Clock,
) -> Result<()> {
    let mut refresh_point = clock.instant();
    loop {
        match source.fetch_contributions(username).await {
            Ok(calendar) => {
                let state = tracker.recompute(&calendar).await?;
                info!("Refreshed companion for {username}");
                println!("{}", state_summary(&state));
            }
            Err(e) => {
                // The companion keeps its previous state for this cycle.
                error!("Refresh failed {e:?}");
            }
        }

        refresh_point += every;
        tokio::select! {
            _ = shutdown.cancelled() => {
                return Ok(())
            }
            _ = clock.sleep_until(refresh_point) => ()
        }
    }
}
