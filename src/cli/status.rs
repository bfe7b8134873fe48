use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    config::DEFAULT_INACTIVITY_THRESHOLD_DAYS,
    storage::state_store::{JsonStateStore, StateStore},
};

use super::{output::state_details, resolve_state_dir};

#[derive(Debug, Parser)]
pub struct StatusCommand {
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

/// Command to process `status`. Purely local: shows the companion as of the last sync.
pub async fn process_status_command(
    StatusCommand { decay_after, dir }: StatusCommand,
) -> Result<()> {
    let state_dir = resolve_state_dir(dir)?;
    let store = JsonStateStore::new(state_dir.join("state"))?;

    match store.load().await? {
        Some(state) => {
            let threshold = decay_after.unwrap_or(DEFAULT_INACTIVITY_THRESHOLD_DAYS);
            println!("{}", state_details(&state, threshold));
        }
        None => {
            println!("No companion yet. Run `gitgotchi sync --user <name>` to hatch one.");
        }
    }
    Ok(())
}
