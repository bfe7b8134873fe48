pub mod calendar;
pub mod output;
pub mod status;
pub mod sync;
pub mod watch;

use std::path::PathBuf;

use anyhow::Result;
use calendar::{process_calendar_command, CalendarCommand};
use clap::{Parser, Subcommand};
use status::{process_status_command, StatusCommand};
use sync::{process_sync_command, SyncCommand};
use tracing::level_filters::LevelFilter;
use watch::{process_watch_command, WatchCommand};

use crate::utils::{dir::create_application_default_path, logging::enable_logging};

#[derive(Parser, Debug)]
#[command(name = "Gitgotchi", version, long_about = None)]
#[command(
    about = "Terminal companion that grows with your GitHub contribution streak",
    long_about = None
)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Fetch fresh contribution data and update the companion")]
    Sync {
        #[command(flatten)]
        command: SyncCommand,
    },
    #[command(about = "Show the companion as of the last sync")]
    Status {
        #[command(flatten)]
        command: StatusCommand,
    },
    #[command(about = "Render the contribution calendar as a colored grid")]
    Calendar {
        #[command(flatten)]
        command: CalendarCommand,
    },
    #[command(about = "Keep the companion fresh by re-syncing on an interval")]
    Watch {
        #[command(flatten)]
        command: WatchCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(&create_application_default_path()?, logging_level, args.log)?;

    match args.commands {
        Commands::Sync { command } => process_sync_command(command).await,
        Commands::Status { command } => process_status_command(command).await,
        Commands::Calendar { command } => process_calendar_command(command).await,
        Commands::Watch { command } => process_watch_command(command).await,
    }
}

/// State directory for a run: an explicit override or the platform default.
fn resolve_state_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        }
        None => create_application_default_path(),
    }
}
