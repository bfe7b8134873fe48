use std::fmt::Display;

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};
use now::DateTimeNow;

use crate::{
    config::TrackerConfig,
    github::{client::GitHubGraphQlClient, ContributionSource},
};

use super::{
    output::{calendar_grid, range_summary},
    Args,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct CalendarCommand {
    #[arg(long = "user", short, help = "GitHub account to render")]
    username: String,
    #[arg(
        long,
        help = "GitHub access token. Falls back to $GITGOTCHI_GITHUB_TOKEN, then $GITHUB_TOKEN"
    )]
    token: Option<String>,
    #[arg(
        long = "start",
        short,
        help = "Start of the range. Examples are \"12 weeks ago\", \"yesterday\", \"15/03/2025\""
    )]
    start_date: Option<String>,
    #[arg(
        long = "end",
        short,
        help = "End of the range. Examples are \"yesterday\", \"15/03/2025\""
    )]
    end_date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

const DEFAULT_RANGE_WEEKS: i64 = 12;

/// Command to process `calendar`. Renders the per-day contribution grid between two dates.
pub async fn process_calendar_command(
    CalendarCommand {
        username,
        token,
        start_date,
        end_date,
        date_style,
    }: CalendarCommand,
) -> Result<()> {
    let (start, end) = parse_range(start_date, end_date, date_style)?;

    let config = TrackerConfig::resolve(username, token, None);
    let client = GitHubGraphQlClient::new(config.token.clone());
    let calendar = client.fetch_contributions(&config.username).await?;

    println!("{}", range_summary(&calendar, start, end));
    print!("{}", calendar_grid(&calendar, start, end));
    Ok(())
}

/// Also provides sensible defaults: the last [DEFAULT_RANGE_WEEKS] whole weeks up to today.
fn parse_range(
    start_date: Option<String>,
    end_date: Option<String>,
    date_style: DateStyle,
) -> Result<(NaiveDate, NaiveDate)> {
    let now = Local::now();
    let dialect: chrono_english::Dialect = date_style.into();

    let start = match start_date.map(|s| parse_date_string(&s, now, dialect)) {
        Some(Ok(v)) => v.with_timezone(&Local),
        Some(Err(e)) => {
            return Err(Args::command()
                .error(
                    clap::error::ErrorKind::ValueValidation,
                    format!("Failed to validate start date {e}"),
                )
                .into());
        }
        None => (now - Duration::weeks(DEFAULT_RANGE_WEEKS)).beginning_of_week(),
    };
    let end = match end_date.map(|s| parse_date_string(&s, now, dialect)) {
        Some(Ok(v)) => v.with_timezone(&Local),
        Some(Err(e)) => {
            return Err(Args::command()
                .error(
                    clap::error::ErrorKind::ValueValidation,
                    format!("Failed to validate end date {e}"),
                )
                .into());
        }
        None => now,
    };

    Ok((start.date_naive(), end.date_naive()))
}
