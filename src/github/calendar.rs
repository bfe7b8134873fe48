use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::utils::time::parse_calendar_date;

/// One cell of the contribution calendar as GitHub reports it. The date keeps its wire form
/// until extraction so a single malformed record can be skipped without failing the whole
/// response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub contribution_count: u32,
    pub date: String,
}

impl ContributionDay {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDay>,
}

/// The per-day activity grid for one account: an ordered run of weeks, seven days each,
/// immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u32,
    pub weeks: Vec<ContributionWeek>,
}

impl ContributionCalendar {
    pub fn days(&self) -> impl Iterator<Item = &ContributionDay> + '_ {
        self.weeks
            .iter()
            .flat_map(|week| week.contribution_days.iter())
    }

    /// Sum of all day counts. Recomputed locally instead of trusting the reported total so the
    /// companion state stays consistent with the dates fed into the streak walk.
    pub fn counted_total(&self) -> u32 {
        self.days().map(|day| day.contribution_count).sum()
    }

    /// All days with at least one contribution, parsed. A record whose date doesn't parse is
    /// dropped with a warning and processing continues.
    pub fn active_dates(&self) -> Vec<NaiveDate> {
        self.days()
            .filter(|day| day.contribution_count > 0)
            .filter_map(|day| match day.parsed_date() {
                Some(date) => Some(date),
                None => {
                    warn!(
                        "Skipping contribution day with malformed date {:?}",
                        day.date
                    );
                    None
                }
            })
            .collect()
    }
}
