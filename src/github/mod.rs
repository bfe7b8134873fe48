//! Remote source of contribution activity. [client::GitHubGraphQlClient] talks to the GitHub
//! GraphQL API; [ContributionSource] is the contract the rest of the application sees.

pub mod calendar;
pub mod client;

use anyhow::Result;
use async_trait::async_trait;

use self::calendar::ContributionCalendar;

/// Contract any provider of contribution data must implement. Abstracting the API lets the
/// tracker and the watch loop run against canned data in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContributionSource: Sync + Send {
    /// Fetches the full contribution calendar for an account. Failures are reported to the
    /// caller as-is; no retry happens at this level.
    async fn fetch_contributions(&self, username: &str) -> Result<ContributionCalendar>;
}
