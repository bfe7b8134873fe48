use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{calendar::ContributionCalendar, ContributionSource};

const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

const CONTRIBUTIONS_QUERY: &str = "\
query($userName:String!) {
  user(login: $userName){
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}";

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    data: Option<EnvelopeData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
struct UserNode {
    #[serde(rename = "contributionsCollection")]
    contributions_collection: Option<ContributionsCollection>,
}

#[derive(Debug, Deserialize)]
struct ContributionsCollection {
    #[serde(rename = "contributionCalendar")]
    contribution_calendar: Option<ContributionCalendar>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Client for the GitHub GraphQL API. A token is optional but unauthenticated requests are
/// rate limited aggressively.
pub struct GitHubGraphQlClient {
    http: reqwest::Client,
    token: Option<String>,
    user_agent: String,
}

impl GitHubGraphQlClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            user_agent: format!("gitgotchi/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[async_trait]
impl ContributionSource for GitHubGraphQlClient {
    async fn fetch_contributions(&self, username: &str) -> Result<ContributionCalendar> {
        debug!("Fetching contribution calendar for {username}");

        let body = serde_json::json!({
            "query": CONTRIBUTIONS_QUERY,
            "variables": { "userName": username },
        });

        let mut request = self
            .http
            .post(GITHUB_GRAPHQL_URL)
            .header("User-Agent", &self.user_agent)
            .timeout(std::time::Duration::from_secs(10))
            .json(&body);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .context("Failed to reach the GitHub GraphQL API")?;

        if !response.status().is_success() {
            bail!("GitHub API returned error: {}", response.status());
        }

        let envelope: GraphQlEnvelope = response
            .json()
            .await
            .context("Failed to parse GitHub GraphQL response")?;

        if let Some(errors) = envelope.errors {
            if let Some(first) = errors.first() {
                bail!("GitHub GraphQL error: {}", first.message);
            }
        }

        envelope
            .data
            .and_then(|data| data.user)
            .and_then(|user| user.contributions_collection)
            .and_then(|collection| collection.contribution_calendar)
            .with_context(|| format!("No contribution calendar found for user {username}"))
    }
}
