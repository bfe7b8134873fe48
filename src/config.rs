use std::env;

/// Days without a contribution before the companion loses a stage.
pub const DEFAULT_INACTIVITY_THRESHOLD_DAYS: i64 = 7;

const TOKEN_ENV_VARS: [&str; 2] = ["GITGOTCHI_GITHUB_TOKEN", "GITHUB_TOKEN"];

/// Everything one sync cycle needs, assembled up front from CLI arguments and the
/// environment. Handed to the components explicitly instead of living in a global.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub username: String,
    pub token: Option<String>,
    pub inactivity_threshold_days: i64,
}

impl TrackerConfig {
    /// Combines CLI arguments with the token environment fallbacks.
    pub fn resolve(
        username: String,
        token: Option<String>,
        inactivity_threshold_days: Option<i64>,
    ) -> Self {
        let env_token = TOKEN_ENV_VARS
            .iter()
            .find_map(|name| env::var(name).ok().filter(|t| !t.is_empty()));
        Self::resolve_with(username, token, inactivity_threshold_days, env_token)
    }

    fn resolve_with(
        username: String,
        token: Option<String>,
        inactivity_threshold_days: Option<i64>,
        env_token: Option<String>,
    ) -> Self {
        let token = token
            .filter(|t| !t.is_empty())
            .or_else(|| env_token.filter(|t| !t.is_empty()));
        Self {
            username,
            token,
            inactivity_threshold_days: inactivity_threshold_days
                .unwrap_or(DEFAULT_INACTIVITY_THRESHOLD_DAYS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TrackerConfig;

    #[test]
    fn explicit_token_wins_over_environment() {
        let config = TrackerConfig::resolve_with(
            "octocat".into(),
            Some("cli-token".into()),
            None,
            Some("env-token".into()),
        );
        assert_eq!(config.token.as_deref(), Some("cli-token"));
        assert_eq!(config.inactivity_threshold_days, 7);
    }

    #[test]
    fn empty_tokens_fall_through() {
        let config = TrackerConfig::resolve_with(
            "octocat".into(),
            Some(String::new()),
            Some(10),
            Some("env-token".into()),
        );
        assert_eq!(config.token.as_deref(), Some("env-token"));
        assert_eq!(config.inactivity_threshold_days, 10);

        let config =
            TrackerConfig::resolve_with("octocat".into(), None, None, Some(String::new()));
        assert_eq!(config.token, None);
    }
}
