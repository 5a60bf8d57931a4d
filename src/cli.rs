use crate::github::GRAPHQL_ENDPOINT;
use crate::resolver::{Credentials, ResolverConfig};
use crate::retry::RetryConfig;
use clap::Parser;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "repo-badge-server")]
#[command(about = "Repo Badge Server - Renders SVG badges from GitHub repository metadata")]
#[command(version)]
pub struct Cli {
    /// Address the HTTP server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// GitHub GraphQL endpoint
    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = GRAPHQL_ENDPOINT)]
    pub api_url: url::Url,

    /// Account whose repositories /api/total-repos counts
    #[arg(long, env = "REPOS_OWNER")]
    pub owner: String,

    /// Preferred token, used for private repository access
    #[arg(long, env = "PRIVATE_GH_TOKEN", hide_env_values = true)]
    pub private_gh_token: Option<String>,

    /// Fallback token
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    pub gh_token: Option<String>,

    /// Deadline for one metadata fetch, retries included
    #[arg(long, env = "FETCH_TIMEOUT_MS", default_value_t = 8000)]
    pub timeout_ms: u64,

    /// Attempts per fetch before giving up
    #[arg(long, env = "FETCH_MAX_ATTEMPTS", default_value_t = 3)]
    pub max_attempts: u32,

    /// Delay before the first retry; doubles per attempt
    #[arg(long, env = "FETCH_RETRY_DELAY_MS", default_value_t = 1000)]
    pub retry_delay_ms: u64,
}

impl Cli {
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            credentials: Credentials::new(self.private_gh_token.clone(), self.gh_token.clone()),
            retry: RetryConfig {
                max_attempts: self.max_attempts,
                initial_delay_ms: self.retry_delay_ms,
                ..Default::default()
            },
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}
