use crate::error::{BadgeServerError, Result};
use crate::github::Transport;
use crate::models::{NormalizedRepository, RepositoryIdentity, RepositoryOwner};
use crate::retry::{retry_with_backoff, RetryConfig};
use crate::timeout::{with_timeout, DEFAULT_TIMEOUT};
use crate::types::{GraphQlResponse, RepoCountData, RepoQueryData};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub const REPOSITORY_QUERY: &str = r#"
fragment RepoInfo on Repository {
  name
  nameWithOwner
  isPrivate
  isArchived
  isTemplate
  stargazers {
    totalCount
  }
  description
  primaryLanguage {
    color
    id
    name
  }
  forkCount
}
query getRepo($login: String!, $repo: String!) {
  user(login: $login) {
    repository(name: $repo) {
      ...RepoInfo
    }
  }
  organization(login: $login) {
    repository(name: $repo) {
      ...RepoInfo
    }
  }
}
"#;

pub const REPOSITORY_COUNT_QUERY: &str = r#"
query getRepoCount($login: String!) {
  user(login: $login) {
    repositories(ownerAffiliations: OWNER) {
      totalCount
    }
  }
}
"#;

/// Tokens loaded at startup, tried in order when a call supplies none.
#[derive(Clone, Default)]
pub struct Credentials {
    /// `PRIVATE_GH_TOKEN`
    pub primary: Option<String>,
    /// `GH_TOKEN`
    pub fallback: Option<String>,
}

impl Credentials {
    pub fn new(primary: Option<String>, fallback: Option<String>) -> Self {
        Credentials { primary, fallback }
    }

    /// Picks the explicit token, then `primary`, then `fallback`, skipping empty values.
    pub fn resolve(&self, explicit: Option<&str>) -> Result<String> {
        [explicit, self.primary.as_deref(), self.fallback.as_deref()]
            .into_iter()
            .flatten()
            .find(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or(BadgeServerError::Credential)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("primary", &self.primary.as_ref().map(|_| "<redacted>"))
            .field("fallback", &self.fallback.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub credentials: Credentials,
    pub retry: RetryConfig,
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            retry: RetryConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Resolves repository metadata through a [`Transport`] under retry and deadline.
///
/// Holds no per-request state; one instance serves concurrent calls.
pub struct RepositoryResolver {
    transport: Arc<dyn Transport>,
    config: ResolverConfig,
}

impl RepositoryResolver {
    pub fn new(transport: Arc<dyn Transport>, config: ResolverConfig) -> Self {
        RepositoryResolver { transport, config }
    }

    /// Fetches one repository, whether its owner is a user or an organization.
    ///
    /// Identity and credential are checked before any request is sent.
    pub async fn fetch(
        &self,
        username: Option<&str>,
        reponame: Option<&str>,
        token: Option<&str>,
    ) -> Result<NormalizedRepository> {
        let identity = RepositoryIdentity::parse(username, reponame)?;
        let token = self.config.credentials.resolve(token)?;

        debug!(login = %identity.login, repo = %identity.name, "Fetching repository");

        let variables = json!({ "login": identity.login, "repo": identity.name });
        let envelope = self
            .execute("fetch repository", REPOSITORY_QUERY, variables, &token)
            .await?;

        let data: Option<RepoQueryData> = decode_data(envelope)?;
        let repository = RepositoryOwner::from_data(data)?.into_repository()?;

        info!(
            repo = %repository.name_with_owner,
            stars = repository.star_count,
            "Resolved repository"
        );
        Ok(repository)
    }

    /// Counts the repositories owned by `login`.
    pub async fn fetch_repository_count(
        &self,
        login: Option<&str>,
        token: Option<&str>,
    ) -> Result<u64> {
        let login = login
            .filter(|value| !value.is_empty())
            .ok_or_else(|| BadgeServerError::MissingParam(vec!["username"]))?;
        let token = self.config.credentials.resolve(token)?;

        let variables = json!({ "login": login });
        let envelope = self
            .execute("fetch repository count", REPOSITORY_COUNT_QUERY, variables, &token)
            .await?;

        let data: Option<RepoCountData> = decode_data(envelope)?;
        let count = data
            .and_then(|data| data.user)
            .map(|user| user.repositories.total_count)
            .ok_or_else(|| BadgeServerError::repository_fetch("User not found or inaccessible"))?;

        info!(login, count, "Resolved repository count");
        Ok(count)
    }

    async fn execute(
        &self,
        operation_name: &str,
        query: &'static str,
        variables: Value,
        token: &str,
    ) -> Result<GraphQlResponse<Value>> {
        let transport = self.transport.as_ref();
        let attempt = move || transport.send(query, variables.clone(), token);

        with_timeout(
            self.config.timeout,
            retry_with_backoff(&self.config.retry, operation_name, attempt),
        )
        .await
    }
}

fn decode_data<T: DeserializeOwned>(envelope: GraphQlResponse<Value>) -> Result<Option<T>> {
    match envelope.data {
        Some(Value::Null) | None => Ok(None),
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
    }
}
