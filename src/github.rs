use crate::error::{BadgeServerError, Result};
use crate::types::{GraphQlRequest, GraphQlResponse};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

// Per-attempt ceiling; the resolver's deadline bounds the whole chain.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One GraphQL POST, no retries and no deadline of its own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        query: &str,
        variables: Value,
        token: &str,
    ) -> Result<GraphQlResponse<Value>>;
}

pub struct GitHubClient {
    client: Client,
    endpoint: Url,
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(Url::parse(GRAPHQL_ENDPOINT)?)
    }

    pub fn with_endpoint(endpoint: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("repo-badge-server/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(GitHubClient { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for GitHubClient {
    async fn send(
        &self,
        query: &str,
        variables: Value,
        token: &str,
    ) -> Result<GraphQlResponse<Value>> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("bearer {}", token))
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| BadgeServerError::transport(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "GitHub GraphQL request rejected");
            return Err(BadgeServerError::transport(Some(status.as_u16()), error_text));
        }

        let envelope: GraphQlResponse<Value> = response
            .json()
            .await
            .map_err(|e| BadgeServerError::transport(None, format!("malformed response body: {}", e)))?;

        check_envelope(envelope)
    }
}

/// Turns payload-level GraphQL errors into failures when they left no `data` behind.
///
/// GitHub answers a login that is an organization with a "Could not resolve to
/// a User" error next to a populated `data`, so errors alone are not fatal.
pub fn check_envelope(envelope: GraphQlResponse<Value>) -> Result<GraphQlResponse<Value>> {
    let errors = envelope.errors.as_deref().unwrap_or_default();
    if errors.is_empty() {
        return Ok(envelope);
    }

    let has_data = envelope.data.as_ref().is_some_and(|data| !data.is_null());
    if has_data {
        debug!(count = errors.len(), "GraphQL response carried partial errors");
        return Ok(envelope);
    }

    let messages = errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    if errors.iter().any(|error| error.kind.as_deref() == Some("RATE_LIMITED")) {
        return Err(BadgeServerError::transport(Some(429), messages));
    }

    Err(BadgeServerError::GraphQl(messages))
}
