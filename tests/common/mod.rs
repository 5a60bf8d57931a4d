#![allow(dead_code)]

use async_trait::async_trait;
use repo_badge_server::error::{BadgeServerError, Result};
use repo_badge_server::github::Transport;
use repo_badge_server::resolver::{Credentials, RepositoryResolver, ResolverConfig};
use repo_badge_server::retry::RetryConfig;
use repo_badge_server::types::GraphQlResponse;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_TOKEN: &str = "test_token";

/// Transport that replays a fixed script, then repeats its last entry.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<Value>>>,
    repeat: Box<dyn Fn() -> Result<Value> + Send + Sync>,
    calls: AtomicU32,
    tokens: Mutex<Vec<String>>,
    variables: Mutex<Vec<Value>>,
}

impl ScriptedTransport {
    pub fn new(
        script: Vec<Result<Value>>,
        repeat: impl Fn() -> Result<Value> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(ScriptedTransport {
            script: Mutex::new(script.into()),
            repeat: Box::new(repeat),
            calls: AtomicU32::new(0),
            tokens: Mutex::new(Vec::new()),
            variables: Mutex::new(Vec::new()),
        })
    }

    /// Always answers with the same `data` body.
    pub fn answering(data: Value) -> Arc<Self> {
        Self::new(Vec::new(), move || Ok(data.clone()))
    }

    /// Always fails with a status-less transport error.
    pub fn failing() -> Arc<Self> {
        Self::new(Vec::new(), || Err(transient_error()))
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn variables(&self) -> Vec<Value> {
        self.variables.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        _query: &str,
        variables: Value,
        token: &str,
    ) -> Result<GraphQlResponse<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().unwrap().push(token.to_string());
        self.variables.lock().unwrap().push(variables);

        let next = self.script.lock().unwrap().pop_front();
        let data = match next {
            Some(outcome) => outcome?,
            None => (self.repeat)()?,
        };

        Ok(GraphQlResponse {
            data: Some(data),
            errors: None,
        })
    }
}

/// Transport whose requests never complete.
#[derive(Default)]
pub struct StallingTransport {
    pub calls: AtomicU32,
}

#[async_trait]
impl Transport for StallingTransport {
    async fn send(
        &self,
        _query: &str,
        _variables: Value,
        _token: &str,
    ) -> Result<GraphQlResponse<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

pub fn transient_error() -> BadgeServerError {
    BadgeServerError::transport(None, "connection reset by peer")
}

pub fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        initial_delay_ms: 10,
        backoff_factor: 2.0,
        max_delay_ms: 40,
    }
}

pub fn config_with_token() -> ResolverConfig {
    ResolverConfig {
        credentials: Credentials::new(Some(TEST_TOKEN.to_string()), None),
        retry: fast_retry(3),
        timeout: Duration::from_millis(8000),
    }
}

pub fn resolver(transport: Arc<dyn Transport>, config: ResolverConfig) -> RepositoryResolver {
    RepositoryResolver::new(transport, config)
}

pub fn repository_json(name_with_owner: &str, stars: u64) -> Value {
    let name = name_with_owner.split('/').nth(1).unwrap_or(name_with_owner);
    json!({
        "name": name,
        "nameWithOwner": name_with_owner,
        "isPrivate": false,
        "isArchived": false,
        "isTemplate": false,
        "stargazers": { "totalCount": stars },
        "description": "A test repository",
        "primaryLanguage": { "color": "#dea584", "id": "MDg6TGFuZ3VhZ2UyMjk=", "name": "Rust" },
        "forkCount": 7
    })
}

pub fn user_owned(repository: Value) -> Value {
    json!({ "user": { "repository": repository }, "organization": null })
}

pub fn org_owned(repository: Value) -> Value {
    json!({ "user": null, "organization": { "repository": repository } })
}
