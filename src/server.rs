use crate::badge::{render_count_badge, render_repository_badge};
use crate::error::{BadgeServerError, Result};
use crate::resolver::RepositoryResolver;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<RepositoryResolver>,
    /// Owner whose repositories `/api/total-repos` counts.
    pub owner: String,
    pub start_time: Instant,
}

/// Query parameters of `/api/pin`
#[derive(Debug, Default, Deserialize)]
pub struct PinParams {
    pub username: Option<String>,
    pub repo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/pin", get(repository_badge))
        .route("/api/total-repos", get(total_repos_badge))
        .route("/healthz", get(health_check))
        .route("/livez", get(liveness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn start_server(
    state: AppState,
    addr: &str,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Badge server listening on http://{}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

async fn repository_badge(
    State(state): State<AppState>,
    params: Option<Query<PinParams>>,
) -> Response {
    // A malformed query string is treated like missing parameters.
    let params = params.map(|Query(params)| params).unwrap_or_default();

    match state
        .resolver
        .fetch(params.username.as_deref(), params.repo.as_deref(), None)
        .await
    {
        Ok(repository) => svg_response(render_repository_badge(&repository)),
        Err(e) => error_response("Error fetching repository", e),
    }
}

async fn total_repos_badge(State(state): State<AppState>) -> Response {
    match state
        .resolver
        .fetch_repository_count(Some(&state.owner), None)
        .await
    {
        Ok(count) => svg_response(render_count_badge(count)),
        Err(e) => error_response("Error fetching repo count", e),
    }
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
        }),
    )
}

async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}

fn svg_response(body: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "image/svg+xml")], body).into_response()
}

fn error_response(context: &str, e: BadgeServerError) -> Response {
    error!("{}: {}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        e.public_message(),
    )
        .into_response()
}
