use anyhow::Context;
use clap::Parser;
use colored::*;
use repo_badge_server::cli::Cli;
use repo_badge_server::github::GitHubClient;
use repo_badge_server::resolver::RepositoryResolver;
use repo_badge_server::server::{start_server, AppState};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    println!("{}", "Repo Badge Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let config = cli.resolver_config();
    if config.credentials.resolve(None).is_err() {
        warn!("Neither PRIVATE_GH_TOKEN nor GH_TOKEN is set; every badge request will fail");
    }

    let client = GitHubClient::with_endpoint(cli.api_url.clone())
        .context("Failed to build GitHub client")?;
    info!(endpoint = %client.endpoint(), "GitHub GraphQL client ready");

    let state = AppState {
        resolver: Arc::new(RepositoryResolver::new(Arc::new(client), config)),
        owner: cli.owner.clone(),
        start_time: Instant::now(),
    };

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n{}", "Shutting down server...".yellow());
        }
    };

    start_server(state, &cli.bind, shutdown)
        .await
        .with_context(|| format!("Server on {} failed", cli.bind))?;

    println!("{}", "Server stopped".green());
    Ok(())
}
