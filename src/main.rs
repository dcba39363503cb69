use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use satellite_api::{app, AppConfig, AppState};

#[derive(Parser, Debug)]
#[command(name = "satellite-api", version, about = "Satellite registry API server")]
struct Cli {
    #[arg(long, help = "Address to bind (overrides API_HOST)")]
    host: Option<String>,

    #[arg(long, short, help = "Port to listen on (overrides API_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "SQLite database URL (overrides DATABASE_URL)")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SECURITY_JWT_SECRET, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    tracing::info!("Starting Satellite API in {:?} mode", config.environment);

    let bind_addr = format!("{}:{}", config.api.host, config.api.port);
    let state = AppState::initialize(config).await?;
    let db = state.db.clone();

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Satellite API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
