#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use satellite_api::config::SeedUser;
use satellite_api::{app, AppConfig, AppState};

pub const SECRET: &str = "integration-test-secret";
pub const USERNAME: &str = "pgrogan1";
pub const PASSWORD: &str = "hello";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub state: AppState,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline { break; }
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::for_testing(SECRET);
    config.seed = Some(SeedUser {
        username: USERNAME.to_string(),
        password: PASSWORD.to_string(),
    });
    config
}

/// Boot the router in-process against a fresh in-memory database
pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(test_config()).await
}

pub async fn spawn_server_with(config: AppConfig) -> Result<TestServer> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let state = AppState::initialize(config).await?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    let router = app(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let server = TestServer { port, base_url, state };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

/// Log in with the seeded account and return the bearer token
pub async fn login(client: &reqwest::Client, server: &TestServer) -> Result<String> {
    let res = client
        .post(server.url("/token"))
        .form(&[("username", USERNAME), ("password", PASSWORD)])
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body = res.json::<serde_json::Value>().await?;
    body["access_token"]
        .as_str()
        .map(str::to_string)
        .context("response carried no access_token")
}
