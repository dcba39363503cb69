mod common;

use anyhow::Result;
use chrono::Duration;
use reqwest::{header, StatusCode};
use satellite_api::auth::{Claims, TokenIssuer};
use serde_json::json;

fn assert_bearer_challenge(res: &reqwest::Response) {
    assert_eq!(
        res.headers().get(header::WWW_AUTHENTICATE).map(|v| v.to_str().unwrap()),
        Some("Bearer"),
        "missing WWW-Authenticate challenge"
    );
}

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn me_returns_identity_for_valid_token() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let token = common::login(&client, &server).await?;

    let res = client
        .get(server.url("/users/me/"))
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"username": "pgrogan1"}));
    Ok(())
}

#[tokio::test]
async fn me_without_header_is_401() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/users/me/")).send().await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_bearer_challenge(&res);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Could not validate credentials");
    Ok(())
}

#[tokio::test]
async fn me_with_malformed_token_is_401() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/users/me/"))
        .bearer_auth("definitely-not-a-jwt")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_bearer_challenge(&res);
    Ok(())
}

#[tokio::test]
async fn me_with_expired_token_is_401() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let issuer = TokenIssuer::new(common::SECRET, "HS256", Duration::minutes(30))?;
    let expired = issuer.issue(common::USERNAME, Some(Duration::seconds(-30)))?;

    let res = client
        .get(server.url("/users/me/"))
        .bearer_auth(&expired)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_bearer_challenge(&res);
    Ok(())
}

#[tokio::test]
async fn me_with_foreign_signature_is_401() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let forger = TokenIssuer::new("some-other-secret", "HS256", Duration::minutes(30))?;
    let forged = forger.issue(common::USERNAME, None)?;

    let res = client
        .get(server.url("/users/me/"))
        .bearer_auth(&forged)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn token_for_unknown_user_is_401() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let ghost = server.state.tokens.issue("ghost", None)?;

    let res = client
        .get(server.url("/users/me/"))
        .bearer_auth(&ghost)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_bearer_challenge(&res);
    Ok(())
}

#[tokio::test]
async fn token_without_subject_is_401() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let claims = Claims {
        sub: None,
        exp: (chrono::Utc::now() + Duration::minutes(5)).timestamp(),
        iat: chrono::Utc::now().timestamp(),
    };
    let token = server.state.tokens.encode(&claims)?;

    let res = client
        .get(server.url("/users/me/"))
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
