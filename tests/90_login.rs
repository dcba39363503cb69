mod common;

use anyhow::Result;
use reqwest::{header, StatusCode};

#[tokio::test]
async fn login_with_seeded_account_returns_bearer_token() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/token"))
        .form(&[("username", "pgrogan1"), ("password", "hello")])
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().expect("access_token missing");
    let claims = server.state.tokens.validate(token)?;
    assert_eq!(claims.subject(), Some("pgrogan1"));
    assert_eq!(claims.exp - claims.iat, 30 * 60);
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let wrong_password = client
        .post(server.url("/token"))
        .form(&[("username", "pgrogan1"), ("password", "nope")])
        .send()
        .await?;
    let unknown_user = client
        .post(server.url("/token"))
        .form(&[("username", "nobody"), ("password", "hello")])
        .send()
        .await?;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.headers().get(header::WWW_AUTHENTICATE),
        unknown_user.headers().get(header::WWW_AUTHENTICATE)
    );

    let a = wrong_password.json::<serde_json::Value>().await?;
    let b = unknown_user.json::<serde_json::Value>().await?;
    assert_eq!(a, b);
    assert_eq!(a["message"], "Incorrect username or password");
    Ok(())
}

#[tokio::test]
async fn login_accepts_extra_oauth2_fields() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/token"))
        .form(&[
            ("grant_type", "password"),
            ("username", "pgrogan1"),
            ("password", "hello"),
            ("scope", ""),
        ])
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn login_without_password_is_422() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/token"))
        .form(&[("username", "pgrogan1")])
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn restart_does_not_duplicate_seed() -> Result<()> {
    let server = common::spawn_server().await?;

    let seeded = satellite_api::auth::seed_default_user(server.state.db.pool(), "pgrogan1", "other").await?;
    assert!(!seeded, "existing account must be left untouched");

    let client = reqwest::Client::new();
    common::login(&client, &server).await?;
    Ok(())
}
