// handlers/public/auth/login.rs - POST /token handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::{FormBody, Validate};
use crate::auth::authenticate;
use crate::database::DbSession;
use crate::error::ApiError;
use crate::state::AppState;

/// Password grant form (`application/x-www-form-urlencoded`).
///
/// Extra OAuth2 fields such as `grant_type` and `scope` are accepted and
/// ignored.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

impl Validate for TokenRequest {}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /token - Exchange username and password for a bearer token
///
/// Expected Output (Success):
/// ```json
/// { "access_token": "eyJhbGciOiJIUzI1NiI...", "token_type": "bearer" }
/// ```
///
/// Unknown usernames and wrong passwords both answer 401 with the same
/// message.
pub async fn token_post(
    State(state): State<AppState>,
    mut session: DbSession,
    FormBody(form): FormBody<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = authenticate(session.conn(), &form.username, &form.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Incorrect username or password"))?;
    session.commit().await?;

    let access_token = state.tokens.issue(&user.username, None)?;

    tracing::info!("Issued access token for '{}'", user.username);
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
