use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::find_user;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context resolved from the bearer token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
}

/// Bearer authentication middleware.
///
/// Validates the token, requires a non-empty subject that still exists in
/// the users table, and injects `AuthUser` into the request. Every failure
/// produces the same 401 so clients learn nothing about the cause.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = authenticate_request(&state, request.headers())
        .await
        .map_err(|reason| {
            tracing::debug!("Bearer authentication failed: {}", reason);
            ApiError::invalid_credentials()
        })?;

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

async fn authenticate_request(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, String> {
    let token = extract_jwt_from_headers(headers)?;

    let claims = state
        .tokens
        .validate(token)
        .map_err(|e| e.to_string())?;

    let username = claims
        .subject()
        .ok_or_else(|| "Token carries no subject".to_string())?;

    let mut conn = state.db.pool().acquire().await.map_err(|e| {
        tracing::error!("Database error resolving token subject: {}", e);
        format!("Database error: {}", e)
    })?;

    let user = find_user(&mut conn, username).await.map_err(|e| {
        tracing::error!("Database error resolving token subject: {}", e);
        format!("Database error: {}", e)
    })?;

    let user = user.ok_or_else(|| format!("Token subject '{}' does not exist", username))?;

    Ok(AuthUser { username: user.username })
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, String> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    let (scheme, token) = auth_str
        .split_once(' ')
        .ok_or_else(|| "Authorization header must use Bearer token format".to_string())?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err("Authorization header must use Bearer token format".to_string());
    }

    let token = token.trim();
    if token.is_empty() {
        return Err("Empty JWT token".to_string());
    }
    Ok(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(ApiError::invalid_credentials)
    }
}
