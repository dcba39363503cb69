// Request extractors that perform the validation step at the HTTP boundary.
// Every rejection becomes a 422 `ApiError` instead of axum's plain-text
// default, so clients see one error shape.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Form, Json,
};
use serde::de::DeserializeOwned;

use super::validate::Validate;
use crate::error::ApiError;

/// JSON body, deserialized then checked with `Validate`
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_field("body", rejection.body_text()))?;

        validated(value).map(Self)
    }
}

/// URL-encoded form body, deserialized then checked with `Validate`
#[derive(Debug)]
pub struct FormBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_field("body", rejection.body_text()))?;

        validated(value).map(Self)
    }
}

/// Typed path parameters
#[derive(Debug)]
pub struct PathParam<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::invalid_field("path", rejection.body_text()))?;

        Ok(Self(value))
    }
}

fn validated<T: Validate>(value: T) -> Result<T, ApiError> {
    value
        .validate()
        .map_err(|field_errors| ApiError::unprocessable_entity("Request validation failed", field_errors))?;
    Ok(value)
}
