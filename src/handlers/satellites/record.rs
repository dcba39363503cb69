use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::api::{JsonBody, PathParam};
use crate::database::models::{SatelliteCreate, SatelliteUpdate};
use crate::database::{DbSession, SatelliteRepository};
use crate::error::ApiError;

/// GET /satellites/:id - Show a single satellite
pub async fn record_get(
    PathParam(id): PathParam<i64>,
    mut session: DbSession,
) -> Result<impl IntoResponse, ApiError> {
    let satellite = SatelliteRepository::select_404(session.conn(), id).await?;
    session.commit().await?;

    Ok(Json(satellite))
}

/// PUT /satellites/:id - Replace every field of a satellite
pub async fn record_put(
    PathParam(id): PathParam<i64>,
    mut session: DbSession,
    JsonBody(body): JsonBody<SatelliteCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let satellite = SatelliteRepository::replace(session.conn(), id, body).await?;
    session.commit().await?;

    tracing::info!("Replaced satellite {}", id);
    Ok(Json(satellite))
}

/// PATCH /satellites/:id - Update only the supplied fields
pub async fn record_patch(
    PathParam(id): PathParam<i64>,
    mut session: DbSession,
    JsonBody(body): JsonBody<SatelliteUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let satellite = SatelliteRepository::patch(session.conn(), id, body).await?;
    session.commit().await?;

    tracing::info!("Patched satellite {}", id);
    Ok(Json(satellite))
}

/// DELETE /satellites/:id - Remove a satellite; 200 with an empty body
pub async fn record_delete(
    PathParam(id): PathParam<i64>,
    mut session: DbSession,
) -> Result<impl IntoResponse, ApiError> {
    SatelliteRepository::delete(session.conn(), id).await?;
    session.commit().await?;

    tracing::info!("Deleted satellite {}", id);
    Ok(StatusCode::OK)
}
