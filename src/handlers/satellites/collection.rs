use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::api::JsonBody;
use crate::database::models::SatelliteCreate;
use crate::database::{DbSession, SatelliteRepository};
use crate::error::ApiError;

/// GET /satellites/ - List every satellite
pub async fn collection_get(mut session: DbSession) -> Result<impl IntoResponse, ApiError> {
    let satellites = SatelliteRepository::select_all(session.conn()).await?;
    session.commit().await?;

    Ok(Json(satellites))
}

/// POST /satellites/ - Create a satellite, responding with the new id
///
/// ```json
/// { "acronym": "Landsat-7", "mass": 2100, "power": 1980 }
/// ```
pub async fn collection_post(
    mut session: DbSession,
    JsonBody(body): JsonBody<SatelliteCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let id = SatelliteRepository::insert(session.conn(), &body).await?;
    session.commit().await?;

    tracing::info!("Created satellite {} ({})", id, body.acronym);
    Ok((StatusCode::CREATED, Json(id)))
}
