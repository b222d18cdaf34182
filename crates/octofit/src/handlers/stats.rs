//! Health check and collection statistics handlers.

use axum::{Extension, http::StatusCode, response::Json};

use crate::{errors::AppError, models::EntityCounts, store::SharedStore};

#[utoipa::path(
    get,
    path = "/health",
    tag = "stats",
    responses(
        (status = 200, description = "Health check passed")
    )
)]
/// Health check endpoint.
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Record counts", body = EntityCounts)
    )
)]
/// Get the number of records in each collection.
pub async fn get_stats(
    Extension(db): Extension<SharedStore>,
) -> Result<Json<EntityCounts>, AppError> {
    let counts = db.counts().await?;
    Ok(Json(counts))
}
