//! Read-only team leaderboard handlers.

use axum::{
    Extension,
    extract::{Path, Query},
    response::Json,
};
use uuid::Uuid;

use crate::{
    errors::AppError, models::LeaderboardEntry, store::SharedStore, types::LeaderboardQuery,
};

#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Leaderboard entries ordered by rank", body = Vec<LeaderboardEntry>)
    )
)]
/// List leaderboard entries by ascending rank.
pub async fn list_leaderboard(
    Extension(db): Extension<SharedStore>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let entries = db.list_leaderboard(query.team_id).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/leaderboard/{id}",
    tag = "leaderboard",
    params(
        ("id" = Uuid, Path, description = "Leaderboard entry ID")
    ),
    responses(
        (status = 200, description = "Leaderboard entry", body = LeaderboardEntry),
        (status = 404, description = "Entry not found")
    )
)]
/// Get a single leaderboard entry.
pub async fn get_leaderboard_entry(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<LeaderboardEntry>, AppError> {
    let entry = db
        .get_leaderboard_entry(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(entry))
}
