//! Team management handlers.

use axum::{Extension, extract::Path, http::StatusCode, response::Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::AppError,
    models::Team,
    store::SharedStore,
    types::{CreateTeamRequest, PatchTeamRequest},
};

fn require_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Team name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    responses(
        (status = 200, description = "All teams", body = Vec<Team>)
    )
)]
/// List all teams.
pub async fn list_teams(
    Extension(db): Extension<SharedStore>,
) -> Result<Json<Vec<Team>>, AppError> {
    let teams = db.list_teams().await?;
    Ok(Json(teams))
}

#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Team name already exists")
    )
)]
/// Create a new team.
pub async fn create_team(
    Extension(db): Extension<SharedStore>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<Team>), AppError> {
    req.validate()?;
    require_name(&req.name)?;

    let team = req.into_team();
    db.create_team(&team).await?;

    Ok((StatusCode::CREATED, Json(team)))
}

#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "teams",
    params(
        ("id" = Uuid, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team details", body = Team),
        (status = 404, description = "Team not found")
    )
)]
/// Get a team by ID.
pub async fn get_team(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<Team>, AppError> {
    let team = db.get_team(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(team))
}

#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "teams",
    params(
        ("id" = Uuid, Path, description = "Team ID")
    ),
    request_body = CreateTeamRequest,
    responses(
        (status = 200, description = "Team replaced", body = Team),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Team not found"),
        (status = 409, description = "Team name already exists")
    )
)]
/// Replace a team's editable fields.
pub async fn replace_team(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Json<Team>, AppError> {
    req.validate()?;
    require_name(&req.name)?;

    let mut team = db.get_team(id).await?.ok_or(AppError::NotFound)?;
    req.replace(&mut team);
    save_team(&db, team).await
}

#[utoipa::path(
    patch,
    path = "/teams/{id}",
    tag = "teams",
    params(
        ("id" = Uuid, Path, description = "Team ID")
    ),
    request_body = PatchTeamRequest,
    responses(
        (status = 200, description = "Team updated", body = Team),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Team not found"),
        (status = 409, description = "Team name already exists")
    )
)]
/// Update some of a team's fields.
pub async fn update_team(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
    Json(req): Json<PatchTeamRequest>,
) -> Result<Json<Team>, AppError> {
    req.validate()?;
    if let Some(name) = &req.name {
        require_name(name)?;
    }

    let mut team = db.get_team(id).await?.ok_or(AppError::NotFound)?;
    req.apply(&mut team);
    save_team(&db, team).await
}

async fn save_team(db: &SharedStore, team: Team) -> Result<Json<Team>, AppError> {
    if db.update_team(&team).await? {
        Ok(Json(team))
    } else {
        Err(AppError::NotFound)
    }
}

#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "teams",
    params(
        ("id" = Uuid, Path, description = "Team ID")
    ),
    responses(
        (status = 204, description = "Team and its members deleted"),
        (status = 404, description = "Team not found")
    )
)]
/// Delete a team. Its users, their workouts and leaderboard entries go with it.
pub async fn delete_team(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if db.delete_team(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
