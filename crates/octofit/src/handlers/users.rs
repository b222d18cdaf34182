//! User management handlers.

use axum::{Extension, extract::Path, http::StatusCode, response::Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::AppError,
    models::User,
    store::SharedStore,
    types::{CreateUserRequest, PatchUserRequest},
};

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = Vec<User>)
    )
)]
/// List all users.
pub async fn list_users(
    Extension(db): Extension<SharedStore>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = db.list_users().await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input or unknown team"),
        (status = 409, description = "Email already registered")
    )
)]
/// Create a user in an existing team.
pub async fn create_user(
    Extension(db): Extension<SharedStore>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    req.validate()?;

    let user = req.into_user();
    db.create_user(&user).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found")
    )
)]
/// Get a user by ID.
pub async fn get_user(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = db.get_user(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User replaced", body = User),
        (status = 400, description = "Invalid input or unknown team"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    )
)]
/// Replace a user's editable fields.
pub async fn replace_user(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<User>, AppError> {
    req.validate()?;

    let mut user = db.get_user(id).await?.ok_or(AppError::NotFound)?;
    req.replace(&mut user);
    save_user(&db, user).await
}

#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = PatchUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid input or unknown team"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    )
)]
/// Update some of a user's fields.
pub async fn update_user(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
    Json(req): Json<PatchUserRequest>,
) -> Result<Json<User>, AppError> {
    req.validate()?;

    let mut user = db.get_user(id).await?.ok_or(AppError::NotFound)?;
    req.apply(&mut user);
    save_user(&db, user).await
}

/// Persists `user`. The store drops any entry that ranked them in a previous team.
async fn save_user(db: &SharedStore, user: User) -> Result<Json<User>, AppError> {
    if db.update_user(&user).await? {
        Ok(Json(user))
    } else {
        Err(AppError::NotFound)
    }
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User, workouts and leaderboard entries deleted"),
        (status = 404, description = "User not found")
    )
)]
/// Delete a user together with their workouts and leaderboard entries.
pub async fn delete_user(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if db.delete_user(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
