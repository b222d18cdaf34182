//! Workout logging handlers.
//!
//! `points_earned` is computed here, when a workout is written, from the
//! referenced activity's current `points_per_unit`. Writing a workout does
//! not touch the leaderboard.

use axum::{Extension, extract::Path, http::StatusCode, response::Json};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::AppError,
    models::{Activity, Workout},
    scoring,
    store::SharedStore,
    types::{CreateWorkoutRequest, PatchWorkoutRequest},
};

async fn find_activity(db: &SharedStore, id: Uuid) -> Result<Activity, AppError> {
    db.get_activity(id)
        .await?
        .ok_or_else(|| AppError::InvalidInput("activity does not exist".to_string()))
}

fn score(duration_or_count: f64, activity: &Activity) -> Result<i32, AppError> {
    scoring::points_for(duration_or_count, activity.points_per_unit)
        .map_err(|e| AppError::InvalidInput(e.to_string()))
}

#[utoipa::path(
    get,
    path = "/workouts",
    tag = "workouts",
    responses(
        (status = 200, description = "All workouts, newest first", body = Vec<Workout>)
    )
)]
/// List all workouts.
pub async fn list_workouts(
    Extension(db): Extension<SharedStore>,
) -> Result<Json<Vec<Workout>>, AppError> {
    let workouts = db.list_workouts().await?;
    Ok(Json(workouts))
}

#[utoipa::path(
    post,
    path = "/workouts",
    tag = "workouts",
    request_body = CreateWorkoutRequest,
    responses(
        (status = 201, description = "Workout logged", body = Workout),
        (status = 400, description = "Invalid input, unknown user or unknown activity")
    )
)]
/// Log a workout.
pub async fn create_workout(
    Extension(db): Extension<SharedStore>,
    Json(req): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<Workout>), AppError> {
    req.validate()?;

    let activity = find_activity(&db, req.activity_id).await?;
    let date = req.date.unwrap_or_else(OffsetDateTime::now_utc);
    let workout = Workout::record(req.user_id, &activity, req.duration_or_count, date)
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    db.create_workout(&workout).await?;

    Ok((StatusCode::CREATED, Json(workout)))
}

#[utoipa::path(
    get,
    path = "/workouts/{id}",
    tag = "workouts",
    params(
        ("id" = Uuid, Path, description = "Workout ID")
    ),
    responses(
        (status = 200, description = "Workout details", body = Workout),
        (status = 404, description = "Workout not found")
    )
)]
/// Get a workout by ID.
pub async fn get_workout(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<Workout>, AppError> {
    let workout = db.get_workout(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(workout))
}

#[utoipa::path(
    put,
    path = "/workouts/{id}",
    tag = "workouts",
    params(
        ("id" = Uuid, Path, description = "Workout ID")
    ),
    request_body = CreateWorkoutRequest,
    responses(
        (status = 200, description = "Workout replaced and rescored", body = Workout),
        (status = 400, description = "Invalid input, unknown user or unknown activity"),
        (status = 404, description = "Workout not found")
    )
)]
/// Replace a workout. Points are recomputed from the activity's current rate.
pub async fn replace_workout(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateWorkoutRequest>,
) -> Result<Json<Workout>, AppError> {
    req.validate()?;

    let mut workout = db.get_workout(id).await?.ok_or(AppError::NotFound)?;
    let activity = find_activity(&db, req.activity_id).await?;

    workout.points_earned = score(req.duration_or_count, &activity)?;
    workout.user_id = req.user_id;
    workout.activity_id = activity.id;
    workout.duration_or_count = req.duration_or_count;
    if let Some(date) = req.date {
        workout.date = date;
    }

    save_workout(&db, workout).await
}

#[utoipa::path(
    patch,
    path = "/workouts/{id}",
    tag = "workouts",
    params(
        ("id" = Uuid, Path, description = "Workout ID")
    ),
    request_body = PatchWorkoutRequest,
    responses(
        (status = 200, description = "Workout updated", body = Workout),
        (status = 400, description = "Invalid input, unknown user or unknown activity"),
        (status = 404, description = "Workout not found")
    )
)]
/// Update some of a workout's fields.
///
/// Points are recomputed only when the activity or the magnitude changes.
pub async fn update_workout(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
    Json(req): Json<PatchWorkoutRequest>,
) -> Result<Json<Workout>, AppError> {
    req.validate()?;

    let mut workout = db.get_workout(id).await?.ok_or(AppError::NotFound)?;

    if req.activity_id.is_some() || req.duration_or_count.is_some() {
        let activity_id = req.activity_id.unwrap_or(workout.activity_id);
        let duration_or_count = req.duration_or_count.unwrap_or(workout.duration_or_count);
        let activity = find_activity(&db, activity_id).await?;

        workout.points_earned = score(duration_or_count, &activity)?;
        workout.activity_id = activity_id;
        workout.duration_or_count = duration_or_count;
    }
    if let Some(user_id) = req.user_id {
        workout.user_id = user_id;
    }
    if let Some(date) = req.date {
        workout.date = date;
    }

    save_workout(&db, workout).await
}

async fn save_workout(db: &SharedStore, workout: Workout) -> Result<Json<Workout>, AppError> {
    if db.update_workout(&workout).await? {
        Ok(Json(workout))
    } else {
        Err(AppError::NotFound)
    }
}

#[utoipa::path(
    delete,
    path = "/workouts/{id}",
    tag = "workouts",
    params(
        ("id" = Uuid, Path, description = "Workout ID")
    ),
    responses(
        (status = 204, description = "Workout deleted"),
        (status = 404, description = "Workout not found")
    )
)]
/// Delete a workout.
pub async fn delete_workout(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if db.delete_workout(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
