//! Activity catalogue handlers.

use axum::{Extension, extract::Path, http::StatusCode, response::Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::AppError,
    models::Activity,
    store::SharedStore,
    types::{CreateActivityRequest, PatchActivityRequest},
};

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_fields(name: Option<&str>, unit: Option<&str>) -> Result<(), AppError> {
    if let Some(name) = name {
        require_text("Activity name", name)?;
    }
    if let Some(unit) = unit {
        require_text("Unit", unit)?;
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/activities",
    tag = "activities",
    responses(
        (status = 200, description = "All activities, by name", body = Vec<Activity>)
    )
)]
/// List all activities.
pub async fn list_activities(
    Extension(db): Extension<SharedStore>,
) -> Result<Json<Vec<Activity>>, AppError> {
    let activities = db.list_activities().await?;
    Ok(Json(activities))
}

#[utoipa::path(
    post,
    path = "/activities",
    tag = "activities",
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Activity created", body = Activity),
        (status = 400, description = "Invalid input")
    )
)]
/// Create an activity.
pub async fn create_activity(
    Extension(db): Extension<SharedStore>,
    Json(req): Json<CreateActivityRequest>,
) -> Result<(StatusCode, Json<Activity>), AppError> {
    req.validate()?;
    require_fields(Some(&req.name), Some(&req.unit))?;

    let activity = req.into_activity();
    db.create_activity(&activity).await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

#[utoipa::path(
    get,
    path = "/activities/{id}",
    tag = "activities",
    params(
        ("id" = Uuid, Path, description = "Activity ID")
    ),
    responses(
        (status = 200, description = "Activity details", body = Activity),
        (status = 404, description = "Activity not found")
    )
)]
/// Get an activity by ID.
pub async fn get_activity(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<Activity>, AppError> {
    let activity = db.get_activity(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(activity))
}

#[utoipa::path(
    put,
    path = "/activities/{id}",
    tag = "activities",
    params(
        ("id" = Uuid, Path, description = "Activity ID")
    ),
    request_body = CreateActivityRequest,
    responses(
        (status = 200, description = "Activity replaced", body = Activity),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Activity not found")
    )
)]
/// Replace an activity. Points already earned by existing workouts are unchanged.
pub async fn replace_activity(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateActivityRequest>,
) -> Result<Json<Activity>, AppError> {
    req.validate()?;
    require_fields(Some(&req.name), Some(&req.unit))?;

    let mut activity = db.get_activity(id).await?.ok_or(AppError::NotFound)?;
    req.replace(&mut activity);
    save_activity(&db, activity).await
}

#[utoipa::path(
    patch,
    path = "/activities/{id}",
    tag = "activities",
    params(
        ("id" = Uuid, Path, description = "Activity ID")
    ),
    request_body = PatchActivityRequest,
    responses(
        (status = 200, description = "Activity updated", body = Activity),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Activity not found")
    )
)]
/// Update some of an activity's fields.
pub async fn update_activity(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
    Json(req): Json<PatchActivityRequest>,
) -> Result<Json<Activity>, AppError> {
    req.validate()?;
    require_fields(req.name.as_deref(), req.unit.as_deref())?;

    let mut activity = db.get_activity(id).await?.ok_or(AppError::NotFound)?;
    req.apply(&mut activity);
    save_activity(&db, activity).await
}

async fn save_activity(db: &SharedStore, activity: Activity) -> Result<Json<Activity>, AppError> {
    if db.update_activity(&activity).await? {
        Ok(Json(activity))
    } else {
        Err(AppError::NotFound)
    }
}

#[utoipa::path(
    delete,
    path = "/activities/{id}",
    tag = "activities",
    params(
        ("id" = Uuid, Path, description = "Activity ID")
    ),
    responses(
        (status = 204, description = "Activity and its workouts deleted"),
        (status = 404, description = "Activity not found")
    )
)]
/// Delete an activity and every workout logged against it.
pub async fn delete_activity(
    Extension(db): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if db.delete_activity(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
