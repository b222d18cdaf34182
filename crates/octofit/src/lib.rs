pub mod config;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod leaderboard;
pub mod memory;
pub mod models;
pub mod request_id;
pub mod scoring;
pub mod store;
pub mod types;

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::get,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers::*, request_id::request_id_middleware, store::SharedStore};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "OctoFit Tracker API",
        version = "0.1.0",
        description = "Teams, users, activities, workouts and team leaderboards"
    ),
    paths(
        handlers::health_check,
        handlers::get_stats,
        handlers::list_teams,
        handlers::create_team,
        handlers::get_team,
        handlers::replace_team,
        handlers::update_team,
        handlers::delete_team,
        handlers::list_users,
        handlers::create_user,
        handlers::get_user,
        handlers::replace_user,
        handlers::update_user,
        handlers::delete_user,
        handlers::list_activities,
        handlers::create_activity,
        handlers::get_activity,
        handlers::replace_activity,
        handlers::update_activity,
        handlers::delete_activity,
        handlers::list_workouts,
        handlers::create_workout,
        handlers::get_workout,
        handlers::replace_workout,
        handlers::update_workout,
        handlers::delete_workout,
        handlers::list_leaderboard,
        handlers::get_leaderboard_entry,
    ),
    components(
        schemas(
            models::Team,
            models::User,
            models::Activity,
            models::Workout,
            models::LeaderboardEntry,
            models::EntityCounts,
            types::CreateTeamRequest,
            types::PatchTeamRequest,
            types::CreateUserRequest,
            types::PatchUserRequest,
            types::CreateActivityRequest,
            types::PatchActivityRequest,
            types::CreateWorkoutRequest,
            types::PatchWorkoutRequest,
        )
    ),
    tags(
        (name = "teams", description = "Team management"),
        (name = "users", description = "User management"),
        (name = "activities", description = "Activity catalogue"),
        (name = "workouts", description = "Workout logging"),
        (name = "leaderboard", description = "Per-team rankings (read-only)"),
        (name = "stats", description = "Health and record counts"),
    )
)]
pub struct ApiDoc;

pub fn create_router(store: SharedStore) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
        .allow_origin(Any);

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        // Teams
        .route("/teams", get(list_teams).post(create_team))
        .route(
            "/teams/{id}",
            get(get_team)
                .put(replace_team)
                .patch(update_team)
                .delete(delete_team),
        )
        // Users
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user)
                .put(replace_user)
                .patch(update_user)
                .delete(delete_user),
        )
        // Activities
        .route("/activities", get(list_activities).post(create_activity))
        .route(
            "/activities/{id}",
            get(get_activity)
                .put(replace_activity)
                .patch(update_activity)
                .delete(delete_activity),
        )
        // Workouts
        .route("/workouts", get(list_workouts).post(create_workout))
        .route(
            "/workouts/{id}",
            get(get_workout)
                .put(replace_workout)
                .patch(update_workout)
                .delete(delete_workout),
        )
        // Leaderboard is written only by the seeder
        .route("/leaderboard", get(list_leaderboard))
        .route("/leaderboard/{id}", get(get_leaderboard_entry));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .layer(Extension(store))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(CompressionLayer::new())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
}

pub async fn run_server(store: SharedStore, port: u16) -> anyhow::Result<()> {
    let app = create_router(store);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
