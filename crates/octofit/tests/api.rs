//! HTTP-level tests for the OctoFit API, served from the in-memory store.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use octofit::{
    create_router,
    memory::MemoryStore,
    models::{LeaderboardEntry, User},
    store::{SharedStore, Store},
};
use serde_json::{Value, json};
use tower::ServiceExt; // For `oneshot` method
use uuid::Uuid;

fn test_app() -> (Router, SharedStore) {
    let store: SharedStore = Arc::new(MemoryStore::new());
    (create_router(store.clone()), store)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_team(app: &Router, name: &str) -> String {
    let (status, body) = send(app, "POST", "/teams", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

async fn create_user(app: &Router, email: &str, team_id: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/users",
        Some(json!({
            "email": email,
            "first_name": "Test",
            "last_name": "Hero",
            "team_id": team_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

async fn create_activity(app: &Router, name: &str, points_per_unit: i32, unit: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/activities",
        Some(json!({
            "name": name,
            "points_per_unit": points_per_unit,
            "unit": unit,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_and_request_id() {
    let (app, _) = test_app();

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "abc-123");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn test_team_crud() {
    let (app, _) = test_app();
    let id = create_team(&app, "Team Marvel").await;

    let (status, body) = send(&app, "GET", &format!("/teams/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Team Marvel");
    assert_eq!(body["description"], "");

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/teams/{id}"),
        Some(json!({ "description": "Earth's mightiest" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Team Marvel");
    assert_eq!(body["description"], "Earth's mightiest");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/teams/{id}"),
        Some(json!({ "name": "Team Avengers" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Team Avengers");
    assert_eq!(body["description"], "");

    let (status, body) = send(&app, "GET", "/teams", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &format!("/teams/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/teams/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_duplicate_team_name_conflicts() {
    let (app, _) = test_app();
    create_team(&app, "Team DC").await;

    let (status, body) = send(&app, "POST", "/teams", Some(json!({ "name": "Team DC" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("team name already exists"));
}

#[tokio::test]
async fn test_blank_team_name_rejected() {
    let (app, _) = test_app();

    let (status, _) = send(&app, "POST", "/teams", Some(json!({ "name": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_activity_fields_rejected() {
    let (app, _) = test_app();

    for body in [
        json!({ "name": "  ", "points_per_unit": 10, "unit": "minutes" }),
        json!({ "name": "Rowing", "points_per_unit": 10, "unit": " " }),
    ] {
        let (status, _) = send(&app, "POST", "/activities", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let id = create_activity(&app, " Rowing ", 6, " minutes ").await;
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/activities/{id}"),
        Some(json!({ "unit": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Unit cannot be empty"));

    let (_, stored) = send(&app, "GET", &format!("/activities/{id}"), None).await;
    assert_eq!(stored["name"], "Rowing");
    assert_eq!(stored["unit"], "minutes");
}

#[tokio::test]
async fn test_user_requires_existing_team() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({
            "email": "ghost@example.com",
            "first_name": "No",
            "last_name": "Team",
            "team_id": Uuid::new_v4(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("team does not exist"));
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let (app, _) = test_app();
    let team = create_team(&app, "Team Marvel").await;
    create_user(&app, "ironman@marvel.com", &team).await;

    let (status, _) = send(
        &app,
        "POST",
        "/users",
        Some(json!({
            "email": "IronMan@Marvel.com",
            "first_name": "Tony",
            "last_name": "Stark",
            "team_id": team,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_user_body_lists_messages() {
    let (app, _) = test_app();
    let team = create_team(&app, "Team Marvel").await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({
            "email": "nope",
            "first_name": "",
            "last_name": "Stark",
            "team_id": team,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("Invalid email address"));
    assert!(error.contains("First name must be 1-50 characters"));
}

#[tokio::test]
async fn test_workout_points_computed_on_write() {
    let (app, _) = test_app();
    let team = create_team(&app, "Team Marvel").await;
    let user = create_user(&app, "ironman@marvel.com", &team).await;
    let running = create_activity(&app, "Running", 10, "minutes").await;

    let (status, workout) = send(
        &app,
        "POST",
        "/workouts",
        Some(json!({
            "user_id": user,
            "activity_id": running,
            "duration_or_count": 42.0,
            "points_earned": 1_000_000,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{workout}");
    assert_eq!(workout["points_earned"], 420);
    let workout_id = workout["id"].as_str().unwrap().to_string();

    // Changing the activity's rate leaves recorded points alone
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/activities/{running}"),
        Some(json!({ "points_per_unit": 20 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, stored) = send(&app, "GET", &format!("/workouts/{workout_id}"), None).await;
    assert_eq!(stored["points_earned"], 420);

    let (status, patched) = send(
        &app,
        "PATCH",
        &format!("/workouts/{workout_id}"),
        Some(json!({ "date": "2025-01-02T03:04:05Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["points_earned"], 420);

    // A new magnitude is scored at the current rate
    let (status, patched) = send(
        &app,
        "PATCH",
        &format!("/workouts/{workout_id}"),
        Some(json!({ "duration_or_count": 10.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["points_earned"], 210);
}

#[tokio::test]
async fn test_workout_rejects_unknown_references() {
    let (app, _) = test_app();
    let team = create_team(&app, "Team Marvel").await;
    let user = create_user(&app, "ironman@marvel.com", &team).await;
    let running = create_activity(&app, "Running", 10, "minutes").await;

    let (status, body) = send(
        &app,
        "POST",
        "/workouts",
        Some(json!({
            "user_id": user,
            "activity_id": Uuid::new_v4(),
            "duration_or_count": 5.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("activity does not exist"));

    let (status, body) = send(
        &app,
        "POST",
        "/workouts",
        Some(json!({
            "user_id": Uuid::new_v4(),
            "activity_id": running,
            "duration_or_count": 5.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("user does not exist"));

    let (status, _) = send(
        &app,
        "POST",
        "/workouts",
        Some(json!({
            "user_id": user,
            "activity_id": running,
            "duration_or_count": -1.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_team_cascades() {
    let (app, _) = test_app();
    let team = create_team(&app, "Team DC").await;
    let user = create_user(&app, "superman@dc.com", &team).await;
    let running = create_activity(&app, "Running", 10, "minutes").await;
    send(
        &app,
        "POST",
        "/workouts",
        Some(json!({ "user_id": user, "activity_id": running, "duration_or_count": 30.0 })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", &format!("/teams/{team}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["teams"], 0);
    assert_eq!(stats["users"], 0);
    assert_eq!(stats["workouts"], 0);
    assert_eq!(stats["activities"], 1);
}

#[tokio::test]
async fn test_leaderboard_ordered_and_filtered() {
    let (app, store) = test_app();
    let marvel = create_team(&app, "Team Marvel").await;
    let dc = create_team(&app, "Team DC").await;

    let mut marvel_entries = Vec::new();
    for (email, total, rank) in [
        ("a@marvel.com", 30, 2),
        ("b@marvel.com", 50, 1),
        ("c@marvel.com", 10, 3),
    ] {
        let id = create_user(&app, email, &marvel).await;
        let user: User = store.get_user(id.parse().unwrap()).await.unwrap().unwrap();
        let mut entry = LeaderboardEntry::unranked(&user, total);
        entry.rank = rank;
        store.create_leaderboard_entry(&entry).await.unwrap();
        marvel_entries.push(entry);
    }
    let batman = create_user(&app, "batman@dc.com", &dc).await;
    let batman: User = store
        .get_user(batman.parse().unwrap())
        .await
        .unwrap()
        .unwrap();
    let mut dc_entry = LeaderboardEntry::unranked(&batman, 99);
    dc_entry.rank = 1;
    store.create_leaderboard_entry(&dc_entry).await.unwrap();

    let (status, body) = send(&app, "GET", &format!("/leaderboard?team_id={marvel}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let ranks: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["rank"].as_i64().unwrap())
        .collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert_eq!(body[0]["total_points"], 50);

    let (_, all) = send(&app, "GET", "/leaderboard", None).await;
    assert_eq!(all.as_array().unwrap().len(), 4);

    let (status, entry) = send(&app, "GET", &format!("/leaderboard/{}", dc_entry.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["total_points"], 99);

    let (status, _) = send(&app, "POST", "/leaderboard", Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_team_change_drops_stale_leaderboard_entry() {
    let (app, store) = test_app();
    let marvel = create_team(&app, "Team Marvel").await;
    let dc = create_team(&app, "Team DC").await;
    let id = create_user(&app, "hulk@marvel.com", &marvel).await;

    let user = store.get_user(id.parse().unwrap()).await.unwrap().unwrap();
    store
        .create_leaderboard_entry(&LeaderboardEntry::unranked(&user, 80))
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/users/{id}"),
        Some(json!({ "team_id": dc })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team_id"], dc.as_str());

    let (_, entries) = send(&app, "GET", "/leaderboard", None).await;
    assert!(entries.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (app, _) = test_app();

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/workouts/{id}"].is_object());
    assert!(doc["paths"]["/leaderboard"]["get"].is_object());
}
