//! Persistence interface shared by the PostgreSQL and in-memory stores.
//!
//! Every implementation enforces the same rules:
//! - `teams.name`, `users.email` and the leaderboard `(user_id, team_id)`
//!   pair are unique ([`AppError::Conflict`] on violation).
//! - Writes referencing a missing team, user or activity fail with
//!   [`AppError::InvalidInput`].
//! - Deleting a team removes its users; deleting a user or an activity
//!   removes the workouts and leaderboard entries that reference it.
//! - Moving a user to another team removes, in the same write, their
//!   leaderboard entries for any other team.
//! - `points_per_unit` and `duration_or_count` are never negative.
//!
//! List ordering: teams and users by creation time, activities by name,
//! workouts newest first, leaderboard by ascending rank.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{Activity, EntityCounts, LeaderboardEntry, Team, User, Workout},
};

pub type SharedStore = Arc<dyn Store>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn create_team(&self, team: &Team) -> Result<(), AppError>;
    async fn get_team(&self, id: Uuid) -> Result<Option<Team>, AppError>;
    async fn list_teams(&self) -> Result<Vec<Team>, AppError>;
    /// Returns false when no team has `team.id`.
    async fn update_team(&self, team: &Team) -> Result<bool, AppError>;
    async fn delete_team(&self, id: Uuid) -> Result<bool, AppError>;

    async fn create_user(&self, user: &User) -> Result<(), AppError>;
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    /// Also drops the user's leaderboard entries outside `user.team_id`.
    async fn update_user(&self, user: &User) -> Result<bool, AppError>;
    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError>;

    async fn create_activity(&self, activity: &Activity) -> Result<(), AppError>;
    async fn get_activity(&self, id: Uuid) -> Result<Option<Activity>, AppError>;
    async fn list_activities(&self) -> Result<Vec<Activity>, AppError>;
    async fn update_activity(&self, activity: &Activity) -> Result<bool, AppError>;
    async fn delete_activity(&self, id: Uuid) -> Result<bool, AppError>;

    async fn create_workout(&self, workout: &Workout) -> Result<(), AppError>;
    async fn get_workout(&self, id: Uuid) -> Result<Option<Workout>, AppError>;
    async fn list_workouts(&self) -> Result<Vec<Workout>, AppError>;
    async fn list_user_workouts(&self, user_id: Uuid) -> Result<Vec<Workout>, AppError>;
    async fn update_workout(&self, workout: &Workout) -> Result<bool, AppError>;
    async fn delete_workout(&self, id: Uuid) -> Result<bool, AppError>;

    async fn create_leaderboard_entry(&self, entry: &LeaderboardEntry) -> Result<(), AppError>;
    async fn get_leaderboard_entry(&self, id: Uuid)
    -> Result<Option<LeaderboardEntry>, AppError>;
    /// Entries ordered by ascending rank, optionally limited to one team.
    async fn list_leaderboard(&self, team_id: Option<Uuid>)
    -> Result<Vec<LeaderboardEntry>, AppError>;
    /// Writes `(entry id, rank)` pairs as one unit.
    async fn update_ranks(&self, ranks: &[(Uuid, i32)]) -> Result<(), AppError>;

    /// Empties every collection, dependents first.
    async fn clear_all(&self) -> Result<(), AppError>;
    async fn counts(&self) -> Result<EntityCounts, AppError>;
}
