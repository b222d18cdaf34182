//! HTTP request handlers for the OctoFit API.
//!
//! This module re-exports handlers from focused submodules organized by resource.

pub mod activities;
pub mod leaderboard;
pub mod stats;
pub mod teams;
pub mod users;
pub mod workouts;

// Re-export handlers from submodules (including utoipa __path types for OpenAPI)
pub use activities::{
    __path_create_activity, __path_delete_activity, __path_get_activity, __path_list_activities,
    __path_replace_activity, __path_update_activity, create_activity, delete_activity,
    get_activity, list_activities, replace_activity, update_activity,
};
pub use leaderboard::{
    __path_get_leaderboard_entry, __path_list_leaderboard, get_leaderboard_entry,
    list_leaderboard,
};
pub use stats::{__path_get_stats, __path_health_check, get_stats, health_check};
pub use teams::{
    __path_create_team, __path_delete_team, __path_get_team, __path_list_teams,
    __path_replace_team, __path_update_team, create_team, delete_team, get_team, list_teams,
    replace_team, update_team,
};
pub use users::{
    __path_create_user, __path_delete_user, __path_get_user, __path_list_users,
    __path_replace_user, __path_update_user, create_user, delete_user, get_user, list_users,
    replace_user, update_user,
};
pub use workouts::{
    __path_create_workout, __path_delete_workout, __path_get_workout, __path_list_workouts,
    __path_replace_workout, __path_update_workout, create_workout, delete_workout, get_workout,
    list_workouts, replace_workout, update_workout,
};
