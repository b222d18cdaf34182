//! Query parameter types for API endpoints.

use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

/// Leaderboard listing query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    /// Only return entries for this team.
    pub team_id: Option<Uuid>,
}
