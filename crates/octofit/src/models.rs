use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::scoring::{self, ScoringError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Team {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub team_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        team_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            team_id,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// How an activity's magnitude is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Elapsed time (minutes, hours, ...).
    Time,
    /// Anything counted: reps, laps, miles.
    Count,
}

const TIME_UNITS: &[&str] = &["seconds", "minutes", "hours"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Activity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Points awarded per unit of `duration_or_count`.
    pub points_per_unit: i32,
    /// Free-form unit label, e.g. `minutes` or `reps`.
    pub unit: String,
}

impl Activity {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        points_per_unit: i32,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            points_per_unit,
            unit: unit.into(),
        }
    }

    pub fn unit_kind(&self) -> UnitKind {
        let unit = self.unit.trim().to_ascii_lowercase();
        if TIME_UNITS.contains(&unit.as_str()) {
            UnitKind::Time
        } else {
            UnitKind::Count
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_id: Uuid,
    /// Minutes or a count, depending on the activity's unit.
    pub duration_or_count: f64,
    /// Fixed when the workout is written; later activity changes do not affect it.
    pub points_earned: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl Workout {
    /// Records a workout, scoring it against the activity's current rate.
    pub fn record(
        user_id: Uuid,
        activity: &Activity,
        duration_or_count: f64,
        date: OffsetDateTime,
    ) -> Result<Self, ScoringError> {
        let points_earned = scoring::points_for(duration_or_count, activity.points_per_unit)?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            activity_id: activity.id,
            duration_or_count,
            points_earned,
            date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub team_id: Uuid,
    pub total_points: i64,
    /// 1-based position within the team; 0 until the team has been ranked.
    pub rank: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

impl LeaderboardEntry {
    /// Creates an entry for `user` in their current team, awaiting a ranking pass.
    pub fn unranked(user: &User, total_points: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user.id,
            team_id: user.team_id,
            total_points,
            rank: 0,
            last_updated: OffsetDateTime::now_utc(),
        }
    }
}

/// Row counts for every collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EntityCounts {
    pub teams: i64,
    pub users: i64,
    pub activities: i64,
    pub workouts: i64,
    pub leaderboard_entries: i64,
}
