//! In-process [`Store`] with the same constraints as the PostgreSQL schema:
//! uniqueness, foreign keys, cascades and the non-negative checks on
//! `points_per_unit` and `duration_or_count`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{Activity, EntityCounts, LeaderboardEntry, Team, User, Workout},
    store::Store,
};

#[derive(Debug, Default)]
struct Tables {
    teams: Vec<Team>,
    users: Vec<User>,
    activities: Vec<Activity>,
    workouts: Vec<Workout>,
    leaderboard: Vec<LeaderboardEntry>,
}

impl Tables {
    fn require_team(&self, id: Uuid) -> Result<(), AppError> {
        if self.teams.iter().any(|t| t.id == id) {
            Ok(())
        } else {
            Err(AppError::InvalidInput("team does not exist".to_string()))
        }
    }

    fn require_user(&self, id: Uuid) -> Result<(), AppError> {
        if self.users.iter().any(|u| u.id == id) {
            Ok(())
        } else {
            Err(AppError::InvalidInput("user does not exist".to_string()))
        }
    }

    fn require_activity(&self, id: Uuid) -> Result<(), AppError> {
        if self.activities.iter().any(|a| a.id == id) {
            Ok(())
        } else {
            Err(AppError::InvalidInput("activity does not exist".to_string()))
        }
    }

    fn check_team_name(&self, team: &Team) -> Result<(), AppError> {
        if self
            .teams
            .iter()
            .any(|t| t.id != team.id && t.name == team.name)
        {
            return Err(AppError::Conflict("team name already exists".to_string()));
        }
        Ok(())
    }

    fn check_user_email(&self, user: &User) -> Result<(), AppError> {
        if self
            .users
            .iter()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(AppError::Conflict("user email already exists".to_string()));
        }
        Ok(())
    }

    fn check_points_per_unit(activity: &Activity) -> Result<(), AppError> {
        if activity.points_per_unit < 0 {
            return Err(AppError::InvalidInput(
                "points per unit cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    fn check_magnitude(workout: &Workout) -> Result<(), AppError> {
        if workout.duration_or_count.is_nan() || workout.duration_or_count < 0.0 {
            return Err(AppError::InvalidInput(
                "duration or count cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    fn remove_user_dependents(&mut self, user_id: Uuid) {
        self.workouts.retain(|w| w.user_id != user_id);
        self.leaderboard.retain(|e| e.user_id != user_id);
    }
}

/// Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_team(&self, team: &Team) -> Result<(), AppError> {
        let mut tables = self.tables();
        tables.check_team_name(team)?;
        tables.teams.push(team.clone());
        Ok(())
    }

    async fn get_team(&self, id: Uuid) -> Result<Option<Team>, AppError> {
        Ok(self.tables().teams.iter().find(|t| t.id == id).cloned())
    }

    async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        let mut teams = self.tables().teams.clone();
        teams.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(teams)
    }

    async fn update_team(&self, team: &Team) -> Result<bool, AppError> {
        let mut tables = self.tables();
        tables.check_team_name(team)?;
        match tables.teams.iter_mut().find(|t| t.id == team.id) {
            Some(existing) => {
                existing.name = team.name.clone();
                existing.description = team.description.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_team(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables();
        let before = tables.teams.len();
        tables.teams.retain(|t| t.id != id);
        if tables.teams.len() == before {
            return Ok(false);
        }

        let members: Vec<Uuid> = tables
            .users
            .iter()
            .filter(|u| u.team_id == id)
            .map(|u| u.id)
            .collect();
        tables.users.retain(|u| u.team_id != id);
        for user_id in members {
            tables.remove_user_dependents(user_id);
        }
        tables.leaderboard.retain(|e| e.team_id != id);
        Ok(true)
    }

    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let mut tables = self.tables();
        tables.check_user_email(user)?;
        tables.require_team(user.team_id)?;
        tables.users.push(user.clone());
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let mut users = self.tables().users.clone();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }

    async fn update_user(&self, user: &User) -> Result<bool, AppError> {
        let mut tables = self.tables();
        tables.check_user_email(user)?;
        tables.require_team(user.team_id)?;
        match tables.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                existing.email = user.email.clone();
                existing.first_name = user.first_name.clone();
                existing.last_name = user.last_name.clone();
                existing.team_id = user.team_id;
            }
            None => return Ok(false),
        }
        tables
            .leaderboard
            .retain(|e| e.user_id != user.id || e.team_id == user.team_id);
        Ok(true)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }
        tables.remove_user_dependents(id);
        Ok(true)
    }

    async fn create_activity(&self, activity: &Activity) -> Result<(), AppError> {
        Tables::check_points_per_unit(activity)?;
        self.tables().activities.push(activity.clone());
        Ok(())
    }

    async fn get_activity(&self, id: Uuid) -> Result<Option<Activity>, AppError> {
        Ok(self.tables().activities.iter().find(|a| a.id == id).cloned())
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        let mut activities = self.tables().activities.clone();
        activities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(activities)
    }

    async fn update_activity(&self, activity: &Activity) -> Result<bool, AppError> {
        Tables::check_points_per_unit(activity)?;
        let mut tables = self.tables();
        match tables.activities.iter_mut().find(|a| a.id == activity.id) {
            Some(existing) => {
                *existing = activity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_activity(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables();
        let before = tables.activities.len();
        tables.activities.retain(|a| a.id != id);
        if tables.activities.len() == before {
            return Ok(false);
        }
        tables.workouts.retain(|w| w.activity_id != id);
        Ok(true)
    }

    async fn create_workout(&self, workout: &Workout) -> Result<(), AppError> {
        Tables::check_magnitude(workout)?;
        let mut tables = self.tables();
        tables.require_user(workout.user_id)?;
        tables.require_activity(workout.activity_id)?;
        tables.workouts.push(workout.clone());
        Ok(())
    }

    async fn get_workout(&self, id: Uuid) -> Result<Option<Workout>, AppError> {
        Ok(self.tables().workouts.iter().find(|w| w.id == id).cloned())
    }

    async fn list_workouts(&self) -> Result<Vec<Workout>, AppError> {
        let mut workouts = self.tables().workouts.clone();
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(workouts)
    }

    async fn list_user_workouts(&self, user_id: Uuid) -> Result<Vec<Workout>, AppError> {
        let mut workouts: Vec<Workout> = self
            .tables()
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(workouts)
    }

    async fn update_workout(&self, workout: &Workout) -> Result<bool, AppError> {
        Tables::check_magnitude(workout)?;
        let mut tables = self.tables();
        tables.require_user(workout.user_id)?;
        tables.require_activity(workout.activity_id)?;
        match tables.workouts.iter_mut().find(|w| w.id == workout.id) {
            Some(existing) => {
                *existing = workout.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_workout(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables();
        let before = tables.workouts.len();
        tables.workouts.retain(|w| w.id != id);
        Ok(tables.workouts.len() != before)
    }

    async fn create_leaderboard_entry(&self, entry: &LeaderboardEntry) -> Result<(), AppError> {
        let mut tables = self.tables();
        tables.require_user(entry.user_id)?;
        tables.require_team(entry.team_id)?;
        if tables
            .leaderboard
            .iter()
            .any(|e| e.user_id == entry.user_id && e.team_id == entry.team_id)
        {
            return Err(AppError::Conflict(
                "leaderboard entry already exists".to_string(),
            ));
        }
        tables.leaderboard.push(entry.clone());
        Ok(())
    }

    async fn get_leaderboard_entry(
        &self,
        id: Uuid,
    ) -> Result<Option<LeaderboardEntry>, AppError> {
        Ok(self.tables().leaderboard.iter().find(|e| e.id == id).cloned())
    }

    async fn list_leaderboard(
        &self,
        team_id: Option<Uuid>,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        let mut entries: Vec<LeaderboardEntry> = self
            .tables()
            .leaderboard
            .iter()
            .filter(|e| team_id.is_none_or(|team_id| e.team_id == team_id))
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            a.rank
                .cmp(&b.rank)
                .then_with(|| b.total_points.cmp(&a.total_points))
        });
        Ok(entries)
    }

    async fn update_ranks(&self, ranks: &[(Uuid, i32)]) -> Result<(), AppError> {
        let now = OffsetDateTime::now_utc();
        let mut tables = self.tables();
        for (id, rank) in ranks {
            if let Some(entry) = tables.leaderboard.iter_mut().find(|e| e.id == *id) {
                entry.rank = *rank;
                entry.last_updated = now;
            }
        }
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), AppError> {
        let mut tables = self.tables();
        tables.leaderboard.clear();
        tables.workouts.clear();
        tables.users.clear();
        tables.activities.clear();
        tables.teams.clear();
        Ok(())
    }

    async fn counts(&self) -> Result<EntityCounts, AppError> {
        let tables = self.tables();
        Ok(EntityCounts {
            teams: tables.teams.len() as i64,
            users: tables.users.len() as i64,
            activities: tables.activities.len() as i64,
            workouts: tables.workouts.len() as i64,
            leaderboard_entries: tables.leaderboard.len() as i64,
        })
    }
}
