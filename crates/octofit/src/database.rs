use async_trait::async_trait;
use sqlx::{PgPool, migrate::Migrator};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{Activity, EntityCounts, LeaderboardEntry, Team, User, Workout},
    store::Store,
};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Translates constraint violations into API errors; everything else stays a database error.
fn map_write_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or_default();
        if db_err.is_unique_violation() {
            let msg = match constraint {
                "teams_name_key" => "team name already exists",
                "users_email_key" => "user email already exists",
                "leaderboard_user_team_key" => "leaderboard entry already exists",
                _ => "record already exists",
            };
            return AppError::Conflict(msg.to_string());
        }
        if db_err.is_foreign_key_violation() {
            let msg = match constraint {
                "users_team_id_fkey" | "leaderboard_team_id_fkey" => "team does not exist",
                "workouts_user_id_fkey" | "leaderboard_user_id_fkey" => "user does not exist",
                "workouts_activity_id_fkey" => "activity does not exist",
                _ => "referenced record does not exist",
            };
            return AppError::InvalidInput(msg.to_string());
        }
        if db_err.is_check_violation() {
            let msg = match constraint {
                "activities_points_per_unit_check" => "points per unit cannot be negative",
                "workouts_duration_or_count_check" => "duration or count cannot be negative",
                _ => "value out of range",
            };
            return AppError::InvalidInput(msg.to_string());
        }
    }
    AppError::Database(err)
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPool::connect(database_url).await?;
        MIGRATOR.run(&pool).await?;
        info!("Database migrations applied");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Store for Database {
    async fn create_team(&self, team: &Team) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(team.id)
        .bind(&team.name)
        .bind(&team.description)
        .bind(team.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn get_team(&self, id: Uuid) -> Result<Option<Team>, AppError> {
        let team = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        let teams = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at
            FROM teams
            ORDER BY created_at, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    async fn update_team(&self, team: &Team) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE teams SET name = $2, description = $3
            WHERE id = $1
            "#,
        )
        .bind(team.id)
        .bind(&team.name)
        .bind(&team.description)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_team(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, first_name, last_name, team_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.team_id)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as(
            r#"
            SELECT id, email, first_name, last_name, team_id, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as(
            r#"
            SELECT id, email, first_name, last_name, team_id, created_at
            FROM users
            ORDER BY created_at, email
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update_user(&self, user: &User) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE users SET email = $2, first_name = $3, last_name = $4, team_id = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.team_id)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        // An entry only ranks a user within their current team
        let stale = sqlx::query("DELETE FROM leaderboard WHERE user_id = $1 AND team_id <> $2")
            .bind(user.id)
            .bind(user.team_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        if stale.rows_affected() > 0 {
            info!(
                user_id = %user.id,
                removed = stale.rows_affected(),
                "User changed team, stale leaderboard entries removed"
            );
        }
        Ok(true)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_activity(&self, activity: &Activity) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO activities (id, name, description, points_per_unit, unit)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(activity.id)
        .bind(&activity.name)
        .bind(&activity.description)
        .bind(activity.points_per_unit)
        .bind(&activity.unit)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn get_activity(&self, id: Uuid) -> Result<Option<Activity>, AppError> {
        let activity = sqlx::query_as(
            r#"
            SELECT id, name, description, points_per_unit, unit
            FROM activities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(activity)
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as(
            r#"
            SELECT id, name, description, points_per_unit, unit
            FROM activities
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }

    async fn update_activity(&self, activity: &Activity) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE activities SET name = $2, description = $3, points_per_unit = $4, unit = $5
            WHERE id = $1
            "#,
        )
        .bind(activity.id)
        .bind(&activity.name)
        .bind(&activity.description)
        .bind(activity.points_per_unit)
        .bind(&activity.unit)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_activity(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_workout(&self, workout: &Workout) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO workouts (id, user_id, activity_id, duration_or_count, points_earned, date)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(workout.id)
        .bind(workout.user_id)
        .bind(workout.activity_id)
        .bind(workout.duration_or_count)
        .bind(workout.points_earned)
        .bind(workout.date)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn get_workout(&self, id: Uuid) -> Result<Option<Workout>, AppError> {
        let workout = sqlx::query_as(
            r#"
            SELECT id, user_id, activity_id, duration_or_count, points_earned, date
            FROM workouts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(workout)
    }

    async fn list_workouts(&self) -> Result<Vec<Workout>, AppError> {
        let workouts = sqlx::query_as(
            r#"
            SELECT id, user_id, activity_id, duration_or_count, points_earned, date
            FROM workouts
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(workouts)
    }

    async fn list_user_workouts(&self, user_id: Uuid) -> Result<Vec<Workout>, AppError> {
        let workouts = sqlx::query_as(
            r#"
            SELECT id, user_id, activity_id, duration_or_count, points_earned, date
            FROM workouts
            WHERE user_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(workouts)
    }

    async fn update_workout(&self, workout: &Workout) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE workouts
            SET user_id = $2, activity_id = $3, duration_or_count = $4, points_earned = $5, date = $6
            WHERE id = $1
            "#,
        )
        .bind(workout.id)
        .bind(workout.user_id)
        .bind(workout.activity_id)
        .bind(workout.duration_or_count)
        .bind(workout.points_earned)
        .bind(workout.date)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_workout(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_leaderboard_entry(&self, entry: &LeaderboardEntry) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO leaderboard (id, user_id, team_id, total_points, rank, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(entry.team_id)
        .bind(entry.total_points)
        .bind(entry.rank)
        .bind(entry.last_updated)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn get_leaderboard_entry(
        &self,
        id: Uuid,
    ) -> Result<Option<LeaderboardEntry>, AppError> {
        let entry = sqlx::query_as(
            r#"
            SELECT id, user_id, team_id, total_points, rank, last_updated
            FROM leaderboard
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn list_leaderboard(
        &self,
        team_id: Option<Uuid>,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        let entries = sqlx::query_as(
            r#"
            SELECT id, user_id, team_id, total_points, rank, last_updated
            FROM leaderboard
            WHERE ($1::uuid IS NULL OR team_id = $1)
            ORDER BY rank ASC, total_points DESC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn update_ranks(&self, ranks: &[(Uuid, i32)]) -> Result<(), AppError> {
        let now = OffsetDateTime::now_utc();
        let mut tx = self.pool.begin().await?;

        for (id, rank) in ranks {
            sqlx::query(
                r#"
                UPDATE leaderboard SET rank = $2, last_updated = $3
                WHERE id = $1
                "#,
            )
            .bind(id)
            .bind(rank)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), AppError> {
        // Order matters due to foreign key constraints
        sqlx::query("DELETE FROM leaderboard")
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM workouts")
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        sqlx::query("DELETE FROM activities")
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM teams").execute(&self.pool).await?;

        Ok(())
    }

    async fn counts(&self) -> Result<EntityCounts, AppError> {
        let (teams, users, activities, workouts, leaderboard_entries): (i64, i64, i64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM teams),
                    (SELECT COUNT(*) FROM users),
                    (SELECT COUNT(*) FROM activities),
                    (SELECT COUNT(*) FROM workouts),
                    (SELECT COUNT(*) FROM leaderboard)
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(EntityCounts {
            teams,
            users,
            activities,
            workouts,
            leaderboard_entries,
        })
    }
}
