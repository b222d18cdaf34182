//! Seeding run.

use rand::Rng;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use octofit::{
    errors::AppError,
    leaderboard,
    models::{Activity, EntityCounts, LeaderboardEntry, Team, User},
    scoring::{self, ScoringError},
    store::SharedStore,
};

use crate::{
    config::SeedConfig,
    fixtures::{ACTIVITIES, TEAMS},
    generators::WorkoutGenerator,
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Store error: {0}")]
    Store(#[from] AppError),
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),
    #[error("Invalid seed configuration: {0}")]
    InvalidConfig(String),
    #[error("No activities to generate workouts for")]
    NoActivities,
}

/// Top of one team's leaderboard after a run.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamLeader {
    pub team: String,
    pub user: String,
    pub total_points: i64,
}

/// What a seeding run left in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedSummary {
    pub counts: EntityCounts,
    pub leaders: Vec<TeamLeader>,
}

/// Seeds a store with demo data.
pub struct Seeder {
    store: SharedStore,
    config: SeedConfig,
}

impl Seeder {
    /// Creates a new seeder with the default configuration.
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            config: SeedConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SeedConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces everything in the store with a fresh demo data set.
    ///
    /// A failure part-way leaves whatever was already written; rerunning
    /// starts from a clean store again.
    pub async fn run(&self, rng: &mut impl Rng) -> Result<SeedSummary, SeedError> {
        self.config.validate()?;

        info!("Clearing existing data...");
        self.store.clear_all().await?;

        let teams = self.seed_teams().await?;
        let activities = self.seed_activities().await?;
        let users = self.seed_users(&teams).await?;

        info!("Creating workout data...");
        let generator = WorkoutGenerator::new(self.config.clone());
        let now = OffsetDateTime::now_utc();
        let mut entries = Vec::with_capacity(users.len());
        for user in &users {
            entries.push(self.seed_user_workouts(&generator, user, &activities, now, rng).await?);
        }

        info!("Updating leaderboard rankings...");
        let mut leaders = Vec::with_capacity(teams.len());
        for team in &teams {
            if let Some(leader) = self.rank_team(team, &entries, &users).await? {
                leaders.push(leader);
            }
        }

        let counts = self.store.counts().await?;
        Ok(SeedSummary { counts, leaders })
    }

    async fn seed_teams(&self) -> Result<Vec<Team>, SeedError> {
        info!("Creating teams...");
        let mut teams = Vec::with_capacity(TEAMS.len());
        for fixture in &TEAMS {
            let team = Team::new(fixture.name, fixture.description);
            self.store.create_team(&team).await?;
            teams.push(team);
        }
        Ok(teams)
    }

    async fn seed_activities(&self) -> Result<Vec<Activity>, SeedError> {
        info!("Creating activities...");
        let mut activities = Vec::with_capacity(ACTIVITIES.len());
        for fixture in &ACTIVITIES {
            let activity = Activity::new(
                fixture.name,
                fixture.description,
                fixture.points_per_unit,
                fixture.unit,
            );
            self.store.create_activity(&activity).await?;
            activities.push(activity);
        }
        Ok(activities)
    }

    /// Creates every team's heroes, in team order.
    async fn seed_users(&self, teams: &[Team]) -> Result<Vec<User>, SeedError> {
        let mut users = Vec::new();
        for (fixture, team) in TEAMS.iter().zip(teams) {
            info!("Creating {} heroes...", fixture.name);
            for hero in fixture.heroes {
                let user = User::new(hero.email, hero.first_name, hero.last_name, team.id);
                self.store.create_user(&user).await?;
                users.push(user);
            }
        }
        Ok(users)
    }

    /// Writes `user`'s random workouts and an unranked leaderboard entry
    /// holding their total.
    async fn seed_user_workouts(
        &self,
        generator: &WorkoutGenerator,
        user: &User,
        activities: &[Activity],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<LeaderboardEntry, SeedError> {
        let workouts = generator.generate_for_user(user, activities, now, rng)?;
        for workout in &workouts {
            self.store.create_workout(workout).await?;
        }

        let total_points = scoring::total_points(user.id, &workouts)?;
        let entry = LeaderboardEntry::unranked(user, total_points);
        self.store.create_leaderboard_entry(&entry).await?;

        debug!(
            user = %user.full_name(),
            workouts = workouts.len(),
            total_points,
            "Seeded workouts"
        );
        Ok(entry)
    }

    /// Ranks one team's entries (in creation order, so ties keep it) and
    /// persists the ranks. Returns the team's leader, if it has members.
    async fn rank_team(
        &self,
        team: &Team,
        entries: &[LeaderboardEntry],
        users: &[User],
    ) -> Result<Option<TeamLeader>, SeedError> {
        let team_entries = entries
            .iter()
            .filter(|e| e.team_id == team.id)
            .cloned()
            .collect();
        let ranked = leaderboard::rank_team(team.id, team_entries)?;
        self.store
            .update_ranks(&leaderboard::rank_updates(&ranked))
            .await?;

        Ok(ranked.first().map(|top| TeamLeader {
            team: team.name.clone(),
            user: user_name(users, top.user_id),
            total_points: top.total_points,
        }))
    }
}

fn user_name(users: &[User], id: Uuid) -> String {
    users
        .iter()
        .find(|u| u.id == id)
        .map(User::full_name)
        .unwrap_or_else(|| id.to_string())
}
