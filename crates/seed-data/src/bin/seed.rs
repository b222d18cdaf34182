//! Default seed script - replaces the database contents with demo data
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
//! ```
//!
//! Set `OCTOFIT_RNG_SEED` for a reproducible data set.

use std::sync::Arc;

use octofit::{config::ServerConfig, database::Database};
use seed_data::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server_config = ServerConfig::from_env();
    let config = SeedConfig::from_env()?;
    tracing::info!("Seed configuration: {}", serde_json::to_string(&config)?);

    let db = Database::connect(&server_config.database_url).await?;
    tracing::info!("Connected to database");

    let mut rng = config.rng();
    let summary = Seeder::new(Arc::new(db))
        .with_config(config)
        .run(&mut rng)
        .await?;

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!("  Teams: {}", summary.counts.teams);
    tracing::info!("  Users: {}", summary.counts.users);
    tracing::info!("  Activities: {}", summary.counts.activities);
    tracing::info!("  Workouts: {}", summary.counts.workouts);
    tracing::info!("  Leaderboard entries: {}", summary.counts.leaderboard_entries);
    for leader in &summary.leaders {
        tracing::info!(
            "  {} leader: {} ({} points)",
            leader.team,
            leader.user,
            leader.total_points
        );
    }

    Ok(())
}
