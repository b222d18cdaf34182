//! Demo data for OctoFit.
//!
//! Wipes a store and fills it with two superhero teams, a fixed activity
//! catalogue, sixteen heroes with randomly generated workouts, and a ranked
//! leaderboard per team.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rand::{SeedableRng, rngs::StdRng};
//! use seed_data::prelude::*;
//!
//! let mut rng = StdRng::seed_from_u64(12345);
//! let summary = Seeder::new(store).run(&mut rng).await?;
//! assert_eq!(summary.counts.users, 16);
//! ```

pub mod config;
pub mod db;
pub mod fixtures;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, SeedSummary, Seeder, TeamLeader};
    pub use crate::fixtures::{ACTIVITIES, TEAMS};
    pub use crate::generators::WorkoutGenerator;
}
