//! Store integration for seeding demo data.
//!
//! The [`Seeder`] drives a full run against any [`octofit::store::Store`]:
//! clear, create fixtures, generate workouts, aggregate and rank.

mod seeder;

pub use seeder::{SeedError, SeedSummary, Seeder, TeamLeader};
