//! Random entity generators for demo data.

pub mod workout;

pub use workout::WorkoutGenerator;
