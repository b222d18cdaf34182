//! Configuration for seeding runs.

use std::{env, ops::RangeInclusive};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::db::SeedError;

/// Configuration for seeding operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Number of workouts generated per user (inclusive range).
    pub workouts_per_user: (usize, usize),

    /// Magnitude range for time-based activities, in the activity's unit.
    pub time_magnitude: (u32, u32),

    /// Magnitude range for count-based activities.
    pub count_magnitude: (u32, u32),

    /// Workouts are dated between `now - lookback_days` and now.
    pub lookback_days: i64,

    /// Fixed RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            workouts_per_user: (10, 20),
            time_magnitude: (15, 90),
            count_magnitude: (10, 100),
            lookback_days: 30,
            rng_seed: None,
        }
    }
}

impl SeedConfig {
    /// Defaults plus `OCTOFIT_RNG_SEED`, if set.
    pub fn from_env() -> Result<Self, SeedError> {
        let rng_seed = match env::var("OCTOFIT_RNG_SEED") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                SeedError::InvalidConfig(format!("OCTOFIT_RNG_SEED {raw:?}: {e}"))
            })?),
            Err(_) => None,
        };

        let config = Self {
            rng_seed,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Rejects empty ranges and a negative look-back window.
    pub fn validate(&self) -> Result<(), SeedError> {
        check_range("workouts_per_user", self.workouts_per_user)?;
        check_range("time_magnitude", self.time_magnitude)?;
        check_range("count_magnitude", self.count_magnitude)?;
        if self.lookback_days < 0 {
            return Err(SeedError::InvalidConfig(format!(
                "lookback_days must not be negative, got {}",
                self.lookback_days
            )));
        }
        Ok(())
    }

    pub fn workouts_per_user(&self) -> RangeInclusive<usize> {
        self.workouts_per_user.0..=self.workouts_per_user.1
    }

    /// A generator seeded from `rng_seed`, or from OS entropy when unset.
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn check_range<T: PartialOrd + std::fmt::Debug>(name: &str, (lo, hi): (T, T)) -> Result<(), SeedError> {
    if lo > hi {
        return Err(SeedError::InvalidConfig(format!(
            "{name} is empty: {lo:?}..={hi:?}"
        )));
    }
    Ok(())
}
