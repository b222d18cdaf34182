//! Random workout generation.

use rand::{Rng, seq::SliceRandom};
use rand_distr::{Distribution, Uniform};
use time::{Duration, OffsetDateTime};

use octofit::models::{Activity, UnitKind, User, Workout};

use crate::{config::SeedConfig, db::SeedError};

/// Generates a user's workout history over the look-back window.
pub struct WorkoutGenerator {
    config: SeedConfig,
}

impl WorkoutGenerator {
    pub fn new(config: SeedConfig) -> Self {
        Self { config }
    }

    /// Generates between `workouts_per_user` bounds of workouts for `user`,
    /// each for a uniformly chosen activity and scored at that activity's rate.
    pub fn generate_for_user(
        &self,
        user: &User,
        activities: &[Activity],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<Workout>, SeedError> {
        if activities.is_empty() {
            return Err(SeedError::NoActivities);
        }

        let count = rng.gen_range(self.config.workouts_per_user());
        let window_start = now - Duration::days(self.config.lookback_days);
        let day_offset = Uniform::new_inclusive(0, self.config.lookback_days);

        let mut workouts = Vec::with_capacity(count);
        for _ in 0..count {
            let activity = activities.choose(rng).ok_or(SeedError::NoActivities)?;
            let magnitude = self.sample_magnitude(activity, rng);
            let date = window_start + Duration::days(day_offset.sample(rng));

            workouts.push(Workout::record(user.id, activity, magnitude, date)?);
        }

        Ok(workouts)
    }

    /// Whole-number magnitude in the time or count range, by the activity's unit.
    pub fn sample_magnitude(&self, activity: &Activity, rng: &mut impl Rng) -> f64 {
        let (lo, hi) = match activity.unit_kind() {
            UnitKind::Time => self.config.time_magnitude,
            UnitKind::Count => self.config.count_magnitude,
        };
        f64::from(Uniform::new_inclusive(lo, hi).sample(rng))
    }
}

impl Default for WorkoutGenerator {
    fn default() -> Self {
        Self::new(SeedConfig::default())
    }
}
