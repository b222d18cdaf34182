//! Workout points and per-user point totals.

use thiserror::Error;
use uuid::Uuid;

use crate::models::Workout;

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("invalid duration or count: {0}")]
    InvalidMagnitude(f64),

    #[error("points out of range for {duration_or_count} x {points_per_unit}")]
    PointsOutOfRange {
        duration_or_count: f64,
        points_per_unit: i32,
    },

    #[error("workout {workout_id} belongs to user {found}, expected {expected}")]
    ForeignWorkout {
        workout_id: Uuid,
        expected: Uuid,
        found: Uuid,
    },

    #[error("workout {workout_id} has negative points ({points})")]
    NegativePoints { workout_id: Uuid, points: i32 },

    #[error("point total overflowed for user {0}")]
    Overflow(Uuid),

    #[error("leaderboard entry {entry_id} belongs to team {found}, expected {expected}")]
    ForeignEntry {
        entry_id: Uuid,
        expected: Uuid,
        found: Uuid,
    },
}

/// Points earned for one workout: `round(duration_or_count * points_per_unit)`.
///
/// Halves round away from zero.
pub fn points_for(duration_or_count: f64, points_per_unit: i32) -> Result<i32, ScoringError> {
    if !duration_or_count.is_finite() || duration_or_count < 0.0 {
        return Err(ScoringError::InvalidMagnitude(duration_or_count));
    }

    let points = (duration_or_count * f64::from(points_per_unit)).round();
    if points < f64::from(i32::MIN) || points > f64::from(i32::MAX) {
        return Err(ScoringError::PointsOutOfRange {
            duration_or_count,
            points_per_unit,
        });
    }

    Ok(points as i32)
}

/// Running total of a single user's workout points.
#[derive(Debug, Clone)]
pub struct PointsTotal {
    user_id: Uuid,
    total: i64,
}

impl PointsTotal {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id, total: 0 }
    }

    pub fn next_workout(&mut self, workout: &Workout) -> Result<(), ScoringError> {
        if workout.user_id != self.user_id {
            return Err(ScoringError::ForeignWorkout {
                workout_id: workout.id,
                expected: self.user_id,
                found: workout.user_id,
            });
        }
        if workout.points_earned < 0 {
            return Err(ScoringError::NegativePoints {
                workout_id: workout.id,
                points: workout.points_earned,
            });
        }

        self.total = self
            .total
            .checked_add(i64::from(workout.points_earned))
            .ok_or(ScoringError::Overflow(self.user_id))?;
        Ok(())
    }

    pub fn finish(self) -> i64 {
        self.total
    }
}

/// Sums `points_earned` over all of `user_id`'s workouts. An empty set scores 0.
pub fn total_points(user_id: Uuid, workouts: &[Workout]) -> Result<i64, ScoringError> {
    let mut acc = PointsTotal::new(user_id);
    for workout in workouts {
        acc.next_workout(workout)?;
    }
    Ok(acc.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn workout(user_id: Uuid, points_earned: i32) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            user_id,
            activity_id: Uuid::new_v4(),
            duration_or_count: 1.0,
            points_earned,
            date: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn test_points_for_minutes() {
        assert_eq!(points_for(42.0, 10), Ok(420));
    }

    #[test]
    fn test_points_for_rounds_fractional_magnitudes() {
        assert_eq!(points_for(12.34, 1), Ok(12));
        assert_eq!(points_for(2.5, 1), Ok(3));
        assert_eq!(points_for(7.5, 3), Ok(23));
        assert_eq!(points_for(0.0, 15), Ok(0));
    }

    #[test]
    fn test_points_for_rejects_bad_magnitudes() {
        assert!(matches!(
            points_for(-1.0, 10),
            Err(ScoringError::InvalidMagnitude(_))
        ));
        assert!(matches!(
            points_for(f64::NAN, 10),
            Err(ScoringError::InvalidMagnitude(_))
        ));
        assert!(matches!(
            points_for(1e12, 10),
            Err(ScoringError::PointsOutOfRange { .. })
        ));
    }

    #[test]
    fn test_total_points_sums_workouts() {
        let user_id = Uuid::new_v4();
        let workouts = vec![
            workout(user_id, 50),
            workout(user_id, 30),
            workout(user_id, 30),
            workout(user_id, 10),
        ];

        assert_eq!(total_points(user_id, &workouts), Ok(120));
    }

    #[test]
    fn test_total_points_empty() {
        assert_eq!(total_points(Uuid::new_v4(), &[]), Ok(0));
    }

    #[test]
    fn test_total_points_rejects_other_users_workouts() {
        let user_id = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let workouts = vec![workout(user_id, 10), workout(stranger, 20)];

        assert!(matches!(
            total_points(user_id, &workouts),
            Err(ScoringError::ForeignWorkout { found, .. }) if found == stranger
        ));
    }

    #[test]
    fn test_total_points_rejects_negative_points() {
        let user_id = Uuid::new_v4();
        let workouts = vec![workout(user_id, 10), workout(user_id, -5)];

        assert!(matches!(
            total_points(user_id, &workouts),
            Err(ScoringError::NegativePoints { points: -5, .. })
        ));
    }

    #[test]
    fn test_total_points_does_not_overflow_i32() {
        let user_id = Uuid::new_v4();
        let workouts = vec![workout(user_id, i32::MAX), workout(user_id, i32::MAX)];

        assert_eq!(
            total_points(user_id, &workouts),
            Ok(2 * i64::from(i32::MAX))
        );
    }
}
