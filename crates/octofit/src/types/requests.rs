//! Request body types for API endpoints.
//!
//! `Create*` bodies are used for both POST and PUT (full replacement);
//! `Patch*` bodies carry only the fields to change.

use serde::Deserialize;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Activity, Team, User};

/// Team creation / replacement request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 100, message = "Team name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CreateTeamRequest {
    pub fn into_team(self) -> Team {
        Team::new(self.name.trim(), self.description)
    }

    pub fn replace(self, team: &mut Team) {
        team.name = self.name.trim().to_string();
        team.description = self.description;
    }
}

/// Partial team update request.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct PatchTeamRequest {
    #[validate(length(min = 1, max = 100, message = "Team name must be 1-100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl PatchTeamRequest {
    pub fn apply(self, team: &mut Team) {
        if let Some(name) = self.name {
            team.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            team.description = description;
        }
    }
}

/// User creation / replacement request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,
    pub team_id: Uuid,
}

impl CreateUserRequest {
    pub fn into_user(self) -> User {
        User::new(
            self.email.to_lowercase(),
            self.first_name,
            self.last_name,
            self.team_id,
        )
    }

    pub fn replace(self, user: &mut User) {
        user.email = self.email.to_lowercase();
        user.first_name = self.first_name;
        user.last_name = self.last_name;
        user.team_id = self.team_id;
    }
}

/// Partial user update request.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct PatchUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: Option<String>,
    pub team_id: Option<Uuid>,
}

impl PatchUserRequest {
    pub fn apply(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email.to_lowercase();
        }
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(team_id) = self.team_id {
            user.team_id = team_id;
        }
    }
}

/// Activity creation / replacement request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateActivityRequest {
    #[validate(length(min = 1, max = 100, message = "Activity name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0, message = "Points per unit cannot be negative"))]
    pub points_per_unit: i32,
    #[validate(length(min = 1, max = 20, message = "Unit must be 1-20 characters"))]
    pub unit: String,
}

impl CreateActivityRequest {
    pub fn into_activity(self) -> Activity {
        Activity::new(
            self.name.trim(),
            self.description,
            self.points_per_unit,
            self.unit.trim(),
        )
    }

    pub fn replace(self, activity: &mut Activity) {
        activity.name = self.name.trim().to_string();
        activity.description = self.description;
        activity.points_per_unit = self.points_per_unit;
        activity.unit = self.unit.trim().to_string();
    }
}

/// Partial activity update request.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct PatchActivityRequest {
    #[validate(length(min = 1, max = 100, message = "Activity name must be 1-100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Points per unit cannot be negative"))]
    pub points_per_unit: Option<i32>,
    #[validate(length(min = 1, max = 20, message = "Unit must be 1-20 characters"))]
    pub unit: Option<String>,
}

impl PatchActivityRequest {
    pub fn apply(self, activity: &mut Activity) {
        if let Some(name) = self.name {
            activity.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            activity.description = description;
        }
        if let Some(points_per_unit) = self.points_per_unit {
            activity.points_per_unit = points_per_unit;
        }
        if let Some(unit) = self.unit {
            activity.unit = unit.trim().to_string();
        }
    }
}

/// Workout creation / replacement request.
///
/// `points_earned` is never accepted from the client; it is derived from the
/// activity when the workout is written.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWorkoutRequest {
    pub user_id: Uuid,
    pub activity_id: Uuid,
    #[validate(range(min = 0.0, message = "Duration or count cannot be negative"))]
    pub duration_or_count: f64,
    /// Defaults to the time of the request.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
}

/// Partial workout update request.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct PatchWorkoutRequest {
    pub user_id: Option<Uuid>,
    pub activity_id: Option<Uuid>,
    #[validate(range(min = 0.0, message = "Duration or count cannot be negative"))]
    pub duration_or_count: Option<f64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation_messages() {
        let req = CreateUserRequest {
            email: "not-an-email".to_string(),
            first_name: String::new(),
            last_name: "Stark".to_string(),
            team_id: Uuid::new_v4(),
        };

        let err = crate::errors::AppError::from(req.validate().unwrap_err());
        assert_eq!(
            err.to_string(),
            "Invalid input: First name must be 1-50 characters, Invalid email address"
        );
    }

    #[test]
    fn test_patch_team_keeps_unset_fields() {
        let mut team = Team::new("Team Marvel", "Heroes");
        PatchTeamRequest {
            name: None,
            description: Some("Avengers assemble".to_string()),
        }
        .apply(&mut team);

        assert_eq!(team.name, "Team Marvel");
        assert_eq!(team.description, "Avengers assemble");
    }

    #[test]
    fn test_negative_points_per_unit_rejected() {
        let req = PatchActivityRequest {
            points_per_unit: Some(-1),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_activity_name_and_unit_trimmed() {
        let activity = CreateActivityRequest {
            name: "  Swimming ".to_string(),
            description: String::new(),
            points_per_unit: 15,
            unit: " Minutes  ".to_string(),
        }
        .into_activity();

        assert_eq!(activity.name, "Swimming");
        assert_eq!(activity.unit, "Minutes");
        assert_eq!(activity.unit_kind(), crate::models::UnitKind::Time);
    }

    #[test]
    fn test_emails_are_normalised() {
        let user = CreateUserRequest {
            email: "IronMan@Marvel.com".to_string(),
            first_name: "Tony".to_string(),
            last_name: "Stark".to_string(),
            team_id: Uuid::new_v4(),
        }
        .into_user();
        assert_eq!(user.email, "ironman@marvel.com");
    }
}
