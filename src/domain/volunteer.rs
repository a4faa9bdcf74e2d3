//! Volunteer applications (`volunteers` collection).

use std::fmt;
use std::str::FromStr;

use bson::{oid::ObjectId, DateTime};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{id_to_hex, strip_reserved, Details, UserRole};
use crate::config::{FIELD_CREATED_AT, FIELD_ID, FIELD_STATUS, FIELD_UPDATED_AT};
use crate::errors::{AppError, AppResult};

/// Review state of a volunteer application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VolunteerStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl VolunteerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolunteerStatus::Pending => "pending",
            VolunteerStatus::Approved => "approved",
            VolunteerStatus::Rejected => "rejected",
        }
    }

    /// Validate a review decision; only `approved` and `rejected` qualify.
    pub fn parse_decision(raw: Option<&str>) -> AppResult<Self> {
        match raw.map(str::parse::<VolunteerStatus>) {
            Some(Ok(status)) if status != VolunteerStatus::Pending => Ok(status),
            _ => Err(AppError::validation(
                "Invalid status. Allowed values: approved, rejected",
            )),
        }
    }

    /// Role the applicant's user record receives for this decision.
    pub fn granted_role(&self) -> Option<UserRole> {
        match self {
            VolunteerStatus::Approved => Some(UserRole::Volunteer),
            VolunteerStatus::Rejected => Some(UserRole::User),
            VolunteerStatus::Pending => None,
        }
    }
}

impl FromStr for VolunteerStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(VolunteerStatus::Pending),
            "approved" => Ok(VolunteerStatus::Approved),
            "rejected" => Ok(VolunteerStatus::Rejected),
            other => Err(AppError::validation(format!("Unknown volunteer status: {}", other))),
        }
    }
}

impl fmt::Display for VolunteerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored volunteer application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerApplication {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default)]
    pub status: VolunteerStatus,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(flatten)]
    pub details: Details,
}

impl VolunteerApplication {
    /// Build a fresh application awaiting review.
    pub fn submit(input: NewVolunteerApplication, created_at: DateTime) -> Self {
        Self {
            id: None,
            email: input.email,
            status: VolunteerStatus::Pending,
            created_at: Some(created_at),
            details: strip_reserved(
                input.details,
                &[FIELD_ID, FIELD_STATUS, FIELD_CREATED_AT, FIELD_UPDATED_AT],
            ),
        }
    }
}

/// Volunteer application submission
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewVolunteerApplication {
    /// Applicant email; one application per address
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "helper@x.com")]
    pub email: String,
    /// Any further submitted fields (name, skills, availability, ...)
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub details: Details,
}

/// Volunteer application as returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VolunteerApplicationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub status: VolunteerStatus,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<Utc>>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub details: Details,
}

impl From<VolunteerApplication> for VolunteerApplicationResponse {
    fn from(application: VolunteerApplication) -> Self {
        Self {
            id: id_to_hex(application.id),
            email: application.email,
            status: application.status,
            created_at: application.created_at.map(|at| at.to_chrono()),
            details: application.details,
        }
    }
}
