//! User domain entity and related types.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{strip_reserved, Details};
use crate::config::{FIELD_ID, FIELD_ROLE, ROLE_ADMIN, ROLE_USER, ROLE_VOLUNTEER};

/// Well-known roles.
///
/// Stored roles are plain strings; these are the values the platform
/// itself assigns or checks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Volunteer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => ROLE_USER,
            UserRole::Volunteer => ROLE_VOLUNTEER,
            UserRole::Admin => ROLE_ADMIN,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User document (`users` collection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub details: Details,
}

impl User {
    /// Build a newly registered user with the default role.
    pub fn register(input: NewUser) -> Self {
        Self {
            id: None,
            email: input.email,
            role: Some(UserRole::User.to_string()),
            details: strip_reserved(input.details, &[FIELD_ID, FIELD_ROLE]),
        }
    }

    /// Stored role, or `user` when the document has none.
    pub fn effective_role(&self) -> &str {
        self.role
            .as_deref()
            .filter(|role| !role.is_empty())
            .unwrap_or(ROLE_USER)
    }
}

/// User registration payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewUser {
    /// User email address
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Profile fields (name, photo, ...)
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub details: Details,
}
