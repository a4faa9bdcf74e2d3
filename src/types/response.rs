use axum::{http::StatusCode, response::IntoResponse, Json};
use bson::oid::ObjectId;
use serde::Serialize;
use utoipa::ToSchema;

/// Message-only response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Status updated")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of an insert, shaped like the driver's insert acknowledgement.
///
/// A skipped insert carries a message and a null `insertedId`.
#[derive(Debug, Serialize, ToSchema)]
pub struct InsertResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledged: Option<bool>,
    #[serde(rename = "insertedId")]
    #[schema(example = "665f1c2e8b3e4a0012345678")]
    pub inserted_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InsertResponse {
    pub fn inserted(id: ObjectId) -> Self {
        Self {
            acknowledged: Some(true),
            inserted_id: Some(id.to_hex()),
            message: None,
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            acknowledged: None,
            inserted_id: None,
            message: Some(message.into()),
        }
    }
}

/// Role lookup result
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleResponse {
    #[schema(example = "volunteer")]
    pub role: String,
}

/// Volunteer review result
#[derive(Debug, Serialize, ToSchema)]
pub struct VolunteerReviewResponse {
    pub message: String,
    /// Whether the applicant's user document was modified
    #[serde(rename = "userRoleUpdated")]
    pub user_role_updated: bool,
}

/// Created response helper (common pattern for POST endpoints)
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
