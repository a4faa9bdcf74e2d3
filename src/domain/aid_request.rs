//! Aid request documents (`requests` collection).

use std::fmt;
use std::str::FromStr;

use bson::{oid::ObjectId, DateTime};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{id_to_hex, strip_reserved, Details};
use crate::config::{FIELD_CREATED_AT, FIELD_ID, FIELD_STATUS, FIELD_UPDATED_AT};
use crate::errors::{AppError, AppResult};

/// Lifecycle of an aid request.
///
/// Requests start `pending`; afterwards any of the remaining states may
/// replace any other. Stored documents without a status read as `pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Matched,
    Completed,
}

impl RequestStatus {
    /// States an update may move a request into.
    pub const ASSIGNABLE: [RequestStatus; 4] = [
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Matched,
        RequestStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Matched => "matched",
            RequestStatus::Completed => "completed",
        }
    }

    /// Validate a status submitted for an update.
    pub fn parse_assignable(raw: Option<&str>) -> AppResult<Self> {
        raw.and_then(|s| s.parse::<RequestStatus>().ok())
            .filter(|status| Self::ASSIGNABLE.contains(status))
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ASSIGNABLE.iter().map(|s| s.as_str()).collect();
                AppError::validation(format!(
                    "Invalid status. Allowed values: {}",
                    allowed.join(", ")
                ))
            })
    }
}

impl FromStr for RequestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            "matched" => Ok(RequestStatus::Matched),
            "completed" => Ok(RequestStatus::Completed),
            other => Err(AppError::validation(format!("Unknown request status: {}", other))),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored aid request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AidRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(flatten)]
    pub details: Details,
}

impl AidRequest {
    /// Build a fresh request: always `pending`, stamped with `created_at`.
    pub fn submit(input: NewAidRequest, created_at: DateTime) -> Self {
        Self {
            id: None,
            email: input.email,
            status: RequestStatus::Pending,
            created_at: Some(created_at),
            details: strip_reserved(
                input.details,
                &[FIELD_ID, FIELD_STATUS, FIELD_CREATED_AT, FIELD_UPDATED_AT],
            ),
        }
    }
}

/// Aid request submission; any fields are accepted
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewAidRequest {
    /// Requester email address, used by the owner listing
    #[serde(default)]
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    /// Any further submitted fields (item, quantity, location, ...)
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub details: Details,
}

/// Aid request as returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AidRequestResponse {
    #[serde(rename = "_id")]
    #[schema(example = "665f1c2e9b1e8a3d4c5b6a79")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub status: RequestStatus,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<Utc>>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub details: Details,
}

impl From<AidRequest> for AidRequestResponse {
    fn from(request: AidRequest) -> Self {
        Self {
            id: id_to_hex(request.id),
            email: request.email,
            status: request.status,
            created_at: request.created_at.map(|at| at.to_chrono()),
            details: request.details,
        }
    }
}
