//! Fundraising campaigns (`campaigns` collection).

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

/// Moderation state of a campaign; new campaigns carry none until reviewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Approved,
    Rejected,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Approved => "approved",
            CampaignStatus::Rejected => "rejected",
        }
    }

    /// Validate a moderation decision.
    pub fn parse_decision(raw: Option<&str>) -> AppResult<Self> {
        raw.and_then(|s| s.parse::<CampaignStatus>().ok())
            .ok_or_else(|| AppError::validation("Invalid status value"))
    }
}

impl FromStr for CampaignStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(CampaignStatus::Approved),
            "rejected" => Ok(CampaignStatus::Rejected),
            other => Err(AppError::validation(format!("Unknown campaign status: {}", other))),
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
    #[serde(flatten)]
    pub details: Details,
}

impl Campaign {
    /// Build a new, not yet moderated campaign.
    pub fn launch(input: NewCampaign, created_at: DateTime) -> Self {
        Self {
            id: None,
            status: None,
            created_at: Some(created_at),
            updated_at: None,
            details: strip_reserved(
                input.details,
                &[FIELD_ID, FIELD_STATUS, FIELD_CREATED_AT, FIELD_UPDATED_AT],
            ),
        }
    }
}

/// Campaign submission; every field is free-form
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewCampaign {
    /// Campaign fields (title, goal amount, description, ...)
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub details: Details,
}

/// Campaign as returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CampaignResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<Utc>>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub details: Details,
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        Self {
            id: id_to_hex(campaign.id),
            status: campaign.status,
            created_at: campaign.created_at.map(|at| at.to_chrono()),
            updated_at: campaign.updated_at.map(|at| at.to_chrono()),
            details: campaign.details,
        }
    }
}
