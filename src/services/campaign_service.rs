//! Campaign service - creation and moderation of fundraising campaigns.

use async_trait::async_trait;
use bson::{oid::ObjectId, DateTime};
use std::sync::Arc;

use crate::domain::{Campaign, CampaignStatus, NewCampaign};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Campaign service trait for dependency injection.
#[async_trait]
pub trait CampaignService: Send + Sync {
    /// Store a new campaign with no moderation status
    async fn create(&self, input: NewCampaign) -> AppResult<ObjectId>;

    /// Campaigns, optionally filtered by state, newest first
    async fn list(&self, status: Option<CampaignStatus>) -> AppResult<Vec<Campaign>>;

    /// Approve or reject a campaign
    async fn update_status(&self, id: ObjectId, status: Option<&str>)
        -> AppResult<CampaignStatus>;
}

/// Concrete implementation of CampaignService using Unit of Work.
pub struct CampaignManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CampaignManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CampaignService for CampaignManager<U> {
    async fn create(&self, input: NewCampaign) -> AppResult<ObjectId> {
        let id = self
            .uow
            .campaigns()
            .insert(Campaign::launch(input, DateTime::now()))
            .await?;
        tracing::info!(campaign_id = %id, "Campaign created");
        Ok(id)
    }

    async fn list(&self, status: Option<CampaignStatus>) -> AppResult<Vec<Campaign>> {
        self.uow.campaigns().find(status).await
    }

    async fn update_status(
        &self,
        id: ObjectId,
        status: Option<&str>,
    ) -> AppResult<CampaignStatus> {
        let status = CampaignStatus::parse_decision(status)?;

        let outcome = self
            .uow
            .campaigns()
            .update_status(id, status, DateTime::now())
            .await?;
        if !outcome.found() {
            return Err(AppError::not_found("Campaign"));
        }

        tracing::info!(campaign_id = %id, %status, "Campaign moderated");
        Ok(status)
    }
}
