//! Campaign repository.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, DateTime};
use futures::TryStreamExt;
use mongodb::Collection;

use super::{inserted_object_id, newest_first, WriteOutcome};
use crate::config::COLLECTION_CAMPAIGNS;
use crate::domain::{Campaign, CampaignStatus};
use crate::errors::AppResult;
use crate::infra::Database;

#[cfg(test)]
use mockall::automock;

/// Campaign repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Campaigns, optionally restricted to one state, newest first
    async fn find(&self, status: Option<CampaignStatus>) -> AppResult<Vec<Campaign>>;

    /// Insert a campaign and return its generated id
    async fn insert(&self, campaign: Campaign) -> AppResult<ObjectId>;

    /// Set the status and `updatedAt` of one campaign
    async fn update_status(
        &self,
        id: ObjectId,
        status: CampaignStatus,
        updated_at: DateTime,
    ) -> AppResult<WriteOutcome>;
}

/// MongoDB implementation of CampaignRepository
pub struct CampaignStore {
    collection: Collection<Campaign>,
}

impl CampaignStore {
    /// Create new repository instance
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_CAMPAIGNS),
        }
    }
}

#[async_trait]
impl CampaignRepository for CampaignStore {
    async fn find(&self, status: Option<CampaignStatus>) -> AppResult<Vec<Campaign>> {
        let filter = match status {
            Some(status) => doc! { "status": status.as_str() },
            None => doc! {},
        };

        let cursor = self.collection.find(filter).sort(newest_first()).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, campaign: Campaign) -> AppResult<ObjectId> {
        let result = self.collection.insert_one(&campaign).await?;
        inserted_object_id(result)
    }

    async fn update_status(
        &self,
        id: ObjectId,
        status: CampaignStatus,
        updated_at: DateTime,
    ) -> AppResult<WriteOutcome> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "status": status.as_str(), "updatedAt": updated_at } },
            )
            .await?;
        Ok(result.into())
    }
}
