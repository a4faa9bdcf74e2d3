//! Volunteer application repository.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::Collection;

use super::{inserted_object_id, is_duplicate_key, newest_first, WriteOutcome};
use crate::config::COLLECTION_VOLUNTEERS;
use crate::domain::{VolunteerApplication, VolunteerStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

#[cfg(test)]
use mockall::automock;

/// Volunteer application repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VolunteerRepository: Send + Sync {
    /// Application submitted with this email, if any
    async fn find_by_email(&self, email: &str) -> AppResult<Option<VolunteerApplication>>;

    /// Applications in one state, newest first
    async fn find_by_status(&self, status: VolunteerStatus)
        -> AppResult<Vec<VolunteerApplication>>;

    /// Insert an application and return its generated id; `Conflict` when
    /// the email already has one
    async fn insert(&self, application: VolunteerApplication) -> AppResult<ObjectId>;

    /// Overwrite the status of one application
    async fn update_status(&self, id: ObjectId, status: VolunteerStatus)
        -> AppResult<WriteOutcome>;

    /// Delete one application; `false` when nothing matched
    async fn delete(&self, id: ObjectId) -> AppResult<bool>;
}

/// MongoDB implementation of VolunteerRepository
pub struct VolunteerStore {
    collection: Collection<VolunteerApplication>,
}

impl VolunteerStore {
    /// Create new repository instance
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_VOLUNTEERS),
        }
    }
}

#[async_trait]
impl VolunteerRepository for VolunteerStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<VolunteerApplication>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn find_by_status(
        &self,
        status: VolunteerStatus,
    ) -> AppResult<Vec<VolunteerApplication>> {
        let cursor = self
            .collection
            .find(doc! { "status": status.as_str() })
            .sort(newest_first())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, application: VolunteerApplication) -> AppResult<ObjectId> {
        match self.collection.insert_one(&application).await {
            Ok(result) => inserted_object_id(result),
            Err(e) if is_duplicate_key(&e) => Err(AppError::conflict("Volunteer application")),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_status(
        &self,
        id: ObjectId,
        status: VolunteerStatus,
    ) -> AppResult<WriteOutcome> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "status": status.as_str() } },
            )
            .await?;
        Ok(result.into())
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
