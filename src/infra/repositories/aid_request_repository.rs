//! Aid request repository.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::Collection;

use super::{inserted_object_id, newest_first, WriteOutcome};
use crate::config::COLLECTION_REQUESTS;
use crate::domain::{AidRequest, RequestStatus};
use crate::errors::AppResult;
use crate::infra::Database;

#[cfg(test)]
use mockall::automock;

/// Aid request repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AidRequestRepository: Send + Sync {
    /// Every request, in natural order
    async fn find_all(&self) -> AppResult<Vec<AidRequest>>;

    /// Requests in one state, newest first
    async fn find_by_status(&self, status: RequestStatus) -> AppResult<Vec<AidRequest>>;

    /// Requests submitted by one email, newest first
    async fn find_by_email(&self, email: &str) -> AppResult<Vec<AidRequest>>;

    /// Insert a request and return its generated id
    async fn insert(&self, request: AidRequest) -> AppResult<ObjectId>;

    /// Overwrite the status of one request
    async fn update_status(&self, id: ObjectId, status: RequestStatus) -> AppResult<WriteOutcome>;

    /// Delete one request; `false` when nothing matched
    async fn delete(&self, id: ObjectId) -> AppResult<bool>;
}

/// MongoDB implementation of AidRequestRepository
pub struct AidRequestStore {
    collection: Collection<AidRequest>,
}

impl AidRequestStore {
    /// Create new repository instance
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_REQUESTS),
        }
    }
}

#[async_trait]
impl AidRequestRepository for AidRequestStore {
    async fn find_all(&self) -> AppResult<Vec<AidRequest>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_status(&self, status: RequestStatus) -> AppResult<Vec<AidRequest>> {
        let cursor = self
            .collection
            .find(doc! { "status": status.as_str() })
            .sort(newest_first())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Vec<AidRequest>> {
        let cursor = self
            .collection
            .find(doc! { "email": email })
            .sort(newest_first())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, request: AidRequest) -> AppResult<ObjectId> {
        let result = self.collection.insert_one(&request).await?;
        inserted_object_id(result)
    }

    async fn update_status(&self, id: ObjectId, status: RequestStatus) -> AppResult<WriteOutcome> {
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
