//! User repository.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::Collection;

use super::{inserted_object_id, is_duplicate_key, WriteOutcome};
use crate::config::COLLECTION_USERS;
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Users are addressed by email; emails are compared exactly as stored.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user and return its generated id; `Conflict` when the email
    /// is already registered
    async fn insert(&self, user: User) -> AppResult<ObjectId>;

    /// Set the role of the user with this email
    async fn update_role(&self, email: &str, role: &str) -> AppResult<WriteOutcome>;
}

/// MongoDB implementation of UserRepository
pub struct UserStore {
    collection: Collection<User>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_USERS),
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn insert(&self, user: User) -> AppResult<ObjectId> {
        match self.collection.insert_one(&user).await {
            Ok(result) => inserted_object_id(result),
            Err(e) if is_duplicate_key(&e) => Err(AppError::conflict("User")),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_role(&self, email: &str, role: &str) -> AppResult<WriteOutcome> {
        let result = self
            .collection
            .update_one(doc! { "email": email }, doc! { "$set": { "role": role } })
            .await?;
        Ok(result.into())
    }
}
