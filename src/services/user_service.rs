//! User service - registration and role management.

use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;

use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Result of a registration attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Created(ObjectId),
    AlreadyExists,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a user; registering a known email changes nothing
    async fn register(&self, input: NewUser) -> AppResult<Registration>;

    /// Role of the user with this email (`user` when unknown)
    async fn role_of(&self, email: &str) -> AppResult<String>;

    /// Replace the role of the user with this email
    async fn update_role(&self, email: &str, role: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn register(&self, input: NewUser) -> AppResult<Registration> {
        if self.uow.users().find_by_email(&input.email).await?.is_some() {
            return Ok(Registration::AlreadyExists);
        }

        // A concurrent registration can still win the insert.
        match self.uow.users().insert(User::register(input)).await {
            Ok(id) => {
                tracing::info!(user_id = %id, "User registered");
                Ok(Registration::Created(id))
            }
            Err(AppError::Conflict(_)) => Ok(Registration::AlreadyExists),
            Err(e) => Err(e),
        }
    }

    async fn role_of(&self, email: &str) -> AppResult<String> {
        if email.trim().is_empty() {
            return Err(AppError::validation("Email is required"));
        }

        let user = self.uow.users().find_by_email(email).await?;
        Ok(user
            .as_ref()
            .map(User::effective_role)
            .unwrap_or(crate::config::ROLE_USER)
            .to_string())
    }

    async fn update_role(&self, email: &str, role: &str) -> AppResult<()> {
        if role.trim().is_empty() {
            return Err(AppError::validation("Role is required"));
        }

        let outcome = self.uow.users().update_role(email, role).await?;
        if !outcome.found() {
            return Err(AppError::not_found("User"));
        }

        tracing::info!(%email, %role, "User role updated");
        Ok(())
    }
}
