//! Volunteer service - applications and their review.
//!
//! A review decision is written to the application first and then mirrored
//! onto the applicant's user role. The two writes are independent: if the
//! second one fails the application keeps its new status.

use async_trait::async_trait;
use bson::{oid::ObjectId, DateTime};
use std::sync::Arc;

use crate::domain::{NewVolunteerApplication, VolunteerApplication, VolunteerStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Outcome of a review decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub status: VolunteerStatus,
    /// Whether the applicant's user document actually changed
    pub user_role_updated: bool,
}

/// Volunteer service trait for dependency injection.
#[async_trait]
pub trait VolunteerService: Send + Sync {
    /// Submit an application; one per email
    async fn apply(&self, input: NewVolunteerApplication) -> AppResult<ObjectId>;

    /// Applications in one state, newest first
    async fn list_by_status(&self, status: VolunteerStatus)
        -> AppResult<Vec<VolunteerApplication>>;

    /// Approve or reject an application and update the applicant's role
    async fn review(
        &self,
        id: ObjectId,
        status: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<ReviewOutcome>;

    /// Remove an application
    async fn delete(&self, id: ObjectId) -> AppResult<()>;
}

/// Concrete implementation of VolunteerService using Unit of Work.
pub struct VolunteerManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> VolunteerManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> VolunteerService for VolunteerManager<U> {
    async fn apply(&self, input: NewVolunteerApplication) -> AppResult<ObjectId> {
        let volunteers = self.uow.volunteers();
        if volunteers.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Volunteer application"));
        }

        let id = volunteers
            .insert(VolunteerApplication::submit(input, DateTime::now()))
            .await?;
        tracing::info!(application_id = %id, "Volunteer application received");
        Ok(id)
    }

    async fn list_by_status(
        &self,
        status: VolunteerStatus,
    ) -> AppResult<Vec<VolunteerApplication>> {
        self.uow.volunteers().find_by_status(status).await
    }

    async fn review(
        &self,
        id: ObjectId,
        status: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<ReviewOutcome> {
        let status = VolunteerStatus::parse_decision(status)?;

        let outcome = self.uow.volunteers().update_status(id, status).await?;
        if !outcome.found() {
            return Err(AppError::not_found("Volunteer application"));
        }

        let user_role_updated = match (status.granted_role(), email) {
            (Some(role), Some(email)) if !email.is_empty() => self
                .uow
                .users()
                .update_role(email, role.as_str())
                .await?
                .changed(),
            _ => false,
        };

        tracing::info!(
            application_id = %id,
            %status,
            user_role_updated,
            "Volunteer application reviewed"
        );

        Ok(ReviewOutcome {
            status,
            user_role_updated,
        })
    }

    async fn delete(&self, id: ObjectId) -> AppResult<()> {
        if !self.uow.volunteers().delete(id).await? {
            return Err(AppError::not_found("Volunteer application"));
        }
        tracing::info!(application_id = %id, "Volunteer application deleted");
        Ok(())
    }
}
