//! Unit of Work - centralized repository access.
//!
//! Hands out one repository per collection over a single shared database
//! handle. Writes are not grouped into transactions: every repository call is
//! an independent single-document operation.

use async_trait::async_trait;
use std::sync::Arc;

use super::repositories::{
    AidRequestRepository, AidRequestStore, CampaignRepository, CampaignStore, UserRepository,
    UserStore, VolunteerRepository, VolunteerStore,
};
use super::Database;
use crate::errors::AppResult;

/// Unit of Work trait for dependency injection.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get aid request repository
    fn requests(&self) -> Arc<dyn AidRequestRepository>;

    /// Get volunteer application repository
    fn volunteers(&self) -> Arc<dyn VolunteerRepository>;

    /// Get campaign repository
    fn campaigns(&self) -> Arc<dyn CampaignRepository>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// MongoDB-backed implementation of UnitOfWork
pub struct Persistence {
    db: Database,
    user_repo: Arc<UserStore>,
    request_repo: Arc<AidRequestStore>,
    volunteer_repo: Arc<VolunteerStore>,
    campaign_repo: Arc<CampaignStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: Database) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(&db)),
            request_repo: Arc::new(AidRequestStore::new(&db)),
            volunteer_repo: Arc::new(VolunteerStore::new(&db)),
            campaign_repo: Arc::new(CampaignStore::new(&db)),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn requests(&self) -> Arc<dyn AidRequestRepository> {
        self.request_repo.clone()
    }

    fn volunteers(&self) -> Arc<dyn VolunteerRepository> {
        self.volunteer_repo.clone()
    }

    fn campaigns(&self) -> Arc<dyn CampaignRepository> {
        self.campaign_repo.clone()
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.ping().await
    }
}

/// Unit of Work over mock repositories for service tests.
///
/// Repositories left unset fall back to a mock with no expectations, so any
/// unexpected call fails the test.
#[cfg(test)]
#[derive(Default)]
pub struct TestUnitOfWork {
    pub users: Option<Arc<dyn UserRepository>>,
    pub requests: Option<Arc<dyn AidRequestRepository>>,
    pub volunteers: Option<Arc<dyn VolunteerRepository>>,
    pub campaigns: Option<Arc<dyn CampaignRepository>>,
}

#[cfg(test)]
#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users
            .clone()
            .unwrap_or_else(|| Arc::new(super::repositories::MockUserRepository::new()))
    }

    fn requests(&self) -> Arc<dyn AidRequestRepository> {
        self.requests
            .clone()
            .unwrap_or_else(|| Arc::new(super::repositories::MockAidRequestRepository::new()))
    }

    fn volunteers(&self) -> Arc<dyn VolunteerRepository> {
        self.volunteers
            .clone()
            .unwrap_or_else(|| Arc::new(super::repositories::MockVolunteerRepository::new()))
    }

    fn campaigns(&self) -> Arc<dyn CampaignRepository> {
        self.campaigns
            .clone()
            .unwrap_or_else(|| Arc::new(super::repositories::MockCampaignRepository::new()))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
