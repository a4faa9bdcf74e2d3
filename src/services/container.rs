//! Service Container - Centralized service access.
//!
//! Wires every service to one shared Unit of Work and hands them out as
//! trait objects.

use std::sync::Arc;

use super::{
    AidRequestManager, AidRequestService, CampaignManager, CampaignService, UserManager,
    UserService, VolunteerManager, VolunteerService,
};
use crate::infra::UnitOfWork;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get aid request service
    fn requests(&self) -> Arc<dyn AidRequestService>;

    /// Get volunteer service
    fn volunteers(&self) -> Arc<dyn VolunteerService>;

    /// Get campaign service
    fn campaigns(&self) -> Arc<dyn CampaignService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    user_service: Arc<dyn UserService>,
    request_service: Arc<dyn AidRequestService>,
    volunteer_service: Arc<dyn VolunteerService>,
    campaign_service: Arc<dyn CampaignService>,
}

impl Services {
    /// Create every service over the given Unit of Work
    pub fn from_unit_of_work<U: UnitOfWork + 'static>(uow: Arc<U>) -> Self {
        Self {
            user_service: Arc::new(UserManager::new(uow.clone())),
            request_service: Arc::new(AidRequestManager::new(uow.clone())),
            volunteer_service: Arc::new(VolunteerManager::new(uow.clone())),
            campaign_service: Arc::new(CampaignManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn requests(&self) -> Arc<dyn AidRequestService> {
        self.request_service.clone()
    }

    fn volunteers(&self) -> Arc<dyn VolunteerService> {
        self.volunteer_service.clone()
    }

    fn campaigns(&self) -> Arc<dyn CampaignService> {
        self.campaign_service.clone()
    }
}
