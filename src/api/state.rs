//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::UnitOfWork;
use crate::services::{
    AidRequestService, CampaignService, IdentityProvider, ServiceContainer, Services,
    UserService, VolunteerService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Bearer token verification
    pub identity: Arc<dyn IdentityProvider>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Aid request service
    pub request_service: Arc<dyn AidRequestService>,
    /// Volunteer service
    pub volunteer_service: Arc<dyn VolunteerService>,
    /// Campaign service
    pub campaign_service: Arc<dyn CampaignService>,
    /// Backing store, for health checks
    pub persistence: Arc<dyn UnitOfWork>,
}

impl AppState {
    /// Create application state over a Unit of Work and an identity provider.
    pub fn new<U: UnitOfWork + 'static>(uow: Arc<U>, identity: Arc<dyn IdentityProvider>) -> Self {
        let services = Services::from_unit_of_work(uow.clone());

        Self {
            identity,
            user_service: services.users(),
            request_service: services.requests(),
            volunteer_service: services.volunteers(),
            campaign_service: services.campaigns(),
            persistence: uow,
        }
    }
}
