//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services reach the database through the Unit of Work.

mod aid_request_service;
mod auth_service;
mod campaign_service;
pub mod container;
mod firebase_verifier;
mod user_service;
mod volunteer_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Identity
pub use auth_service::{identity_provider, IdentityClaims, IdentityProvider, SharedSecretVerifier};
pub use firebase_verifier::FirebaseVerifier;

// Service traits and implementations
pub use aid_request_service::{AidRequestManager, AidRequestService};
pub use campaign_service::{CampaignManager, CampaignService};
pub use user_service::{Registration, UserManager, UserService};
pub use volunteer_service::{ReviewOutcome, VolunteerManager, VolunteerService};
