//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{campaign_handler, request_handler, user_handler, volunteer_handler};
use crate::domain::{
    AidRequestResponse, CampaignResponse, CampaignStatus, NewAidRequest, NewCampaign, NewUser,
    NewVolunteerApplication, RequestStatus, UserRole, VolunteerApplicationResponse,
    VolunteerStatus,
};
use crate::types::{InsertResponse, MessageResponse, RoleResponse, VolunteerReviewResponse};

/// OpenAPI documentation for the aid platform API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Aid Bridge API",
        version = "0.1.0",
        description = "Aid requests, volunteer applications and fundraising campaigns",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        // User endpoints
        user_handler::register,
        user_handler::get_role,
        user_handler::update_role,
        // Aid request endpoints
        request_handler::list_requests,
        request_handler::list_pending,
        request_handler::list_approved,
        request_handler::list_by_email,
        request_handler::create_request,
        request_handler::update_status,
        request_handler::delete_request,
        // Volunteer endpoints
        volunteer_handler::apply,
        volunteer_handler::list_pending,
        volunteer_handler::list_approved,
        volunteer_handler::review,
        volunteer_handler::delete_application,
        // Campaign endpoints
        campaign_handler::create_campaign,
        campaign_handler::list_campaigns,
        campaign_handler::update_status,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            NewUser,
            RequestStatus,
            NewAidRequest,
            AidRequestResponse,
            VolunteerStatus,
            NewVolunteerApplication,
            VolunteerApplicationResponse,
            CampaignStatus,
            NewCampaign,
            CampaignResponse,
            // Response bodies
            InsertResponse,
            MessageResponse,
            RoleResponse,
            VolunteerReviewResponse,
            // Handler request bodies
            user_handler::UpdateRoleRequest,
            request_handler::UpdateRequestStatus,
            volunteer_handler::ReviewRequest,
            campaign_handler::ModerateRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration and roles"),
        (name = "Requests", description = "Aid requests and their review"),
        (name = "Volunteers", description = "Volunteer applications"),
        (name = "Campaigns", description = "Fundraising campaigns")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for bearer ID tokens
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("ID token from the identity provider"))
                        .build(),
                ),
            );
        }
    }
}
