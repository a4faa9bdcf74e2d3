//! Volunteer application handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{
    parse_object_id, NewVolunteerApplication, VolunteerApplicationResponse, VolunteerStatus,
};
use crate::errors::AppResult;
use crate::types::{Created, InsertResponse, MessageResponse, VolunteerReviewResponse};

const ENTITY: &str = "Volunteer application";

/// Review decision
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewRequest {
    /// `approved` or `rejected`
    #[schema(example = "approved")]
    pub status: Option<String>,
    /// Applicant whose user role follows the decision
    #[schema(example = "helper@x.com")]
    pub email: Option<String>,
}

/// Create volunteer routes
pub fn volunteer_routes() -> Router<AppState> {
    Router::new()
        .route("/volunteers", post(apply))
        .route("/volunteers/pending", get(list_pending))
        .route("/volunteers/approved", get(list_approved))
        .route("/volunteers/:id/status", patch(review))
        .route("/volunteers/:id", delete(delete_application))
}

async fn list(
    state: &AppState,
    status: VolunteerStatus,
) -> AppResult<Json<Vec<VolunteerApplicationResponse>>> {
    let applications = state.volunteer_service.list_by_status(status).await?;
    Ok(Json(
        applications
            .into_iter()
            .map(VolunteerApplicationResponse::from)
            .collect(),
    ))
}

/// Apply to volunteer
#[utoipa::path(
    post,
    path = "/volunteers",
    tag = "Volunteers",
    request_body = NewVolunteerApplication,
    responses(
        (status = 201, description = "Application stored as pending", body = InsertResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "An application for this email already exists")
    )
)]
pub async fn apply(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewVolunteerApplication>,
) -> AppResult<Created<InsertResponse>> {
    let id = state.volunteer_service.apply(payload).await?;
    Ok(Created(InsertResponse::inserted(id)))
}

/// List applications awaiting review
#[utoipa::path(
    get,
    path = "/volunteers/pending",
    tag = "Volunteers",
    responses(
        (status = 200, description = "Pending applications, newest first", body = Vec<VolunteerApplicationResponse>)
    )
)]
pub async fn list_pending(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<VolunteerApplicationResponse>>> {
    list(&state, VolunteerStatus::Pending).await
}

/// List approved volunteers
#[utoipa::path(
    get,
    path = "/volunteers/approved",
    tag = "Volunteers",
    responses(
        (status = 200, description = "Approved applications, newest first", body = Vec<VolunteerApplicationResponse>)
    )
)]
pub async fn list_approved(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<VolunteerApplicationResponse>>> {
    list(&state, VolunteerStatus::Approved).await
}

/// Approve or reject an application
#[utoipa::path(
    patch,
    path = "/volunteers/{id}/status",
    tag = "Volunteers",
    params(
        ("id" = String, Path, description = "Application id")
    ),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Application reviewed", body = VolunteerReviewResponse),
        (status = 400, description = "Status must be approved or rejected"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ReviewRequest>,
) -> AppResult<Json<VolunteerReviewResponse>> {
    let id = parse_object_id(&id, ENTITY)?;
    let outcome = state
        .volunteer_service
        .review(id, payload.status.as_deref(), payload.email.as_deref())
        .await?;

    Ok(Json(VolunteerReviewResponse {
        message: format!("Volunteer application {}", outcome.status),
        user_role_updated: outcome.user_role_updated,
    }))
}

/// Delete an application
#[utoipa::path(
    delete,
    path = "/volunteers/{id}",
    tag = "Volunteers",
    params(
        ("id" = String, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Application deleted", body = MessageResponse),
        (status = 404, description = "Application not found")
    )
)]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_object_id(&id, ENTITY)?;
    state.volunteer_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Volunteer application deleted")))
}
