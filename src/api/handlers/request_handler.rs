//! Aid request handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{delete, get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::require_email;
use crate::api::AppState;
use crate::domain::{parse_object_id, AidRequest, AidRequestResponse, NewAidRequest, RequestStatus};
use crate::errors::{AppError, AppResult};
use crate::services::IdentityClaims;
use crate::types::{Created, InsertResponse, MessageResponse};

const ENTITY: &str = "Request";

/// Owner lookup query
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Submitter email; must match the authenticated identity
    pub email: Option<String>,
}

/// Status change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRequestStatus {
    /// One of `approved`, `rejected`, `matched`, `completed`
    #[schema(example = "matched")]
    pub status: Option<String>,
}

/// Create public aid request routes
pub fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/requests", get(list_requests).post(create_request))
        .route("/pending-requests", get(list_pending))
        .route("/requests/approved", get(list_approved))
        .route("/requests/:id/status", patch(update_status))
        .route("/requests/:id", delete(delete_request))
}

/// Create routes that need an authenticated identity
pub fn owner_request_routes() -> Router<AppState> {
    Router::new().route("/requests/email", get(list_by_email))
}

fn respond(requests: Vec<AidRequest>) -> Json<Vec<AidRequestResponse>> {
    Json(requests.into_iter().map(AidRequestResponse::from).collect())
}

/// List every aid request
#[utoipa::path(
    get,
    path = "/requests",
    tag = "Requests",
    responses(
        (status = 200, description = "All requests", body = Vec<AidRequestResponse>)
    )
)]
pub async fn list_requests(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AidRequestResponse>>> {
    Ok(respond(state.request_service.list_all().await?))
}

/// List requests awaiting review
#[utoipa::path(
    get,
    path = "/pending-requests",
    tag = "Requests",
    responses(
        (status = 200, description = "Pending requests, newest first", body = Vec<AidRequestResponse>)
    )
)]
pub async fn list_pending(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AidRequestResponse>>> {
    let requests = state
        .request_service
        .list_by_status(RequestStatus::Pending)
        .await?;
    Ok(respond(requests))
}

/// List approved requests
#[utoipa::path(
    get,
    path = "/requests/approved",
    tag = "Requests",
    responses(
        (status = 200, description = "Approved requests, newest first", body = Vec<AidRequestResponse>)
    )
)]
pub async fn list_approved(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AidRequestResponse>>> {
    let requests = state
        .request_service
        .list_by_status(RequestStatus::Approved)
        .await?;
    Ok(respond(requests))
}

/// List the caller's own requests
#[utoipa::path(
    get,
    path = "/requests/email",
    tag = "Requests",
    security(("bearer_auth" = [])),
    params(EmailQuery),
    responses(
        (status = 200, description = "Requests by this email, newest first", body = Vec<AidRequestResponse>),
        (status = 400, description = "Email is required"),
        (status = 401, description = "Missing bearer token"),
        (status = 403, description = "Token rejected or email mismatch")
    )
)]
pub async fn list_by_email(
    Extension(claims): Extension<IdentityClaims>,
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> AppResult<Json<Vec<AidRequestResponse>>> {
    let email = query
        .email
        .filter(|email| !email.is_empty())
        .ok_or_else(|| AppError::validation("Email is required"))?;
    require_email(&claims, &email)?;

    Ok(respond(state.request_service.list_by_email(&email).await?))
}

/// Submit an aid request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "Requests",
    request_body = NewAidRequest,
    responses(
        (status = 201, description = "Request stored as pending", body = InsertResponse),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Failed to create new request")
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewAidRequest>,
) -> AppResult<Created<InsertResponse>> {
    let id = state.request_service.submit(payload).await?;
    Ok(Created(InsertResponse::inserted(id)))
}

/// Change the status of a request
#[utoipa::path(
    patch,
    path = "/requests/{id}/status",
    tag = "Requests",
    params(
        ("id" = String, Path, description = "Request id")
    ),
    request_body = UpdateRequestStatus,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Status outside the allowed set"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateRequestStatus>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_object_id(&id, ENTITY)?;
    let status = state
        .request_service
        .update_status(id, payload.status.as_deref())
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Request status updated to {}",
        status
    ))))
}

/// Delete a request
#[utoipa::path(
    delete,
    path = "/requests/{id}",
    tag = "Requests",
    params(
        ("id" = String, Path, description = "Request id")
    ),
    responses(
        (status = 200, description = "Request deleted", body = MessageResponse),
        (status = 404, description = "Request not found")
    )
)]
pub async fn delete_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_object_id(&id, ENTITY)?;
    state.request_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Request deleted")))
}
