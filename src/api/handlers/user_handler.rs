//! User handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::NewUser;
use crate::errors::AppResult;
use crate::services::Registration;
use crate::types::{InsertResponse, MessageResponse, RoleResponse};

/// Role lookup query
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RoleQuery {
    /// Email of the user to look up
    pub email: Option<String>,
}

/// Role update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    /// New role (`user`, `volunteer`, `admin`, ...)
    #[schema(example = "admin")]
    pub role: Option<String>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/role", get(get_role))
        .route("/users/:email/role", patch(update_role))
}

/// Register a user (no-op when the email is already known)
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 200, description = "User stored, or already present", body = InsertResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewUser>,
) -> AppResult<Json<InsertResponse>> {
    let response = match state.user_service.register(payload).await? {
        Registration::Created(id) => InsertResponse::inserted(id),
        Registration::AlreadyExists => InsertResponse::skipped("User already exists"),
    };
    Ok(Json(response))
}

/// Get the role of a user by email
#[utoipa::path(
    get,
    path = "/users/role",
    tag = "Users",
    params(RoleQuery),
    responses(
        (status = 200, description = "Stored role, `user` when unknown", body = RoleResponse),
        (status = 400, description = "Email is required")
    )
)]
pub async fn get_role(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
) -> AppResult<Json<RoleResponse>> {
    let email = query.email.unwrap_or_default();
    let role = state.user_service.role_of(&email).await?;
    Ok(Json(RoleResponse { role }))
}

/// Replace the role of a user
#[utoipa::path(
    patch,
    path = "/users/{email}/role",
    tag = "Users",
    params(
        ("email" = String, Path, description = "User email")
    ),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = MessageResponse),
        (status = 400, description = "Role is required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_role(
    State(state): State<AppState>,
    Path(email): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateRoleRequest>,
) -> AppResult<Json<MessageResponse>> {
    let role = payload.role.unwrap_or_default();
    state.user_service.update_role(&email, &role).await?;
    Ok(Json(MessageResponse::new("User role updated")))
}
