//! Campaign handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{parse_object_id, CampaignResponse, CampaignStatus, NewCampaign};
use crate::errors::AppResult;
use crate::types::{Created, InsertResponse, MessageResponse};

/// Campaign listing filter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CampaignQuery {
    /// `approved` or `rejected`; omitted lists everything
    pub status: Option<String>,
}

/// Moderation decision
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ModerateRequest {
    /// `approved` or `rejected`
    #[schema(example = "approved")]
    pub status: Option<String>,
}

/// Create campaign routes
pub fn campaign_routes() -> Router<AppState> {
    Router::new()
        .route("/campaigns", get(list_campaigns).post(create_campaign))
        .route("/campaigns/:id/status", patch(update_status))
}

/// Create a campaign
#[utoipa::path(
    post,
    path = "/campaigns",
    tag = "Campaigns",
    request_body = NewCampaign,
    responses(
        (status = 201, description = "Campaign stored without a moderation status", body = InsertResponse),
        (status = 500, description = "Campaign could not be stored")
    )
)]
pub async fn create_campaign(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewCampaign>,
) -> AppResult<Created<InsertResponse>> {
    let id = state.campaign_service.create(payload).await?;
    Ok(Created(InsertResponse::inserted(id)))
}

/// List campaigns, optionally by status
#[utoipa::path(
    get,
    path = "/campaigns",
    tag = "Campaigns",
    params(CampaignQuery),
    responses(
        (status = 200, description = "Campaigns, newest first", body = Vec<CampaignResponse>),
        (status = 400, description = "Unknown status")
    )
)]
pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(query): Query<CampaignQuery>,
) -> AppResult<Json<Vec<CampaignResponse>>> {
    let status = query
        .status
        .filter(|status| !status.is_empty())
        .map(|status| status.parse::<CampaignStatus>())
        .transpose()?;

    let campaigns = state.campaign_service.list(status).await?;
    Ok(Json(campaigns.into_iter().map(CampaignResponse::from).collect()))
}

/// Approve or reject a campaign
#[utoipa::path(
    patch,
    path = "/campaigns/{id}/status",
    tag = "Campaigns",
    params(
        ("id" = String, Path, description = "Campaign id")
    ),
    request_body = ModerateRequest,
    responses(
        (status = 200, description = "Campaign moderated", body = MessageResponse),
        (status = 400, description = "Invalid status value"),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ModerateRequest>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_object_id(&id, "Campaign")?;
    let status = state
        .campaign_service
        .update_status(id, payload.status.as_deref())
        .await?;
    Ok(Json(MessageResponse::new(format!("Campaign {}", status))))
}
