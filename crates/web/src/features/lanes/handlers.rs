use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::lane::{AssignEntryRequest, LaneResponse, UpdateLaneHeatRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/lanes",
    request_body = AssignEntryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Entry placed in the heat", body = LaneResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Entry or heat not found"),
        (status = 409, description = "Heat is full"),
        (status = 422, description = "Ticket type not allowed in heat")
    ),
    tag = "lanes"
)]
pub async fn assign_entry_to_heat(
    State(db): State<Database>,
    Json(req): Json<AssignEntryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let lane = services::assign_entry_to_heat(db.pool(), req.entry_id, req.heat_id).await?;

    Ok((StatusCode::CREATED, Json(LaneResponse::from(lane))).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/lanes/{lane_id}",
    params(
        ("lane_id" = Uuid, Path, description = "Lane ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Entry returned to the unassigned pool"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lane not found")
    ),
    tag = "lanes"
)]
pub async fn unassign_entry(
    State(db): State<Database>,
    Path(lane_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::unassign_entry(db.pool(), lane_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    put,
    path = "/api/lanes/{lane_id}/heat",
    params(
        ("lane_id" = Uuid, Path, description = "Lane ID")
    ),
    request_body = UpdateLaneHeatRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Lane moved", body = LaneResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lane or heat not found"),
        (status = 409, description = "Target heat is full"),
        (status = 422, description = "Ticket type not allowed in heat")
    ),
    tag = "lanes"
)]
pub async fn update_lane_heat(
    State(db): State<Database>,
    Path(lane_id): Path<Uuid>,
    Json(req): Json<UpdateLaneHeatRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let lane = services::update_lane_heat(db.pool(), lane_id, req.heat_id).await?;

    Ok(Json(LaneResponse::from(lane)).into_response())
}
