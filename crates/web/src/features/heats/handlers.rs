use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::heat::{
        AdjustHeatsRequest, AutoAssignResponse, GenerateHeatsRequest, HeatAdjustmentResponse,
        HeatBoardResponse,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/competitions/{competition_id}/heats",
    params(
        ("competition_id" = Uuid, Path, description = "Competition ID")
    ),
    responses(
        (status = 200, description = "Heats with lanes, availability and the unassigned pool", body = HeatBoardResponse),
        (status = 404, description = "Competition not found")
    ),
    tag = "heats"
)]
pub async fn get_heat_board(
    State(db): State<Database>,
    Path(competition_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let board = services::get_heat_board(db.pool(), competition_id).await?;

    Ok(Json(board).into_response())
}

#[utoipa::path(
    put,
    path = "/api/competitions/{competition_id}/ticket-types/{ticket_type_id}/heats",
    params(
        ("competition_id" = Uuid, Path, description = "Competition ID"),
        ("ticket_type_id" = Uuid, Path, description = "Ticket type ID")
    ),
    request_body = AdjustHeatsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Heats adjusted to the new max entries", body = HeatAdjustmentResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition or ticket type not found"),
        (status = 409, description = "Heats to remove still hold registrations"),
        (status = 422, description = "Capacity policy or workouts not configured")
    ),
    tag = "heats"
)]
pub async fn adjust_heats_for_ticket_type(
    State(db): State<Database>,
    Path((competition_id, ticket_type_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<AdjustHeatsRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let adjustment = services::adjust_heats_for_ticket_type(
        db.pool(),
        competition_id,
        ticket_type_id,
        req.max_entries,
    )
    .await?;

    Ok(Json(adjustment).into_response())
}

#[utoipa::path(
    post,
    path = "/api/competitions/{competition_id}/heats/generate",
    params(
        ("competition_id" = Uuid, Path, description = "Competition ID")
    ),
    request_body = GenerateHeatsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Settings stored and unassigned entries placed", body = AutoAssignResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found"),
        (status = 422, description = "Invalid capacity policy")
    ),
    tag = "heats"
)]
pub async fn generate_heats_from_settings(
    State(db): State<Database>,
    Path(competition_id): Path<Uuid>,
    Json(req): Json<GenerateHeatsRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let summary = services::generate_heats_from_settings(db.pool(), competition_id, req).await?;

    Ok(Json(summary).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/heats/{heat_id}",
    params(
        ("heat_id" = Uuid, Path, description = "Heat ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Heat deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Heat not found"),
        (status = 409, description = "Heat still holds registrations")
    ),
    tag = "heats"
)]
pub async fn delete_heat(
    State(db): State<Database>,
    Path(heat_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_heat(db.pool(), heat_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
