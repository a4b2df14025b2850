use sqlx::PgPool;
use storage::{
    dto::heat::{AutoAssignResponse, GenerateHeatsRequest, HeatAdjustmentResponse, HeatBoardResponse},
    error::Result,
    services::{auto_assign, board, heat_pool},
};
use uuid::Uuid;

/// Get the heat board of a competition
pub async fn get_heat_board(pool: &PgPool, competition_id: Uuid) -> Result<HeatBoardResponse> {
    board::get_heat_board(pool, competition_id).await
}

/// Resize the heats of a ticket type
pub async fn adjust_heats_for_ticket_type(
    pool: &PgPool,
    competition_id: Uuid,
    ticket_type_id: Uuid,
    max_entries: i32,
) -> Result<HeatAdjustmentResponse> {
    heat_pool::adjust_heats_for_ticket_type(pool, competition_id, ticket_type_id, max_entries)
        .await
}

/// Store settings and auto-assign unassigned entries
pub async fn generate_heats_from_settings(
    pool: &PgPool,
    competition_id: Uuid,
    request: GenerateHeatsRequest,
) -> Result<AutoAssignResponse> {
    auto_assign::generate_heats_from_settings(pool, competition_id, request).await
}

/// Delete an empty heat
pub async fn delete_heat(pool: &PgPool, heat_id: Uuid) -> Result<()> {
    heat_pool::delete_heat(pool, heat_id).await
}
