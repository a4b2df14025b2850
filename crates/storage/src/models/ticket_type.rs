use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TicketType {
    pub ticket_type_id: Uuid,
    pub competition_id: Uuid,
    pub name: String,
    pub team_size: i32,
    pub max_entries: i32,
    pub created_at: chrono::NaiveDateTime,
}
