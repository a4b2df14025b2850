use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lane {
    pub lane_id: Uuid,
    pub heat_id: Uuid,
    pub entry_id: Uuid,
    pub lane_number: i32,
    pub created_at: chrono::NaiveDateTime,
}

/// A lane joined with its entry's ticket type
#[derive(Debug, Clone, FromRow)]
pub struct LaneAssignment {
    pub lane_id: Uuid,
    pub heat_id: Uuid,
    pub entry_id: Uuid,
    pub entry_name: String,
    pub ticket_type_id: Uuid,
    pub lane_number: i32,
}
