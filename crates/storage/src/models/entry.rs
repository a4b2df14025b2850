use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A registration, or a team of registrations, competing as one unit
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Entry {
    pub entry_id: Uuid,
    pub competition_id: Uuid,
    pub ticket_type_id: Uuid,
    pub name: String,
    pub created_at: chrono::NaiveDateTime,
}
