use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Heat {
    pub heat_id: Uuid,
    pub workout_id: Uuid,
    pub start_time: chrono::NaiveDateTime,
    pub max_limit_per_heat: i32,
    pub created_at: chrono::NaiveDateTime,
}

/// A heat together with the ticket types allowed to race in it
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LinkedHeat {
    pub heat_id: Uuid,
    pub workout_id: Uuid,
    pub start_time: chrono::NaiveDateTime,
    pub max_limit_per_heat: i32,
    pub ticket_type_ids: Vec<Uuid>,
}

/// Lane count of a heat linked to one ticket type
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct HeatOccupancy {
    pub heat_id: Uuid,
    pub start_time: chrono::NaiveDateTime,
    pub lane_count: i64,
}
