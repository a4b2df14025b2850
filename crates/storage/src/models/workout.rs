use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Workout {
    pub workout_id: Uuid,
    pub competition_id: Uuid,
    pub name: String,
    pub position: i32,
    pub created_at: chrono::NaiveDateTime,
}
