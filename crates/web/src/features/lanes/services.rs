use sqlx::PgPool;
use storage::{error::Result, models::Lane, services::lanes};
use uuid::Uuid;

pub async fn assign_entry_to_heat(pool: &PgPool, entry_id: Uuid, heat_id: Uuid) -> Result<Lane> {
    lanes::assign_entry_to_heat(pool, entry_id, heat_id).await
}

pub async fn unassign_entry(pool: &PgPool, lane_id: Uuid) -> Result<()> {
    lanes::unassign_entry(pool, lane_id).await
}

pub async fn update_lane_heat(pool: &PgPool, lane_id: Uuid, heat_id: Uuid) -> Result<Lane> {
    lanes::update_lane_heat(pool, lane_id, heat_id).await
}
