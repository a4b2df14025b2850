use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request payload for placing an entry in a heat
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AssignEntryRequest {
    pub entry_id: Uuid,
    pub heat_id: Uuid,
}

/// Request payload for moving a lane to another heat
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateLaneHeatRequest {
    pub heat_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LaneResponse {
    pub lane_id: Uuid,
    pub heat_id: Uuid,
    pub entry_id: Uuid,
    pub lane_number: i32,
    pub created_at: chrono::NaiveDateTime,
}

impl From<crate::models::Lane> for LaneResponse {
    fn from(lane: crate::models::Lane) -> Self {
        Self {
            lane_id: lane.lane_id,
            heat_id: lane.heat_id,
            entry_id: lane.entry_id,
            lane_number: lane.lane_number,
            created_at: lane.created_at,
        }
    }
}
