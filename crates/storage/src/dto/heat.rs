use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::HeatLimitType;
use crate::scheduling::SchedulingSettings;

/// Request payload for resizing a ticket type's heats
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AdjustHeatsRequest {
    #[validate(range(
        min = 0,
        max = 100000,
        message = "Max entries must be between 0 and 100000"
    ))]
    pub max_entries: i32,
}

/// Heats created and removed by an adjustment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeatAdjustmentResponse {
    pub ticket_type_id: Uuid,
    pub max_entries: i32,
    pub heat_count: usize,
    pub created_heat_ids: Vec<Uuid>,
    pub removed_heat_ids: Vec<Uuid>,
}

/// Request payload for storing scheduling settings and auto-assigning entries
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenerateHeatsRequest {
    pub heat_limit_type: HeatLimitType,

    #[validate(range(min = 1, message = "Max limit per heat must be at least 1"))]
    pub max_limit_per_heat: i32,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub ticket_type_order_ids: Vec<Uuid>,

    #[serde(default)]
    pub one_ticket_per_heat: bool,

    /// Keeps the competition's current interval when omitted
    #[validate(range(
        min = 0,
        max = 1440,
        message = "Heat interval must be between 0 and 1440 minutes"
    ))]
    pub heats_every_x_minutes: Option<i32>,
}

impl GenerateHeatsRequest {
    pub fn into_settings(self, current: &SchedulingSettings) -> SchedulingSettings {
        SchedulingSettings {
            heat_limit_type: self.heat_limit_type,
            max_limit_per_heat: Some(self.max_limit_per_heat),
            heats_every_x_minutes: self
                .heats_every_x_minutes
                .unwrap_or(current.heats_every_x_minutes),
            ticket_type_order_ids: self.ticket_type_order_ids,
            one_ticket_per_heat: self.one_ticket_per_heat,
        }
    }
}

/// Result of an auto-assign run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AutoAssignResponse {
    pub placed: usize,
    pub unplaced: usize,
    pub unplaced_entry_ids: Vec<Uuid>,
}

/// Heats, lanes and the unassigned pool of one competition
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeatBoardResponse {
    pub competition_id: Uuid,
    pub heat_limit_type: HeatLimitType,
    pub max_limit_per_heat: Option<i32>,
    pub heats: Vec<HeatView>,
    pub unassigned: Vec<EntryView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeatView {
    pub heat_id: Uuid,
    pub workout_id: Uuid,
    pub start_time: NaiveDateTime,
    pub max_limit_per_heat: i32,
    pub ticket_type_ids: Vec<Uuid>,
    /// `None` while the competition has no usable capacity policy
    pub available_lanes: Option<u32>,
    pub lanes: Vec<LaneView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LaneView {
    pub lane_id: Uuid,
    pub lane_number: i32,
    pub entry_id: Uuid,
    pub entry_name: String,
    pub ticket_type_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryView {
    pub entry_id: Uuid,
    pub name: String,
    pub ticket_type_id: Uuid,
}

impl From<crate::models::Entry> for EntryView {
    fn from(entry: crate::models::Entry) -> Self {
        Self {
            entry_id: entry.entry_id,
            name: entry.name,
            ticket_type_id: entry.ticket_type_id,
        }
    }
}

impl From<crate::models::LaneAssignment> for LaneView {
    fn from(lane: crate::models::LaneAssignment) -> Self {
        Self {
            lane_id: lane.lane_id,
            lane_number: lane.lane_number,
            entry_id: lane.entry_id,
            entry_name: lane.entry_name,
            ticket_type_id: lane.ticket_type_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> SchedulingSettings {
        SchedulingSettings {
            heat_limit_type: HeatLimitType::Entries,
            max_limit_per_heat: Some(8),
            heats_every_x_minutes: 12,
            ticket_type_order_ids: Vec::new(),
            one_ticket_per_heat: false,
        }
    }

    #[test]
    fn test_generate_request_keeps_interval_when_omitted() {
        let request: GenerateHeatsRequest = serde_json::from_str(
            r#"{"heat_limit_type":"ATHLETES","max_limit_per_heat":20}"#,
        )
        .unwrap();

        let settings = request.into_settings(&current());
        assert_eq!(settings.heat_limit_type, HeatLimitType::Athletes);
        assert_eq!(settings.max_limit_per_heat, Some(20));
        assert_eq!(settings.heats_every_x_minutes, 12);
        assert!(!settings.one_ticket_per_heat);
    }

    #[test]
    fn test_generate_request_rejects_zero_limit() {
        let request = GenerateHeatsRequest {
            heat_limit_type: HeatLimitType::Entries,
            max_limit_per_heat: 0,
            ticket_type_order_ids: Vec::new(),
            one_ticket_per_heat: false,
            heats_every_x_minutes: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_adjust_request_rejects_negative_entries() {
        assert!(AdjustHeatsRequest { max_entries: -1 }.validate().is_err());
        assert!(AdjustHeatsRequest { max_entries: 25 }.validate().is_ok());
    }
}
