use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::scheduling::SchedulingSettings;

/// How heat capacity is measured for a competition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "heat_limit_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeatLimitType {
    /// Each registration or team takes one slot
    #[default]
    Entries,
    /// Each entry takes as many slots as its team size
    Athletes,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub competition_id: Uuid,
    pub name: String,
    pub slug: String,
    pub start_date_time: chrono::NaiveDateTime,
    pub heat_limit_type: HeatLimitType,
    pub max_limit_per_heat: Option<i32>,
    pub heats_every_x_minutes: i32,
    pub ticket_type_order_ids: Vec<Uuid>,
    pub one_ticket_per_heat: bool,
    pub created_at: chrono::NaiveDateTime,
}

impl Competition {
    pub fn scheduling_settings(&self) -> SchedulingSettings {
        SchedulingSettings {
            heat_limit_type: self.heat_limit_type,
            max_limit_per_heat: self.max_limit_per_heat,
            heats_every_x_minutes: self.heats_every_x_minutes,
            ticket_type_order_ids: self.ticket_type_order_ids.clone(),
            one_ticket_per_heat: self.one_ticket_per_heat,
        }
    }
}
