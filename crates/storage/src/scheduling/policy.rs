use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::SchedulingError;
use crate::models::HeatLimitType;

/// Competition-wide scheduling configuration.
///
/// Passed by value into every scheduling call instead of being looked up
/// from the competition row mid-operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SchedulingSettings {
    pub heat_limit_type: HeatLimitType,
    pub max_limit_per_heat: Option<i32>,
    pub heats_every_x_minutes: i32,
    /// Ticket types processed first by auto-assign, in this order
    pub ticket_type_order_ids: Vec<Uuid>,
    pub one_ticket_per_heat: bool,
}

impl SchedulingSettings {
    pub fn capacity_policy(&self) -> Result<CapacityPolicy, SchedulingError> {
        CapacityPolicy::new(self.heat_limit_type, self.max_limit_per_heat)
    }

    /// Gap between the start times of consecutive heats
    pub fn heat_interval(&self) -> Result<chrono::Duration, SchedulingError> {
        if self.heats_every_x_minutes < 0 {
            return Err(SchedulingError::ConfigurationError(
                "heats every x minutes must not be negative".to_string(),
            ));
        }
        Ok(chrono::Duration::minutes(i64::from(self.heats_every_x_minutes)))
    }
}

/// Resolved capacity rule for a single heat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityPolicy {
    limit_type: HeatLimitType,
    max_per_heat: u32,
}

impl CapacityPolicy {
    pub fn new(
        limit_type: HeatLimitType,
        max_limit_per_heat: Option<i32>,
    ) -> Result<Self, SchedulingError> {
        match max_limit_per_heat {
            Some(limit) if limit > 0 => Ok(Self {
                limit_type,
                max_per_heat: limit as u32,
            }),
            Some(_) => Err(SchedulingError::ConfigurationError(
                "max limit per heat must be greater than zero".to_string(),
            )),
            None => Err(SchedulingError::ConfigurationError(
                "max limit per heat is not set for this competition".to_string(),
            )),
        }
    }

    pub fn max_per_heat(&self) -> u32 {
        self.max_per_heat
    }

    /// Capacity consumed by one entry of the given team size
    pub fn weight(&self, team_size: u32) -> u32 {
        match self.limit_type {
            HeatLimitType::Entries => 1,
            HeatLimitType::Athletes => team_size.max(1),
        }
    }

    /// Capacity consumed by the entries already holding lanes
    pub fn used(&self, occupied_team_sizes: impl IntoIterator<Item = u32>) -> u32 {
        occupied_team_sizes
            .into_iter()
            .fold(0u32, |acc, size| acc.saturating_add(self.weight(size)))
    }

    pub fn remaining(&self, used: u32) -> u32 {
        self.max_per_heat.saturating_sub(used)
    }

    /// Upper bound on how many more lanes the heat can take.
    ///
    /// Under the athletes rule this assumes the smallest team size, so a
    /// non-zero answer does not guarantee a bigger team fits; use
    /// [`CapacityPolicy::admits`] before placing a concrete entry.
    pub fn available_lanes(&self, used: u32, min_team_size: u32) -> u32 {
        let remaining = self.remaining(used);
        match self.limit_type {
            HeatLimitType::Entries => remaining,
            HeatLimitType::Athletes => remaining / min_team_size.max(1),
        }
    }

    pub fn admits(&self, used: u32, team_size: u32) -> bool {
        self.weight(team_size) <= self.remaining(used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(limit_type: HeatLimitType, limit: Option<i32>) -> SchedulingSettings {
        SchedulingSettings {
            heat_limit_type: limit_type,
            max_limit_per_heat: limit,
            heats_every_x_minutes: 10,
            ticket_type_order_ids: Vec::new(),
            one_ticket_per_heat: false,
        }
    }

    #[test]
    fn test_missing_limit_is_configuration_error() {
        let result = settings(HeatLimitType::Entries, None).capacity_policy();
        assert!(matches!(result, Err(SchedulingError::ConfigurationError(_))));
    }

    #[test]
    fn test_zero_limit_is_configuration_error() {
        let result = settings(HeatLimitType::Athletes, Some(0)).capacity_policy();
        assert!(matches!(result, Err(SchedulingError::ConfigurationError(_))));
    }

    #[test]
    fn test_negative_interval_is_configuration_error() {
        let mut s = settings(HeatLimitType::Entries, Some(10));
        s.heats_every_x_minutes = -5;
        assert!(s.heat_interval().is_err());
    }

    #[test]
    fn test_entries_counts_lanes() {
        let policy = CapacityPolicy::new(HeatLimitType::Entries, Some(10)).unwrap();
        let used = policy.used([1, 4, 2]);
        assert_eq!(used, 3);
        assert_eq!(policy.available_lanes(used, 1), 7);
        assert!(policy.admits(used, 4));
    }

    #[test]
    fn test_entries_floor_at_zero() {
        let policy = CapacityPolicy::new(HeatLimitType::Entries, Some(2)).unwrap();
        let used = policy.used([1, 1, 1]);
        assert_eq!(policy.available_lanes(used, 1), 0);
        assert!(!policy.admits(used, 1));
    }

    #[test]
    fn test_athletes_uses_smallest_team_size() {
        let policy = CapacityPolicy::new(HeatLimitType::Athletes, Some(20)).unwrap();
        let used = policy.used([4]);
        assert_eq!(used, 4);
        assert_eq!(policy.remaining(used), 16);
        assert_eq!(policy.available_lanes(used, 3), 5);
    }

    #[test]
    fn test_athletes_rejects_team_bigger_than_remaining() {
        let policy = CapacityPolicy::new(HeatLimitType::Athletes, Some(20)).unwrap();
        let used = policy.used([4]);
        assert!(policy.available_lanes(used, 1) >= 1);
        assert!(policy.admits(used, 8));
        assert!(!policy.admits(used, 20));
    }
}
