use std::cmp::Ordering;

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::SchedulingSettings;
use crate::error::SchedulingError;
use crate::models::HeatOccupancy;

/// A heat that has to be inserted and linked to the ticket type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHeat {
    pub workout_id: Uuid,
    pub start_time: NaiveDateTime,
    pub max_limit_per_heat: i32,
}

/// What it takes to bring a ticket type's heats in line with its max entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeatPoolPlan {
    Unchanged,
    Grow(Vec<NewHeat>),
    /// Heats to unlink and delete, all verified empty
    Shrink(Vec<Uuid>),
}

impl HeatPoolPlan {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// Number of heats needed to seat `max_entries`
pub fn desired_heat_count(
    max_entries: u32,
    settings: &SchedulingSettings,
) -> Result<usize, SchedulingError> {
    let policy = settings.capacity_policy()?;
    Ok(max_entries.div_ceil(policy.max_per_heat()) as usize)
}

/// Plans how the heats linked to one ticket type must change.
///
/// Shrinking drops the latest-starting heats and is all-or-nothing: if any
/// of them holds a lane the whole plan fails and names every blocking heat.
/// Growing continues the start-time sequence and spreads the new heats over
/// the workouts round-robin.
pub fn plan_heat_pool(
    settings: &SchedulingSettings,
    competition_start: NaiveDateTime,
    workout_ids: &[Uuid],
    existing: &[HeatOccupancy],
    max_entries: u32,
) -> Result<HeatPoolPlan, SchedulingError> {
    let policy = settings.capacity_policy()?;
    let desired = desired_heat_count(max_entries, settings)?;

    let mut ordered: Vec<&HeatOccupancy> = existing.iter().collect();
    ordered.sort_by_key(|heat| (heat.start_time, heat.heat_id));

    match desired.cmp(&ordered.len()) {
        Ordering::Equal => Ok(HeatPoolPlan::Unchanged),
        Ordering::Less => {
            let excess = &ordered[desired..];

            let blocking: Vec<Uuid> = excess
                .iter()
                .filter(|heat| heat.lane_count > 0)
                .map(|heat| heat.heat_id)
                .collect();
            if !blocking.is_empty() {
                return Err(SchedulingError::CannotRemoveHeatWithRegistrations {
                    heat_ids: blocking,
                });
            }

            Ok(HeatPoolPlan::Shrink(
                excess.iter().map(|heat| heat.heat_id).collect(),
            ))
        }
        Ordering::Greater => {
            if workout_ids.is_empty() {
                return Err(SchedulingError::NoWorkoutsConfigured);
            }
            let interval = settings.heat_interval()?;
            let max_limit_per_heat = policy.max_per_heat() as i32;

            let heats = (ordered.len()..desired)
                .map(|index| NewHeat {
                    workout_id: workout_ids[index % workout_ids.len()],
                    start_time: competition_start + interval * index as i32,
                    max_limit_per_heat,
                })
                .collect();

            Ok(HeatPoolPlan::Grow(heats))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeatLimitType;
    use chrono::NaiveDate;

    fn settings(limit: i32) -> SchedulingSettings {
        SchedulingSettings {
            heat_limit_type: HeatLimitType::Entries,
            max_limit_per_heat: Some(limit),
            heats_every_x_minutes: 15,
            ticket_type_order_ids: Vec::new(),
            one_ticket_per_heat: false,
        }
    }

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 14)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn occupancy(plan: &HeatPoolPlan, lanes: &[i64]) -> Vec<HeatOccupancy> {
        let HeatPoolPlan::Grow(heats) = plan else {
            panic!("expected a grow plan, got {:?}", plan);
        };
        heats
            .iter()
            .zip(lanes)
            .map(|(heat, &lane_count)| HeatOccupancy {
                heat_id: Uuid::new_v4(),
                start_time: heat.start_time,
                lane_count,
            })
            .collect()
    }

    #[test]
    fn test_desired_count_rounds_up() {
        assert_eq!(desired_heat_count(25, &settings(10)).unwrap(), 3);
        assert_eq!(desired_heat_count(20, &settings(10)).unwrap(), 2);
        assert_eq!(desired_heat_count(0, &settings(10)).unwrap(), 0);
    }

    #[test]
    fn test_grow_creates_three_heats_for_25_entries() {
        let workouts = [Uuid::new_v4()];
        let plan = plan_heat_pool(&settings(10), start(), &workouts, &[], 25).unwrap();

        let HeatPoolPlan::Grow(heats) = plan else {
            panic!("expected grow");
        };
        assert_eq!(heats.len(), 3);
        assert_eq!(heats[0].start_time, start());
        assert_eq!(heats[2].start_time, start() + chrono::Duration::minutes(30));
        assert!(heats.iter().all(|h| h.max_limit_per_heat == 10));
    }

    #[test]
    fn test_grow_round_robins_workouts() {
        let workouts = [Uuid::new_v4(), Uuid::new_v4()];
        let plan = plan_heat_pool(&settings(5), start(), &workouts, &[], 15).unwrap();

        let HeatPoolPlan::Grow(heats) = plan else {
            panic!("expected grow");
        };
        let assigned: Vec<Uuid> = heats.iter().map(|h| h.workout_id).collect();
        assert_eq!(assigned, vec![workouts[0], workouts[1], workouts[0]]);
    }

    #[test]
    fn test_grow_continues_after_existing_heats() {
        let workouts = [Uuid::new_v4(), Uuid::new_v4()];
        let first = plan_heat_pool(&settings(10), start(), &workouts, &[], 10).unwrap();
        let existing = occupancy(&first, &[3]);

        let plan = plan_heat_pool(&settings(10), start(), &workouts, &existing, 30).unwrap();
        let HeatPoolPlan::Grow(heats) = plan else {
            panic!("expected grow");
        };
        assert_eq!(heats.len(), 2);
        assert_eq!(heats[0].workout_id, workouts[1]);
        assert_eq!(heats[0].start_time, start() + chrono::Duration::minutes(15));
    }

    #[test]
    fn test_same_max_entries_is_unchanged() {
        let workouts = [Uuid::new_v4()];
        let first = plan_heat_pool(&settings(10), start(), &workouts, &[], 25).unwrap();
        let existing = occupancy(&first, &[0, 0, 0]);

        let second = plan_heat_pool(&settings(10), start(), &workouts, &existing, 25).unwrap();
        assert!(second.is_unchanged());
    }

    #[test]
    fn test_unchanged_does_not_need_workouts() {
        let plan = plan_heat_pool(&settings(10), start(), &[], &[], 0).unwrap();
        assert!(plan.is_unchanged());
    }

    #[test]
    fn test_shrink_removes_latest_empty_heat() {
        let workouts = [Uuid::new_v4()];
        let first = plan_heat_pool(&settings(10), start(), &workouts, &[], 25).unwrap();
        let existing = occupancy(&first, &[4, 2, 0]);

        let plan = plan_heat_pool(&settings(10), start(), &workouts, &existing, 15).unwrap();
        assert_eq!(plan, HeatPoolPlan::Shrink(vec![existing[2].heat_id]));
    }

    #[test]
    fn test_shrink_blocked_by_occupied_heat() {
        let workouts = [Uuid::new_v4()];
        let first = plan_heat_pool(&settings(10), start(), &workouts, &[], 25).unwrap();
        let existing = occupancy(&first, &[0, 0, 1]);

        let result = plan_heat_pool(&settings(10), start(), &workouts, &existing, 15);
        assert_eq!(
            result,
            Err(SchedulingError::CannotRemoveHeatWithRegistrations {
                heat_ids: vec![existing[2].heat_id],
            })
        );
    }

    #[test]
    fn test_shrink_reports_every_blocking_heat() {
        let workouts = [Uuid::new_v4()];
        let first = plan_heat_pool(&settings(10), start(), &workouts, &[], 40).unwrap();
        let existing = occupancy(&first, &[0, 1, 0, 2]);

        let result = plan_heat_pool(&settings(10), start(), &workouts, &existing, 5);
        assert_eq!(
            result,
            Err(SchedulingError::CannotRemoveHeatWithRegistrations {
                heat_ids: vec![existing[1].heat_id, existing[3].heat_id],
            })
        );
    }

    #[test]
    fn test_shrink_orders_by_start_time_not_input_order() {
        let workouts = [Uuid::new_v4()];
        let first = plan_heat_pool(&settings(10), start(), &workouts, &[], 20).unwrap();
        let mut existing = occupancy(&first, &[0, 0]);
        existing.reverse();

        let plan = plan_heat_pool(&settings(10), start(), &workouts, &existing, 10).unwrap();
        assert_eq!(plan, HeatPoolPlan::Shrink(vec![existing[0].heat_id]));
    }

    #[test]
    fn test_grow_without_workouts_fails() {
        let result = plan_heat_pool(&settings(10), start(), &[], &[], 5);
        assert_eq!(result, Err(SchedulingError::NoWorkoutsConfigured));
    }

    #[test]
    fn test_unset_limit_fails_before_anything_else() {
        let mut s = settings(10);
        s.max_limit_per_heat = None;
        let result = plan_heat_pool(&s, start(), &[], &[], 5);
        assert!(matches!(result, Err(SchedulingError::ConfigurationError(_))));
    }
}
