use std::collections::HashMap;

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::CapacityPolicy;
use crate::error::SchedulingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardTicketType {
    pub ticket_type_id: Uuid,
    pub team_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLane {
    pub lane_id: Uuid,
    pub entry_id: Uuid,
    pub ticket_type_id: Uuid,
    pub lane_number: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardHeat {
    pub heat_id: Uuid,
    pub start_time: NaiveDateTime,
    pub ticket_type_ids: Vec<Uuid>,
    pub lanes: Vec<BoardLane>,
}

impl BoardHeat {
    pub fn allows(&self, ticket_type_id: Uuid) -> bool {
        self.ticket_type_ids.contains(&ticket_type_id)
    }

    /// True when every lane (possibly none) belongs to `ticket_type_id`
    pub fn holds_only(&self, ticket_type_id: Uuid) -> bool {
        self.lanes
            .iter()
            .all(|lane| lane.ticket_type_id == ticket_type_id)
    }

    /// Smallest lane number not taken in this heat
    fn next_lane_number(&self) -> i32 {
        let mut number = 1;
        while self.lanes.iter().any(|lane| lane.lane_number == number) {
            number += 1;
        }
        number
    }
}

/// An entry waiting in the unassigned pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry {
    pub entry_id: Uuid,
    pub ticket_type_id: Uuid,
}

/// A single lane mutation to be written back to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaneChange {
    Created {
        lane_id: Uuid,
        heat_id: Uuid,
        entry_id: Uuid,
        lane_number: i32,
    },
    Moved {
        lane_id: Uuid,
        from_heat_id: Uuid,
        to_heat_id: Uuid,
        lane_number: i32,
    },
    Removed {
        lane_id: Uuid,
        heat_id: Uuid,
        entry_id: Uuid,
    },
}

impl LaneChange {
    pub fn lane_id(&self) -> Uuid {
        match self {
            Self::Created { lane_id, .. }
            | Self::Moved { lane_id, .. }
            | Self::Removed { lane_id, .. } => *lane_id,
        }
    }
}

/// Snapshot of a competition's heats, lanes and unassigned pool.
///
/// Every entry is either in `unassigned` or in exactly one lane; all
/// mutations move entries between the two and never copy or drop one.
/// A failed mutation leaves the board untouched.
#[derive(Debug, Clone)]
pub struct HeatBoard {
    policy: CapacityPolicy,
    ticket_types: Vec<BoardTicketType>,
    heats: Vec<BoardHeat>,
    unassigned: Vec<BoardEntry>,
}

impl HeatBoard {
    /// Heats are kept ordered by start time; entries keep the given order.
    pub fn new(
        policy: CapacityPolicy,
        ticket_types: Vec<BoardTicketType>,
        mut heats: Vec<BoardHeat>,
        unassigned: Vec<BoardEntry>,
    ) -> Self {
        heats.sort_by_key(|heat| (heat.start_time, heat.heat_id));
        Self {
            policy,
            ticket_types,
            heats,
            unassigned,
        }
    }

    pub fn ticket_types(&self) -> &[BoardTicketType] {
        &self.ticket_types
    }

    pub fn heats(&self) -> &[BoardHeat] {
        &self.heats
    }

    pub fn unassigned(&self) -> &[BoardEntry] {
        &self.unassigned
    }

    pub fn heat(&self, heat_id: Uuid) -> Option<&BoardHeat> {
        self.heats.iter().find(|heat| heat.heat_id == heat_id)
    }

    /// Team size of a ticket type, 1 if unknown
    pub fn team_size(&self, ticket_type_id: Uuid) -> u32 {
        self.ticket_types
            .iter()
            .find(|tt| tt.ticket_type_id == ticket_type_id)
            .map(|tt| tt.team_size.max(1))
            .unwrap_or(1)
    }

    pub fn used_capacity(&self, heat: &BoardHeat) -> u32 {
        self.policy.used(
            heat.lanes
                .iter()
                .map(|lane| self.team_size(lane.ticket_type_id)),
        )
    }

    /// Smallest team size across the competition's ticket types, 1 if none
    fn min_team_size(&self) -> u32 {
        self.ticket_types
            .iter()
            .map(|tt| tt.team_size.max(1))
            .min()
            .unwrap_or(1)
    }

    /// Heats whose current lanes use more capacity than the policy allows
    pub fn over_capacity_heats(&self) -> Vec<Uuid> {
        self.heats
            .iter()
            .filter(|heat| self.used_capacity(heat) > self.policy.max_per_heat())
            .map(|heat| heat.heat_id)
            .collect()
    }

    pub fn available_lanes(&self, heat_id: Uuid) -> Result<u32, SchedulingError> {
        let heat = self
            .heat(heat_id)
            .ok_or(SchedulingError::HeatNotFound(heat_id))?;
        Ok(self.available_lanes_in(heat))
    }

    pub fn available_lanes_in(&self, heat: &BoardHeat) -> u32 {
        self.policy
            .available_lanes(self.used_capacity(heat), self.min_team_size())
    }

    /// Whether one more entry of this ticket type fits in the heat
    pub fn has_room_for(&self, heat: &BoardHeat, ticket_type_id: Uuid) -> bool {
        self.available_lanes_in(heat) > 0
            && self
                .policy
                .admits(self.used_capacity(heat), self.team_size(ticket_type_id))
    }

    /// Entry id to heat id for every placed entry
    pub fn placements(&self) -> HashMap<Uuid, Uuid> {
        self.heats
            .iter()
            .flat_map(|heat| heat.lanes.iter().map(|lane| (lane.entry_id, heat.heat_id)))
            .collect()
    }

    pub fn lane(&self, lane_id: Uuid) -> Option<(&BoardHeat, &BoardLane)> {
        self.lane_position(lane_id)
            .map(|(h, l)| (&self.heats[h], &self.heats[h].lanes[l]))
    }

    pub fn lane_of_entry(&self, entry_id: Uuid) -> Option<(&BoardHeat, &BoardLane)> {
        self.heats.iter().find_map(|heat| {
            heat.lanes
                .iter()
                .find(|lane| lane.entry_id == entry_id)
                .map(|lane| (heat, lane))
        })
    }

    fn heat_index(&self, heat_id: Uuid) -> Result<usize, SchedulingError> {
        self.heats
            .iter()
            .position(|heat| heat.heat_id == heat_id)
            .ok_or(SchedulingError::HeatNotFound(heat_id))
    }

    fn lane_position(&self, lane_id: Uuid) -> Option<(usize, usize)> {
        self.heats.iter().enumerate().find_map(|(h, heat)| {
            heat.lanes
                .iter()
                .position(|lane| lane.lane_id == lane_id)
                .map(|l| (h, l))
        })
    }

    fn ensure_room(&self, heat_index: usize, ticket_type_id: Uuid) -> Result<(), SchedulingError> {
        let heat = &self.heats[heat_index];
        if !heat.allows(ticket_type_id) {
            return Err(SchedulingError::TicketTypeNotAllowed {
                heat_id: heat.heat_id,
                ticket_type_id,
            });
        }
        if !self.has_room_for(heat, ticket_type_id) {
            return Err(SchedulingError::HeatFull {
                heat_id: heat.heat_id,
            });
        }
        Ok(())
    }

    /// Places an entry in `heat_id`.
    ///
    /// An entry that already holds a lane elsewhere is moved; one already in
    /// the target heat is left alone and `None` is returned.
    pub fn assign(
        &mut self,
        entry_id: Uuid,
        heat_id: Uuid,
    ) -> Result<Option<LaneChange>, SchedulingError> {
        let target = self.heat_index(heat_id)?;

        if let Some((current, lane)) = self.lane_of_entry(entry_id) {
            if current.heat_id == heat_id {
                return Ok(None);
            }
            let lane_id = lane.lane_id;
            return self.move_lane(lane_id, heat_id);
        }

        let position = self
            .unassigned
            .iter()
            .position(|entry| entry.entry_id == entry_id)
            .ok_or(SchedulingError::EntryNotFound(entry_id))?;
        let ticket_type_id = self.unassigned[position].ticket_type_id;

        self.ensure_room(target, ticket_type_id)?;

        self.unassigned.remove(position);
        let heat = &mut self.heats[target];
        let lane = BoardLane {
            lane_id: Uuid::new_v4(),
            entry_id,
            ticket_type_id,
            lane_number: heat.next_lane_number(),
        };
        let change = LaneChange::Created {
            lane_id: lane.lane_id,
            heat_id,
            entry_id,
            lane_number: lane.lane_number,
        };
        heat.lanes.push(lane);

        Ok(Some(change))
    }

    /// Frees a lane and returns its entry to the unassigned pool
    pub fn unassign(&mut self, lane_id: Uuid) -> Result<LaneChange, SchedulingError> {
        let (h, l) = self
            .lane_position(lane_id)
            .ok_or(SchedulingError::LaneNotFound(lane_id))?;

        let heat = &mut self.heats[h];
        let lane = heat.lanes.remove(l);
        let change = LaneChange::Removed {
            lane_id,
            heat_id: heat.heat_id,
            entry_id: lane.entry_id,
        };
        self.unassigned.push(BoardEntry {
            entry_id: lane.entry_id,
            ticket_type_id: lane.ticket_type_id,
        });

        Ok(change)
    }

    /// Moves a lane to another heat, or fails leaving it where it was.
    pub fn move_lane(
        &mut self,
        lane_id: Uuid,
        target_heat_id: Uuid,
    ) -> Result<Option<LaneChange>, SchedulingError> {
        let (source, l) = self
            .lane_position(lane_id)
            .ok_or(SchedulingError::LaneNotFound(lane_id))?;
        let target = self.heat_index(target_heat_id)?;
        if source == target {
            return Ok(None);
        }

        let ticket_type_id = self.heats[source].lanes[l].ticket_type_id;
        self.ensure_room(target, ticket_type_id)?;

        let mut lane = self.heats[source].lanes.remove(l);
        let from_heat_id = self.heats[source].heat_id;
        lane.lane_number = self.heats[target].next_lane_number();
        let change = LaneChange::Moved {
            lane_id,
            from_heat_id,
            to_heat_id: target_heat_id,
            lane_number: lane.lane_number,
        };
        self.heats[target].lanes.push(lane);

        Ok(Some(change))
    }
}
