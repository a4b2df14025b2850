use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::heat::{EntryView, HeatBoardResponse, HeatView, LaneView};
use crate::error::Result;
use crate::models::{Entry, LaneAssignment, LinkedHeat, TicketType};
use crate::repository::{
    competition::CompetitionRepository, entry::EntryRepository, heat::HeatRepository,
    lane::LaneRepository, ticket_type::TicketTypeRepository,
};
use crate::scheduling::{
    BoardEntry, BoardHeat, BoardLane, BoardTicketType, CapacityPolicy, HeatBoard,
};

/// Raw scheduling rows of one competition
pub struct BoardRows {
    pub ticket_types: Vec<TicketType>,
    pub heats: Vec<LinkedHeat>,
    pub lanes: Vec<LaneAssignment>,
    pub unassigned: Vec<Entry>,
}

impl BoardRows {
    /// Read the current heats, lanes and unassigned entries
    pub async fn load(conn: &mut PgConnection, competition_id: Uuid) -> Result<Self> {
        let ticket_types = TicketTypeRepository::new(&mut *conn)
            .list_for_competition(competition_id)
            .await?;
        let heats = HeatRepository::new(&mut *conn)
            .list_linked_for_competition(competition_id)
            .await?;
        let lanes = LaneRepository::new(&mut *conn)
            .list_assignments_for_competition(competition_id)
            .await?;
        let unassigned = EntryRepository::new(&mut *conn)
            .list_unassigned(competition_id)
            .await?;

        Ok(Self {
            ticket_types,
            heats,
            lanes,
            unassigned,
        })
    }

    pub fn to_board(&self, policy: CapacityPolicy) -> HeatBoard {
        let ticket_types = self
            .ticket_types
            .iter()
            .map(|tt| BoardTicketType {
                ticket_type_id: tt.ticket_type_id,
                team_size: u32::try_from(tt.team_size).unwrap_or(1),
            })
            .collect();

        let mut lanes_by_heat: HashMap<Uuid, Vec<BoardLane>> = HashMap::new();
        for lane in &self.lanes {
            lanes_by_heat.entry(lane.heat_id).or_default().push(BoardLane {
                lane_id: lane.lane_id,
                entry_id: lane.entry_id,
                ticket_type_id: lane.ticket_type_id,
                lane_number: lane.lane_number,
            });
        }

        let heats = self
            .heats
            .iter()
            .map(|heat| BoardHeat {
                heat_id: heat.heat_id,
                start_time: heat.start_time,
                ticket_type_ids: heat.ticket_type_ids.clone(),
                lanes: lanes_by_heat.remove(&heat.heat_id).unwrap_or_default(),
            })
            .collect();

        let unassigned = self
            .unassigned
            .iter()
            .map(|entry| BoardEntry {
                entry_id: entry.entry_id,
                ticket_type_id: entry.ticket_type_id,
            })
            .collect();

        HeatBoard::new(policy, ticket_types, heats, unassigned)
    }
}

/// Load the board of a competition whose row is already locked
pub async fn load_board(
    conn: &mut PgConnection,
    competition_id: Uuid,
    policy: CapacityPolicy,
) -> Result<HeatBoard> {
    let rows = BoardRows::load(conn, competition_id).await?;
    Ok(rows.to_board(policy))
}

/// Read-only view of heats, lanes and availability for the scheduling UI
pub async fn get_heat_board(pool: &PgPool, competition_id: Uuid) -> Result<HeatBoardResponse> {
    let mut conn = pool.acquire().await?;

    let competition = CompetitionRepository::new(&mut *conn)
        .find_by_id(competition_id)
        .await?;
    let rows = BoardRows::load(&mut *conn, competition_id).await?;

    let board = competition
        .scheduling_settings()
        .capacity_policy()
        .ok()
        .map(|policy| rows.to_board(policy));

    let mut lanes_by_heat: HashMap<Uuid, Vec<LaneView>> = HashMap::new();
    for lane in rows.lanes {
        lanes_by_heat
            .entry(lane.heat_id)
            .or_default()
            .push(LaneView::from(lane));
    }

    let heats = rows
        .heats
        .into_iter()
        .map(|heat| {
            let available_lanes = board
                .as_ref()
                .and_then(|board| board.available_lanes(heat.heat_id).ok());
            let mut lanes = lanes_by_heat.remove(&heat.heat_id).unwrap_or_default();
            lanes.sort_by_key(|lane| lane.lane_number);

            HeatView {
                heat_id: heat.heat_id,
                workout_id: heat.workout_id,
                start_time: heat.start_time,
                max_limit_per_heat: heat.max_limit_per_heat,
                ticket_type_ids: heat.ticket_type_ids,
                available_lanes,
                lanes,
            }
        })
        .collect();

    Ok(HeatBoardResponse {
        competition_id,
        heat_limit_type: competition.heat_limit_type,
        max_limit_per_heat: competition.max_limit_per_heat,
        heats,
        unassigned: rows.unassigned.into_iter().map(EntryView::from).collect(),
    })
}
