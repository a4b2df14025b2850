use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use super::board::load_board;
use crate::dto::heat::{AutoAssignResponse, GenerateHeatsRequest};
use crate::error::{Result, SchedulingError};
use crate::repository::{
    competition::CompetitionRepository, heat::HeatRepository, lane::LaneRepository,
};
use crate::scheduling::auto_assign;

/// Store new scheduling settings and place every unassigned entry.
///
/// Entries that fit nowhere stay unassigned and are reported in the
/// summary rather than failing the call. A limit below the occupancy of
/// any existing heat is rejected before anything is written.
pub async fn generate_heats_from_settings(
    pool: &PgPool,
    competition_id: Uuid,
    request: GenerateHeatsRequest,
) -> Result<AutoAssignResponse> {
    let mut tx = pool.begin().await?;

    let competition = CompetitionRepository::new(&mut *tx)
        .lock(competition_id)
        .await?;
    let settings = request.into_settings(&competition.scheduling_settings());
    let policy = settings.capacity_policy()?;
    settings.heat_interval()?;

    let mut board = load_board(&mut *tx, competition_id, policy).await?;
    let over_capacity = board.over_capacity_heats();
    if !over_capacity.is_empty() {
        warn!(
            "Rejected heat limit {} for competition {}: {} heat(s) already exceed it",
            policy.max_per_heat(),
            competition_id,
            over_capacity.len()
        );
        return Err(SchedulingError::ConfigurationError(format!(
            "max limit per heat {} is below the current occupancy of heats: {}",
            policy.max_per_heat(),
            over_capacity
                .iter()
                .map(Uuid::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ))
        .into());
    }

    CompetitionRepository::new(&mut *tx)
        .update_scheduling_settings(competition_id, &settings)
        .await?;
    HeatRepository::new(&mut *tx)
        .update_limit_for_competition(competition_id, policy.max_per_heat() as i32)
        .await?;

    let outcome = auto_assign(
        &mut board,
        &settings.ticket_type_order_ids,
        settings.one_ticket_per_heat,
    );

    let mut lanes = LaneRepository::new(&mut *tx);
    for change in &outcome.changes {
        lanes.apply(change).await?;
    }

    tx.commit().await?;

    info!(
        "Auto-assign for competition {}: {} placed, {} could not be placed",
        competition_id,
        outcome.placed.len(),
        outcome.unplaced.len()
    );

    Ok(AutoAssignResponse {
        placed: outcome.placed.len(),
        unplaced: outcome.unplaced.len(),
        unplaced_entry_ids: outcome.unplaced,
    })
}
