use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::board::load_board;
use crate::error::{Result, SchedulingError, StorageError};
use crate::models::Lane;
use crate::repository::{
    competition::CompetitionRepository, entry::EntryRepository, lane::LaneRepository,
};

/// Place an entry in a heat, moving it if it already holds a lane
pub async fn assign_entry_to_heat(pool: &PgPool, entry_id: Uuid, heat_id: Uuid) -> Result<Lane> {
    let mut tx = pool.begin().await?;

    let entry = EntryRepository::new(&mut *tx)
        .find_by_id(entry_id)
        .await?
        .ok_or(SchedulingError::EntryNotFound(entry_id))?;
    let competition = CompetitionRepository::new(&mut *tx)
        .lock(entry.competition_id)
        .await?;
    let policy = competition.scheduling_settings().capacity_policy()?;

    let mut board = load_board(&mut *tx, competition.competition_id, policy).await?;
    let mut lanes = LaneRepository::new(&mut *tx);

    if let Some(change) = board.assign(entry_id, heat_id)? {
        debug!("Applying lane change {:?}", change);
        lanes.apply(&change).await?;
    }
    let lane = lanes
        .find_by_entry(entry_id)
        .await?
        .ok_or(StorageError::NotFound)?;

    tx.commit().await?;

    Ok(lane)
}

/// Free a lane; its entry returns to the unassigned pool
pub async fn unassign_entry(pool: &PgPool, lane_id: Uuid) -> Result<()> {
    let mut tx = pool.begin().await?;

    let competition_id = LaneRepository::new(&mut *tx)
        .competition_id_of(lane_id)
        .await?
        .ok_or(SchedulingError::LaneNotFound(lane_id))?;
    CompetitionRepository::new(&mut *tx)
        .lock(competition_id)
        .await?;

    if LaneRepository::new(&mut *tx).delete(lane_id).await? == 0 {
        return Err(SchedulingError::LaneNotFound(lane_id).into());
    }

    tx.commit().await?;
    debug!("Unassigned lane {}", lane_id);

    Ok(())
}

/// Move a lane to another heat as one atomic step
pub async fn update_lane_heat(pool: &PgPool, lane_id: Uuid, heat_id: Uuid) -> Result<Lane> {
    let mut tx = pool.begin().await?;

    let competition_id = LaneRepository::new(&mut *tx)
        .competition_id_of(lane_id)
        .await?
        .ok_or(SchedulingError::LaneNotFound(lane_id))?;
    let competition = CompetitionRepository::new(&mut *tx)
        .lock(competition_id)
        .await?;
    let policy = competition.scheduling_settings().capacity_policy()?;

    let mut board = load_board(&mut *tx, competition_id, policy).await?;
    let mut lanes = LaneRepository::new(&mut *tx);

    if let Some(change) = board.move_lane(lane_id, heat_id)? {
        debug!("Applying lane change {:?}", change);
        lanes.apply(&change).await?;
    }
    let lane = lanes
        .find_by_id(lane_id)
        .await?
        .ok_or(SchedulingError::LaneNotFound(lane_id))?;

    tx.commit().await?;

    Ok(lane)
}
