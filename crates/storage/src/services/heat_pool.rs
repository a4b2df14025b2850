use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::heat::HeatAdjustmentResponse;
use crate::error::{Result, SchedulingError};
use crate::repository::{
    competition::CompetitionRepository, heat::HeatRepository,
    ticket_type::TicketTypeRepository, workout::WorkoutRepository,
};
use crate::scheduling::{HeatPoolPlan, plan_heat_pool};

/// Grow or shrink the heats of a ticket type to seat `max_entries`.
///
/// Runs under the competition lock; lane counts are re-read inside the
/// transaction, and nothing is written unless the whole plan succeeds.
pub async fn adjust_heats_for_ticket_type(
    pool: &PgPool,
    competition_id: Uuid,
    ticket_type_id: Uuid,
    max_entries: i32,
) -> Result<HeatAdjustmentResponse> {
    let requested = u32::try_from(max_entries).map_err(|_| {
        SchedulingError::ConfigurationError("max entries must not be negative".to_string())
    })?;

    let mut tx = pool.begin().await?;

    let competition = CompetitionRepository::new(&mut *tx)
        .lock(competition_id)
        .await?;
    let ticket_type = TicketTypeRepository::new(&mut *tx)
        .find_in_competition(competition_id, ticket_type_id)
        .await?;
    let workout_ids: Vec<Uuid> = WorkoutRepository::new(&mut *tx)
        .list_for_competition(competition_id)
        .await?
        .into_iter()
        .map(|workout| workout.workout_id)
        .collect();
    let existing = HeatRepository::new(&mut *tx)
        .occupancy_for_ticket_type(ticket_type_id)
        .await?;

    let plan = plan_heat_pool(
        &competition.scheduling_settings(),
        competition.start_date_time,
        &workout_ids,
        &existing,
        requested,
    )
    .inspect_err(|e| {
        if let SchedulingError::CannotRemoveHeatWithRegistrations { heat_ids } = e {
            warn!(
                "Shrinking ticket type {} blocked by {} occupied heat(s)",
                ticket_type_id,
                heat_ids.len()
            );
        }
    })?;

    let mut created_heat_ids = Vec::new();
    let mut removed_heat_ids = Vec::new();
    {
        let mut heats = HeatRepository::new(&mut *tx);
        match &plan {
            HeatPoolPlan::Unchanged => {}
            HeatPoolPlan::Grow(new_heats) => {
                for new_heat in new_heats {
                    let heat = heats.create_linked(new_heat, ticket_type_id).await?;
                    created_heat_ids.push(heat.heat_id);
                }
            }
            HeatPoolPlan::Shrink(heat_ids) => {
                for heat_id in heat_ids {
                    heats.delete_with_links(*heat_id).await?;
                    removed_heat_ids.push(*heat_id);
                }
            }
        }
    }

    if ticket_type.max_entries != max_entries {
        TicketTypeRepository::new(&mut *tx)
            .update_max_entries(ticket_type_id, max_entries)
            .await?;
    }

    tx.commit().await?;

    let heat_count = existing.len() + created_heat_ids.len() - removed_heat_ids.len();
    info!(
        "Ticket type {} now has {} heat(s) ({} created, {} removed)",
        ticket_type_id,
        heat_count,
        created_heat_ids.len(),
        removed_heat_ids.len()
    );

    Ok(HeatAdjustmentResponse {
        ticket_type_id,
        max_entries,
        heat_count,
        created_heat_ids,
        removed_heat_ids,
    })
}

/// Delete a single heat, refusing while it still holds lanes
pub async fn delete_heat(pool: &PgPool, heat_id: Uuid) -> Result<()> {
    let mut tx = pool.begin().await?;

    let competition_id = HeatRepository::new(&mut *tx)
        .competition_id_of(heat_id)
        .await?
        .ok_or(SchedulingError::HeatNotFound(heat_id))?;
    CompetitionRepository::new(&mut *tx)
        .lock(competition_id)
        .await?;

    let mut heats = HeatRepository::new(&mut *tx);
    if heats.count_lanes(heat_id).await? > 0 {
        return Err(SchedulingError::CannotRemoveHeatWithRegistrations {
            heat_ids: vec![heat_id],
        }
        .into());
    }
    if heats.delete_with_links(heat_id).await? == 0 {
        return Err(SchedulingError::HeatNotFound(heat_id).into());
    }

    tx.commit().await?;
    info!("Deleted heat {}", heat_id);

    Ok(())
}
