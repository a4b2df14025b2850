use uuid::Uuid;

use super::{HeatBoard, LaneChange};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoAssignOutcome {
    pub changes: Vec<LaneChange>,
    pub placed: Vec<Uuid>,
    /// Entries left in the pool because no candidate heat had room
    pub unplaced: Vec<Uuid>,
}

/// Ticket types in processing order: the explicit priority list first,
/// then every other ticket type in board order.
fn processing_order(board: &HeatBoard, ticket_type_order_ids: &[Uuid]) -> Vec<Uuid> {
    let mut order: Vec<Uuid> = Vec::new();

    let known = board.ticket_types().iter().map(|tt| tt.ticket_type_id);
    let pending = board.unassigned().iter().map(|entry| entry.ticket_type_id);

    for id in ticket_type_order_ids.iter().copied().chain(known).chain(pending) {
        if !order.contains(&id) {
            order.push(id);
        }
    }

    order
}

/// Greedy first-fit placement of every unassigned entry.
///
/// Each entry goes to the earliest-starting heat that is linked to its
/// ticket type and still has room; with `one_ticket_per_heat` a heat that
/// already holds another ticket type is skipped. Entries already in a lane
/// are never touched, so running it twice places nothing new.
pub fn auto_assign(
    board: &mut HeatBoard,
    ticket_type_order_ids: &[Uuid],
    one_ticket_per_heat: bool,
) -> AutoAssignOutcome {
    let mut outcome = AutoAssignOutcome::default();

    for ticket_type_id in processing_order(board, ticket_type_order_ids) {
        let pending: Vec<Uuid> = board
            .unassigned()
            .iter()
            .filter(|entry| entry.ticket_type_id == ticket_type_id)
            .map(|entry| entry.entry_id)
            .collect();

        for entry_id in pending {
            let target = board
                .heats()
                .iter()
                .find(|heat| {
                    heat.allows(ticket_type_id)
                        && (!one_ticket_per_heat || heat.holds_only(ticket_type_id))
                        && board.has_room_for(heat, ticket_type_id)
                })
                .map(|heat| heat.heat_id);

            let Some(heat_id) = target else {
                outcome.unplaced.push(entry_id);
                continue;
            };

            match board.assign(entry_id, heat_id) {
                Ok(Some(change)) => {
                    outcome.placed.push(entry_id);
                    outcome.changes.push(change);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!("Entry {} not placed in heat {}: {}", entry_id, heat_id, e);
                    outcome.unplaced.push(entry_id);
                }
            }
        }
    }

    outcome
}
