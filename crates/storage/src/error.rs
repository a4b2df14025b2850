use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error(transparent)]
    Scheduling(#[from] SchedulingError),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Expected, user-actionable outcomes of heat and lane scheduling.
///
/// These are surfaced to the caller verbatim and never indicate a broken
/// database; anything unexpected travels as [`StorageError::Database`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("No workouts configured for this competition")]
    NoWorkoutsConfigured,

    #[error("Cannot remove heats with registrations: {}", format_ids(.heat_ids))]
    CannotRemoveHeatWithRegistrations { heat_ids: Vec<Uuid> },

    #[error("Heat {heat_id} is full")]
    HeatFull { heat_id: Uuid },

    #[error("Ticket type {ticket_type_id} is not allowed in heat {heat_id}")]
    TicketTypeNotAllowed { heat_id: Uuid, ticket_type_id: Uuid },

    #[error("Heat {0} not found")]
    HeatNotFound(Uuid),

    #[error("Entry {0} not found")]
    EntryNotFound(Uuid),

    #[error("Lane {0} not found")]
    LaneNotFound(Uuid),

    #[error("Ticket type {0} not found")]
    TicketTypeNotFound(Uuid),
}

impl SchedulingError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::HeatNotFound(_)
                | Self::EntryNotFound(_)
                | Self::LaneNotFound(_)
                | Self::TicketTypeNotFound(_)
        )
    }
}

fn format_ids(ids: &[Uuid]) -> String {
    ids.iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Converts lane-table constraint failures into [`StorageError::ConstraintViolation`].
pub(crate) fn map_lane_constraint(error: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(ref db_err) = error {
        match db_err.code().as_deref() {
            Some("23505") => {
                return StorageError::ConstraintViolation(
                    "Entry already holds a lane or lane number is taken".to_string(),
                );
            }
            Some("23503") => {
                return StorageError::ConstraintViolation(
                    "Heat still has lanes or referenced row is missing".to_string(),
                );
            }
            _ => {}
        }
    }
    StorageError::from(error)
}
