use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Competition;
use crate::scheduling::SchedulingSettings;

const COMPETITION_COLUMNS: &str = r#"
    competition_id, name, slug, start_date_time, heat_limit_type, max_limit_per_heat,
    heats_every_x_minutes, ticket_type_order_ids, one_ticket_per_heat, created_at
"#;

/// Repository for Competition database operations
pub struct CompetitionRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> CompetitionRepository<'c> {
    /// Create a new CompetitionRepository
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Get a competition by ID
    pub async fn find_by_id(&mut self, id: Uuid) -> Result<Competition> {
        let query = format!(
            "SELECT {} FROM competitions WHERE competition_id = $1",
            COMPETITION_COLUMNS
        );

        sqlx::query_as::<_, Competition>(&query)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Get a competition and hold its row lock until the transaction ends.
    ///
    /// Every heat and lane mutation of the competition takes this lock first.
    pub async fn lock(&mut self, id: Uuid) -> Result<Competition> {
        let query = format!(
            "SELECT {} FROM competitions WHERE competition_id = $1 FOR UPDATE",
            COMPETITION_COLUMNS
        );

        sqlx::query_as::<_, Competition>(&query)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Store the scheduling settings of a competition
    pub async fn update_scheduling_settings(
        &mut self,
        id: Uuid,
        settings: &SchedulingSettings,
    ) -> Result<Competition> {
        let query = format!(
            r#"
            UPDATE competitions
            SET
                heat_limit_type = $2,
                max_limit_per_heat = $3,
                heats_every_x_minutes = $4,
                ticket_type_order_ids = $5,
                one_ticket_per_heat = $6
            WHERE competition_id = $1
            RETURNING {}
            "#,
            COMPETITION_COLUMNS
        );

        sqlx::query_as::<_, Competition>(&query)
            .bind(id)
            .bind(settings.heat_limit_type)
            .bind(settings.max_limit_per_heat)
            .bind(settings.heats_every_x_minutes)
            .bind(&settings.ticket_type_order_ids)
            .bind(settings.one_ticket_per_heat)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or(StorageError::NotFound)
    }
}
