use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::{Result, SchedulingError};
use crate::models::TicketType;

pub struct TicketTypeRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> TicketTypeRepository<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Get a ticket type, making sure it belongs to the competition
    pub async fn find_in_competition(
        &mut self,
        competition_id: Uuid,
        ticket_type_id: Uuid,
    ) -> Result<TicketType> {
        let ticket_type = sqlx::query_as::<_, TicketType>(
            r#"
            SELECT ticket_type_id, competition_id, name, team_size, max_entries, created_at
            FROM ticket_types
            WHERE ticket_type_id = $1 AND competition_id = $2
            "#,
        )
        .bind(ticket_type_id)
        .bind(competition_id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or(SchedulingError::TicketTypeNotFound(ticket_type_id))?;

        Ok(ticket_type)
    }

    pub async fn list_for_competition(&mut self, competition_id: Uuid) -> Result<Vec<TicketType>> {
        let ticket_types = sqlx::query_as::<_, TicketType>(
            r#"
            SELECT ticket_type_id, competition_id, name, team_size, max_entries, created_at
            FROM ticket_types
            WHERE competition_id = $1
            ORDER BY created_at, ticket_type_id
            "#,
        )
        .bind(competition_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(ticket_types)
    }

    pub async fn update_max_entries(
        &mut self,
        ticket_type_id: Uuid,
        max_entries: i32,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE ticket_types
            SET max_entries = $2
            WHERE ticket_type_id = $1
            "#,
        )
        .bind(ticket_type_id)
        .bind(max_entries)
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }
}
