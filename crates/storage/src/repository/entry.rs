use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Entry;

pub struct EntryRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> EntryRepository<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&mut self, entry_id: Uuid) -> Result<Option<Entry>> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            SELECT entry_id, competition_id, ticket_type_id, name, created_at
            FROM entries
            WHERE entry_id = $1
            "#,
        )
        .bind(entry_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(entry)
    }

    /// Entries without a lane, oldest registration first
    pub async fn list_unassigned(&mut self, competition_id: Uuid) -> Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT e.entry_id, e.competition_id, e.ticket_type_id, e.name, e.created_at
            FROM entries e
            WHERE e.competition_id = $1
              AND NOT EXISTS (SELECT 1 FROM lanes l WHERE l.entry_id = e.entry_id)
            ORDER BY e.created_at, e.entry_id
            "#,
        )
        .bind(competition_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(entries)
    }
}
