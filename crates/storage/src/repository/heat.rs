use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Heat, HeatOccupancy, LinkedHeat};
use crate::scheduling::NewHeat;

/// Repository for heats and their ticket type links
pub struct HeatRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> HeatRepository<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Competition owning the heat, through its workout
    pub async fn competition_id_of(&mut self, heat_id: Uuid) -> Result<Option<Uuid>> {
        let competition_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT w.competition_id
            FROM heats h
            INNER JOIN workouts w ON w.workout_id = h.workout_id
            WHERE h.heat_id = $1
            "#,
        )
        .bind(heat_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(competition_id)
    }

    /// Heats linked to a ticket type with their lane counts, earliest first
    pub async fn occupancy_for_ticket_type(
        &mut self,
        ticket_type_id: Uuid,
    ) -> Result<Vec<HeatOccupancy>> {
        let heats = sqlx::query_as::<_, HeatOccupancy>(
            r#"
            SELECT h.heat_id, h.start_time, COUNT(l.lane_id) AS lane_count
            FROM heats h
            INNER JOIN heat_ticket_types htt ON htt.heat_id = h.heat_id
            LEFT JOIN lanes l ON l.heat_id = h.heat_id
            WHERE htt.ticket_type_id = $1
            GROUP BY h.heat_id, h.start_time
            ORDER BY h.start_time, h.heat_id
            "#,
        )
        .bind(ticket_type_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(heats)
    }

    /// All heats of a competition with their allowed ticket types
    pub async fn list_linked_for_competition(
        &mut self,
        competition_id: Uuid,
    ) -> Result<Vec<LinkedHeat>> {
        let heats = sqlx::query_as::<_, LinkedHeat>(
            r#"
            SELECT
                h.heat_id,
                h.workout_id,
                h.start_time,
                h.max_limit_per_heat,
                COALESCE(
                    ARRAY_AGG(htt.ticket_type_id ORDER BY htt.ticket_type_id)
                        FILTER (WHERE htt.ticket_type_id IS NOT NULL),
                    '{}'::uuid[]
                ) AS ticket_type_ids
            FROM heats h
            INNER JOIN workouts w ON w.workout_id = h.workout_id
            LEFT JOIN heat_ticket_types htt ON htt.heat_id = h.heat_id
            WHERE w.competition_id = $1
            GROUP BY h.heat_id, h.workout_id, h.start_time, h.max_limit_per_heat
            ORDER BY h.start_time, h.heat_id
            "#,
        )
        .bind(competition_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(heats)
    }

    /// Refresh the stored per-heat limit of every heat in a competition
    pub async fn update_limit_for_competition(
        &mut self,
        competition_id: Uuid,
        max_limit_per_heat: i32,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE heats h
            SET max_limit_per_heat = $2
            FROM workouts w
            WHERE w.workout_id = h.workout_id AND w.competition_id = $1
            "#,
        )
        .bind(competition_id)
        .bind(max_limit_per_heat)
        .execute(&mut *self.conn)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn count_lanes(&mut self, heat_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM lanes WHERE heat_id = $1
            "#,
        )
        .bind(heat_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(count)
    }

    /// Insert a heat and link it to its ticket type
    pub async fn create_linked(&mut self, heat: &NewHeat, ticket_type_id: Uuid) -> Result<Heat> {
        let created = sqlx::query_as::<_, Heat>(
            r#"
            INSERT INTO heats (workout_id, start_time, max_limit_per_heat)
            VALUES ($1, $2, $3)
            RETURNING heat_id, workout_id, start_time, max_limit_per_heat, created_at
            "#,
        )
        .bind(heat.workout_id)
        .bind(heat.start_time)
        .bind(heat.max_limit_per_heat)
        .fetch_one(&mut *self.conn)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO heat_ticket_types (heat_id, ticket_type_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(created.heat_id)
        .bind(ticket_type_id)
        .execute(&mut *self.conn)
        .await?;

        Ok(created)
    }

    /// Delete the ticket type links of a heat, then the heat itself.
    ///
    /// Lanes reference heats with `ON DELETE RESTRICT`; callers check the
    /// lane count first so that case surfaces as a scheduling error.
    pub async fn delete_with_links(&mut self, heat_id: Uuid) -> Result<u64> {
        sqlx::query(
            r#"
            DELETE FROM heat_ticket_types
            WHERE heat_id = $1
            "#,
        )
        .bind(heat_id)
        .execute(&mut *self.conn)
        .await?;

        let result = sqlx::query(
            r#"
            DELETE FROM heats
            WHERE heat_id = $1
            "#,
        )
        .bind(heat_id)
        .execute(&mut *self.conn)
        .await
        .map_err(crate::error::map_lane_constraint)?;

        Ok(result.rows_affected())
    }
}
