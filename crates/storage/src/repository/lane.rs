use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::{Result, StorageError, map_lane_constraint};
use crate::models::{Lane, LaneAssignment};
use crate::scheduling::LaneChange;

/// Repository for lane assignments
pub struct LaneRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> LaneRepository<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&mut self, lane_id: Uuid) -> Result<Option<Lane>> {
        let lane = sqlx::query_as::<_, Lane>(
            r#"
            SELECT lane_id, heat_id, entry_id, lane_number, created_at
            FROM lanes
            WHERE lane_id = $1
            "#,
        )
        .bind(lane_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(lane)
    }

    pub async fn find_by_entry(&mut self, entry_id: Uuid) -> Result<Option<Lane>> {
        let lane = sqlx::query_as::<_, Lane>(
            r#"
            SELECT lane_id, heat_id, entry_id, lane_number, created_at
            FROM lanes
            WHERE entry_id = $1
            "#,
        )
        .bind(entry_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(lane)
    }

    /// Competition owning the lane's entry
    pub async fn competition_id_of(&mut self, lane_id: Uuid) -> Result<Option<Uuid>> {
        let competition_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT e.competition_id
            FROM lanes l
            INNER JOIN entries e ON e.entry_id = l.entry_id
            WHERE l.lane_id = $1
            "#,
        )
        .bind(lane_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(competition_id)
    }

    /// Every lane of a competition with its entry's ticket type
    pub async fn list_assignments_for_competition(
        &mut self,
        competition_id: Uuid,
    ) -> Result<Vec<LaneAssignment>> {
        let lanes = sqlx::query_as::<_, LaneAssignment>(
            r#"
            SELECT l.lane_id, l.heat_id, l.entry_id, e.name AS entry_name, e.ticket_type_id, l.lane_number
            FROM lanes l
            INNER JOIN entries e ON e.entry_id = l.entry_id
            WHERE e.competition_id = $1
            ORDER BY l.heat_id, l.lane_number
            "#,
        )
        .bind(competition_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(lanes)
    }

    pub async fn delete(&mut self, lane_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM lanes
            WHERE lane_id = $1
            "#,
        )
        .bind(lane_id)
        .execute(&mut *self.conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Write one planned lane change
    pub async fn apply(&mut self, change: &LaneChange) -> Result<()> {
        let result = match change {
            LaneChange::Created {
                lane_id,
                heat_id,
                entry_id,
                lane_number,
            } => sqlx::query(
                r#"
                INSERT INTO lanes (lane_id, heat_id, entry_id, lane_number)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(lane_id)
            .bind(heat_id)
            .bind(entry_id)
            .bind(lane_number)
            .execute(&mut *self.conn)
            .await
            .map_err(map_lane_constraint)?,
            LaneChange::Moved {
                lane_id,
                to_heat_id,
                lane_number,
                ..
            } => sqlx::query(
                r#"
                UPDATE lanes
                SET heat_id = $2, lane_number = $3
                WHERE lane_id = $1
                "#,
            )
            .bind(lane_id)
            .bind(to_heat_id)
            .bind(lane_number)
            .execute(&mut *self.conn)
            .await
            .map_err(map_lane_constraint)?,
            LaneChange::Removed { lane_id, .. } => sqlx::query(
                r#"
                DELETE FROM lanes
                WHERE lane_id = $1
                "#,
            )
            .bind(lane_id)
            .execute(&mut *self.conn)
            .await?,
        };

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
