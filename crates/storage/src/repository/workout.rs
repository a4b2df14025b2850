use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Workout;

pub struct WorkoutRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> WorkoutRepository<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Workouts of a competition in schedule order
    pub async fn list_for_competition(&mut self, competition_id: Uuid) -> Result<Vec<Workout>> {
        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT workout_id, competition_id, name, position, created_at
            FROM workouts
            WHERE competition_id = $1
            ORDER BY position, created_at, workout_id
            "#,
        )
        .bind(competition_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(workouts)
    }
}
