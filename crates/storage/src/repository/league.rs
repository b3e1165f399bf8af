use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::League;

pub struct LeagueRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeagueRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, league_id: Uuid) -> Result<League> {
        let league = sqlx::query_as::<_, League>(
            r#"
            SELECT league_id, name, start_date, end_date, rest_days_per_week, weeks, created_at
            FROM leagues
            WHERE league_id = $1
            "#,
        )
        .bind(league_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(league)
    }
}
