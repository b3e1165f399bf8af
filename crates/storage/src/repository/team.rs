use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{SubTeam, Team};

pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_league(&self, league_id: Uuid) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, league_id, name, captain_user_id, created_at
            FROM teams
            WHERE league_id = $1
            ORDER BY name
            "#,
        )
        .bind(league_id)
        .fetch_all(self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn list_sub_teams_for_league(&self, league_id: Uuid) -> Result<Vec<SubTeam>> {
        let sub_teams = sqlx::query_as::<_, SubTeam>(
            r#"
            SELECT sub_team_id, team_id, league_id, name, created_at
            FROM sub_teams
            WHERE league_id = $1
            ORDER BY name
            "#,
        )
        .bind(league_id)
        .fetch_all(self.pool)
        .await?;

        Ok(sub_teams)
    }
}
