use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{LeagueRoles, Member};

const MEMBER_COLUMNS: &str = r#"
    member_id, user_id, league_id, team_id, sub_team_id, display_name,
    date_of_birth, is_active, created_at
"#;

pub struct MemberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MemberRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, member_id: Uuid) -> Result<Member> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE member_id = $1"
        ))
        .bind(member_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(member)
    }

    pub async fn list_for_league(&self, league_id: Uuid) -> Result<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(&format!(
            r#"
            SELECT {MEMBER_COLUMNS}
            FROM members
            WHERE league_id = $1 AND is_active = true
            ORDER BY display_name
            "#
        ))
        .bind(league_id)
        .fetch_all(self.pool)
        .await?;

        Ok(members)
    }

    /// Resolves everything the authorization gate needs about one user in
    /// one league in a single pass: official roles plus any captaincy.
    pub async fn resolve_roles(&self, user_id: Uuid, league_id: Uuid) -> Result<LeagueRoles> {
        let official_roles: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT role
            FROM league_officials
            WHERE user_id = $1 AND league_id = $2
            "#,
        )
        .bind(user_id)
        .bind(league_id)
        .fetch_all(self.pool)
        .await?;

        let captain_of: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT team_id
            FROM teams
            WHERE league_id = $2 AND captain_user_id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(league_id)
        .fetch_optional(self.pool)
        .await?;

        let mut roles = LeagueRoles {
            captain_of: captain_of.map(|(team_id,)| team_id),
            ..Default::default()
        };
        for (role,) in official_roles {
            match role.as_str() {
                "host" => roles.is_host = true,
                "governor" => roles.is_governor = true,
                _ => {}
            }
        }

        Ok(roles)
    }
}
