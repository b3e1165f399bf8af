use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use chrono::NaiveDate;

use crate::error::{Result, StorageError};
use crate::models::{Challenge, ChallengeScope, ChallengeSubmission, EntryStatus, SpecialChallengeBonus};

const SUBMISSION_COLUMNS: &str = r#"
    submission_id, challenge_id, member_id, team_id, sub_team_id, status,
    awarded_points, proof_url, created_at, created_by, modified_at, modified_by
"#;

/// Approved challenge submission joined with its challenge and submitter,
/// shaped for the point integrator.
#[derive(Debug, Clone, FromRow)]
pub struct ApprovedChallengeRow {
    pub submission_id: Uuid,
    pub scope: ChallengeScope,
    pub challenge_total: i64,
    pub challenge_start: Option<NaiveDate>,
    pub challenge_end: Option<NaiveDate>,
    pub awarded_points: Option<i64>,
    pub member_id: Uuid,
    pub member_team_id: Option<Uuid>,
    pub member_sub_team_id: Option<Uuid>,
    pub submission_team_id: Option<Uuid>,
    pub submission_sub_team_id: Option<Uuid>,
}

pub struct ChallengeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ChallengeRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, challenge_id: Uuid) -> Result<Challenge> {
        let challenge = sqlx::query_as::<_, Challenge>(
            r#"
            SELECT challenge_id, league_id, name, scope, total_points,
                   start_date, end_date, created_at
            FROM challenges
            WHERE challenge_id = $1
            "#,
        )
        .bind(challenge_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(challenge)
    }

    pub async fn find_submission(&self, submission_id: Uuid) -> Result<ChallengeSubmission> {
        let submission = sqlx::query_as::<_, ChallengeSubmission>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM challenge_submissions WHERE submission_id = $1"
        ))
        .bind(submission_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(submission)
    }

    /// Applies a review decision in one statement: status, resolved award
    /// (null on rejection), optional team stamp, audit fields.
    pub async fn apply_validation(
        &self,
        submission_id: Uuid,
        status: EntryStatus,
        awarded_points: Option<i64>,
        stamp_team_id: Option<Uuid>,
        reviewer_id: Uuid,
    ) -> Result<ChallengeSubmission> {
        let submission = sqlx::query_as::<_, ChallengeSubmission>(&format!(
            r#"
            UPDATE challenge_submissions
            SET status = $2,
                awarded_points = $3,
                team_id = COALESCE(team_id, $4),
                modified_at = now(),
                modified_by = $5
            WHERE submission_id = $1
            RETURNING {SUBMISSION_COLUMNS}
            "#
        ))
        .bind(submission_id)
        .bind(status)
        .bind(awarded_points)
        .bind(stamp_team_id)
        .bind(reviewer_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(submission)
    }

    pub async fn list_approved_for_league(&self, league_id: Uuid) -> Result<Vec<ApprovedChallengeRow>> {
        let rows = sqlx::query_as::<_, ApprovedChallengeRow>(
            r#"
            SELECT cs.submission_id,
                   c.scope,
                   c.total_points AS challenge_total,
                   c.start_date AS challenge_start,
                   c.end_date AS challenge_end,
                   cs.awarded_points,
                   cs.member_id,
                   m.team_id AS member_team_id,
                   m.sub_team_id AS member_sub_team_id,
                   cs.team_id AS submission_team_id,
                   cs.sub_team_id AS submission_sub_team_id
            FROM challenge_submissions cs
            INNER JOIN challenges c ON cs.challenge_id = c.challenge_id
            INNER JOIN members m ON cs.member_id = m.member_id
            WHERE c.league_id = $1 AND cs.status = 'approved'
            "#,
        )
        .bind(league_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_special_bonuses(&self, league_id: Uuid) -> Result<Vec<SpecialChallengeBonus>> {
        let bonuses = sqlx::query_as::<_, SpecialChallengeBonus>(
            r#"
            SELECT bonus_id, league_id, team_id, points, end_date
            FROM special_challenge_bonuses
            WHERE league_id = $1
            "#,
        )
        .bind(league_id)
        .fetch_all(self.pool)
        .await?;

        Ok(bonuses)
    }
}
