use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::EntryStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "challenge_scope", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChallengeScope {
    Individual,
    Team,
    SubTeam,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Challenge {
    pub challenge_id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub scope: ChallengeScope,
    pub total_points: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ChallengeSubmission {
    pub submission_id: Uuid,
    pub challenge_id: Uuid,
    pub member_id: Uuid,
    pub team_id: Option<Uuid>,
    pub sub_team_id: Option<Uuid>,
    pub status: EntryStatus,
    pub awarded_points: Option<i64>,
    pub proof_url: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub created_by: Uuid,
    pub modified_at: Option<chrono::NaiveDateTime>,
    pub modified_by: Option<Uuid>,
}

/// Pre-computed team bonus from the legacy special-challenge table; summed
/// into the leaderboard alongside the newer scoped challenges.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SpecialChallengeBonus {
    pub bonus_id: Uuid,
    pub league_id: Uuid,
    pub team_id: Uuid,
    pub points: i64,
    pub end_date: NaiveDate,
}
