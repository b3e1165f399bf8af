use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub team_id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub captain_user_id: Option<Uuid>,
    pub created_at: chrono::NaiveDateTime,
}

/// Sub-teams carry their parent team directly so the aggregator never has
/// to re-derive the relationship through member assignments.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubTeam {
    pub sub_team_id: Uuid,
    pub team_id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub created_at: chrono::NaiveDateTime,
}
