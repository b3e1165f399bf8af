use sqlx::PgPool;
use storage::{dto::entry::RestDayStats, error::Result, services::submission};
use uuid::Uuid;

/// Rest-day budget consumed/remaining for one member in one league
pub async fn get_rest_day_stats(
    pool: &PgPool,
    member_id: Uuid,
    league_id: Uuid,
) -> Result<RestDayStats> {
    submission::rest_day_stats(pool, member_id, league_id).await
}
