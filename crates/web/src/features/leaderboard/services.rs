use sqlx::PgPool;
use storage::{
    dto::leaderboard::{LeaderboardQuery, LeaderboardResponse},
    error::Result,
    services::leaderboard,
};
use uuid::Uuid;

/// Compute the ranked standings for a league under the effective window
pub async fn get_leaderboard(
    pool: &PgPool,
    league_id: Uuid,
    query: &LeaderboardQuery,
) -> Result<LeaderboardResponse> {
    leaderboard::compute_leaderboard(pool, league_id, query).await
}
