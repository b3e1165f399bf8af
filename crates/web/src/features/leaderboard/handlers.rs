use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::leaderboard::{LeaderboardQuery, LeaderboardResponse},
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leagues/{league_id}/leaderboard",
    params(
        ("league_id" = Uuid, Path, description = "League ID"),
        LeaderboardQuery
    ),
    responses(
        (status = 200, description = "Ranked team, sub-team and individual standings", body = LeaderboardResponse),
        (status = 400, description = "Invalid date range"),
        (status = 404, description = "League not found")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(db): State<Database>,
    Path(league_id): Path<Uuid>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let leaderboard = services::get_leaderboard(db.pool(), league_id, &query).await?;

    Ok(Json(leaderboard).into_response())
}
