use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use storage::{Database, dto::entry::RestDayStats};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct RestDayQuery {
    pub league_id: Uuid,
}

#[utoipa::path(
    get,
    path = "/api/members/{member_id}/rest-days",
    params(
        ("member_id" = Uuid, Path, description = "Member ID"),
        RestDayQuery
    ),
    responses(
        (status = 200, description = "Rest day budget for the member", body = RestDayStats),
        (status = 404, description = "Member not found in this league")
    ),
    tag = "members"
)]
pub async fn get_rest_day_stats(
    State(db): State<Database>,
    Path(member_id): Path<Uuid>,
    Query(query): Query<RestDayQuery>,
) -> Result<Response, WebError> {
    let stats = services::get_rest_day_stats(db.pool(), member_id, query.league_id).await?;

    Ok(Json(stats).into_response())
}
