use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::entry::{SubmitEntryRequest, ValidateEntryRequest},
    models::Entry,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/entries",
    request_body = SubmitEntryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Entry submitted and pending review", body = Entry),
        (status = 400, description = "Validation error (bad metrics, sub-threshold workout, missing proof)"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Member not found"),
        (status = 409, description = "A non-rejected entry already exists for this date")
    ),
    tag = "entries"
)]
pub async fn submit_entry(
    State(db): State<Database>,
    Json(req): Json<SubmitEntryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let entry = services::submit_entry(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/entries/{entry_id}/validate",
    params(
        ("entry_id" = Uuid, Path, description = "Entry ID")
    ),
    request_body = ValidateEntryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Entry reviewed", body = Entry),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Reviewer lacks the required role"),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries"
)]
pub async fn validate_entry(
    State(db): State<Database>,
    Path(entry_id): Path<Uuid>,
    Json(req): Json<ValidateEntryRequest>,
) -> Result<Response, WebError> {
    let entry = services::validate_entry(db.pool(), entry_id, &req).await?;

    Ok(Json(entry).into_response())
}
