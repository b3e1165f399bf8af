use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{Database, dto::entry::ValidateEntryRequest, models::ChallengeSubmission};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/challenge-submissions/{submission_id}/validate",
    params(
        ("submission_id" = Uuid, Path, description = "Challenge submission ID")
    ),
    request_body = ValidateEntryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submission reviewed with resolved award", body = ChallengeSubmission),
        (status = 400, description = "Awarded points out of bounds"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Reviewer lacks the required role"),
        (status = 404, description = "Submission not found")
    ),
    tag = "challenges"
)]
pub async fn validate_challenge_submission(
    State(db): State<Database>,
    Path(submission_id): Path<Uuid>,
    Json(req): Json<ValidateEntryRequest>,
) -> Result<Response, WebError> {
    let submission = services::validate_challenge_submission(db.pool(), submission_id, &req).await?;

    Ok(Json(submission).into_response())
}
