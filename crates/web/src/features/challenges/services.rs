use sqlx::PgPool;
use storage::{
    dto::entry::ValidateEntryRequest,
    error::Result,
    models::ChallengeSubmission,
    services::submission,
};
use uuid::Uuid;

/// Apply a reviewer decision to a challenge submission, resolving the award
pub async fn validate_challenge_submission(
    pool: &PgPool,
    submission_id: Uuid,
    req: &ValidateEntryRequest,
) -> Result<ChallengeSubmission> {
    submission::validate_challenge_submission(pool, submission_id, req).await
}
