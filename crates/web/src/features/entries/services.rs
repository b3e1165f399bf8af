use sqlx::PgPool;
use storage::{
    dto::entry::{SubmitEntryRequest, ValidateEntryRequest},
    error::Result,
    models::Entry,
    services::submission,
};
use uuid::Uuid;

/// Run a submission through the write contract (score, gate, plan, write)
pub async fn submit_entry(pool: &PgPool, req: &SubmitEntryRequest) -> Result<Entry> {
    submission::submit_entry(pool, req).await
}

/// Apply a reviewer decision to a daily entry
pub async fn validate_entry(
    pool: &PgPool,
    entry_id: Uuid,
    req: &ValidateEntryRequest,
) -> Result<Entry> {
    submission::validate_entry(pool, entry_id, req).await
}
