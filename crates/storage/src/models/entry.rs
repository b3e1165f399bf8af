use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "entry_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Workout,
    Rest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "entry_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Pending,
    Approved,
    Rejected,
}

/// Explicit flag replacing the old notes-prefix convention: a submission is
/// either a regular entry or an over-budget rest day awaiting an exemption
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "submission_reason", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionReason {
    None,
    ExemptionRequest,
}

/// Workout subtypes the score formula distinguishes. Anything else falls
/// through to the plain duration formula, so parsing never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutSubtype {
    Steps,
    Golf,
    Run,
    Cardio,
    Cycling,
    Other,
}

impl WorkoutSubtype {
    pub fn parse(subtype: Option<&str>) -> Self {
        match subtype.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("steps") => Self::Steps,
            Some("golf") => Self::Golf,
            Some("run") => Self::Run,
            Some("cardio") => Self::Cardio,
            Some("cycling") => Self::Cycling,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Entry {
    pub entry_id: Uuid,
    pub member_id: Uuid,
    pub entry_date: NaiveDate,
    pub kind: EntryKind,
    pub subtype: Option<String>,
    pub duration_minutes: Option<f64>,
    pub distance_km: Option<f64>,
    pub steps: Option<i64>,
    pub holes: Option<i32>,
    pub score: f64,
    pub status: EntryStatus,
    pub proof_url: Option<String>,
    pub notes: Option<String>,
    pub submission_reason: SubmissionReason,
    pub reupload_of: Option<Uuid>,
    pub created_at: chrono::NaiveDateTime,
    pub created_by: Uuid,
    pub modified_at: Option<chrono::NaiveDateTime>,
    pub modified_by: Option<Uuid>,
}
