use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::EntryKind;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitEntryRequest {
    pub member_id: Uuid,
    pub entry_date: NaiveDate,
    pub kind: EntryKind,
    #[validate(length(max = 64, message = "subtype too long"))]
    pub subtype: Option<String>,
    #[validate(range(min = 0.0, max = 1440.0, message = "duration must be 0-1440 minutes"))]
    pub duration_minutes: Option<f64>,
    #[validate(range(min = 0.0, max = 1000.0, message = "distance must be 0-1000 km"))]
    pub distance_km: Option<f64>,
    #[validate(range(min = 0, message = "steps cannot be negative"))]
    pub steps: Option<i64>,
    #[validate(range(min = 0, max = 200, message = "holes must be 0-200"))]
    pub holes: Option<i32>,
    #[validate(url(message = "proof_url must be a valid URL"))]
    pub proof_url: Option<String>,
    #[validate(length(max = 2000, message = "notes too long"))]
    pub notes: Option<String>,
    /// Links this submission to a previously rejected entry for the same
    /// date; forces an insert instead of an in-place replacement.
    pub reupload_of: Option<Uuid>,
}

/// The two outcomes a reviewer can pick; `pending` is never a reviewer
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl From<ReviewDecision> for crate::models::EntryStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approved => Self::Approved,
            ReviewDecision::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ValidateEntryRequest {
    /// User id of the reviewer; roles are resolved against the entry's
    /// league.
    pub reviewer_id: Uuid,
    pub decision: ReviewDecision,
    /// Only meaningful for challenge submissions: explicit award, bounded
    /// by the challenge's configured maximum. Defaults to that maximum.
    pub awarded_points: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RestDayStats {
    pub total_allowed: i64,
    pub used: i64,
    pub pending: i64,
    pub remaining: i64,
    pub is_at_limit: bool,
}

impl RestDayStats {
    pub fn new(total_allowed: i64, used: i64, pending: i64) -> Self {
        let remaining = (total_allowed - used - pending).max(0);
        Self {
            total_allowed,
            used,
            pending,
            remaining,
            is_at_limit: remaining == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_never_negative() {
        let stats = RestDayStats::new(4, 3, 2);
        assert_eq!(stats.remaining, 0);
        assert!(stats.is_at_limit);
    }

    #[test]
    fn test_pending_reserves_budget() {
        let stats = RestDayStats::new(6, 2, 1);
        assert_eq!(stats.remaining, 3);
        assert!(!stats.is_at_limit);
    }
}
