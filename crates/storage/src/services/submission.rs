//! Submission lifecycle: the write contract for daily entries, the review
//! contract for entries and challenge submissions, and the rest-day budget.
//!
//! The decision logic is kept in pure functions over already-fetched rows;
//! the async wrappers only load state and execute the chosen plan. The
//! database's partial unique index remains the last line of defense against
//! racing same-day writes.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::entry::{RestDayStats, ReviewDecision, SubmitEntryRequest, ValidateEntryRequest};
use crate::error::{Result, StorageError};
use crate::models::{
    ChallengeScope, ChallengeSubmission, Entry, EntryKind, EntryStatus, SubmissionReason,
    WorkoutSubtype,
};
use crate::repository::challenge::ChallengeRepository;
use crate::repository::entry::{EntryRepository, NewEntry};
use crate::repository::league::LeagueRepository;
use crate::repository::member::MemberRepository;

use super::scoring::{self, MIN_WORKOUT_SCORE, WorkoutMetrics};

/// Outcome of the write planner for a (member, date) slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WritePlan {
    /// No active entry exists (or a reupload was requested): insert a new
    /// row.
    Insert,
    /// Every existing entry for the date is rejected and no reupload link
    /// was given: overwrite the most recent rejected row, keeping its id.
    Replace {
        entry_id: Uuid,
        existing_proof: Option<String>,
    },
}

/// Decides insert vs. replace vs. conflict from the existing rows for the
/// slot, most recent first.
pub fn plan_write(existing: &[Entry], reupload_of: Option<Uuid>) -> Result<WritePlan> {
    if let Some(target) = reupload_of {
        let linked = existing.iter().find(|e| e.entry_id == target).ok_or_else(|| {
            StorageError::Validation(
                "reupload_of does not reference an entry for this member and date".to_string(),
            )
        })?;
        if linked.status != EntryStatus::Rejected {
            return Err(StorageError::Validation(
                "only rejected entries can be reuploaded".to_string(),
            ));
        }
        return Ok(WritePlan::Insert);
    }

    if existing.iter().any(|e| e.status != EntryStatus::Rejected) {
        return Err(StorageError::Conflict(
            "an entry for this date has already been submitted".to_string(),
        ));
    }

    match existing.first() {
        Some(latest) => Ok(WritePlan::Replace {
            entry_id: latest.entry_id,
            existing_proof: latest.proof_url.clone(),
        }),
        None => Ok(WritePlan::Insert),
    }
}

/// Workouts need a proof reference; a replacement may fall back to the
/// proof already on the row being replaced.
pub fn resolve_proof(
    kind: EntryKind,
    supplied: Option<String>,
    inherited: Option<String>,
) -> Result<Option<String>> {
    let proof = supplied.or(inherited);
    if kind == EntryKind::Workout && proof.is_none() {
        return Err(StorageError::Validation(
            "workout entries require a proof reference".to_string(),
        ));
    }
    Ok(proof)
}

/// Tags a rest day that exceeds the remaining budget as an exemption
/// request, which demands a written justification.
pub fn classify_submission(
    kind: EntryKind,
    rest_stats: Option<&RestDayStats>,
    notes: Option<&str>,
) -> Result<SubmissionReason> {
    if kind != EntryKind::Rest {
        return Ok(SubmissionReason::None);
    }
    let at_limit = rest_stats.is_some_and(|stats| stats.is_at_limit);
    if !at_limit {
        return Ok(SubmissionReason::None);
    }
    if notes.map(str::trim).is_none_or(str::is_empty) {
        return Err(StorageError::Validation(
            "rest day budget is exhausted; an exemption request needs a justification".to_string(),
        ));
    }
    Ok(SubmissionReason::ExemptionRequest)
}

/// A fully resolved review decision, ready to be written in one statement.
#[derive(Debug, Clone, Copy)]
struct ResolvedReview {
    status: EntryStatus,
    awarded_points: Option<i64>,
    stamp_team_id: Option<Uuid>,
}

/// Resolves the points awarded on challenge approval: explicit value if
/// given (bounds-checked), otherwise the challenge's configured maximum.
pub fn resolve_award(requested: Option<i64>, maximum: i64) -> Result<i64> {
    match requested {
        Some(points) if points < 0 => Err(StorageError::Validation(
            "awarded points cannot be negative".to_string(),
        )),
        Some(points) if points > maximum => Err(StorageError::Validation(format!(
            "awarded points exceed the challenge maximum of {maximum}"
        ))),
        Some(points) => Ok(points),
        None => Ok(maximum),
    }
}

/// Submits (or resubmits) an entry for a member and date per the write
/// contract: rescored, reset to pending, guarded against same-day
/// duplicates.
pub async fn submit_entry(pool: &PgPool, req: &SubmitEntryRequest) -> Result<Entry> {
    let member = MemberRepository::new(pool).find_by_id(req.member_id).await?;
    let league = LeagueRepository::new(pool).find_by_id(member.league_id).await?;

    let metrics = WorkoutMetrics {
        duration_minutes: req.duration_minutes,
        distance_km: req.distance_km,
        steps: req.steps,
        holes: req.holes,
    };
    let subtype = WorkoutSubtype::parse(req.subtype.as_deref());
    let age = member.age_on(req.entry_date);
    let score = scoring::compute_score(req.kind, subtype, &metrics, age);

    if req.kind == EntryKind::Workout && score < MIN_WORKOUT_SCORE {
        return Err(StorageError::Validation(format!(
            "workout score {score:.2} is below the minimum of {MIN_WORKOUT_SCORE:.1}"
        )));
    }

    let entries = EntryRepository::new(pool);
    let existing = entries
        .list_for_member_date(req.member_id, req.entry_date)
        .await?;
    let plan = plan_write(&existing, req.reupload_of)?;

    let inherited_proof = match &plan {
        WritePlan::Replace { existing_proof, .. } => existing_proof.clone(),
        WritePlan::Insert => None,
    };
    let proof_url = resolve_proof(req.kind, req.proof_url.clone(), inherited_proof)?;

    let rest_stats = if req.kind == EntryKind::Rest {
        let counts = entries.count_rest_days(req.member_id).await?;
        Some(RestDayStats::new(
            league.rest_day_budget(),
            counts.approved,
            counts.pending,
        ))
    } else {
        None
    };
    let submission_reason = classify_submission(req.kind, rest_stats.as_ref(), req.notes.as_deref())?;

    let new = NewEntry {
        member_id: req.member_id,
        entry_date: req.entry_date,
        kind: req.kind,
        subtype: req.subtype.clone(),
        duration_minutes: req.duration_minutes,
        distance_km: req.distance_km,
        steps: req.steps,
        holes: req.holes,
        score,
        proof_url,
        notes: req.notes.clone(),
        submission_reason,
        reupload_of: req.reupload_of,
        created_by: member.user_id,
    };

    match plan {
        WritePlan::Insert => entries.insert(&new).await,
        WritePlan::Replace { entry_id, .. } => entries.replace(entry_id, &new).await,
    }
}

/// Reviewer decision on a daily entry. Captains may only decide pending
/// entries of their own team; flipping a decided entry takes host or
/// governor rights.
pub async fn validate_entry(
    pool: &PgPool,
    entry_id: Uuid,
    req: &ValidateEntryRequest,
) -> Result<Entry> {
    let entries = EntryRepository::new(pool);
    let entry = entries.find_by_id(entry_id).await?;
    let owner = MemberRepository::new(pool).find_by_id(entry.member_id).await?;

    let roles = MemberRepository::new(pool)
        .resolve_roles(req.reviewer_id, owner.league_id)
        .await?;
    if !roles.can_validate_entry(owner.team_id) {
        return Err(StorageError::Forbidden(
            "reviewer may not validate entries for this team".to_string(),
        ));
    }
    if entry.status != EntryStatus::Pending && !roles.can_override() {
        return Err(StorageError::Forbidden(
            "only a host or governor may override a decided entry".to_string(),
        ));
    }

    entries
        .set_status(entry_id, req.decision.into(), req.reviewer_id)
        .await
}

/// Reviewer decision on a challenge submission: resolves the award on
/// approval, clears it on rejection, and stamps the submitter's team onto
/// team-scoped submissions that lack one.
pub async fn validate_challenge_submission(
    pool: &PgPool,
    submission_id: Uuid,
    req: &ValidateEntryRequest,
) -> Result<ChallengeSubmission> {
    let challenges = ChallengeRepository::new(pool);
    let submission = challenges.find_submission(submission_id).await?;
    let challenge = challenges.find_by_id(submission.challenge_id).await?;
    let submitter = MemberRepository::new(pool)
        .find_by_id(submission.member_id)
        .await?;

    let roles = MemberRepository::new(pool)
        .resolve_roles(req.reviewer_id, challenge.league_id)
        .await?;
    if !roles.can_validate_entry(submitter.team_id) {
        return Err(StorageError::Forbidden(
            "reviewer may not validate submissions for this team".to_string(),
        ));
    }
    if submission.status != EntryStatus::Pending && !roles.can_override() {
        return Err(StorageError::Forbidden(
            "only a host or governor may override a decided submission".to_string(),
        ));
    }

    let review = match req.decision {
        ReviewDecision::Approved => {
            let awarded = resolve_award(req.awarded_points, challenge.total_points)?;
            let stamp = if challenge.scope == ChallengeScope::Team && submission.team_id.is_none() {
                submitter.team_id
            } else {
                None
            };
            ResolvedReview {
                status: EntryStatus::Approved,
                awarded_points: Some(awarded),
                stamp_team_id: stamp,
            }
        }
        ReviewDecision::Rejected => ResolvedReview {
            status: EntryStatus::Rejected,
            awarded_points: None,
            stamp_team_id: None,
        },
    };

    challenges
        .apply_validation(
            submission_id,
            review.status,
            review.awarded_points,
            review.stamp_team_id,
            req.reviewer_id,
        )
        .await
}

/// Rest-day budget view consumed by the submission flow and the profile
/// screens.
pub async fn rest_day_stats(pool: &PgPool, member_id: Uuid, league_id: Uuid) -> Result<RestDayStats> {
    let member = MemberRepository::new(pool).find_by_id(member_id).await?;
    if member.league_id != league_id {
        return Err(StorageError::NotFound);
    }
    let league = LeagueRepository::new(pool).find_by_id(league_id).await?;
    let counts = EntryRepository::new(pool).count_rest_days(member_id).await?;

    Ok(RestDayStats::new(
        league.rest_day_budget(),
        counts.approved,
        counts.pending,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(status: EntryStatus, proof: Option<&str>) -> Entry {
        Entry {
            entry_id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            entry_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            kind: EntryKind::Workout,
            subtype: Some("run".to_string()),
            duration_minutes: Some(60.0),
            distance_km: None,
            steps: None,
            holes: None,
            score: 1.3,
            status,
            proof_url: proof.map(String::from),
            notes: None,
            submission_reason: SubmissionReason::None,
            reupload_of: None,
            created_at: chrono::NaiveDateTime::default(),
            created_by: Uuid::new_v4(),
            modified_at: None,
            modified_by: None,
        }
    }

    #[test]
    fn test_empty_slot_inserts() {
        assert_eq!(plan_write(&[], None).unwrap(), WritePlan::Insert);
    }

    #[test]
    fn test_pending_entry_conflicts() {
        let existing = vec![entry(EntryStatus::Pending, Some("https://p/1"))];
        assert!(matches!(
            plan_write(&existing, None),
            Err(StorageError::Conflict(_))
        ));
    }

    #[test]
    fn test_approved_entry_conflicts() {
        let existing = vec![entry(EntryStatus::Approved, Some("https://p/1"))];
        assert!(matches!(
            plan_write(&existing, None),
            Err(StorageError::Conflict(_))
        ));
    }

    #[test]
    fn test_rejected_entries_are_replaced_in_place() {
        let newest = entry(EntryStatus::Rejected, Some("https://p/new"));
        let older = entry(EntryStatus::Rejected, Some("https://p/old"));
        let plan = plan_write(&[newest.clone(), older], None).unwrap();
        assert_eq!(
            plan,
            WritePlan::Replace {
                entry_id: newest.entry_id,
                existing_proof: Some("https://p/new".to_string()),
            }
        );
    }

    #[test]
    fn test_reupload_inserts_next_to_rejected_original() {
        let rejected = entry(EntryStatus::Rejected, Some("https://p/1"));
        let plan = plan_write(std::slice::from_ref(&rejected), Some(rejected.entry_id)).unwrap();
        assert_eq!(plan, WritePlan::Insert);
    }

    #[test]
    fn test_reupload_target_must_exist_on_that_date() {
        let rejected = entry(EntryStatus::Rejected, None);
        let result = plan_write(&[rejected], Some(Uuid::new_v4()));
        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    #[test]
    fn test_reupload_target_must_be_rejected() {
        let pending = entry(EntryStatus::Pending, None);
        let result = plan_write(std::slice::from_ref(&pending), Some(pending.entry_id));
        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    #[test]
    fn test_workout_requires_proof() {
        let result = resolve_proof(EntryKind::Workout, None, None);
        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    #[test]
    fn test_replacement_inherits_existing_proof() {
        let proof = resolve_proof(
            EntryKind::Workout,
            None,
            Some("https://p/original".to_string()),
        )
        .unwrap();
        assert_eq!(proof.as_deref(), Some("https://p/original"));
    }

    #[test]
    fn test_new_proof_wins_over_inherited() {
        let proof = resolve_proof(
            EntryKind::Workout,
            Some("https://p/new".to_string()),
            Some("https://p/old".to_string()),
        )
        .unwrap();
        assert_eq!(proof.as_deref(), Some("https://p/new"));
    }

    #[test]
    fn test_rest_needs_no_proof() {
        assert_eq!(resolve_proof(EntryKind::Rest, None, None).unwrap(), None);
    }

    #[test]
    fn test_rest_within_budget_is_plain() {
        let stats = RestDayStats::new(6, 2, 1);
        let reason = classify_submission(EntryKind::Rest, Some(&stats), None).unwrap();
        assert_eq!(reason, SubmissionReason::None);
    }

    #[test]
    fn test_over_budget_rest_becomes_exemption_request() {
        let stats = RestDayStats::new(4, 4, 0);
        let reason =
            classify_submission(EntryKind::Rest, Some(&stats), Some("doctor's orders")).unwrap();
        assert_eq!(reason, SubmissionReason::ExemptionRequest);
    }

    #[test]
    fn test_exemption_request_requires_justification() {
        let stats = RestDayStats::new(4, 4, 0);
        assert!(matches!(
            classify_submission(EntryKind::Rest, Some(&stats), None),
            Err(StorageError::Validation(_))
        ));
        assert!(matches!(
            classify_submission(EntryKind::Rest, Some(&stats), Some("   ")),
            Err(StorageError::Validation(_))
        ));
    }

    #[test]
    fn test_workouts_never_tagged_as_exemption() {
        let stats = RestDayStats::new(4, 4, 0);
        let reason = classify_submission(EntryKind::Workout, Some(&stats), None).unwrap();
        assert_eq!(reason, SubmissionReason::None);
    }

    #[test]
    fn test_award_defaults_to_challenge_maximum() {
        assert_eq!(resolve_award(None, 25).unwrap(), 25);
    }

    #[test]
    fn test_explicit_zero_award_is_kept() {
        assert_eq!(resolve_award(Some(0), 25).unwrap(), 0);
    }

    #[test]
    fn test_award_bounds() {
        assert!(matches!(
            resolve_award(Some(-1), 25),
            Err(StorageError::Validation(_))
        ));
        assert!(matches!(
            resolve_award(Some(26), 25),
            Err(StorageError::Validation(_))
        ));
        assert_eq!(resolve_award(Some(25), 25).unwrap(), 25);
    }
}
