use chrono::NaiveDate;
use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::DateRange;
use crate::models::{Entry, EntryKind, EntryStatus, SubmissionReason};
use crate::error::{Result, StorageError};

const ENTRY_COLUMNS: &str = r#"
    entry_id, member_id, entry_date, kind, subtype, duration_minutes,
    distance_km, steps, holes, score, status, proof_url, notes,
    submission_reason, reupload_of, created_at, created_by, modified_at, modified_by
"#;

const SAME_DAY_CONFLICT: &str = "an entry for this member and date already exists";

/// Insert/replace payload; status is always reset to pending and the score
/// is the freshly computed one, so neither is a caller choice.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub member_id: Uuid,
    pub entry_date: NaiveDate,
    pub kind: EntryKind,
    pub subtype: Option<String>,
    pub duration_minutes: Option<f64>,
    pub distance_km: Option<f64>,
    pub steps: Option<i64>,
    pub holes: Option<i32>,
    pub score: f64,
    pub proof_url: Option<String>,
    pub notes: Option<String>,
    pub submission_reason: SubmissionReason,
    pub reupload_of: Option<Uuid>,
    pub created_by: Uuid,
}

/// Typed aggregation row: entry joined with its owner's team assignments.
#[derive(Debug, Clone, FromRow)]
pub struct ScoredEntryRow {
    pub entry_id: Uuid,
    pub member_id: Uuid,
    pub team_id: Option<Uuid>,
    pub sub_team_id: Option<Uuid>,
    pub entry_date: NaiveDate,
    pub score: f64,
    pub status: EntryStatus,
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct RestDayCounts {
    pub approved: i64,
    pub pending: i64,
}

pub struct EntryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EntryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, entry_id: Uuid) -> Result<Entry> {
        let entry = sqlx::query_as::<_, Entry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries WHERE entry_id = $1"
        ))
        .bind(entry_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(entry)
    }

    /// All entries for one member and date, most recent first; the write
    /// planner decides insert vs. replace vs. conflict from this list.
    pub async fn list_for_member_date(
        &self,
        member_id: Uuid,
        entry_date: NaiveDate,
    ) -> Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM entries
            WHERE member_id = $1 AND entry_date = $2
            ORDER BY created_at DESC
            "#
        ))
        .bind(member_id)
        .bind(entry_date)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Inserts a fresh pending entry. The partial unique index on
    /// (member_id, entry_date) over non-rejected rows is the authoritative
    /// guard against racing same-day inserts; its violation surfaces as a
    /// Conflict rather than a database error.
    pub async fn insert(&self, new: &NewEntry) -> Result<Entry> {
        let entry = sqlx::query_as::<_, Entry>(&format!(
            r#"
            INSERT INTO entries (
                member_id, entry_date, kind, subtype, duration_minutes,
                distance_km, steps, holes, score, status, proof_url, notes,
                submission_reason, reupload_of, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending', $10, $11, $12, $13, $14)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(new.member_id)
        .bind(new.entry_date)
        .bind(new.kind)
        .bind(&new.subtype)
        .bind(new.duration_minutes)
        .bind(new.distance_km)
        .bind(new.steps)
        .bind(new.holes)
        .bind(new.score)
        .bind(&new.proof_url)
        .bind(&new.notes)
        .bind(new.submission_reason)
        .bind(new.reupload_of)
        .bind(new.created_by)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).into_conflict(SAME_DAY_CONFLICT))?;

        Ok(entry)
    }

    /// Overwrites a rejected row in place, carrying its id forward and
    /// restarting the lifecycle at pending. The WHERE clause re-checks the
    /// rejected status so a concurrent approval cannot be clobbered.
    pub async fn replace(&self, entry_id: Uuid, new: &NewEntry) -> Result<Entry> {
        let entry = sqlx::query_as::<_, Entry>(&format!(
            r#"
            UPDATE entries
            SET kind = $2,
                subtype = $3,
                duration_minutes = $4,
                distance_km = $5,
                steps = $6,
                holes = $7,
                score = $8,
                status = 'pending',
                proof_url = $9,
                notes = $10,
                submission_reason = $11,
                modified_at = now(),
                modified_by = $12
            WHERE entry_id = $1 AND status = 'rejected'
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(entry_id)
        .bind(new.kind)
        .bind(&new.subtype)
        .bind(new.duration_minutes)
        .bind(new.distance_km)
        .bind(new.steps)
        .bind(new.holes)
        .bind(new.score)
        .bind(&new.proof_url)
        .bind(&new.notes)
        .bind(new.submission_reason)
        .bind(new.created_by)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| StorageError::Conflict(SAME_DAY_CONFLICT.to_string()))?;

        Ok(entry)
    }

    /// Single-statement status change with audit stamp; concurrent reviews
    /// of the same entry serialize on the row, last writer wins whole.
    pub async fn set_status(
        &self,
        entry_id: Uuid,
        status: EntryStatus,
        reviewer_id: Uuid,
    ) -> Result<Entry> {
        let entry = sqlx::query_as::<_, Entry>(&format!(
            r#"
            UPDATE entries
            SET status = $2, modified_at = now(), modified_by = $3
            WHERE entry_id = $1
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(entry_id)
        .bind(status)
        .bind(reviewer_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(entry)
    }

    /// Entries of a league's active members joined with team assignments,
    /// optionally restricted to a date window.
    pub async fn list_scored_for_league(
        &self,
        league_id: Uuid,
        window: Option<DateRange>,
    ) -> Result<Vec<ScoredEntryRow>> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT e.entry_id, e.member_id, m.team_id, m.sub_team_id,
                   e.entry_date, e.score, e.status
            FROM entries e
            INNER JOIN members m ON e.member_id = m.member_id
            WHERE m.league_id =
            "#,
        );
        query.push_bind(league_id);
        query.push(" AND m.is_active = true");

        if let Some(range) = window {
            query.push(" AND e.entry_date >= ");
            query.push_bind(range.start);
            query.push(" AND e.entry_date <= ");
            query.push_bind(range.end);
        }

        query.push(" ORDER BY e.entry_date, e.created_at");

        let rows: Vec<ScoredEntryRow> = query.build_query_as().fetch_all(self.pool).await?;

        Ok(rows)
    }

    pub async fn count_rest_days(&self, member_id: Uuid) -> Result<RestDayCounts> {
        let counts = sqlx::query_as::<_, RestDayCounts>(
            r#"
            SELECT COUNT(*) FILTER (WHERE status = 'approved') AS approved,
                   COUNT(*) FILTER (WHERE status = 'pending') AS pending
            FROM entries
            WHERE member_id = $1 AND kind = 'rest'
            "#,
        )
        .bind(member_id)
        .fetch_one(self.pool)
        .await?;

        Ok(counts)
    }
}
