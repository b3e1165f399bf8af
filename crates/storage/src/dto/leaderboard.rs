use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common::DateRange;

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Bypasses the top-50 cap on individual standings.
    #[serde(default)]
    pub full: bool,
}

impl LeaderboardQuery {
    /// A window applies only when both bounds are present; a single bound
    /// falls back to the league's own date range.
    pub fn explicit_range(&self) -> Option<DateRange> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(range) = self.explicit_range()
            && range.start > range.end
        {
            return Err("start_date must not be after end_date".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamStanding {
    pub rank: i64,
    pub team_id: Uuid,
    pub name: String,
    /// One point per approved workout/rest entry.
    pub points: i64,
    /// Legacy special-challenge bonuses plus scoped challenge points.
    pub challenge_bonus: i64,
    pub total_points: i64,
    /// Mean score over approved entries with a positive score.
    pub avg_rr: f64,
    pub member_count: i64,
    pub entry_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubTeamStanding {
    pub rank: i64,
    pub sub_team_id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub points: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IndividualStanding {
    pub rank: i64,
    pub member_id: Uuid,
    pub display_name: String,
    pub team_id: Option<Uuid>,
    pub points: i64,
    pub avg_rr: f64,
    pub entry_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct LeaderboardStats {
    pub total_entries: i64,
    pub approved: i64,
    pub pending: i64,
    pub rejected: i64,
    /// Sum of scores over approved entries with a positive score.
    pub total_score: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub teams: Vec<TeamStanding>,
    pub sub_teams: Vec<SubTeamStanding>,
    pub individuals: Vec<IndividualStanding>,
    pub stats: LeaderboardStats,
    pub date_range: DateRange,
}
