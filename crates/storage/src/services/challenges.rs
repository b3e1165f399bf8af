//! Converts approved challenge submissions and legacy special-challenge
//! bonuses into the point maps the leaderboard merges in.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::DateRange;
use crate::error::Result;
use crate::models::{ChallengeScope, SpecialChallengeBonus};
use crate::repository::challenge::{ApprovedChallengeRow, ChallengeRepository};

/// Point contributions keyed by member, team, and sub-team id.
#[derive(Debug, Clone, Default)]
pub struct ChallengePoints {
    pub member: HashMap<Uuid, i64>,
    pub team: HashMap<Uuid, i64>,
    pub sub_team: HashMap<Uuid, i64>,
}

impl ChallengePoints {
    pub fn member_points(&self, member_id: Uuid) -> i64 {
        self.member.get(&member_id).copied().unwrap_or(0)
    }

    pub fn team_points(&self, team_id: Uuid) -> i64 {
        self.team.get(&team_id).copied().unwrap_or(0)
    }

    pub fn sub_team_points(&self, sub_team_id: Uuid) -> i64 {
        self.sub_team.get(&sub_team_id).copied().unwrap_or(0)
    }
}

/// Point value of one approved submission: the award resolved at approval
/// time when present (an explicit 0 stays 0), otherwise the challenge's
/// configured total.
fn submission_points(row: &ApprovedChallengeRow) -> i64 {
    row.awarded_points.unwrap_or(row.challenge_total)
}

/// A challenge is inside the window when its end date (falling back to its
/// start date) lies within it; undated challenges always count.
fn challenge_in_window(row: &ApprovedChallengeRow, window: Option<&DateRange>) -> bool {
    let Some(range) = window else { return true };
    match row.challenge_end.or(row.challenge_start) {
        Some(date) => range.contains(date),
        None => true,
    }
}

/// Folds approved submissions and legacy bonuses into the three point maps.
///
/// Individual- and sub-team-scope points also roll up into the submitting
/// member's team; sub-team points get no further roll-up of their own.
/// Submissions resolving to zero or fewer points contribute nowhere.
pub fn integrate(
    rows: &[ApprovedChallengeRow],
    bonuses: &[SpecialChallengeBonus],
    window: Option<&DateRange>,
) -> ChallengePoints {
    let mut points = ChallengePoints::default();

    for row in rows {
        if !challenge_in_window(row, window) {
            continue;
        }
        let value = submission_points(row);
        if value <= 0 {
            continue;
        }

        match row.scope {
            ChallengeScope::Individual => {
                *points.member.entry(row.member_id).or_default() += value;
                if let Some(team_id) = row.member_team_id {
                    *points.team.entry(team_id).or_default() += value;
                }
            }
            ChallengeScope::Team => {
                if let Some(team_id) = row.submission_team_id.or(row.member_team_id) {
                    *points.team.entry(team_id).or_default() += value;
                }
            }
            ChallengeScope::SubTeam => {
                if let Some(sub_team_id) = row.submission_sub_team_id.or(row.member_sub_team_id) {
                    *points.sub_team.entry(sub_team_id).or_default() += value;
                }
                if let Some(team_id) = row.member_team_id {
                    *points.team.entry(team_id).or_default() += value;
                }
            }
        }
    }

    for bonus in bonuses {
        let in_window = window.is_none_or(|range| range.contains(bonus.end_date));
        if in_window && bonus.points > 0 {
            *points.team.entry(bonus.team_id).or_default() += bonus.points;
        }
    }

    points
}

/// Loads a league's approved challenge state and integrates it.
pub async fn collect(
    pool: &PgPool,
    league_id: Uuid,
    window: Option<&DateRange>,
) -> Result<ChallengePoints> {
    let repo = ChallengeRepository::new(pool);
    let rows = repo.list_approved_for_league(league_id).await?;
    let bonuses = repo.list_special_bonuses(league_id).await?;

    Ok(integrate(&rows, &bonuses, window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    struct RowBuilder {
        row: ApprovedChallengeRow,
    }

    impl RowBuilder {
        fn new(scope: ChallengeScope, total: i64) -> Self {
            Self {
                row: ApprovedChallengeRow {
                    submission_id: Uuid::new_v4(),
                    scope,
                    challenge_total: total,
                    challenge_start: None,
                    challenge_end: None,
                    awarded_points: None,
                    member_id: Uuid::new_v4(),
                    member_team_id: None,
                    member_sub_team_id: None,
                    submission_team_id: None,
                    submission_sub_team_id: None,
                },
            }
        }

        fn member(mut self, member_id: Uuid) -> Self {
            self.row.member_id = member_id;
            self
        }

        fn member_team(mut self, team_id: Uuid) -> Self {
            self.row.member_team_id = Some(team_id);
            self
        }

        fn member_sub_team(mut self, sub_team_id: Uuid) -> Self {
            self.row.member_sub_team_id = Some(sub_team_id);
            self
        }

        fn awarded(mut self, points: i64) -> Self {
            self.row.awarded_points = Some(points);
            self
        }

        fn ends(mut self, end: &str) -> Self {
            self.row.challenge_end = Some(date(end));
            self
        }

        fn build(self) -> ApprovedChallengeRow {
            self.row
        }
    }

    #[test]
    fn test_individual_points_credit_member_and_roll_up_to_team() {
        let member = Uuid::new_v4();
        let team = Uuid::new_v4();
        let rows = vec![
            RowBuilder::new(ChallengeScope::Individual, 10)
                .member(member)
                .member_team(team)
                .build(),
        ];
        let points = integrate(&rows, &[], None);
        assert_eq!(points.member_points(member), 10);
        assert_eq!(points.team_points(team), 10);
        assert!(points.sub_team.is_empty());
    }

    #[test]
    fn test_explicit_award_overrides_challenge_total() {
        let member = Uuid::new_v4();
        let rows = vec![
            RowBuilder::new(ChallengeScope::Individual, 10)
                .member(member)
                .awarded(4)
                .build(),
        ];
        let points = integrate(&rows, &[], None);
        assert_eq!(points.member_points(member), 4);
    }

    #[test]
    fn test_explicit_zero_award_excluded_everywhere() {
        let member = Uuid::new_v4();
        let team = Uuid::new_v4();
        let rows = vec![
            RowBuilder::new(ChallengeScope::Individual, 10)
                .member(member)
                .member_team(team)
                .awarded(0)
                .build(),
        ];
        let points = integrate(&rows, &[], None);
        assert_eq!(points.member_points(member), 0);
        assert!(points.member.is_empty());
        assert!(points.team.is_empty());
    }

    #[test]
    fn test_sub_team_points_roll_up_through_membership() {
        let team = Uuid::new_v4();
        let sub_team = Uuid::new_v4();
        let rows = vec![
            RowBuilder::new(ChallengeScope::SubTeam, 8)
                .member_team(team)
                .member_sub_team(sub_team)
                .build(),
        ];
        let points = integrate(&rows, &[], None);
        assert_eq!(points.sub_team_points(sub_team), 8);
        assert_eq!(points.team_points(team), 8);
        assert!(points.member.is_empty());
    }

    #[test]
    fn test_team_scope_credits_team_only() {
        let team = Uuid::new_v4();
        let rows = vec![
            RowBuilder::new(ChallengeScope::Team, 15)
                .member_team(team)
                .build(),
        ];
        let points = integrate(&rows, &[], None);
        assert_eq!(points.team_points(team), 15);
        assert!(points.member.is_empty());
        assert!(points.sub_team.is_empty());
    }

    #[test]
    fn test_window_filters_by_challenge_end_date() {
        let member = Uuid::new_v4();
        let rows = vec![
            RowBuilder::new(ChallengeScope::Individual, 5)
                .member(member)
                .ends("2025-01-15")
                .build(),
            RowBuilder::new(ChallengeScope::Individual, 7)
                .member(member)
                .ends("2025-03-15")
                .build(),
        ];
        let window = DateRange::new(date("2025-01-01"), date("2025-01-31"));
        let points = integrate(&rows, &[], Some(&window));
        assert_eq!(points.member_points(member), 5);
    }

    #[test]
    fn test_undated_challenge_always_counts() {
        let member = Uuid::new_v4();
        let rows = vec![
            RowBuilder::new(ChallengeScope::Individual, 5)
                .member(member)
                .build(),
        ];
        let window = DateRange::new(date("2025-01-01"), date("2025-01-31"));
        let points = integrate(&rows, &[], Some(&window));
        assert_eq!(points.member_points(member), 5);
    }

    #[test]
    fn test_legacy_bonus_filtered_by_end_date() {
        let team = Uuid::new_v4();
        let bonuses = vec![
            SpecialChallengeBonus {
                bonus_id: Uuid::new_v4(),
                league_id: Uuid::new_v4(),
                team_id: team,
                points: 20,
                end_date: date("2025-01-10"),
            },
            SpecialChallengeBonus {
                bonus_id: Uuid::new_v4(),
                league_id: Uuid::new_v4(),
                team_id: team,
                points: 30,
                end_date: date("2025-06-10"),
            },
        ];
        let window = DateRange::new(date("2025-01-01"), date("2025-01-31"));
        let points = integrate(&[], &bonuses, Some(&window));
        assert_eq!(points.team_points(team), 20);

        let unfiltered = integrate(&[], &bonuses, None);
        assert_eq!(unfiltered.team_points(team), 50);
    }
}
