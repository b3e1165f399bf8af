//! Leaderboard aggregation: joins members, teams, sub-teams, validated
//! entries, and challenge points into ranked standings.
//!
//! One point per approved entry; `avg_rr` averages only the approved
//! entries with a positive score, while a zero-score approved entry still
//! counts a point. Ranks are contiguous and 1-based; ties never share a
//! rank.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::DateRange;
use crate::dto::leaderboard::{
    IndividualStanding, LeaderboardQuery, LeaderboardResponse, LeaderboardStats, SubTeamStanding,
    TeamStanding,
};
use crate::error::{Result, StorageError};
use crate::models::{EntryStatus, Member, SubTeam, Team};
use crate::repository::entry::{EntryRepository, ScoredEntryRow};
use crate::repository::league::LeagueRepository;
use crate::repository::member::MemberRepository;
use crate::repository::team::TeamRepository;

use super::challenges::{self, ChallengePoints};

/// Individual standings are capped to the top 50 unless a full listing is
/// requested.
pub const INDIVIDUAL_CAP: usize = 50;

#[derive(Debug, Clone, Copy, Default)]
struct ScoreAcc {
    approved: i64,
    entries: i64,
    score_sum: f64,
    positive_scores: i64,
}

impl ScoreAcc {
    fn add(&mut self, row: &ScoredEntryRow) {
        self.entries += 1;
        if row.status == EntryStatus::Approved {
            self.approved += 1;
            if row.score > 0.0 {
                self.score_sum += row.score;
                self.positive_scores += 1;
            }
        }
    }

    fn avg_rr(&self) -> f64 {
        if self.positive_scores == 0 {
            0.0
        } else {
            self.score_sum / self.positive_scores as f64
        }
    }
}

/// Pure aggregation over already-loaded rows; everything ranked here is
/// recomputed per query and never persisted.
pub(crate) fn build_standings(
    teams: &[Team],
    sub_teams: &[SubTeam],
    members: &[Member],
    entries: &[ScoredEntryRow],
    points: &ChallengePoints,
    full: bool,
) -> (
    Vec<TeamStanding>,
    Vec<SubTeamStanding>,
    Vec<IndividualStanding>,
    LeaderboardStats,
) {
    let mut stats = LeaderboardStats::default();
    let mut team_accs: HashMap<Uuid, ScoreAcc> = HashMap::new();
    let mut member_accs: HashMap<Uuid, ScoreAcc> = HashMap::new();

    for row in entries {
        stats.total_entries += 1;
        match row.status {
            EntryStatus::Approved => {
                stats.approved += 1;
                if row.score > 0.0 {
                    stats.total_score += row.score;
                }
            }
            EntryStatus::Pending => stats.pending += 1,
            EntryStatus::Rejected => stats.rejected += 1,
        }

        member_accs.entry(row.member_id).or_default().add(row);
        if let Some(team_id) = row.team_id {
            team_accs.entry(team_id).or_default().add(row);
        }
    }

    let mut team_member_counts: HashMap<Uuid, i64> = HashMap::new();
    for member in members {
        if let Some(team_id) = member.team_id {
            *team_member_counts.entry(team_id).or_default() += 1;
        }
    }

    let mut team_standings: Vec<TeamStanding> = teams
        .iter()
        .map(|team| {
            let acc = team_accs.get(&team.team_id).copied().unwrap_or_default();
            let challenge_bonus = points.team_points(team.team_id);
            TeamStanding {
                rank: 0,
                team_id: team.team_id,
                name: team.name.clone(),
                points: acc.approved,
                challenge_bonus,
                total_points: acc.approved + challenge_bonus,
                avg_rr: acc.avg_rr(),
                member_count: team_member_counts.get(&team.team_id).copied().unwrap_or(0),
                entry_count: acc.entries,
            }
        })
        .collect();
    team_standings.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then(b.avg_rr.total_cmp(&a.avg_rr))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
    for (index, standing) in team_standings.iter_mut().enumerate() {
        standing.rank = index as i64 + 1;
    }

    // Sub-teams rank purely on accumulated challenge points; the ones that
    // earned nothing are left out entirely.
    let mut sub_team_standings: Vec<SubTeamStanding> = sub_teams
        .iter()
        .filter_map(|sub_team| {
            let earned = points.sub_team_points(sub_team.sub_team_id);
            (earned > 0).then(|| SubTeamStanding {
                rank: 0,
                sub_team_id: sub_team.sub_team_id,
                team_id: sub_team.team_id,
                name: sub_team.name.clone(),
                points: earned,
            })
        })
        .collect();
    sub_team_standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.sub_team_id.cmp(&b.sub_team_id))
    });
    for (index, standing) in sub_team_standings.iter_mut().enumerate() {
        standing.rank = index as i64 + 1;
    }

    let mut individual_standings: Vec<IndividualStanding> = members
        .iter()
        .map(|member| {
            let acc = member_accs.get(&member.member_id).copied().unwrap_or_default();
            IndividualStanding {
                rank: 0,
                member_id: member.member_id,
                display_name: member.display_name.clone(),
                team_id: member.team_id,
                points: acc.approved + points.member_points(member.member_id),
                avg_rr: acc.avg_rr(),
                entry_count: acc.entries,
            }
        })
        .collect();
    individual_standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.avg_rr.total_cmp(&a.avg_rr))
            .then_with(|| a.display_name.cmp(&b.display_name))
            .then_with(|| a.member_id.cmp(&b.member_id))
    });
    for (index, standing) in individual_standings.iter_mut().enumerate() {
        standing.rank = index as i64 + 1;
    }
    if !full {
        individual_standings.truncate(INDIVIDUAL_CAP);
    }

    (team_standings, sub_team_standings, individual_standings, stats)
}

/// Computes the full leaderboard for a league under the effective date
/// window. Fails loudly: an unresolvable league is NotFound and any read
/// failure propagates instead of degrading the ranking.
pub async fn compute_leaderboard(
    pool: &PgPool,
    league_id: Uuid,
    query: &LeaderboardQuery,
) -> Result<LeaderboardResponse> {
    query.validate().map_err(StorageError::Validation)?;

    let league = LeagueRepository::new(pool).find_by_id(league_id).await?;
    let window = query
        .explicit_range()
        .unwrap_or(DateRange::new(league.start_date, league.end_date));

    let members = MemberRepository::new(pool).list_for_league(league_id).await?;
    let team_repo = TeamRepository::new(pool);
    let teams = team_repo.list_for_league(league_id).await?;
    let sub_teams = team_repo.list_sub_teams_for_league(league_id).await?;
    let entries = EntryRepository::new(pool)
        .list_scored_for_league(league_id, Some(window))
        .await?;
    let points = challenges::collect(pool, league_id, Some(&window)).await?;

    let (teams, sub_teams, individuals, stats) =
        build_standings(&teams, &sub_teams, &members, &entries, &points, query.full);

    Ok(LeaderboardResponse {
        teams,
        sub_teams,
        individuals,
        stats,
        date_range: window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn team(name: &str) -> Team {
        Team {
            team_id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            name: name.to_string(),
            captain_user_id: None,
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    fn sub_team(name: &str, parent: Uuid) -> SubTeam {
        SubTeam {
            sub_team_id: Uuid::new_v4(),
            team_id: parent,
            league_id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    fn member(name: &str, team_id: Option<Uuid>) -> Member {
        Member {
            member_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            team_id,
            sub_team_id: None,
            display_name: name.to_string(),
            date_of_birth: None,
            is_active: true,
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    fn row(member: &Member, score: f64, status: EntryStatus) -> ScoredEntryRow {
        ScoredEntryRow {
            entry_id: Uuid::new_v4(),
            member_id: member.member_id,
            team_id: member.team_id,
            sub_team_id: member.sub_team_id,
            entry_date: date("2025-02-10"),
            score,
            status,
        }
    }

    #[test]
    fn test_points_count_entries_but_average_skips_zero_scores() {
        let team_a = team("Alpha");
        let m = member("Ann", Some(team_a.team_id));
        let entries = vec![
            row(&m, 1.0, EntryStatus::Approved),
            row(&m, 1.5, EntryStatus::Approved),
            row(&m, 0.0, EntryStatus::Approved),
            row(&m, 1.2, EntryStatus::Pending),
        ];

        let (teams, _, individuals, stats) = build_standings(
            std::slice::from_ref(&team_a),
            &[],
            std::slice::from_ref(&m),
            &entries,
            &ChallengePoints::default(),
            false,
        );

        assert_eq!(teams[0].points, 3);
        assert!((teams[0].avg_rr - 1.25).abs() < 1e-9);
        assert_eq!(teams[0].entry_count, 4);
        assert_eq!(individuals[0].points, 3);
        assert!((individuals[0].avg_rr - 1.25).abs() < 1e-9);
        assert_eq!(stats.approved, 3);
        assert_eq!(stats.pending, 1);
        assert!((stats.total_score - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_challenge_bonus_merged_into_totals() {
        let team_a = team("Alpha");
        let m = member("Ann", Some(team_a.team_id));
        let entries = vec![row(&m, 1.0, EntryStatus::Approved)];

        let mut points = ChallengePoints::default();
        points.team.insert(team_a.team_id, 7);
        points.member.insert(m.member_id, 3);

        let (teams, _, individuals, _) = build_standings(
            std::slice::from_ref(&team_a),
            &[],
            std::slice::from_ref(&m),
            &entries,
            &points,
            false,
        );

        assert_eq!(teams[0].points, 1);
        assert_eq!(teams[0].challenge_bonus, 7);
        assert_eq!(teams[0].total_points, 8);
        assert_eq!(individuals[0].points, 4);
    }

    #[test]
    fn test_ties_break_on_avg_rr_with_contiguous_ranks() {
        let team_a = team("Alpha");
        let team_b = team("Beta");
        let a = member("Ann", Some(team_a.team_id));
        let b = member("Ben", Some(team_b.team_id));
        // both teams: 2 approved entries; Beta's scores are higher
        let entries = vec![
            row(&a, 1.0, EntryStatus::Approved),
            row(&a, 1.0, EntryStatus::Approved),
            row(&b, 2.0, EntryStatus::Approved),
            row(&b, 1.5, EntryStatus::Approved),
        ];

        let (teams, _, _, _) = build_standings(
            &[team_a.clone(), team_b.clone()],
            &[],
            &[a, b],
            &entries,
            &ChallengePoints::default(),
            false,
        );

        assert_eq!(teams[0].team_id, team_b.team_id);
        assert_eq!(teams[0].rank, 1);
        assert_eq!(teams[1].team_id, team_a.team_id);
        assert_eq!(teams[1].rank, 2);
    }

    #[test]
    fn test_ranking_is_deterministic_across_runs() {
        let team_a = team("Alpha");
        let team_b = team("Beta");
        let members: Vec<Member> = (0..6)
            .map(|i| {
                member(
                    &format!("M{i}"),
                    Some(if i % 2 == 0 { team_a.team_id } else { team_b.team_id }),
                )
            })
            .collect();
        let entries: Vec<ScoredEntryRow> = members
            .iter()
            .map(|m| row(m, 1.0, EntryStatus::Approved))
            .collect();

        let teams = [team_a, team_b];
        let first = build_standings(&teams, &[], &members, &entries, &ChallengePoints::default(), true);
        for _ in 0..5 {
            let next =
                build_standings(&teams, &[], &members, &entries, &ChallengePoints::default(), true);
            let ids: Vec<Uuid> = next.2.iter().map(|i| i.member_id).collect();
            let first_ids: Vec<Uuid> = first.2.iter().map(|i| i.member_id).collect();
            assert_eq!(ids, first_ids);
            let ranks: Vec<i64> = next.2.iter().map(|i| i.rank).collect();
            assert_eq!(ranks, (1..=6).collect::<Vec<i64>>());
        }
    }

    #[test]
    fn test_zero_point_sub_teams_are_dropped() {
        let parent = team("Alpha");
        let active = sub_team("Sprinters", parent.team_id);
        let idle = sub_team("Walkers", parent.team_id);

        let mut points = ChallengePoints::default();
        points.sub_team.insert(active.sub_team_id, 12);

        let (_, sub_teams, _, _) = build_standings(
            std::slice::from_ref(&parent),
            &[active.clone(), idle],
            &[],
            &[],
            &points,
            false,
        );

        assert_eq!(sub_teams.len(), 1);
        assert_eq!(sub_teams[0].sub_team_id, active.sub_team_id);
        assert_eq!(sub_teams[0].rank, 1);
        assert_eq!(sub_teams[0].points, 12);
    }

    #[test]
    fn test_individual_cap_and_full_listing() {
        let members: Vec<Member> = (0..60).map(|i| member(&format!("M{i:02}"), None)).collect();
        let entries: Vec<ScoredEntryRow> = members
            .iter()
            .map(|m| row(m, 1.0, EntryStatus::Approved))
            .collect();

        let capped = build_standings(&[], &[], &members, &entries, &ChallengePoints::default(), false);
        assert_eq!(capped.2.len(), INDIVIDUAL_CAP);

        let full = build_standings(&[], &[], &members, &entries, &ChallengePoints::default(), true);
        assert_eq!(full.2.len(), 60);
        assert_eq!(full.2.last().unwrap().rank, 60);
    }

    #[test]
    fn test_team_without_entries_still_listed_at_zero() {
        let team_a = team("Alpha");
        let (teams, _, _, stats) = build_standings(
            std::slice::from_ref(&team_a),
            &[],
            &[],
            &[],
            &ChallengePoints::default(),
            false,
        );
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].total_points, 0);
        assert_eq!(teams[0].rank, 1);
        assert_eq!(stats.total_entries, 0);
    }
}
