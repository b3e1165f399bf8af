mod challenge;
mod entry;
mod league;
mod member;
mod role;
mod team;

pub use challenge::{Challenge, ChallengeScope, ChallengeSubmission, SpecialChallengeBonus};
pub use entry::{Entry, EntryKind, EntryStatus, SubmissionReason, WorkoutSubtype};
pub use league::League;
pub use member::Member;
pub use role::LeagueRoles;
pub use team::{SubTeam, Team};
