pub mod challenges;
pub mod entries;
pub mod leaderboard;
pub mod members;
