pub mod challenges;
pub mod leaderboard;
pub mod scoring;
pub mod submission;
