pub mod common;
pub mod entry;
pub mod leaderboard;
