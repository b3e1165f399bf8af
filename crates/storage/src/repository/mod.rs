pub mod challenge;
pub mod entry;
pub mod league;
pub mod member;
pub mod team;
