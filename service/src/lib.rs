pub mod achievements;
pub mod college;
pub mod dto;
pub mod error;
pub mod leaderboard;
pub mod mutation;
pub mod query;
pub mod scoring;
pub mod season_planning;
pub mod theme;

pub use mutation::*;
pub use query::*;

pub use sea_orm;
