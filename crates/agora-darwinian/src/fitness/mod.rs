//! Fitness ranking
pub mod ranking;

pub use self::ranking::rank_by_score;
