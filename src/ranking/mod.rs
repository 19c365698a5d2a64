//! Batch resume ranking

pub mod ranker;

pub use ranker::{RankedResume, RankingTable, ResumeRanker};
