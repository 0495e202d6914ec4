//! Skill matching and job ranking

pub mod job_ranker;
pub mod skill_matcher;
