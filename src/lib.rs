//! Skill matcher library

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod state;

pub use config::Config;
pub use error::{Result, SkillMatcherError};
pub use processing::skill_matcher::{score, SkillMatchScorer};
