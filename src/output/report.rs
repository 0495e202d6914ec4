//! Report structures for analysis results and single score explanations

use crate::api::models::ResumeAnalysis;
use crate::processing::job_ranker::{MatchTier, RankedJob, ScoreSource};
use crate::processing::skill_matcher::SkillMatchBreakdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Analysis of one résumé plus every job ranked against it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub metadata: ReportMetadata,
    pub analysis: ResumeAnalysis,
    /// One-line judgement of the résumé score
    pub verdict: String,
    pub summary: JobSummary,
    pub jobs: Vec<RankedJob>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub total_jobs: usize,
    pub backend_scored: usize,
    pub locally_scored: usize,
    pub best_match: Option<u8>,
}

/// Explanation of one candidate/job comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub metadata: ReportMetadata,
    pub candidate_skills: Vec<String>,
    pub job_skills: Vec<String>,
    pub tier: MatchTier,
    pub breakdown: SkillMatchBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    /// File or input the report was produced from
    pub source: String,
    pub backend_url: Option<String>,
    pub tool_version: String,
}

impl ReportMetadata {
    pub fn new(source: impl Into<String>, backend_url: Option<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            source: source.into(),
            backend_url,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl MatchReport {
    pub fn new(metadata: ReportMetadata, analysis: ResumeAnalysis, jobs: Vec<RankedJob>) -> Self {
        let summary = JobSummary {
            total_jobs: jobs.len(),
            backend_scored: jobs.iter().filter(|j| j.source == ScoreSource::Backend).count(),
            locally_scored: jobs.iter().filter(|j| j.source == ScoreSource::Local).count(),
            best_match: jobs.iter().map(|j| j.match_percentage).max(),
        };

        Self {
            metadata,
            verdict: resume_verdict(analysis.score).to_string(),
            analysis,
            summary,
            jobs,
        }
    }
}

impl ScoreReport {
    pub fn new(
        metadata: ReportMetadata,
        candidate_skills: Vec<String>,
        job_skills: Vec<String>,
        breakdown: SkillMatchBreakdown,
    ) -> Self {
        Self {
            metadata,
            candidate_skills,
            job_skills,
            tier: MatchTier::from_percentage(breakdown.percentage),
            breakdown,
        }
    }
}

pub fn resume_verdict(score: u8) -> &'static str {
    match score {
        90..=u8::MAX => "Excellent resume! Very well structured and comprehensive.",
        80..=89 => "Great resume! Minor improvements could make it even better.",
        60..=79 => "Good resume! Some areas could be enhanced.",
        _ => "Your resume needs improvement. Consider adding more details.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::job_ranker::JobRanker;

    #[test]
    fn test_resume_verdicts() {
        assert!(resume_verdict(95).starts_with("Excellent"));
        assert!(resume_verdict(80).starts_with("Great"));
        assert!(resume_verdict(60).starts_with("Good"));
        assert!(resume_verdict(59).contains("needs improvement"));
    }

    #[test]
    fn test_match_report_summary() {
        let jobs = serde_json::from_value(serde_json::json!([
            {"job_id": 1, "required_skills": ["Rust"], "match_percentage": 88},
            {"job_id": 2, "required_skills": ["Rust"]}
        ]))
        .unwrap();
        let ranked = JobRanker::default().rank(&["Rust"], jobs);

        let analysis = ResumeAnalysis {
            score: 72,
            ..ResumeAnalysis::default()
        };
        let report = MatchReport::new(ReportMetadata::new("resume.txt", None), analysis, ranked);

        assert_eq!(report.summary.total_jobs, 2);
        assert_eq!(report.summary.backend_scored, 1);
        assert_eq!(report.summary.locally_scored, 1);
        assert_eq!(report.summary.best_match, Some(100));
        assert!(report.verdict.starts_with("Good"));
    }
}
