//! Job ranking with backend-score precedence and local fallback scoring

use crate::api::models::{JobId, JobMatch, JobPosting};
use crate::processing::skill_matcher::SkillMatchScorer;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreSource {
    Backend,
    Local,
}

/// Where a listing came from. Posted jobs have their own id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobOrigin {
    Backend,
    Posted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchTier {
    Fair,
    Good,
    Strong,
    Excellent,
}

impl MatchTier {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            90..=u8::MAX => MatchTier::Excellent,
            80..=89 => MatchTier::Strong,
            70..=79 => MatchTier::Good,
            _ => MatchTier::Fair,
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchTier::Excellent => "Excellent",
            MatchTier::Strong => "Strong",
            MatchTier::Good => "Good",
            MatchTier::Fair => "Fair",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedJob {
    pub job: JobMatch,
    pub origin: JobOrigin,
    pub match_percentage: u8,
    pub source: ScoreSource,
    pub tier: MatchTier,
    /// Required skills the candidate covers, as shown in the job card
    pub highlighted_skills: Vec<String>,
}

/// Orders jobs by match percentage.
///
/// A backend entry keeps its own `match_percentage`. A backend entry without
/// one takes the first score the backend gave its `job_id`, and is scored
/// locally only if the backend never scored that id. Posted jobs are always
/// scored locally; their ids never collide with backend ids.
pub struct JobRanker {
    scorer: SkillMatchScorer,
}

impl JobRanker {
    pub fn new(scorer: SkillMatchScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &SkillMatchScorer {
        &self.scorer
    }

    /// Rank backend matches only
    pub fn rank<S: AsRef<str>>(&self, candidate_skills: &[S], jobs: Vec<JobMatch>) -> Vec<RankedJob> {
        self.rank_with_postings(candidate_skills, jobs, Vec::new())
    }

    /// Rank backend matches together with employer-posted jobs
    pub fn rank_with_postings<S: AsRef<str>>(
        &self,
        candidate_skills: &[S],
        backend_jobs: Vec<JobMatch>,
        posted_jobs: Vec<JobPosting>,
    ) -> Vec<RankedJob> {
        let mut backend_scores: HashMap<JobId, u8> = HashMap::new();
        for job in &backend_jobs {
            if let Some(percentage) = job.match_percentage {
                backend_scores.entry(job.job_id).or_insert(percentage);
            }
        }

        let entries = backend_jobs
            .into_iter()
            .map(|job| (JobOrigin::Backend, job))
            .chain(posted_jobs.into_iter().map(|posting| (JobOrigin::Posted, JobMatch::from(posting))));

        let mut ranked: Vec<RankedJob> = entries
            .map(|(origin, job)| {
                let backend_score = match origin {
                    JobOrigin::Backend => job
                        .match_percentage
                        .or_else(|| backend_scores.get(&job.job_id).copied()),
                    JobOrigin::Posted => None,
                };

                let (match_percentage, source) = match backend_score {
                    Some(percentage) => (percentage.min(100), ScoreSource::Backend),
                    None => {
                        let percentage = self.scorer.score(candidate_skills, &job.required_skills);
                        debug!(
                            "No backend score for {:?} job {}; local score {}%",
                            origin, job.job_id, percentage
                        );
                        (percentage, ScoreSource::Local)
                    }
                };

                let highlighted_skills = job
                    .required_skills
                    .iter()
                    .filter(|skill| skill_highlighted(candidate_skills, skill))
                    .cloned()
                    .collect();

                RankedJob {
                    tier: MatchTier::from_percentage(match_percentage),
                    job,
                    origin,
                    match_percentage,
                    source,
                    highlighted_skills,
                }
            })
            .collect();

        // Stable: equal percentages keep their input order
        ranked.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        ranked
    }
}

impl Default for JobRanker {
    fn default() -> Self {
        Self::new(SkillMatchScorer::default())
    }
}

/// Whether a required skill is shown as covered: any candidate skill
/// contains it, or is contained by it, ignoring case.
pub fn skill_highlighted<S: AsRef<str>>(candidate_skills: &[S], job_skill: &str) -> bool {
    let job_skill = job_skill.trim().to_lowercase();
    if job_skill.is_empty() {
        return false;
    }

    candidate_skills.iter().any(|candidate| {
        let candidate = candidate.as_ref().trim().to_lowercase();
        !candidate.is_empty() && (candidate.contains(&job_skill) || job_skill.contains(&candidate))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: JobId, skills: &[&str], percentage: Option<u8>) -> JobMatch {
        serde_json::from_value(serde_json::json!({
            "job_id": id,
            "title": format!("Job {}", id),
            "required_skills": skills,
            "match_percentage": percentage,
        }))
        .unwrap()
    }

    #[test]
    fn test_backend_score_is_preferred() {
        let ranker = JobRanker::default();
        let ranked = ranker.rank(&["React"], vec![job(1, &["React"], Some(42))]);
        assert_eq!(ranked[0].match_percentage, 42);
        assert_eq!(ranked[0].source, ScoreSource::Backend);
    }

    #[test]
    fn test_local_fallback_when_backend_silent() {
        let ranker = JobRanker::default();
        let ranked = ranker.rank(&["React"], vec![job(2, &["React.js"], None)]);
        assert_eq!(ranked[0].match_percentage, 80);
        assert_eq!(ranked[0].source, ScoreSource::Local);
    }

    #[test]
    fn test_backend_score_wins_for_same_job_id() {
        let ranker = JobRanker::default();
        let ranked = ranker.rank(
            &["React"],
            vec![job(3, &["Cobol"], Some(91)), job(3, &["React"], None)],
        );
        assert!(ranked.iter().all(|r| r.match_percentage == 91 && r.source == ScoreSource::Backend));
    }

    #[test]
    fn test_own_backend_score_wins_over_duplicate_id() {
        let ranker = JobRanker::default();
        let ranked = ranker.rank(
            &["React"],
            vec![job(3, &["Cobol"], Some(91)), job(3, &["React"], Some(40)), job(3, &["Go"], Some(55))],
        );
        let scores: Vec<u8> = ranked.iter().map(|r| r.match_percentage).collect();
        assert_eq!(scores, vec![91, 55, 40]);
    }

    #[test]
    fn test_first_backend_score_fills_unscored_duplicate() {
        let ranker = JobRanker::default();
        let ranked = ranker.rank(
            &["React"],
            vec![job(4, &[], Some(30)), job(4, &[], Some(60)), job(4, &["React"], None)],
        );
        assert_eq!(ranked.last().map(|r| r.match_percentage), Some(30));
        assert!(ranked.iter().all(|r| r.source == ScoreSource::Backend));
    }

    #[test]
    fn test_posted_job_never_takes_backend_score() {
        let ranker = JobRanker::default();
        let posting = JobPosting {
            id: 1,
            title: "Employer React role".to_string(),
            company: "Acme".to_string(),
            location: String::new(),
            required_skills: vec!["React".to_string()],
            description: String::new(),
            job_type: "Full-time".to_string(),
            remote: false,
            salary_range: None,
        };

        let ranked = ranker.rank_with_postings(&["React"], vec![job(1, &["Cobol"], Some(12))], vec![posting]);

        assert_eq!(ranked[0].origin, JobOrigin::Posted);
        assert_eq!(ranked[0].source, ScoreSource::Local);
        assert_eq!(ranked[0].match_percentage, 100);
        assert_eq!(ranked[1].origin, JobOrigin::Backend);
        assert_eq!(ranked[1].match_percentage, 12);
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let ranker = JobRanker::default();
        let ranked = ranker.rank(
            &["Python"],
            vec![
                job(1, &[], Some(70)),
                job(2, &[], Some(95)),
                job(3, &[], Some(70)),
                job(4, &["Python"], None),
            ],
        );
        let order: Vec<JobId> = ranked.iter().map(|r| r.job.job_id).collect();
        assert_eq!(order, vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_match_tiers() {
        assert_eq!(MatchTier::from_percentage(100), MatchTier::Excellent);
        assert_eq!(MatchTier::from_percentage(90), MatchTier::Excellent);
        assert_eq!(MatchTier::from_percentage(85), MatchTier::Strong);
        assert_eq!(MatchTier::from_percentage(70), MatchTier::Good);
        assert_eq!(MatchTier::from_percentage(69), MatchTier::Fair);
    }

    #[test]
    fn test_skill_highlighting() {
        let skills = ["JavaScript", "React Native"];
        assert!(skill_highlighted(&skills, "react"));
        assert!(skill_highlighted(&skills, "Java"));
        assert!(!skill_highlighted(&skills, "Docker"));
        assert!(!skill_highlighted(&skills, "  "));

        let ranked = JobRanker::default().rank(&skills, vec![job(5, &["React", "Docker"], None)]);
        assert_eq!(ranked[0].highlighted_skills, vec!["React"]);
    }
}
