//! Application state container driven by explicit actions

use crate::api::models::{AnalysisResult, JobId, JobMatch, JobPosting, ResumeAnalysis};
use crate::error::FetchError;
use crate::input::upload::ResumeUpload;
use crate::processing::job_ranker::{JobRanker, RankedJob};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Upload,
    Text,
    Analysis,
    Jobs,
}

/// A user-facing error with a flag for "backend unreachable"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub connection_issue: bool,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            connection_issue: false,
        }
    }
}

impl From<&FetchError> for StatusMessage {
    fn from(err: &FetchError) -> Self {
        Self {
            text: err.to_string(),
            connection_issue: err.is_connection_issue(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    SelectView(View),
    UploadSelected(ResumeUpload),
    TextSubmitted(String),
    RequestStarted,
    AnalysisLoaded(AnalysisResult),
    RequestFailed(StatusMessage),
    PostJob(JobPosting),
    RemovePostedJob(JobId),
    DismissError,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: View,
    pub upload: Option<ResumeUpload>,
    pub resume_text: String,
    /// `None` until an analysis has been performed
    pub analysis: Option<ResumeAnalysis>,
    pub backend_jobs: Vec<JobMatch>,
    pub posted_jobs: Vec<JobPosting>,
    pub loading: bool,
    pub error: Option<StatusMessage>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SelectView(view) => {
                if self.view_available(view) {
                    self.view = view;
                } else {
                    debug!("Ignoring navigation to unavailable view {:?}", view);
                }
            }
            Action::UploadSelected(upload) => {
                self.upload = Some(upload);
                self.error = None;
            }
            Action::TextSubmitted(text) => {
                self.resume_text = text;
                self.error = None;
            }
            Action::RequestStarted => {
                self.loading = true;
                self.error = None;
            }
            Action::AnalysisLoaded(result) => {
                self.analysis = Some(result.analysis);
                self.backend_jobs = result.job_matches;
                self.loading = false;
                self.error = None;
                self.view = View::Analysis;
            }
            Action::RequestFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            Action::PostJob(posting) => {
                self.posted_jobs.retain(|p| p.id != posting.id);
                self.posted_jobs.push(posting);
            }
            Action::RemovePostedJob(id) => {
                self.posted_jobs.retain(|p| p.id != id);
                if self.view == View::Jobs && !self.view_available(View::Jobs) {
                    self.view = View::Upload;
                }
            }
            Action::DismissError => self.error = None,
        }
    }

    pub fn view_available(&self, view: View) -> bool {
        match view {
            View::Upload | View::Text => true,
            View::Analysis => self.analysis.is_some(),
            View::Jobs => self.job_count() > 0,
        }
    }

    pub fn job_count(&self) -> usize {
        self.backend_jobs.len() + self.posted_jobs.len()
    }

    pub fn candidate_skills(&self) -> &[String] {
        self.analysis.as_ref().map(|a| a.skills.as_slice()).unwrap_or(&[])
    }

    /// Backend matches and posted jobs, ranked against the analysed skills
    pub fn ranked_jobs(&self, ranker: &JobRanker) -> Vec<RankedJob> {
        ranker.rank_with_postings(
            self.candidate_skills(),
            self.backend_jobs.clone(),
            self.posted_jobs.clone(),
        )
    }

    pub fn has_connection_issue(&self) -> bool {
        self.error.as_ref().is_some_and(|e| e.connection_issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::job_ranker::ScoreSource;

    fn posting(id: JobId, skills: &[&str]) -> JobPosting {
        JobPosting {
            id,
            title: format!("Posting {}", id),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            description: String::new(),
            job_type: "Full-time".to_string(),
            remote: true,
            salary_range: None,
        }
    }

    fn loaded(skills: &[&str], jobs: Vec<JobMatch>) -> AnalysisResult {
        AnalysisResult {
            analysis: ResumeAnalysis {
                skills: skills.iter().map(|s| s.to_string()).collect(),
                ..ResumeAnalysis::default()
            },
            job_matches: jobs,
        }
    }

    #[test]
    fn test_navigation_guards() {
        let mut state = AppState::new();
        assert_eq!(state.view, View::Upload);

        state.apply(Action::SelectView(View::Analysis));
        assert_eq!(state.view, View::Upload);
        state.apply(Action::SelectView(View::Jobs));
        assert_eq!(state.view, View::Upload);

        state.apply(Action::SelectView(View::Text));
        assert_eq!(state.view, View::Text);
    }

    #[test]
    fn test_analysis_loaded_switches_view() {
        let mut state = AppState::new();
        state.apply(Action::RequestStarted);
        assert!(state.loading);

        state.apply(Action::AnalysisLoaded(loaded(&["React"], Vec::new())));
        assert!(!state.loading);
        assert_eq!(state.view, View::Analysis);
        assert!(!state.view_available(View::Jobs));
    }

    #[test]
    fn test_request_failure_records_error() {
        let mut state = AppState::new();
        state.apply(Action::RequestStarted);
        state.apply(Action::RequestFailed(StatusMessage {
            text: "Cannot connect".to_string(),
            connection_issue: true,
        }));
        assert!(!state.loading);
        assert!(state.has_connection_issue());
        assert!(state.analysis.is_none());

        state.apply(Action::DismissError);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_posted_jobs_are_scored_locally() {
        let mut state = AppState::new();
        state.apply(Action::AnalysisLoaded(loaded(&["React", "Node.js"], Vec::new())));
        state.apply(Action::PostJob(posting(100, &["React", "Node"])));
        state.apply(Action::PostJob(posting(101, &["Figma"])));

        assert!(state.view_available(View::Jobs));
        state.apply(Action::SelectView(View::Jobs));
        assert_eq!(state.view, View::Jobs);

        let ranked = state.ranked_jobs(&JobRanker::default());
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].job.job_id, 100);
        assert_eq!(ranked[0].source, ScoreSource::Local);
        // React exact + Node fuzzy = 1.8 of 2
        assert_eq!(ranked[0].match_percentage, 90);
        // No overlap, but two candidate skills for one required: +5 volume bonus
        assert_eq!(ranked[1].match_percentage, 5);
    }

    #[test]
    fn test_posted_id_shared_with_backend_job_is_scored_locally() {
        let backend: JobMatch = serde_json::from_value(serde_json::json!({
            "job_id": 1, "title": "Legacy Systems", "required_skills": ["Cobol"], "match_percentage": 12
        }))
        .unwrap();

        let mut state = AppState::new();
        state.apply(Action::AnalysisLoaded(loaded(&["React"], vec![backend])));
        state.apply(Action::PostJob(posting(1, &["React"])));

        let ranked = state.ranked_jobs(&JobRanker::default());
        assert_eq!(ranked[0].job.title, "Posting 1");
        assert_eq!(ranked[0].source, ScoreSource::Local);
        assert_eq!(ranked[0].match_percentage, 100);
        assert_eq!(ranked[1].source, ScoreSource::Backend);
        assert_eq!(ranked[1].match_percentage, 12);
    }

    #[test]
    fn test_reposting_replaces_and_removal_leaves_jobs_view() {
        let mut state = AppState::new();
        state.apply(Action::PostJob(posting(7, &["Rust"])));
        state.apply(Action::PostJob(posting(7, &["Go"])));
        assert_eq!(state.posted_jobs.len(), 1);
        assert_eq!(state.posted_jobs[0].required_skills, vec!["Go"]);

        state.apply(Action::SelectView(View::Jobs));
        assert_eq!(state.view, View::Jobs);
        state.apply(Action::RemovePostedJob(7));
        assert_eq!(state.view, View::Upload);
    }
}
