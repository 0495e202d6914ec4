//! Payloads exchanged with the résumé analysis backend

use serde::{Deserialize, Deserializer, Serialize};

pub type JobId = u64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceInfo {
    pub years: u32,
    pub job_titles: Vec<String>,
    pub companies: Vec<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationInfo {
    pub highest_degree: Option<String>,
    pub field_of_study: Option<String>,
    pub institution: Option<String>,
    pub graduation_year: Option<i32>,
}

impl EducationInfo {
    pub fn is_empty(&self) -> bool {
        self.highest_degree.is_none() && self.field_of_study.is_none() && self.institution.is_none()
    }
}

/// Résumé analysis as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeAnalysis {
    #[serde(deserialize_with = "null_as_default")]
    pub contact: ContactInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: ExperienceInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub education: EducationInfo,
    #[serde(alias = "professional_summary", deserialize_with = "null_as_default")]
    pub summary: String,
    /// Overall résumé quality, 0-100
    #[serde(deserialize_with = "clamped_percentage")]
    pub score: u8,
    pub analysis_date: Option<String>,
}

fn default_job_type() -> String {
    "Full-time".to_string()
}

/// A job listing with its (optional) backend match score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    pub job_id: JobId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub experience_required: Option<String>,
    #[serde(default, deserialize_with = "optional_percentage")]
    pub match_percentage: Option<u8>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_job_type")]
    pub job_type: String,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub posted_date: Option<String>,
    #[serde(default)]
    pub skills_matched: Vec<String>,
    #[serde(default)]
    pub skills_missing: Vec<String>,
    #[serde(default)]
    pub experience_match: bool,
}

/// A listing entered by an employer during the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_job_type")]
    pub job_type: String,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub salary_range: Option<String>,
}

impl From<JobPosting> for JobMatch {
    fn from(posting: JobPosting) -> Self {
        Self {
            job_id: posting.id,
            title: posting.title,
            company: posting.company,
            location: posting.location,
            salary_range: posting.salary_range,
            required_skills: posting.required_skills,
            experience_required: None,
            match_percentage: None,
            description: posting.description,
            job_type: posting.job_type,
            remote: posting.remote,
            posted_date: None,
            skills_matched: Vec::new(),
            skills_missing: Vec::new(),
            experience_match: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeTextRequest<'a> {
    pub text: &'a str,
}

/// Raw response envelope of `/upload-resume` and `/analyze-text`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub analysis: Option<ResumeAnalysis>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_matches: Vec<JobMatch>,
}

/// Filters for `GET /jobs/search`; empty fields are not applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSearchQuery {
    pub skills: Vec<String>,
    pub experience: String,
    pub location: String,
}

impl JobSearchQuery {
    /// Query-string pairs; the backend expects skills comma-separated
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("skills", self.skills.join(",")),
            ("experience", self.experience.clone()),
            ("location", self.location.clone()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSearchResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub jobs: Vec<JobMatch>,
    #[serde(default)]
    pub total_found: usize,
}

/// A successful analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: ResumeAnalysis,
    pub job_matches: Vec<JobMatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// FastAPI reports either a string or a list of validation errors
    pub fn detail_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn clamp_percentage(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

fn clamped_percentage<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?
        .map(clamp_percentage)
        .unwrap_or_default())
}

fn optional_percentage<'de, D>(deserializer: D) -> std::result::Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.map(clamp_percentage))
}
