//! HTTP client for the résumé analysis backend

use crate::api::models::{
    AnalysisResponse, AnalysisResult, AnalyzeTextRequest, ErrorBody, HealthStatus, JobMatch, JobSearchQuery,
    JobSearchResponse,
};
use crate::config::ApiConfig;
use crate::error::{FetchError, Result, SkillMatcherError};
use crate::input::upload::ResumeUpload;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for `POST /upload-resume`, `POST /analyze-text`, `GET /jobs/search`
/// and `GET /health`.
///
/// Each call issues exactly one request. There is no retry; a failure is
/// reported as a [`FetchError`] describing whether the backend was
/// unreachable, answered with an error status, or sent an unreadable body.
pub struct AnalysisClient {
    base_url: String,
    client: Client,
}

impl AnalysisClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SkillMatcherError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Submit pasted résumé text for analysis
    pub async fn analyze_text(&self, text: &str) -> std::result::Result<AnalysisResult, FetchError> {
        let url = self.endpoint("/analyze-text");
        let body = AnalyzeTextRequest { text: text.trim() };
        info!("Submitting {} characters of resume text to {}", body.text.len(), url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|source| FetchError::Connect { url: url.clone(), source })?;

        Self::into_analysis(response).await
    }

    /// Upload a résumé document (PDF or DOCX) as multipart form data
    pub async fn upload_resume(&self, upload: &ResumeUpload) -> std::result::Result<AnalysisResult, FetchError> {
        let url = self.endpoint("/upload-resume");
        info!("Uploading {} ({} bytes) to {}", upload.file_name, upload.size(), url);

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(upload.file_type.mime_type())
            .map_err(|e| FetchError::InvalidRequest(format!("Invalid upload content type: {}", e)))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|source| FetchError::Connect { url: url.clone(), source })?;

        Self::into_analysis(response).await
    }

    /// Search the backend's job listings by skills, experience and location
    pub async fn search_jobs(&self, query: &JobSearchQuery) -> std::result::Result<Vec<JobMatch>, FetchError> {
        let url = self.endpoint("/jobs/search");
        debug!("Searching jobs at {} with {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(&query.to_params())
            .send()
            .await
            .map_err(|source| FetchError::Connect { url: url.clone(), source })?;

        let response = Self::check_status(response).await?;
        let envelope: JobSearchResponse = Self::parse_json(response).await?;
        if !envelope.success {
            return Err(FetchError::Rejected("Job search failed".to_string()));
        }

        info!("Job search returned {} of {} listings", envelope.jobs.len(), envelope.total_found);
        Ok(envelope.jobs)
    }

    /// Query the backend's health endpoint
    pub async fn health(&self) -> std::result::Result<HealthStatus, FetchError> {
        let url = self.endpoint("/health");
        debug!("Checking backend health at {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Connect { url: url.clone(), source })?;

        let response = Self::check_status(response).await?;
        Self::parse_json(response).await
    }

    async fn into_analysis(response: Response) -> std::result::Result<AnalysisResult, FetchError> {
        let response = Self::check_status(response).await?;
        let envelope: AnalysisResponse = Self::parse_json(response).await?;

        if !envelope.success {
            let message = envelope.message.unwrap_or_else(|| "Analysis failed".to_string());
            warn!("Backend rejected analysis: {}", message);
            return Err(FetchError::Rejected(message));
        }

        let analysis = envelope
            .analysis
            .ok_or_else(|| FetchError::MalformedPayload("response is missing the analysis object".to_string()))?;

        debug!(
            "Analysis received: {} skills, {} job matches",
            analysis.skills.len(),
            envelope.job_matches.len()
        );

        Ok(AnalysisResult {
            analysis,
            job_matches: envelope.job_matches,
        })
    }

    async fn check_status(response: Response) -> std::result::Result<Response, FetchError> {
        let status = response.status();
        debug!("Response status: {}", status);
        if status.is_success() {
            return Ok(response);
        }

        // Error bodies are optional; an unreadable one just loses the detail
        let detail = match response.text().await {
            Ok(text) => serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.detail_message()),
            Err(_) => None,
        };

        Err(FetchError::Status {
            status: status.as_u16(),
            detail,
        })
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> std::result::Result<T, FetchError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::MalformedPayload(format!("failed to read response body: {}", e)))?;

        serde_json::from_slice(&bytes).map_err(|e| FetchError::MalformedPayload(e.to_string()))
    }
}
