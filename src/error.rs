//! Error handling for the skill matcher application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Failure of a request to the analysis backend.
///
/// Transport failures, non-2xx responses and unreadable payloads are kept
/// apart so callers can tell "backend unreachable" from "backend said no".
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Cannot connect to the analysis backend at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server error: {status}{}", detail.as_deref().map(|d| format!(" ({})", d)).unwrap_or_default())]
    Status { status: u16, detail: Option<String> },

    #[error("Malformed response payload: {0}")]
    MalformedPayload(String),

    #[error("Analysis failed: {0}")]
    Rejected(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// True when the backend could not be reached at all.
    pub fn is_connection_issue(&self) -> bool {
        matches!(self, FetchError::Connect { .. })
    }
}

pub type Result<T> = std::result::Result<T, SkillMatcherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_includes_detail() {
        let err = FetchError::Status {
            status: 422,
            detail: Some("Text too short".to_string()),
        };
        assert_eq!(err.to_string(), "Server error: 422 (Text too short)");

        let err = FetchError::Status { status: 500, detail: None };
        assert_eq!(err.to_string(), "Server error: 500");
        assert!(!err.is_connection_issue());
    }

    #[test]
    fn test_fetch_error_wraps_transparently() {
        let err: SkillMatcherError = FetchError::Rejected("no skills".to_string()).into();
        assert_eq!(err.to_string(), "Analysis failed: no skills");
    }

    #[test]
    fn test_json_errors_convert_to_serialization() {
        let err: SkillMatcherError = serde_json::from_str::<u8>("not json").unwrap_err().into();
        assert!(matches!(err, SkillMatcherError::Serialization(_)));
    }
}
