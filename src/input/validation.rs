//! Checks applied before anything is sent to the analysis backend

use crate::error::{Result, SkillMatcherError};
use crate::input::file_detector::FileType;

/// Validate a document selected for upload.
pub fn validate_upload(file_type: FileType, size: u64, max_bytes: u64) -> Result<()> {
    if !file_type.is_uploadable() {
        return Err(SkillMatcherError::UnsupportedFormat(
            "Please upload a PDF or DOCX file".to_string(),
        ));
    }

    if size > max_bytes {
        return Err(SkillMatcherError::InvalidInput(format!(
            "File size too large. Maximum {}MB allowed.",
            max_bytes / (1024 * 1024)
        )));
    }

    Ok(())
}

/// Validate pasted résumé text and return it trimmed.
///
/// Lengths are counted in characters, not bytes.
pub fn validate_resume_text(text: &str, min_chars: usize, max_chars: usize) -> Result<&str> {
    let trimmed = text.trim();
    let length = trimmed.chars().count();

    if length == 0 {
        return Err(SkillMatcherError::InvalidInput("Please enter resume text".to_string()));
    }
    if length < min_chars {
        return Err(SkillMatcherError::InvalidInput(format!(
            "Resume text is too short ({} characters). Please provide at least {} characters.",
            length, min_chars
        )));
    }
    if length > max_chars {
        return Err(SkillMatcherError::InvalidInput(format!(
            "Resume text is too long ({} characters). Maximum {} characters allowed.",
            length, max_chars
        )));
    }

    Ok(trimmed)
}

/// Split a free-form skill list on commas, semicolons, pipes and newlines.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| matches!(c, ',' | ';' | '|' | '\n'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
