//! Résumé documents prepared for upload

use crate::error::{Result, SkillMatcherError};
use crate::input::file_detector::FileType;
use crate::input::manager::detect_file_type;
use crate::input::validation::validate_upload;
use std::path::Path;
use tokio::fs;

/// A validated PDF/DOCX document ready to be sent to `/upload-resume`
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub file_type: FileType,
    pub bytes: Vec<u8>,
}

impl ResumeUpload {
    pub fn new(file_name: impl Into<String>, file_type: FileType, bytes: Vec<u8>, max_bytes: u64) -> Result<Self> {
        validate_upload(file_type, bytes.len() as u64, max_bytes)?;
        Ok(Self {
            file_name: file_name.into(),
            file_type,
            bytes,
        })
    }

    /// Read and validate a document from disk
    pub async fn from_path(path: &Path, max_bytes: u64) -> Result<Self> {
        let file_type = detect_file_type(path)?;

        // Check type and size before reading the whole file
        let metadata = fs::metadata(path).await?;
        validate_upload(file_type, metadata.len(), max_bytes)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| SkillMatcherError::InvalidInput(format!("Not a file: {}", path.display())))?;

        let bytes = fs::read(path).await?;
        Self::new(file_name, file_type, bytes, max_bytes)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_from_path_reads_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.pdf");
        std::fs::write(&path, b"%PDF-1.4 fake").unwrap();

        let upload = ResumeUpload::from_path(&path, 1024).await.unwrap();
        assert_eq!(upload.file_name, "resume.pdf");
        assert_eq!(upload.file_type, FileType::Pdf);
        assert_eq!(upload.size(), 13);
    }

    #[tokio::test]
    async fn test_from_path_rejects_oversized_and_wrong_type() {
        let temp_dir = TempDir::new().unwrap();
        let big = temp_dir.path().join("resume.docx");
        std::fs::write(&big, vec![0u8; 2048]).unwrap();
        assert!(ResumeUpload::from_path(&big, 1024).await.is_err());

        let text = temp_dir.path().join("resume.txt");
        std::fs::write(&text, "plain").unwrap();
        assert!(matches!(
            ResumeUpload::from_path(&text, 1024).await,
            Err(SkillMatcherError::UnsupportedFormat(_))
        ));
    }
}
