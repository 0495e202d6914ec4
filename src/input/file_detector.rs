//! File type detection

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Documents the backend parses itself
    pub fn is_uploadable(&self) -> bool {
        matches!(self, FileType::Pdf | FileType::Docx)
    }

    /// Files read locally and submitted as pasted text
    pub fn is_text(&self) -> bool {
        matches!(self, FileType::Text | FileType::Markdown)
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            FileType::Pdf => PDF_MIME,
            FileType::Docx => DOCX_MIME,
            FileType::Text => "text/plain",
            FileType::Markdown => "text/markdown",
            FileType::Unknown => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("docx"), FileType::Docx);
        assert_eq!(FileType::from_extension("markdown"), FileType::Markdown);
        assert_eq!(FileType::from_extension("doc"), FileType::Unknown);
    }

    #[test]
    fn test_upload_mime_types() {
        assert!(FileType::Pdf.is_uploadable());
        assert!(!FileType::Text.is_uploadable());
        assert_eq!(FileType::Docx.mime_type(), DOCX_MIME);
    }
}
