//! Input processing module
//! Handles file detection, résumé text loading and pre-submission validation

pub mod file_detector;
pub mod text_extractor;
pub mod manager;
pub mod upload;
pub mod validation;
