//! Résumé analysis backend: wire models and HTTP client

pub mod client;
pub mod models;

pub use client::AnalysisClient;
