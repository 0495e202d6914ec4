//! CLI interface for the skill matcher

use crate::config::OutputFormat;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-matcher")]
#[command(about = "Résumé analysis and skill-based job matching")]
#[command(long_about = "Score candidate skills against job requirements, and rank job listings for a résumé analysed by the backend service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a candidate's skills against one job's required skills
    Score {
        /// Candidate skills, separated by commas, semicolons, pipes or newlines
        #[arg(short = 'k', long)]
        candidate: String,

        /// Required job skills, same separators as --candidate
        #[arg(short, long)]
        job: String,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Show the per-skill breakdown and calculation
        #[arg(short, long)]
        detailed: bool,
    },

    /// Analyse a résumé with the backend and rank job matches
    #[command(group(ArgGroup::new("source").required(true).args(["resume", "text"])))]
    Analyze {
        /// Résumé file to upload (PDF or DOCX)
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Résumé text file to submit (TXT or MD)
        #[arg(short, long)]
        text: Option<PathBuf>,

        /// JSON file with additional job postings to rank locally
        #[arg(short, long)]
        postings: Option<PathBuf>,

        /// Backend base URL, overriding the config file
        #[arg(long)]
        api_url: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// Search the backend's job listings
    Search {
        /// Skills to search for, separated by commas, semicolons, pipes or newlines
        #[arg(short = 'k', long, default_value = "")]
        skills: String,

        /// Experience level filter
        #[arg(short, long, default_value = "")]
        experience: String,

        /// Location filter (remote jobs always match)
        #[arg(short, long, default_value = "")]
        location: String,

        /// Backend base URL, overriding the config file
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Check that the analysis backend is reachable
    Health {
        /// Backend base URL, overriding the config file
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}
