//! Skill matcher: résumé analysis and skill-based job matching

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use skill_matcher::api::models::{AnalysisResult, JobPosting, JobSearchQuery};
use skill_matcher::api::AnalysisClient;
use skill_matcher::cli::{self, Cli, Commands, ConfigAction};
use skill_matcher::config::OutputFormat;
use skill_matcher::error::FetchError;
use skill_matcher::input::manager::InputManager;
use skill_matcher::input::upload::ResumeUpload;
use skill_matcher::input::validation::{parse_skill_list, validate_resume_text};
use skill_matcher::output::{
    save_report_to_file, suggest_filename, MatchReport, ReportGenerator, ReportMetadata, ScoreReport,
};
use skill_matcher::processing::job_ranker::JobRanker;
use skill_matcher::state::{Action, AppState, StatusMessage, View};
use skill_matcher::{Config, Result, SkillMatchScorer, SkillMatcherError};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // Config commands run before loading so a broken file can still be reset
    let result = match cli.command {
        Commands::Config { action } => run_config_command(action, &config_path),
        command => {
            let config = match Config::load_from(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    error!("Failed to load configuration: {}", e);
                    error!("Run `skill-matcher config reset` to restore the defaults");
                    process::exit(1);
                }
            };
            run_command(command, config, &config_path).await
        }
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Score {
            candidate,
            job,
            output,
            detailed,
        } => {
            let output_format = resolve_output_format(output.as_deref(), &config)?;
            let candidate_skills = parse_skill_list(&candidate);
            let job_skills = parse_skill_list(&job);
            debug!(
                "Scoring {} candidate skills against {} job skills",
                candidate_skills.len(),
                job_skills.len()
            );

            let scorer = SkillMatchScorer::with_weights(config.scoring_weights());
            let breakdown = scorer.explain(&candidate_skills, &job_skills);
            let report = ScoreReport::new(ReportMetadata::new("cli", None), candidate_skills, job_skills, breakdown);

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                detailed || config.output.detailed,
                true,
                true,
            );
            println!("{}", generator.generate_score_report(&report, &output_format)?);
        }

        Commands::Analyze {
            resume,
            text,
            postings,
            api_url,
            output,
            save,
            detailed,
        } => {
            if let Some(url) = api_url {
                config.api.base_url = url;
            }
            let output_format = resolve_output_format(output.as_deref(), &config)?;
            let client = AnalysisClient::new(&config.api)?;

            println!("🚀 Résumé analysis");
            println!("🌐 Backend: {}", client.base_url());

            let mut state = AppState::new();

            let (source, outcome) = match (resume, text) {
                (Some(path), _) => {
                    println!("📄 Résumé: {}", path.display());
                    let upload = ResumeUpload::from_path(&path, config.input.max_upload_bytes).await?;
                    info!("Uploading {} ({} bytes)", upload.file_name, upload.size());

                    state.apply(Action::SelectView(View::Upload));
                    state.apply(Action::UploadSelected(upload.clone()));
                    state.apply(Action::RequestStarted);
                    let outcome = with_spinner("Analyzing résumé...", client.upload_resume(&upload)).await;
                    (path, outcome)
                }
                (None, Some(path)) => {
                    println!("📝 Résumé text: {}", path.display());
                    let mut input_manager = InputManager::new();
                    let raw = input_manager.extract_text(&path).await?;
                    let resume_text =
                        validate_resume_text(&raw, config.input.min_text_chars, config.input.max_text_chars)?;

                    state.apply(Action::SelectView(View::Text));
                    state.apply(Action::TextSubmitted(resume_text.to_string()));
                    state.apply(Action::RequestStarted);
                    let outcome = with_spinner("Analyzing résumé text...", client.analyze_text(resume_text)).await;
                    (path, outcome)
                }
                (None, None) => {
                    return Err(SkillMatcherError::InvalidInput(
                        "Provide a résumé with --resume or --text".to_string(),
                    ));
                }
            };

            record_outcome(&mut state, outcome, client.base_url())?;

            if let Some(postings_path) = postings {
                for posting in load_postings(&postings_path).await? {
                    state.apply(Action::PostJob(posting));
                }
                info!("Loaded {} posted jobs", state.posted_jobs.len());
            }

            state.apply(Action::SelectView(View::Jobs));
            if state.view != View::Jobs {
                println!("⚠️  No job matches were returned for this résumé");
            }

            let ranker = JobRanker::new(SkillMatchScorer::with_weights(config.scoring_weights()));
            let ranked = state.ranked_jobs(&ranker);
            let analysis = state.analysis.take().ok_or_else(|| {
                SkillMatcherError::InvalidInput("No analysis available for this résumé".to_string())
            })?;

            let metadata = ReportMetadata::new(source.to_string_lossy(), Some(client.base_url().to_string()));
            let report = MatchReport::new(metadata, analysis, ranked);

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let formatted = generator.generate_match_report(&report, &output_format)?;

            match save {
                Some(save_path) => {
                    let target = resolve_save_path(save_path, &output_format, &source);
                    save_report_to_file(&formatted, &target)?;
                    println!("💾 Report saved to {}", target.display());
                }
                None => println!("{}", formatted),
            }
        }

        Commands::Search {
            skills,
            experience,
            location,
            api_url,
        } => {
            if let Some(url) = api_url {
                config.api.base_url = url;
            }
            let client = AnalysisClient::new(&config.api)?;
            let query = JobSearchQuery {
                skills: parse_skill_list(&skills),
                experience,
                location,
            };
            println!("🔎 Searching jobs at {}", client.base_url());

            let jobs = match with_spinner("Searching jobs...", client.search_jobs(&query)).await {
                Ok(jobs) => jobs,
                Err(e) => {
                    report_fetch_error(&e, client.base_url());
                    return Err(e.into());
                }
            };

            let ranker = JobRanker::new(SkillMatchScorer::with_weights(config.scoring_weights()));
            let ranked = ranker.rank(&query.skills, jobs);
            if ranked.is_empty() {
                println!("No matching jobs found.");
            }
            for (i, job) in ranked.iter().enumerate() {
                println!(
                    "{}. {} @ {} - {}% [{}]",
                    i + 1,
                    job.job.title,
                    job.job.company,
                    job.match_percentage,
                    job.tier
                );
            }
        }

        Commands::Health { api_url } => {
            if let Some(url) = api_url {
                config.api.base_url = url;
            }
            let client = AnalysisClient::new(&config.api)?;
            println!("🩺 Checking backend at {}", client.base_url());

            match with_spinner("Contacting backend...", client.health()).await {
                Ok(health) if health.is_healthy() => {
                    println!("✅ Backend is {}", health.status);
                    for (key, value) in &health.details {
                        println!("  • {}: {}", key, value);
                    }
                }
                Ok(health) => {
                    println!("⚠️  Backend responded with status '{}'", health.status);
                }
                Err(e) => {
                    report_fetch_error(&e, client.base_url());
                    return Err(e.into());
                }
            }
        }

        Commands::Config { action } => run_config_command(action, config_path)?,
    }

    Ok(())
}

fn run_config_command(action: Option<ConfigAction>, config_path: &Path) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let config = Config::load_from(config_path)?;
            println!("⚙️  Current Configuration\n");
            println!("File: {}", config_path.display());
            println!("Backend URL: {}", config.api.base_url);
            println!("Request Timeout: {}s", config.api.timeout_secs);
            println!("\nInput Limits:");
            println!("  Max Upload: {} MB", config.input.max_upload_bytes / (1024 * 1024));
            println!(
                "  Résumé Text: {}-{} characters",
                config.input.min_text_chars, config.input.max_text_chars
            );
            println!("\nScoring Weights:");
            println!("  Exact Match: {:.1}", config.scoring.exact_weight);
            println!("  Fuzzy Match: {:.1}", config.scoring.fuzzy_weight);
            println!("  Max Volume Ratio: {:.1}", config.scoring.max_volume_ratio);
            println!("  Volume Bonus Factor: {:.1}", config.scoring.volume_bonus_factor);
            println!(
                "\nOutput: {:?} (detailed: {}, color: {})",
                config.output.format, config.output.detailed, config.output.color_output
            );
        }

        Some(ConfigAction::Reset) => {
            println!("🔄 Resetting configuration to defaults...");
            Config::reset_at(config_path)?;
            println!("✅ Configuration reset successfully!");
        }

        Some(ConfigAction::Path) => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

fn resolve_output_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(SkillMatcherError::InvalidInput),
        None => Ok(config.output.format.clone()),
    }
}

/// Feed the backend outcome through the state and surface failures
fn record_outcome(
    state: &mut AppState,
    outcome: std::result::Result<AnalysisResult, FetchError>,
    base_url: &str,
) -> Result<()> {
    match outcome {
        Ok(result) => {
            info!(
                "Analysis complete: {} skills, {} job matches",
                result.analysis.skills.len(),
                result.job_matches.len()
            );
            state.apply(Action::AnalysisLoaded(result));
            Ok(())
        }
        Err(e) => {
            state.apply(Action::RequestFailed(StatusMessage::from(&e)));
            report_fetch_error(&e, base_url);
            Err(e.into())
        }
    }
}

fn report_fetch_error(err: &FetchError, base_url: &str) {
    println!("❌ {}", err);
    if err.is_connection_issue() {
        println!("💡 Make sure the analysis backend is running at {}", base_url);
    }
}

async fn load_postings(path: &Path) -> Result<Vec<JobPosting>> {
    let content = tokio::fs::read_to_string(path).await?;
    let postings: Vec<JobPosting> = serde_json::from_str(&content).map_err(|e| {
        SkillMatcherError::InvalidInput(format!("Invalid postings file {}: {}", path.display(), e))
    })?;
    Ok(postings)
}

/// A directory target gets a generated file name
fn resolve_save_path(save_path: PathBuf, format: &OutputFormat, source: &Path) -> PathBuf {
    if save_path.is_dir() {
        save_path.join(suggest_filename(format, &source.to_string_lossy(), true))
    } else {
        save_path
    }
}

async fn with_spinner<F, T>(message: &str, future: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|e| {
        warn!("Falling back to default spinner style: {}", e);
        ProgressStyle::default_spinner()
    });
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = future.await;
    spinner.finish_and_clear();
    result
}
