//! Output formatters for console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::*;
use crate::processing::job_ranker::{JobOrigin, MatchTier, RankedJob, ScoreSource};
use crate::processing::skill_matcher::{MatchKind, SkillMatch};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting reports
pub trait OutputFormatter {
    fn format_match_report(&self, report: &MatchReport) -> Result<String>;
    fn format_score_report(&self, report: &ScoreReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_tier_badge(&self, tier: MatchTier) -> String {
        let color = match tier {
            MatchTier::Excellent => Color::Green,
            MatchTier::Strong => Color::BrightGreen,
            MatchTier::Good => Color::Yellow,
            MatchTier::Fair => Color::White,
        };
        let badge = tier.to_string().to_uppercase();

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_resume_score(&self, score: u8) -> String {
        let color = match score {
            80..=u8::MAX => Color::Green,
            60..=79 => Color::Yellow,
            _ => Color::Red,
        };
        self.colorize(&format!("{}/100", score), color)
    }

    fn format_job(&self, index: usize, ranked: &RankedJob) -> String {
        let job = &ranked.job;
        let mut output = format!(
            "{}. {} @ {} - {}% {}{}{}\n",
            index,
            self.colorize(&job.title, Color::Cyan),
            job.company,
            ranked.match_percentage,
            self.format_tier_badge(ranked.tier),
            match ranked.source {
                ScoreSource::Backend => "",
                ScoreSource::Local => " (local score)",
            },
            match ranked.origin {
                JobOrigin::Backend => "",
                JobOrigin::Posted => " [posted]",
            }
        );

        let mut details = vec![];
        if !job.location.is_empty() {
            details.push(format!("📍 {}", job.location));
        }
        if let Some(experience) = &job.experience_required {
            details.push(format!("🕒 {}", experience));
        }
        if let Some(salary) = &job.salary_range {
            details.push(format!("💰 {}", salary));
        }
        if job.remote {
            details.push("🏠 Remote".to_string());
        }
        if !details.is_empty() {
            output.push_str(&format!("   {}\n", details.join(" | ")));
        }

        if !job.required_skills.is_empty() {
            let skills: Vec<String> = job
                .required_skills
                .iter()
                .map(|skill| {
                    if ranked.highlighted_skills.contains(skill) {
                        self.colorize(&format!("✓{}", skill), Color::Green)
                    } else {
                        skill.clone()
                    }
                })
                .collect();
            output.push_str(&format!("   Skills: {}\n", skills.join(", ")));
        }

        if self.detailed && !job.description.is_empty() {
            output.push_str(&format!("   {}\n", job.description));
        }

        output
    }

    fn format_skill_match(&self, skill_match: &SkillMatch) -> String {
        match skill_match.kind {
            MatchKind::Exact => format!(
                "  {} {} (exact: {})\n",
                self.colorize("✓", Color::Green),
                skill_match.job_skill,
                skill_match.matched_by.as_deref().unwrap_or_default()
            ),
            MatchKind::Fuzzy => format!(
                "  {} {} (fuzzy: {})\n",
                self.colorize("~", Color::Yellow),
                skill_match.job_skill,
                skill_match.matched_by.as_deref().unwrap_or_default()
            ),
            MatchKind::Missing => format!("  {} {}\n", self.colorize("✗", Color::Red), skill_match.job_skill),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_match_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let analysis = &report.analysis;

        output.push_str(&self.format_header("📊 RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Source: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.source
        ));

        output.push_str(&self.format_header("Resume Score", 2));
        output.push_str(&format!("Score: {}\n", self.format_resume_score(analysis.score)));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&report.verdict, Color::Cyan)));

        let contact = &analysis.contact;
        let contact_lines: Vec<String> = [
            ("👤", &contact.name),
            ("📧", &contact.email),
            ("📞", &contact.phone),
            ("📍", &contact.location),
        ]
        .into_iter()
        .filter_map(|(icon, value)| value.as_deref().map(|v| format!("{} {}", icon, v)))
        .collect();
        if !contact_lines.is_empty() {
            output.push_str(&self.format_header("Contact", 3));
            for line in contact_lines {
                output.push_str(&format!("{}\n", line));
            }
        }

        output.push_str(&self.format_header(&format!("Technical Skills ({})", analysis.skills.len()), 3));
        if analysis.skills.is_empty() {
            output.push_str("No technical skills detected. Try including programming languages, frameworks, or tools in your resume.\n");
        } else {
            output.push_str(&format!("{}\n", analysis.skills.join(", ")));
        }

        let experience = &analysis.experience;
        output.push_str(&self.format_header("Experience", 3));
        output.push_str(&format!(
            "{} years{}\n",
            experience.years,
            experience.level.as_ref().map(|l| format!(" ({})", l)).unwrap_or_default()
        ));
        if self.detailed {
            if !experience.job_titles.is_empty() {
                output.push_str(&format!("Titles: {}\n", experience.job_titles.join(", ")));
            }
            if !experience.companies.is_empty() {
                output.push_str(&format!("Companies: {}\n", experience.companies.join(", ")));
            }
        }

        let education = &analysis.education;
        output.push_str(&self.format_header("Education", 3));
        if education.is_empty() {
            output.push_str("No education information detected.\n");
        } else {
            if let Some(degree) = &education.highest_degree {
                output.push_str(&format!("Degree: {}\n", degree));
            }
            if let Some(field) = &education.field_of_study {
                output.push_str(&format!("Field of Study: {}\n", field));
            }
            if let Some(institution) = &education.institution {
                output.push_str(&format!("Institution: {}\n", institution));
            }
            if let Some(year) = education.graduation_year {
                output.push_str(&format!("Graduation: {}\n", year));
            }
        }

        if self.detailed && !analysis.summary.is_empty() {
            output.push_str(&self.format_header("Summary", 3));
            output.push_str(&format!("{}\n", analysis.summary));
        }

        output.push_str(&self.format_header(&format!("💼 Job Matches ({})", report.summary.total_jobs), 2));
        if report.jobs.is_empty() {
            output.push_str("No matching jobs found.\n");
        }
        for (i, ranked) in report.jobs.iter().enumerate() {
            output.push_str(&self.format_job(i + 1, ranked));
        }

        if self.detailed {
            output.push_str(&format!(
                "\nScored by backend: {} | scored locally: {}\n",
                report.summary.backend_scored, report.summary.locally_scored
            ));
        }

        Ok(output)
    }

    fn format_score_report(&self, report: &ScoreReport) -> Result<String> {
        let breakdown = &report.breakdown;
        let mut output = String::new();

        output.push_str(&self.format_header("🎯 SKILL MATCH", 1));
        output.push_str(&format!(
            "Match: {}% {}\n",
            breakdown.percentage,
            self.format_tier_badge(report.tier)
        ));
        output.push_str(&format!(
            "Covered: {} exact, {} fuzzy, {} missing of {} required\n",
            breakdown.count_of(MatchKind::Exact),
            breakdown.count_of(MatchKind::Fuzzy),
            breakdown.count_of(MatchKind::Missing),
            breakdown.total_required
        ));

        output.push_str(&self.format_header("Required Skills", 3));
        for skill_match in &breakdown.matches {
            output.push_str(&self.format_skill_match(skill_match));
        }

        if self.detailed {
            output.push_str(&self.format_header("Calculation", 3));
            output.push_str(&format!(
                "Matched credit: {:.1} / {}\n",
                breakdown.matched_credit, breakdown.total_required
            ));
            output.push_str(&format!("Base score: {:.1}%\n", breakdown.base_score));
            output.push_str(&format!(
                "Volume bonus: {:+.1} ({} candidate skills)\n",
                breakdown.volume_bonus, breakdown.candidate_count
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_match_report(&self, report: &MatchReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_score_report(&self, report: &ScoreReport) -> Result<String> {
        self.to_json(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn metadata_line(&self, metadata: &ReportMetadata) -> String {
        if !self.include_metadata {
            return String::new();
        }
        format!(
            "**Generated:** {} | **Source:** `{}`\n\n",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            metadata.source
        )
    }

    fn markdown_tier_badge(tier: MatchTier) -> &'static str {
        match tier {
            MatchTier::Excellent => "🟢 Excellent",
            MatchTier::Strong => "🟡 Strong",
            MatchTier::Good => "🟠 Good",
            MatchTier::Fair => "⚪ Fair",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_match_report(&self, report: &MatchReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::from("# 📊 Resume Analysis Report\n\n");
        output.push_str(&self.metadata_line(&report.metadata));

        output.push_str("## Resume Score\n\n");
        output.push_str(&format!("**Score:** {}/100\n\n", analysis.score));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict));

        output.push_str(&format!("## Technical Skills ({})\n\n", analysis.skills.len()));
        if analysis.skills.is_empty() {
            output.push_str("_No technical skills detected._\n\n");
        } else {
            for skill in &analysis.skills {
                output.push_str(&format!("- {}\n", skill));
            }
            output.push('\n');
        }

        output.push_str(&format!("## 💼 Job Matches ({})\n\n", report.summary.total_jobs));
        if report.jobs.is_empty() {
            output.push_str("_No matching jobs found._\n");
        } else {
            output.push_str("| # | Job | Company | Match | Tier | Score Source |\n");
            output.push_str("|---|-----|---------|-------|------|--------------|\n");
            for (i, ranked) in report.jobs.iter().enumerate() {
                output.push_str(&format!(
                    "| {} | {} | {} | {}% | {} | {} |\n",
                    i + 1,
                    ranked.job.title,
                    ranked.job.company,
                    ranked.match_percentage,
                    Self::markdown_tier_badge(ranked.tier),
                    match ranked.source {
                        ScoreSource::Backend => "backend",
                        ScoreSource::Local => "local",
                    }
                ));
            }
        }

        Ok(output)
    }

    fn format_score_report(&self, report: &ScoreReport) -> Result<String> {
        let breakdown = &report.breakdown;
        let mut output = String::from("# 🎯 Skill Match\n\n");
        output.push_str(&self.metadata_line(&report.metadata));
        output.push_str(&format!(
            "**Match:** {}% {}\n\n",
            breakdown.percentage,
            Self::markdown_tier_badge(report.tier)
        ));

        output.push_str("| Required Skill | Result | Matched By |\n");
        output.push_str("|----------------|--------|------------|\n");
        for skill_match in &breakdown.matches {
            let result = match skill_match.kind {
                MatchKind::Exact => "✅ exact",
                MatchKind::Fuzzy => "🟡 fuzzy",
                MatchKind::Missing => "❌ missing",
            };
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                skill_match.job_skill,
                result,
                skill_match.matched_by.as_deref().unwrap_or("-")
            ));
        }

        output.push_str(&format!(
            "\nBase score {:.1}%, volume bonus {:+.1}.\n",
            breakdown.base_score, breakdown.volume_bonus
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    fn formatter(&self, format: &OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_match_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_match_report(report)
    }

    pub fn generate_score_report(&self, report: &ScoreReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_score_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, source_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_matches{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_matches{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_matches{}.md", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::ResumeAnalysis;
    use crate::processing::job_ranker::JobRanker;
    use crate::processing::skill_matcher::SkillMatchScorer;

    fn score_report() -> ScoreReport {
        let candidate = vec!["React".to_string(), "Python".to_string()];
        let job = vec!["React.js".to_string(), "Python".to_string(), "AWS".to_string()];
        let breakdown = SkillMatchScorer::new().explain(&candidate, &job);
        ScoreReport::new(ReportMetadata::new("cli", None), candidate, job, breakdown)
    }

    fn match_report() -> MatchReport {
        let jobs = serde_json::from_value(serde_json::json!([
            {"job_id": 1, "title": "Frontend Developer", "company": "StartupXYZ",
             "required_skills": ["React", "CSS"], "match_percentage": 92, "remote": true},
            {"job_id": 2, "title": "Data Scientist", "company": "AI Innovations",
             "required_skills": ["Python", "SQL"]}
        ]))
        .unwrap();
        let analysis = ResumeAnalysis {
            skills: vec!["React".to_string(), "Python".to_string()],
            score: 84,
            ..ResumeAnalysis::default()
        };
        let ranked = JobRanker::default().rank(&analysis.skills, jobs);
        MatchReport::new(ReportMetadata::new("resume.md", None), analysis, ranked)
    }

    #[test]
    fn test_console_score_report_without_colors() {
        let output = ConsoleFormatter::new(false, true)
            .format_score_report(&score_report())
            .unwrap();
        // 1.8 / 3 -> 60, ratio 2/3 -> -3.3
        assert!(output.contains("Match: 57% [FAIR]"));
        assert!(output.contains("✓ Python (exact: Python)"));
        assert!(output.contains("~ React.js (fuzzy: React)"));
        assert!(output.contains("✗ AWS"));
        assert!(output.contains("Volume bonus: -3.3"));
    }

    #[test]
    fn test_console_match_report_lists_jobs_in_rank_order() {
        let output = ConsoleFormatter::new(false, false)
            .format_match_report(&match_report())
            .unwrap();
        let frontend = output.find("Frontend Developer").unwrap();
        let data = output.find("Data Scientist").unwrap();
        assert!(frontend < data);
        assert!(output.contains("(local score)"));
        assert!(output.contains("Score: 84/100"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let json = JsonFormatter::new(false).format_match_report(&match_report()).unwrap();
        let parsed: MatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.jobs.len(), 2);
        assert_eq!(parsed.summary.best_match, Some(92));
    }

    #[test]
    fn test_markdown_score_table() {
        let output = MarkdownFormatter::new(false).format_score_report(&score_report()).unwrap();
        assert!(output.starts_with("# 🎯 Skill Match"));
        assert!(output.contains("| AWS | ❌ missing | - |"));
        assert!(!output.contains("**Generated:**"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Markdown, "/tmp/jane_resume.pdf", false),
            "jane_resume_matches.md"
        );
    }
}
