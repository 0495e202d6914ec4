//! Configuration management for the skill matcher

use crate::error::{Result, SkillMatcherError};
use crate::processing::skill_matcher::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub input: InputConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub max_upload_bytes: u64,
    pub min_text_chars: usize,
    pub max_text_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub exact_weight: f64,
    pub fuzzy_weight: f64,
    pub max_volume_ratio: f64,
    pub volume_bonus_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Markdown,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024,
            min_text_chars: 50,
            max_text_chars: 50_000,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let weights = ScoringWeights::default();
        Self {
            exact_weight: weights.exact_weight,
            fuzzy_weight: weights.fuzzy_weight,
            max_volume_ratio: weights.max_volume_ratio,
            volume_bonus_factor: weights.volume_bonus_factor,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| SkillMatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Overwrite whatever is at `config_path` with the defaults.
    /// Never reads the existing file, so it also repairs broken ones.
    pub fn reset_at(config_path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(config_path)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-matcher")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(SkillMatcherError::Configuration("api.base_url must not be empty".to_string()));
        }
        if self.input.min_text_chars > self.input.max_text_chars {
            return Err(SkillMatcherError::Configuration(
                "input.min_text_chars must not exceed input.max_text_chars".to_string(),
            ));
        }
        let weights = [
            ("exact_weight", self.scoring.exact_weight),
            ("fuzzy_weight", self.scoring.fuzzy_weight),
            ("max_volume_ratio", self.scoring.max_volume_ratio),
            ("volume_bonus_factor", self.scoring.volume_bonus_factor),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(SkillMatcherError::Configuration(format!(
                    "scoring.{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }
        if self.scoring.max_volume_ratio < 1.0 {
            return Err(SkillMatcherError::Configuration(
                "scoring.max_volume_ratio must be at least 1.0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights {
            exact_weight: self.scoring.exact_weight,
            fuzzy_weight: self.scoring.fuzzy_weight,
            max_volume_ratio: self.scoring.max_volume_ratio,
            volume_bonus_factor: self.scoring.volume_bonus_factor,
        }
    }
}
