//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub format_checks: FormatCheckConfig,
    pub suggestions: SuggestionConfig,
    pub output: OutputConfig,
}

/// Weights for the composite ATS score. They must sum to 1.0 and stay
/// fixed for the lifetime of a run — two analyses of the same document
/// against the same role produce identical reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub keyword_weight: f32,
    pub section_weight: f32,
    pub format_weight: f32,
}

/// Point allocation for the format checklist. The individual weights
/// sum to 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatCheckConfig {
    pub email_points: u8,
    pub phone_points: u8,
    pub bullet_points: u8,
    pub length_points: u8,
    pub no_table_artifact_points: u8,
    /// Documents shorter than this many words are flagged as too sparse.
    pub min_words: usize,
    /// Documents longer than this many words are flagged as too dense.
    pub max_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Summaries below this word count are flagged.
    pub min_summary_words: usize,
    /// Jaro-Winkler similarity above which a missing skill is reported
    /// as a probable misspelling of a resume token.
    pub near_miss_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig {
                keyword_weight: 0.4,
                section_weight: 0.3,
                format_weight: 0.3,
            },
            format_checks: FormatCheckConfig {
                email_points: 25,
                phone_points: 10,
                bullet_points: 25,
                length_points: 25,
                no_table_artifact_points: 15,
                min_words: 150,
                max_words: 1200,
            },
            suggestions: SuggestionConfig {
                min_summary_words: 15,
                near_miss_threshold: 0.85,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ResumeAnalyzerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let weight_sum = self.scoring.keyword_weight
            + self.scoring.section_weight
            + self.scoring.format_weight;
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "ATS score weights must sum to 1.0, got {:.3}",
                weight_sum
            )));
        }

        let checklist_sum = self.format_checks.email_points as u32
            + self.format_checks.phone_points as u32
            + self.format_checks.bullet_points as u32
            + self.format_checks.length_points as u32
            + self.format_checks.no_table_artifact_points as u32;
        if checklist_sum != 100 {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "Format checklist points must sum to 100, got {}",
                checklist_sum
            )));
        }

        if self.format_checks.min_words >= self.format_checks.max_words {
            return Err(ResumeAnalyzerError::Configuration(
                "min_words must be below max_words".to_string(),
            ));
        }

        Ok(())
    }
}
