//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.teamlens.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Study identity shown on profiles.
    #[serde(default)]
    pub study: StudyConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Study identity and contact details printed on every profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Title shown at the top of the report.
    #[serde(default = "default_title")]
    pub title: String,

    /// Researcher name for the contact footer; empty hides the line.
    #[serde(default)]
    pub researcher_name: String,

    /// Researcher email.
    #[serde(default)]
    pub researcher_email: String,

    /// Principal investigator name; empty hides the line.
    #[serde(default)]
    pub pi_name: String,

    /// Principal investigator email.
    #[serde(default)]
    pub pi_email: String,

    /// Disclaimer paragraph at the bottom of every profile.
    #[serde(default = "default_disclaimer")]
    pub disclaimer: String,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            researcher_name: String::new(),
            researcher_email: String::new(),
            pi_name: String::new(),
            pi_email: String::new(),
            disclaimer: default_disclaimer(),
        }
    }
}

fn default_title() -> String {
    "Collaborative Problem Solving Study".to_string()
}

fn default_disclaimer() -> String {
    "This profile is provided as part of a university research study. The \
     information presented reflects your individual responses and your team's \
     aggregated data from the Teamwork Competency Test and post-session \
     satisfaction survey. Scores represent self-reported behavioral tendencies \
     and are not evaluative assessments of job performance or professional \
     capability."
        .to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Include the competency catalog with descriptions.
    #[serde(default = "default_true")]
    pub include_descriptions: bool,

    /// Include the satisfaction section.
    #[serde(default = "default_true")]
    pub include_satisfaction: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            include_descriptions: true,
            include_satisfaction: true,
        }
    }
}

fn default_output() -> String {
    "team_profiles.md".to_string()
}

fn default_true() -> bool {
    true
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".teamlens.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.report.output = output.display().to_string();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.study.title, "Collaborative Problem Solving Study");
        assert_eq!(config.report.output, "team_profiles.md");
        assert!(config.report.include_descriptions);
        assert!(config.study.researcher_name.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[study]
title = "Pilot Study 2026"
researcher_name = "Jane Smith"
pi_name = "Dr. John Doe"

[report]
output = "pilot_profiles.md"
include_descriptions = false

[general]
verbose = true
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.study.title, "Pilot Study 2026");
        assert_eq!(config.study.researcher_name, "Jane Smith");
        assert_eq!(config.study.pi_name, "Dr. John Doe");
        assert_eq!(config.report.output, "pilot_profiles.md");
        assert!(!config.report.include_descriptions);
        assert!(config.report.include_satisfaction);
        assert!(config.general.verbose);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[study]\nresearcher_name = \"R\"\n").unwrap();
        assert_eq!(config.study.title, "Collaborative Problem Solving Study");
        assert!(!config.study.disclaimer.is_empty());
        assert_eq!(config.report.output, "team_profiles.md");
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[study]"));
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("[general]"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
