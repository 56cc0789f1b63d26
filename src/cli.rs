//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// TeamLens - teamwork competency feedback profile generator
///
/// Ingest a teamwork-competency survey CSV, compute per-team statistics
/// and composite scores, and generate per-participant feedback profiles
/// as Markdown or a JSON session export.
///
/// Examples:
///   teamlens --input survey.csv
///   teamlens --input survey.csv --participant "Jane Smith"
///   teamlens --sample --format json --output session.json
///   teamlens --input survey.csv --list
///   teamlens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Survey CSV file to ingest
    ///
    /// First line is the header row; recognized columns are name, team,
    /// the five competency columns, and satisfaction. Not required when
    /// using --sample or --init-config.
    #[arg(
        short,
        long,
        value_name = "FILE",
        required_unless_present_any = ["sample", "init_config"]
    )]
    pub input: Option<PathBuf>,

    /// Use the built-in sample dataset instead of a file
    #[arg(long, conflicts_with = "input")]
    pub sample: bool,

    /// Output file path for the report
    ///
    /// Defaults to the config file's report.output, or team_profiles.md.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Generate a single profile, selected by participant name or id
    #[arg(short, long, value_name = "NAME|ID")]
    pub participant: Option<String>,

    /// List participants and team statistics without writing a report
    #[arg(long)]
    pub list: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .teamlens.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "TEAMLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .teamlens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown feedback profiles (default)
    #[default]
    Markdown,
    /// JSON session export
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Single-profile selection only applies to the Markdown document
        if self.participant.is_some() && self.format == OutputFormat::Json {
            return Err(
                "--participant only applies to Markdown output; the JSON export always \
                 contains the full session"
                    .to_string(),
            );
        }

        // Validate input file if provided
        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
            if !input.is_file() {
                return Err(format!("Input path is not a file: {}", input.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
