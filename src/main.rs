//! TeamLens - Teamwork Competency Feedback Profiles
//!
//! A CLI tool that ingests teamwork-competency survey CSVs, computes
//! per-team statistics and composite scores, and generates
//! per-participant feedback profiles.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable input, config, or write failure)

mod analysis;
mod cli;
mod config;
mod ingest;
mod models;
mod report;
mod sample;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::Config;
use models::{Participant, Session};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("\n\u{274c} Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("TeamLens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Run failed: {}", e);
        eprintln!("\n\u{274c} Error: {}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .teamlens.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".teamlens.toml");

    if path.exists() {
        eprintln!("\u{26a0}\u{fe0f}  .teamlens.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .teamlens.toml")?;

    println!("\u{2705} Created .teamlens.toml with default settings.");
    println!("   Edit it to set the study title, contact details, and report options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete workflow: ingest, aggregate, render, write.
fn run(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Obtain the dataset
    let (participants, source) = load_dataset(&args)?;

    // Step 2: Aggregate. The session replaces any previous state wholesale.
    let session = analysis::build_session(participants);

    if session.is_empty() {
        println!("\u{26a0}\u{fe0f}  No participant records found in {}.", source);
        return Ok(());
    }

    info!(
        "Aggregated {} participant(s) into {} team(s)",
        session.participants.len(),
        session.teams.len()
    );

    // Handle --list: print the session summary and exit
    if args.list {
        print_session_summary(&session);
        return Ok(());
    }

    // Step 3: Render
    let selection = select_participants(&session, args.participant.as_deref())?;
    let output = match args.format {
        OutputFormat::Markdown => {
            report::generate_markdown_report(&session, &selection, &config.study, &config.report)
        }
        OutputFormat::Json => report::generate_json_export(&session, &source)?,
    };

    // Step 4: Write the report
    let output_path = PathBuf::from(&config.report.output);
    report::write_report(&output, &output_path)?;

    // Print summary
    println!("\n\u{1F4CA} Dataset Summary:");
    println!("   Participants: {}", session.participants.len());
    println!("   Teams: {}", session.teams.len());
    println!(
        "   High agreement teams: {}/{}",
        session.high_agreement_count(),
        session.teams.len()
    );
    match args.format {
        OutputFormat::Markdown => println!(
            "\n\u{2705} {} profile(s) written to: {}",
            selection.len(),
            output_path.display()
        ),
        OutputFormat::Json => println!(
            "\n\u{2705} Session export written to: {}",
            output_path.display()
        ),
    }

    Ok(())
}

/// Obtain the participant records: sample data or a parsed survey file.
fn load_dataset(args: &Args) -> Result<(Vec<Participant>, String)> {
    if args.sample {
        println!("\u{1F9EA} Using the built-in sample dataset");
        return Ok((sample::sample_participants(), "sample".to_string()));
    }

    let input = args
        .input
        .as_ref()
        .context("No input file given (use --input or --sample)")?;
    println!("\u{1F4E5} Reading survey: {}", input.display());

    let text = ingest::load_survey(input)?;
    let participants = ingest::parse_survey(&text);
    let source = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    Ok((participants, source))
}

/// Resolve the participants to render: everyone, or a single selection.
fn select_participants<'a>(
    session: &'a Session,
    selector: Option<&str>,
) -> Result<Vec<&'a Participant>> {
    match selector {
        Some(selector) => {
            let participant = session
                .find_participant(selector)
                .with_context(|| format!("No participant matching '{}'", selector))?;
            Ok(vec![participant])
        }
        None => Ok(session.participants.iter().collect()),
    }
}

/// Print the --list summary: participants and per-team statistics.
fn print_session_summary(session: &Session) {
    println!("\n\u{1F4CB} Participants ({}):", session.participants.len());
    for participant in &session.participants {
        println!(
            "   [{}] {} ({})",
            participant.id,
            participant.display_name(),
            participant.team_name()
        );
    }

    println!("\n\u{1F4CA} Teams ({}):", session.teams.len());
    for (name, stats) in &session.teams {
        println!(
            "   {}: {} member(s) | mean overall {:.2} | agreement {:.0}% | {}",
            name,
            stats.count,
            stats.team_mean_overall,
            stats.agreement_percentage,
            stats.agreement_label()
        );
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .teamlens.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
