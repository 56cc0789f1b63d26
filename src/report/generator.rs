//! Feedback profile rendering and session export.
//!
//! Generates per-participant Markdown profiles mirroring the printed
//! feedback cards handed back to study participants, plus a JSON export
//! of the complete session for chart renderers and other downstream
//! consumers.

use crate::analysis::derive_scores;
use crate::config::{ReportConfig, StudyConfig};
use crate::models::{Competency, Participant, Session, TeamStats};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One "you vs. team average" comparison entry, ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Short competency code (CR, CPS, ...).
    pub code: &'static str,
    /// Full competency name.
    pub label: &'static str,
    /// The participant's raw score, with absent/non-numeric read as 0.
    pub you: f64,
    /// The team's average for the competency, 0 when the team is unknown.
    pub team_average: f64,
}

/// Denormalized per-competency comparison for one participant.
///
/// This is the projection a radar-chart renderer consumes; it contains
/// no information beyond the participant record and the team aggregate.
pub fn comparison_rows(
    participant: &Participant,
    team: Option<&TeamStats>,
) -> Vec<ComparisonRow> {
    Competency::ALL
        .into_iter()
        .map(|competency| ComparisonRow {
            code: competency.short(),
            label: competency.display_name(),
            you: participant.competency_value(competency),
            team_average: team.map_or(0.0, |t| t.average(competency)),
        })
        .collect()
}

/// Metadata block at the top of the JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub tool: String,
    pub version: String,
    pub generated_at: DateTime<Utc>,
    /// Where the dataset came from: a file name or "sample".
    pub source: String,
    pub participant_count: usize,
    pub team_count: usize,
    pub high_agreement_teams: usize,
}

/// The complete machine-readable session export.
#[derive(Debug, Clone, Serialize)]
pub struct SessionExport<'a> {
    pub metadata: ExportMetadata,
    pub participants: &'a [Participant],
    pub teams: &'a BTreeMap<String, TeamStats>,
}

/// Serialize the full session (ordered participants with derived scores
/// plus the team-aggregate map) as pretty-printed JSON.
pub fn generate_json_export(session: &Session, source: &str) -> Result<String> {
    let export = SessionExport {
        metadata: ExportMetadata {
            tool: "teamlens".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            source: source.to_string(),
            participant_count: session.participants.len(),
            team_count: session.teams.len(),
            high_agreement_teams: session.high_agreement_count(),
        },
        participants: &session.participants,
        teams: &session.teams,
    };
    serde_json::to_string_pretty(&export).map_err(Into::into)
}

/// Generate the Markdown feedback document for the given participants.
///
/// `selection` is typically every participant in session order, or a
/// single record when one profile was requested.
pub fn generate_markdown_report(
    session: &Session,
    selection: &[&Participant],
    study: &StudyConfig,
    options: &ReportConfig,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", study.title));

    for (index, participant) in selection.iter().enumerate() {
        if index > 0 {
            output.push_str("---\n\n");
        }
        let team = session.team_for(participant);
        output.push_str(&generate_profile_section(participant, team, study, options));
    }

    output
}

/// Generate one participant's full profile.
fn generate_profile_section(
    participant: &Participant,
    team: Option<&TeamStats>,
    study: &StudyConfig,
    options: &ReportConfig,
) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", participant.display_name()));
    section.push_str("Thank you for your valuable contribution to our research!\n\n");

    section.push_str(&generate_team_banner(participant, team));
    section.push_str(&generate_comparison_table(participant, team));
    section.push_str(&generate_factor_summary(participant, team));
    if options.include_satisfaction {
        section.push_str(&generate_satisfaction_section(participant));
    }
    if options.include_descriptions {
        section.push_str(&generate_catalog_section(participant, team));
    }
    section.push_str(&generate_contact_footer(study));

    section
}

/// Generate the team classification banner.
fn generate_team_banner(participant: &Participant, team: Option<&TeamStats>) -> String {
    let high_agreement = team.is_some_and(|t| t.is_high_agreement);
    let (icon, label) = if high_agreement {
        ("\u{2705}", "High Agreement Team")
    } else {
        ("\u{1F500}", "Diverse Competency Team")
    };
    format!(
        "**Team:** {} | {} {}\n\n",
        participant.team_name(),
        icon,
        label
    )
}

/// Generate the you-vs-team comparison table.
fn generate_comparison_table(participant: &Participant, team: Option<&TeamStats>) -> String {
    let mut table = String::new();

    table.push_str("### Your Teamwork Competency Profile\n\n");
    table.push_str("Your responses compared to your team's average (scale: 1\u{2013}4).\n\n");
    table.push_str("| Code | Competency | You | Team Average |\n");
    table.push_str("|:---|:---|---:|---:|\n");
    for row in comparison_rows(participant, team) {
        table.push_str(&format!(
            "| {} | {} | {:.1} | {:.1} |\n",
            row.code, row.label, row.you, row.team_average
        ));
    }
    table.push('\n');

    table
}

/// Generate the factor-level summary table.
fn generate_factor_summary(participant: &Participant, team: Option<&TeamStats>) -> String {
    let derived = participant
        .derived
        .unwrap_or_else(|| derive_scores(participant));
    let team_interpersonal = team.map_or(0.0, |t| t.interpersonal_avg);
    let team_self_management = team.map_or(0.0, |t| t.self_management_avg);

    let mut section = String::new();
    section.push_str("### Factor Summary\n\n");
    section.push_str("| Factor | Competencies | You | Team |\n");
    section.push_str("|:---|:---|---:|---:|\n");
    section.push_str(&format!(
        "| Interpersonal | CR + CPS + COM | {:.2} / 4 | {:.2} |\n",
        derived.interpersonal_score, team_interpersonal
    ));
    section.push_str(&format!(
        "| Self-Management | GSPM + PTC | {:.2} / 4 | {:.2} |\n",
        derived.self_management_score, team_self_management
    ));
    section.push('\n');

    section
}

/// Generate the satisfaction section with a ten-slot bar.
fn generate_satisfaction_section(participant: &Participant) -> String {
    let satisfaction = participant.satisfaction_value();

    let mut section = String::new();
    section.push_str("### Satisfaction with Team Collaboration\n\n");
    section.push_str(&format!(
        "**{:.1} / 5** `{}`\n\n",
        satisfaction,
        satisfaction_bar(satisfaction)
    ));
    section.push_str("How you rated your experience working with your team.\n\n");

    section
}

/// Render a rating as a fixed-width bar of filled and empty slots.
fn satisfaction_bar(value: f64) -> String {
    const SLOTS: usize = 10;
    let filled = ((value / 5.0) * SLOTS as f64).round().clamp(0.0, SLOTS as f64) as usize;
    format!(
        "{}{}",
        "\u{25B0}".repeat(filled),
        "\u{25B1}".repeat(SLOTS - filled)
    )
}

/// Generate the competency catalog with per-competency comparisons.
fn generate_catalog_section(participant: &Participant, team: Option<&TeamStats>) -> String {
    let mut section = String::new();

    section.push_str("### Understanding Your Competencies\n\n");
    for competency in Competency::ALL {
        let you = participant.competency_value(competency);
        let team_average = team.map_or(0.0, |t| t.average(competency));
        section.push_str(&format!(
            "**{} \u{2014} {}** *({})* \u{00b7} You: {:.1} | Team: {:.1}\n\n",
            competency.short(),
            competency.display_name(),
            competency.factor(),
            you,
            team_average
        ));
        section.push_str(&format!("{}\n\n", competency.description()));
    }

    section
}

/// Generate the contact and disclaimer footer.
fn generate_contact_footer(study: &StudyConfig) -> String {
    let mut footer = String::new();

    if !study.researcher_name.is_empty() || !study.pi_name.is_empty() {
        footer.push_str("**Contact Information**\n\n");
        if !study.researcher_name.is_empty() {
            footer.push_str(&format!(
                "Researcher: {}{}\n",
                study.researcher_name,
                format_email(&study.researcher_email)
            ));
        }
        if !study.pi_name.is_empty() {
            footer.push_str(&format!(
                "Principal Investigator: {}{}\n",
                study.pi_name,
                format_email(&study.pi_email)
            ));
        }
        footer.push('\n');
    }
    footer.push_str(&format!("*{}*\n\n", study.disclaimer));

    footer
}

fn format_email(email: &str) -> String {
    if email.is_empty() {
        String::new()
    } else {
        format!(" ({email})")
    }
}

/// Write a rendered report to disk.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
