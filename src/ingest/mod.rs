//! Survey CSV ingestion.
//!
//! Turns raw comma-delimited text into typed [`Participant`] records.
//! Parsing itself never fails: unknown columns pass through as extras,
//! non-numeric cells are kept as text, and ragged rows are accepted
//! as-is. The only fallible operation here is reading the file.

use crate::models::{Competency, FieldValue, Participant};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Failure while reading a survey file from disk.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read survey file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read a survey file into a string.
///
/// This is the single I/O boundary in front of the parser; everything
/// after it operates on already-decoded text.
pub fn load_survey(path: &Path) -> Result<String, IngestError> {
    std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Normalize a header token into a column key: trimmed, lowercased,
/// runs of whitespace collapsed to underscores.
fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Coerce a trimmed cell into a [`FieldValue`].
///
/// A cell that parses as a finite-or-infinite float becomes a number;
/// anything else (including empty cells and the literal "NaN") is kept
/// verbatim as text and will read as 0 in arithmetic contexts.
fn coerce(raw: &str) -> FieldValue {
    match raw.parse::<f64>() {
        Ok(n) if !n.is_nan() => FieldValue::Number(n),
        _ => FieldValue::Text(raw.to_string()),
    }
}

/// Parse survey text into an ordered sequence of participant records.
///
/// The first line is the header row. Blank data lines are skipped and
/// not counted: a record's `id` is its position among the surviving
/// lines. Rows are aligned to headers positionally with no column-count
/// validation; values past the last header are dropped and short rows
/// simply leave the trailing fields absent.
pub fn parse_survey(text: &str) -> Vec<Participant> {
    let mut lines = text.lines();
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_line.split(',').map(normalize_header).collect();

    let mut participants = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let values: Vec<&str> = line.split(',').map(str::trim).collect();
        let mut participant = Participant::new(participants.len());

        for (index, header) in headers.iter().enumerate() {
            let Some(raw) = values.get(index) else {
                continue;
            };
            match header.as_str() {
                "name" => participant.name = (*raw).to_string(),
                "team" => participant.team = (*raw).to_string(),
                "satisfaction" => participant.satisfaction = Some(coerce(raw)),
                key => {
                    if let Some(competency) = Competency::from_key(key) {
                        participant.set_competency(competency, coerce(raw));
                    } else {
                        participant.extras.insert(header.clone(), coerce(raw));
                    }
                }
            }
        }

        participants.push(participant);
    }

    debug!(
        "parsed {} participant record(s) across {} column(s)",
        participants.len(),
        headers.len()
    );
    participants
}
