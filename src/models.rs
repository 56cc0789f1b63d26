//! Data models for the feedback profile generator.
//!
//! This module contains all the core data structures used throughout
//! the application for representing survey records, competencies, and
//! per-team statistics.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Team name used when a record carries no team assignment.
pub const UNASSIGNED_TEAM: &str = "Unassigned";

/// Higher-level grouping of competencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Factor {
    /// Conflict resolution, collaborative problem solving, communication.
    Interpersonal,
    /// Goal setting and planning/coordination.
    SelfManagement,
}

impl Factor {
    /// The competencies belonging to this factor, in catalog order.
    pub fn competencies(&self) -> &'static [Competency] {
        match self {
            Factor::Interpersonal => &[
                Competency::ConflictResolution,
                Competency::CollaborativeProblemSolving,
                Competency::Communication,
            ],
            Factor::SelfManagement => {
                &[Competency::GoalSetting, Competency::PlanningCoordination]
            }
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factor::Interpersonal => write!(f, "Interpersonal"),
            Factor::SelfManagement => write!(f, "Self-Management"),
        }
    }
}

/// One of the five measured teamwork dimensions.
///
/// Variant order matches the survey catalog and drives the ordering of
/// every per-competency map in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Competency {
    ConflictResolution,
    CollaborativeProblemSolving,
    Communication,
    GoalSetting,
    PlanningCoordination,
}

impl Competency {
    /// All competencies in catalog order.
    pub const ALL: [Competency; 5] = [
        Competency::ConflictResolution,
        Competency::CollaborativeProblemSolving,
        Competency::Communication,
        Competency::GoalSetting,
        Competency::PlanningCoordination,
    ];

    /// The normalized CSV column key for this competency.
    pub fn key(&self) -> &'static str {
        match self {
            Competency::ConflictResolution => "conflict_resolution",
            Competency::CollaborativeProblemSolving => "collaborative_problem_solving",
            Competency::Communication => "communication",
            Competency::GoalSetting => "goal_setting",
            Competency::PlanningCoordination => "planning_coordination",
        }
    }

    /// Resolve a normalized CSV column key to a competency.
    pub fn from_key(key: &str) -> Option<Competency> {
        Competency::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Competency::ConflictResolution => "Conflict Resolution",
            Competency::CollaborativeProblemSolving => "Collaborative Problem Solving",
            Competency::Communication => "Communication",
            Competency::GoalSetting => "Goal Setting and Performance Management",
            Competency::PlanningCoordination => "Planning and Task Coordination",
        }
    }

    /// Short code used in charts and compact tables.
    pub fn short(&self) -> &'static str {
        match self {
            Competency::ConflictResolution => "CR",
            Competency::CollaborativeProblemSolving => "CPS",
            Competency::Communication => "COM",
            Competency::GoalSetting => "GSPM",
            Competency::PlanningCoordination => "PTC",
        }
    }

    /// The factor this competency belongs to.
    pub fn factor(&self) -> Factor {
        match self {
            Competency::ConflictResolution
            | Competency::CollaborativeProblemSolving
            | Competency::Communication => Factor::Interpersonal,
            Competency::GoalSetting | Competency::PlanningCoordination => Factor::SelfManagement,
        }
    }

    /// Catalog description shown on feedback profiles.
    pub fn description(&self) -> &'static str {
        match self {
            Competency::ConflictResolution => {
                "The ability to recognize different types and sources of conflict, \
                 encourage constructive disagreement while discouraging destructive \
                 conflict, and integrate diverse viewpoints during negotiation processes."
            }
            Competency::CollaborativeProblemSolving => {
                "Involves identifying when group approaches are needed, participating \
                 appropriately in collective problem solving activities, and recognizing \
                 obstacles to effective collaboration."
            }
            Competency::Communication => {
                "Includes listening actively, providing clear and timely information, \
                 and adapting communication style to different audiences and contexts."
            }
            Competency::GoalSetting => {
                "Involves establishing specific and challenging team objectives, \
                 monitoring progress toward goals, and providing constructive feedback \
                 on team activities."
            }
            Competency::PlanningCoordination => {
                "Requires coordinating activities and information between team members, \
                 establishing appropriate role assignments, and managing workload \
                 distribution effectively."
            }
        }
    }
}

impl fmt::Display for Competency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A parsed CSV cell.
///
/// Cells that parse as a float become `Number`; everything else is kept
/// verbatim as `Text` so the record preserves what the file contained.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the cell. Non-numeric text coerces to 0.0.
    pub fn as_number(&self) -> f64 {
        match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(_) => 0.0,
        }
    }

    /// Whether the cell held a valid number.
    #[allow(dead_code)] // Utility for downstream consumers
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Number(_))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Composite scores attached to a participant by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedScores {
    /// Mean of the three interpersonal raw scores.
    pub interpersonal_score: f64,
    /// Mean of the two self-management raw scores.
    pub self_management_score: f64,
    /// Mean of the participant's own two factor scores.
    pub overall_score: f64,
}

/// A single survey respondent.
///
/// Created once at parse time; `derived` is attached during aggregation
/// and the record is immutable afterward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    /// Zero-based position among the non-blank data lines.
    pub id: usize,
    /// Respondent name; empty when the column was absent.
    pub name: String,
    /// Raw team value; empty means unassigned.
    pub team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_resolution: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborative_problem_solving: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_setting: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planning_coordination: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<FieldValue>,
    /// Columns outside the recognized survey schema, keyed by normalized
    /// header. Passed through untouched for downstream consumers.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, FieldValue>,
    /// Composite scores; `None` until the aggregator has run. Flattened
    /// into the record on serialization, omitted entirely when unset.
    #[serde(flatten)]
    pub derived: Option<DerivedScores>,
}

impl Participant {
    /// Create an empty record with the given position id.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            name: String::new(),
            team: String::new(),
            conflict_resolution: None,
            collaborative_problem_solving: None,
            communication: None,
            goal_setting: None,
            planning_coordination: None,
            satisfaction: None,
            extras: BTreeMap::new(),
            derived: None,
        }
    }

    /// Construct a fully-populated record from raw scores.
    ///
    /// `scores` follows catalog order: CR, CPS, COM, GSPM, PTC.
    pub fn with_scores(
        id: usize,
        name: &str,
        team: &str,
        scores: [f64; 5],
        satisfaction: f64,
    ) -> Self {
        let mut p = Self::new(id);
        p.name = name.to_string();
        p.team = team.to_string();
        for (competency, value) in Competency::ALL.into_iter().zip(scores) {
            p.set_competency(competency, FieldValue::Number(value));
        }
        p.satisfaction = Some(FieldValue::Number(satisfaction));
        p
    }

    /// The raw cell recorded for a competency, if the column was present.
    pub fn competency(&self, competency: Competency) -> Option<&FieldValue> {
        match competency {
            Competency::ConflictResolution => self.conflict_resolution.as_ref(),
            Competency::CollaborativeProblemSolving => self.collaborative_problem_solving.as_ref(),
            Competency::Communication => self.communication.as_ref(),
            Competency::GoalSetting => self.goal_setting.as_ref(),
            Competency::PlanningCoordination => self.planning_coordination.as_ref(),
        }
    }

    /// Store the raw cell for a competency.
    pub fn set_competency(&mut self, competency: Competency, value: FieldValue) {
        let slot = match competency {
            Competency::ConflictResolution => &mut self.conflict_resolution,
            Competency::CollaborativeProblemSolving => &mut self.collaborative_problem_solving,
            Competency::Communication => &mut self.communication,
            Competency::GoalSetting => &mut self.goal_setting,
            Competency::PlanningCoordination => &mut self.planning_coordination,
        };
        *slot = Some(value);
    }

    /// Numeric score for a competency. Absent or non-numeric cells read
    /// as 0.0.
    pub fn competency_value(&self, competency: Competency) -> f64 {
        self.competency(competency)
            .map(FieldValue::as_number)
            .unwrap_or(0.0)
    }

    /// Numeric satisfaction rating (nominal scale 0-5), defaulting to 0.0.
    pub fn satisfaction_value(&self) -> f64 {
        self.satisfaction
            .as_ref()
            .map(FieldValue::as_number)
            .unwrap_or(0.0)
    }

    /// Name suitable for display, with a generic fallback.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Participant"
        } else {
            &self.name
        }
    }

    /// Team name with the unassigned fallback applied.
    pub fn team_name(&self) -> &str {
        if self.team.trim().is_empty() {
            UNASSIGNED_TEAM
        } else {
            &self.team
        }
    }
}

/// Aggregated statistics for one team.
///
/// `members` holds indices into the session's participant list rather
/// than copies of the records. Invariant: `count == members.len()` and a
/// `TeamStats` only exists for teams with at least one member, so the
/// averages never divide by zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamStats {
    /// Indices of the member records in the session's participant list.
    pub members: Vec<usize>,
    /// Number of members.
    pub count: usize,
    /// Running sum per competency, accumulated during the grouping pass.
    pub competency_totals: BTreeMap<Competency, f64>,
    /// Per-competency mean across the team.
    pub averages: BTreeMap<Competency, f64>,
    /// Mean of the three interpersonal competency averages.
    pub interpersonal_avg: f64,
    /// Mean of the two self-management competency averages.
    pub self_management_avg: f64,
    /// Mean of all members' overall scores.
    pub team_mean_overall: f64,
    /// Share of members within tolerance of the team mean, in percent.
    pub agreement_percentage: f64,
    /// Whether the agreement percentage meets the high-agreement threshold.
    pub is_high_agreement: bool,
}

impl TeamStats {
    /// Fresh aggregate with zeroed totals for every competency.
    pub fn new() -> Self {
        let mut stats = Self::default();
        for competency in Competency::ALL {
            stats.competency_totals.insert(competency, 0.0);
        }
        stats
    }

    /// Team average for a competency, defaulting to 0.0 when unknown.
    pub fn average(&self, competency: Competency) -> f64 {
        self.averages.get(&competency).copied().unwrap_or(0.0)
    }

    /// Classification label shown on profiles.
    pub fn agreement_label(&self) -> &'static str {
        if self.is_high_agreement {
            "High Agreement Team"
        } else {
            "Diverse Competency Team"
        }
    }
}

/// One fully-processed dataset: the ordered participant list plus the
/// team-keyed aggregate map.
///
/// Replaced wholesale whenever a new file is loaded; nothing is carried
/// over between datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    pub participants: Vec<Participant>,
    pub teams: BTreeMap<String, TeamStats>,
}

impl Session {
    /// Whether the dataset contained any records.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Number of teams that classified as high agreement.
    pub fn high_agreement_count(&self) -> usize {
        self.teams.values().filter(|t| t.is_high_agreement).count()
    }

    /// Statistics for the team a participant belongs to.
    pub fn team_for(&self, participant: &Participant) -> Option<&TeamStats> {
        self.teams.get(participant.team_name())
    }

    /// Find a participant by numeric id or case-insensitive name.
    pub fn find_participant(&self, selector: &str) -> Option<&Participant> {
        if let Ok(id) = selector.parse::<usize>() {
            return self.participants.iter().find(|p| p.id == id);
        }
        self.participants
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_membership() {
        assert_eq!(Competency::ConflictResolution.factor(), Factor::Interpersonal);
        assert_eq!(Competency::Communication.factor(), Factor::Interpersonal);
        assert_eq!(Competency::GoalSetting.factor(), Factor::SelfManagement);
        assert_eq!(Factor::Interpersonal.competencies().len(), 3);
        assert_eq!(Factor::SelfManagement.competencies().len(), 2);
    }

    #[test]
    fn test_competency_keys_round_trip() {
        for competency in Competency::ALL {
            assert_eq!(Competency::from_key(competency.key()), Some(competency));
        }
        assert_eq!(Competency::from_key("favorite_color"), None);
    }

    #[test]
    fn test_short_codes() {
        assert_eq!(Competency::ConflictResolution.short(), "CR");
        assert_eq!(Competency::CollaborativeProblemSolving.short(), "CPS");
        assert_eq!(Competency::GoalSetting.short(), "GSPM");
    }

    #[test]
    fn test_field_value_coercion() {
        assert_eq!(FieldValue::Number(3.2).as_number(), 3.2);
        assert_eq!(FieldValue::from("abc").as_number(), 0.0);
        assert!(!FieldValue::from("abc").is_numeric());
    }

    #[test]
    fn test_participant_defaults() {
        let p = Participant::new(0);
        assert_eq!(p.competency_value(Competency::Communication), 0.0);
        assert_eq!(p.satisfaction_value(), 0.0);
        assert_eq!(p.display_name(), "Participant");
        assert_eq!(p.team_name(), UNASSIGNED_TEAM);
    }

    #[test]
    fn test_with_scores_populates_catalog_order() {
        let p = Participant::with_scores(3, "Alice", "Team A", [3.4, 3.1, 3.6, 2.9, 3.2], 4.2);
        assert_eq!(p.competency_value(Competency::ConflictResolution), 3.4);
        assert_eq!(p.competency_value(Competency::Communication), 3.6);
        assert_eq!(p.competency_value(Competency::PlanningCoordination), 3.2);
        assert_eq!(p.satisfaction_value(), 4.2);
        assert_eq!(p.team_name(), "Team A");
    }

    #[test]
    fn test_non_numeric_cell_reads_as_zero() {
        let mut p = Participant::new(0);
        p.set_competency(Competency::ConflictResolution, FieldValue::from("abc"));
        assert_eq!(
            p.competency(Competency::ConflictResolution),
            Some(&FieldValue::Text("abc".to_string()))
        );
        assert_eq!(p.competency_value(Competency::ConflictResolution), 0.0);
    }

    #[test]
    fn test_find_participant_by_id_and_name() {
        let session = Session {
            participants: vec![
                Participant::with_scores(0, "Alice", "A", [3.0; 5], 4.0),
                Participant::with_scores(1, "Bob", "A", [3.0; 5], 4.0),
            ],
            teams: BTreeMap::new(),
        };
        assert_eq!(session.find_participant("1").map(|p| p.name.as_str()), Some("Bob"));
        assert_eq!(session.find_participant("alice").map(|p| p.id), Some(0));
        assert!(session.find_participant("Carol").is_none());
    }
}
