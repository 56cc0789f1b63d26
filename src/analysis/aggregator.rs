//! Team aggregation and composite scoring.
//!
//! The core of the crate: groups participant records by team, computes
//! per-competency averages, attaches composite factor scores to every
//! member, and classifies each team's agreement. Never fails; absent
//! data degrades to zero.

use crate::models::{
    Competency, DerivedScores, Factor, Participant, Session, TeamStats,
};
use std::collections::BTreeMap;

/// Members whose overall score lies within this absolute distance of the
/// team mean count as "in agreement" (inclusive).
const AGREEMENT_TOLERANCE: f64 = 0.3;

/// Minimum agreement percentage for the high-agreement classification
/// (inclusive).
const HIGH_AGREEMENT_THRESHOLD: f64 = 70.0;

/// Mean of a participant's raw scores for one factor. Missing or
/// non-numeric responses contribute 0.
pub fn factor_score(participant: &Participant, factor: Factor) -> f64 {
    let competencies = factor.competencies();
    let total: f64 = competencies
        .iter()
        .map(|c| participant.competency_value(*c))
        .sum();
    total / competencies.len() as f64
}

/// Composite scores for a single participant, computed purely from the
/// participant's own responses.
pub fn derive_scores(participant: &Participant) -> DerivedScores {
    let interpersonal_score = factor_score(participant, Factor::Interpersonal);
    let self_management_score = factor_score(participant, Factor::SelfManagement);
    DerivedScores {
        interpersonal_score,
        self_management_score,
        overall_score: (interpersonal_score + self_management_score) / 2.0,
    }
}

/// Mean of a team's per-competency averages for one factor.
fn factor_average(stats: &TeamStats, factor: Factor) -> f64 {
    let competencies = factor.competencies();
    let total: f64 = competencies.iter().map(|c| stats.average(*c)).sum();
    total / competencies.len() as f64
}

/// Group records by team and compute the full aggregate map.
///
/// Attaches [`DerivedScores`] to every participant as a side effect.
/// Re-running on the same records recomputes identical values, so the
/// operation is idempotent.
pub fn compute_team_stats(participants: &mut [Participant]) -> BTreeMap<String, TeamStats> {
    let mut teams: BTreeMap<String, TeamStats> = BTreeMap::new();

    // Grouping pass: a team comes into existence with its first member.
    for (index, participant) in participants.iter().enumerate() {
        let stats = teams
            .entry(participant.team_name().to_string())
            .or_insert_with(TeamStats::new);
        stats.members.push(index);
        stats.count += 1;
        for competency in Competency::ALL {
            *stats.competency_totals.entry(competency).or_insert(0.0) +=
                participant.competency_value(competency);
        }
    }

    // Scoring pass: teams are independent of one another.
    for stats in teams.values_mut() {
        let count = stats.count as f64;

        for competency in Competency::ALL {
            let total = stats
                .competency_totals
                .get(&competency)
                .copied()
                .unwrap_or(0.0);
            stats.averages.insert(competency, total / count);
        }
        stats.interpersonal_avg = factor_average(stats, Factor::Interpersonal);
        stats.self_management_avg = factor_average(stats, Factor::SelfManagement);

        let mut overall_sum = 0.0;
        for &index in &stats.members {
            let derived = derive_scores(&participants[index]);
            overall_sum += derived.overall_score;
            participants[index].derived = Some(derived);
        }
        stats.team_mean_overall = overall_sum / count;

        let in_agreement = stats
            .members
            .iter()
            .filter(|&&index| {
                let overall = participants[index]
                    .derived
                    .map(|d| d.overall_score)
                    .unwrap_or(0.0);
                (overall - stats.team_mean_overall).abs() <= AGREEMENT_TOLERANCE
            })
            .count();
        stats.agreement_percentage = in_agreement as f64 / count * 100.0;
        stats.is_high_agreement = stats.agreement_percentage >= HIGH_AGREEMENT_THRESHOLD;
    }

    teams
}

/// Run the full pipeline over a record list and package the result.
pub fn build_session(mut participants: Vec<Participant>) -> Session {
    let teams = compute_team_stats(&mut participants);
    Session {
        participants,
        teams,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn team_of(scores: &[[f64; 5]]) -> Session {
        let participants = scores
            .iter()
            .enumerate()
            .map(|(id, s)| Participant::with_scores(id, &format!("P{id}"), "Team", *s, 4.0))
            .collect();
        build_session(participants)
    }

    #[test]
    fn test_clustered_team_reaches_full_agreement() {
        let session = team_of(&[
            [3.4, 3.1, 3.6, 2.9, 3.2],
            [3.2, 3.3, 3.1, 3.0, 3.1],
            [3.0, 2.9, 3.4, 3.2, 2.8],
            [3.3, 3.2, 3.2, 3.1, 3.0],
        ]);
        let stats = &session.teams["Team"];

        let overalls: Vec<f64> = session
            .participants
            .iter()
            .map(|p| p.derived.unwrap().overall_score)
            .collect();
        assert_close(overalls[0], (10.1 / 3.0 + 3.05) / 2.0);
        assert_close(overalls[1], 3.125);
        assert_close(overalls[2], 3.05);
        assert_close(overalls[3], (9.7 / 3.0 + 3.05) / 2.0);

        assert_close(stats.team_mean_overall, 3.13125);
        assert_close(stats.agreement_percentage, 100.0);
        assert!(stats.is_high_agreement);
    }

    #[test]
    fn test_wide_spread_breaks_agreement() {
        let session = team_of(&[[3.9, 3.7, 3.8, 3.6, 3.5], [1.8, 2.0, 2.2, 1.9, 2.1]]);
        let stats = &session.teams["Team"];

        assert_close(stats.team_mean_overall, 2.8375);
        assert_close(stats.agreement_percentage, 0.0);
        assert!(!stats.is_high_agreement);
    }

    #[test]
    fn test_competency_and_factor_averages() {
        let session = team_of(&[[4.0, 3.0, 2.0, 4.0, 2.0], [2.0, 3.0, 4.0, 2.0, 4.0]]);
        let stats = &session.teams["Team"];

        assert_close(stats.average(Competency::ConflictResolution), 3.0);
        assert_close(stats.average(Competency::Communication), 3.0);
        assert_close(stats.interpersonal_avg, 3.0);
        assert_close(stats.self_management_avg, 3.0);
    }

    #[test]
    fn test_unassigned_single_member_team() {
        let mut participant = Participant::new(0);
        participant.name = "Solo".to_string();
        participant.set_competency(Competency::Communication, 3.0.into());
        let session = build_session(vec![participant]);

        let stats = &session.teams[crate::models::UNASSIGNED_TEAM];
        assert_eq!(stats.count, 1);
        assert_close(stats.agreement_percentage, 100.0);
        assert!(stats.is_high_agreement);
    }

    #[test]
    fn test_total_count_invariant() {
        let participants = vec![
            Participant::with_scores(0, "A", "X", [3.0; 5], 4.0),
            Participant::with_scores(1, "B", "Y", [3.0; 5], 4.0),
            Participant::with_scores(2, "C", "X", [3.0; 5], 4.0),
            Participant::with_scores(3, "D", "", [3.0; 5], 4.0),
        ];
        let session = build_session(participants);

        let total: usize = session.teams.values().map(|t| t.count).sum();
        assert_eq!(total, session.participants.len());
        for stats in session.teams.values() {
            assert_eq!(stats.count, stats.members.len());
            assert!(stats.count > 0);
        }
    }

    #[test]
    fn test_average_bounds_for_in_range_input() {
        let session = team_of(&[
            [1.0, 4.0, 2.5, 1.5, 3.5],
            [4.0, 1.0, 3.0, 4.0, 1.0],
            [2.0, 2.0, 2.0, 2.0, 2.0],
        ]);
        let stats = &session.teams["Team"];

        for competency in Competency::ALL {
            let avg = stats.average(competency);
            assert!((1.0..=4.0).contains(&avg));
        }
        assert!((1.0..=4.0).contains(&stats.interpersonal_avg));
        assert!((1.0..=4.0).contains(&stats.self_management_avg));
        assert!((0.0..=100.0).contains(&stats.agreement_percentage));
    }

    #[test]
    fn test_missing_and_non_numeric_contribute_zero() {
        let mut alice = Participant::new(0);
        alice.team = "Team".to_string();
        alice.set_competency(Competency::ConflictResolution, 3.2.into());
        let mut bob = Participant::new(1);
        bob.team = "Team".to_string();
        bob.set_competency(Competency::ConflictResolution, "abc".into());

        let session = build_session(vec![alice, bob]);
        let stats = &session.teams["Team"];

        assert_close(
            stats.competency_totals[&Competency::ConflictResolution],
            3.2,
        );
        assert_close(stats.average(Competency::ConflictResolution), 1.6);
        assert_close(stats.average(Competency::Communication), 0.0);
    }

    #[test]
    fn test_seventy_percent_threshold_is_inclusive() {
        // 7 members at overall 2.5 and 3 at 3.5: the majority sits exactly
        // at the tolerance edge of the 2.8 mean, yielding 70% agreement.
        let mut scores = vec![[2.5; 5]; 7];
        scores.extend(vec![[3.5; 5]; 3]);
        let session = team_of(&scores);
        let stats = &session.teams["Team"];

        assert_close(stats.agreement_percentage, 70.0);
        assert!(stats.is_high_agreement);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let participants = vec![
            Participant::with_scores(0, "A", "X", [3.4, 3.1, 3.6, 2.9, 3.2], 4.2),
            Participant::with_scores(1, "B", "Y", [1.8, 2.0, 2.2, 1.9, 2.1], 2.9),
        ];
        let first = build_session(participants);
        let second = build_session(first.participants.clone());

        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_range_scores_processed_identically() {
        let session = team_of(&[[9.0, 9.0, 9.0, 9.0, 9.0]]);
        let stats = &session.teams["Team"];

        assert_close(stats.average(Competency::Communication), 9.0);
        assert_close(stats.team_mean_overall, 9.0);
        assert_close(stats.agreement_percentage, 100.0);
    }

    #[test]
    fn test_empty_dataset_yields_empty_session() {
        let session = build_session(Vec::new());
        assert!(session.is_empty());
        assert!(session.teams.is_empty());
        assert_eq!(session.high_agreement_count(), 0);
    }
}
