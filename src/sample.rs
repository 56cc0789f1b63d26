//! Built-in example dataset.
//!
//! Obviously fictitious names so generated profiles can be shared with
//! prospective study teams without risk of confusion with real
//! participants. Usable without any input file via `--sample`.

use crate::models::Participant;

/// The twelve example participants across three sample teams.
pub fn sample_participants() -> Vec<Participant> {
    vec![
        // Sample Team A: scores cluster tightly around the team mean.
        Participant::with_scores(0, "John Q. Sample", "Sample Team A", [3.4, 3.1, 3.6, 2.9, 3.2], 4.2),
        Participant::with_scores(1, "Jane A. Placeholder", "Sample Team A", [3.2, 3.3, 3.1, 3.0, 3.1], 4.5),
        Participant::with_scores(2, "Fakename McNotreal", "Sample Team A", [3.0, 2.9, 3.4, 3.2, 2.8], 3.8),
        Participant::with_scores(3, "Demo P. Participant", "Sample Team A", [3.3, 3.2, 3.2, 3.1, 3.0], 4.0),
        // Sample Team B: individual competencies spread widely.
        Participant::with_scores(4, "Testy McTestface", "Sample Team B", [2.4, 3.5, 2.8, 3.6, 3.4], 3.5),
        Participant::with_scores(5, "Nora T. Real", "Sample Team B", [3.8, 2.6, 3.2, 2.4, 2.9], 3.8),
        Participant::with_scores(6, "Definitely Notaperson", "Sample Team B", [2.9, 3.1, 2.5, 3.0, 3.7], 3.2),
        Participant::with_scores(7, "Example B. Data", "Sample Team B", [3.1, 2.8, 3.6, 2.7, 2.6], 2.8),
        // Sample Team C: overall scores spread widely.
        Participant::with_scores(8, "Placeholder Person", "Sample Team C", [3.9, 3.7, 3.8, 3.6, 3.5], 3.5),
        Participant::with_scores(9, "Anon Y. Mous", "Sample Team C", [2.1, 2.3, 2.0, 2.2, 2.4], 2.2),
        Participant::with_scores(10, "Ima G. Nary", "Sample Team C", [3.2, 2.8, 3.0, 2.9, 3.1], 2.8),
        Participant::with_scores(11, "Fakey S. Fakerson", "Sample Team C", [1.8, 2.0, 2.2, 1.9, 2.1], 1.9),
    ]
}
