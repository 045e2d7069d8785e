//! Investigation mechanics
//!
//! Turns the clue notebook into a final report and judges the accusation.

use crate::data::*;
use serde::{Deserialize, Serialize};

/// Clues a suspect needs against them for the accusation to stick
pub const ACCUSATION_THRESHOLD: u32 = 2;

/// A filed clue and who it points to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedClue {
    pub content: String,
    pub suspect: Option<String>,
}

/// Everything collected during a walk, ready to show the player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    /// Alphabetical
    pub clues: Vec<ReportedClue>,
    /// Empty unless the edition has suspects
    pub suspects: Vec<TallyEntry>,
}

impl FinalReport {
    pub fn compile(
        clues: &ClueIndex,
        directory: Option<&SuspectDirectory>,
        tally: &Tally,
    ) -> Self {
        let clues = clues
            .iter()
            .map(|content| ReportedClue {
                content: content.to_string(),
                suspect: directory
                    .and_then(|d| d.lookup(content))
                    .map(str::to_string),
            })
            .collect();

        Self {
            clues,
            suspects: tally.entries().to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clues.is_empty()
    }
}

/// Outcome of the accusation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Enough clues: the accused is found guilty
    Solved { suspect: String, clues: u32 },
    /// Too few clues to hold up
    Unsolved { suspect: String, clues: u32 },
    /// The selection matched no suspect
    Cancelled { selection: i64 },
}

impl Verdict {
    pub fn is_solved(&self) -> bool {
        matches!(self, Verdict::Solved { .. })
    }
}

/// Judge an accusation of the suspect at 1-based `selection`
pub fn judge(tally: &Tally, selection: i64) -> Verdict {
    let entry = usize::try_from(selection)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| tally.get(index));

    match entry {
        None => Verdict::Cancelled { selection },
        Some(entry) if entry.count >= ACCUSATION_THRESHOLD => Verdict::Solved {
            suspect: entry.suspect_name.clone(),
            clues: entry.count,
        },
        Some(entry) => Verdict::Unsolved {
            suspect: entry.suspect_name.clone(),
            clues: entry.count,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally_of(names: &[&str]) -> Tally {
        let mut tally = Tally::new();
        for name in names {
            tally.record(name).unwrap();
        }
        tally
    }

    #[test]
    fn threshold_decides_the_case() {
        let tally = tally_of(&["Jardineiro", "Mordomo", "Jardineiro"]);
        assert_eq!(
            judge(&tally, 1),
            Verdict::Solved {
                suspect: "Jardineiro".to_string(),
                clues: 2
            }
        );
        assert_eq!(
            judge(&tally, 2),
            Verdict::Unsolved {
                suspect: "Mordomo".to_string(),
                clues: 1
            }
        );
    }

    #[test]
    fn out_of_range_selection_cancels() {
        let tally = tally_of(&["Mordomo"]);
        for selection in [0, 2, -1, i64::MAX, i64::MIN] {
            assert_eq!(judge(&tally, selection), Verdict::Cancelled { selection });
        }
        assert_eq!(judge(&Tally::new(), 1), Verdict::Cancelled { selection: 1 });
    }

    #[test]
    fn report_lists_clues_alphabetically_with_suspects() {
        let directory = SuspectDirectory::from_associations([
            ("Joia valiosa escondida", "Cozinheiro"),
            ("Documento confidencial", "Secretária"),
        ])
        .unwrap();
        let mut clues = ClueIndex::new();
        for clue in ["Joia valiosa escondida", "Poeira", "Documento confidencial"] {
            clues.insert(clue).unwrap();
        }
        let mut tally = Tally::new();
        tally.rebuild(&clues, &directory).unwrap();

        let report = FinalReport::compile(&clues, Some(&directory), &tally);
        let listed: Vec<(&str, Option<&str>)> = report
            .clues
            .iter()
            .map(|c| (c.content.as_str(), c.suspect.as_deref()))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("Documento confidencial", Some("Secretária")),
                ("Joia valiosa escondida", Some("Cozinheiro")),
                ("Poeira", None),
            ]
        );
        assert_eq!(report.suspects.len(), 2);
    }

    #[test]
    fn report_without_directory_has_no_suspects() {
        let mut clues = ClueIndex::new();
        clues.insert("Documento confidencial").unwrap();
        let report = FinalReport::compile(&clues, None, &Tally::new());
        assert_eq!(report.clues[0].suspect, None);
        assert!(report.suspects.is_empty());
        assert!(!report.is_empty());
    }
}
