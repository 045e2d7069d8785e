//! Evidence count per suspect

use super::{owned_text, ClueIndex, SuspectDirectory};
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
    pub suspect_name: String,
    pub count: u32,
}

/// Suspects in the order they were first seen, with their clue counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    entries: Vec<TallyEntry>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// One more clue against `suspect_name`
    pub fn record(&mut self, suspect_name: &str) -> Result<()> {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.suspect_name == suspect_name)
        {
            Some(entry) => entry.count += 1,
            None => self.entries.push(TallyEntry {
                suspect_name: owned_text(suspect_name, "suspect tally")?,
                count: 1,
            }),
        }
        Ok(())
    }

    /// Recount from scratch: every filed clue the directory knows about
    /// counts once for its suspect. Clues are visited node-first through
    /// the index, which fixes the order suspects are listed in.
    pub fn rebuild(&mut self, clues: &ClueIndex, directory: &SuspectDirectory) -> Result<()> {
        self.reset();
        for clue in clues.pre_order() {
            if let Some(suspect) = directory.lookup(clue) {
                self.record(suspect)?;
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&TallyEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(tally: &Tally) -> Vec<(&str, u32)> {
        tally
            .entries()
            .iter()
            .map(|e| (e.suspect_name.as_str(), e.count))
            .collect()
    }

    #[test]
    fn record_counts_in_first_seen_order() {
        let mut tally = Tally::new();
        tally.record("A").unwrap();
        tally.record("A").unwrap();
        tally.record("B").unwrap();
        assert_eq!(pairs(&tally), vec![("A", 2), ("B", 1)]);
    }

    #[test]
    fn order_is_not_alphabetical() {
        let mut tally = Tally::new();
        for name in ["Mordomo", "Cozinheiro", "Mordomo", "Bibliotecária"] {
            tally.record(name).unwrap();
        }
        assert_eq!(
            pairs(&tally),
            vec![("Mordomo", 2), ("Cozinheiro", 1), ("Bibliotecária", 1)]
        );
    }

    #[test]
    fn holds_more_than_ten_suspects() {
        let mut tally = Tally::new();
        for i in 0..25 {
            tally.record(&format!("suspect-{i}")).unwrap();
        }
        assert_eq!(tally.len(), 25);
    }

    #[test]
    fn reset_clears_everything() {
        let mut tally = Tally::new();
        tally.record("A").unwrap();
        tally.reset();
        assert!(tally.is_empty());
        assert!(tally.get(0).is_none());
    }

    #[test]
    fn rebuild_aggregates_known_clues_only() {
        let directory = SuspectDirectory::from_associations([
            ("Mapa da mansão encontrado", "Mordomo"),
            ("Carta misteriosa na gaveta", "Mordomo"),
            ("Faca com manchas estranhas", "Cozinheiro"),
        ])
        .unwrap();
        let mut clues = ClueIndex::new();
        for clue in [
            "Mapa da mansão encontrado",
            "Faca com manchas estranhas",
            "Carta misteriosa na gaveta",
            "Poeira no chão",
        ] {
            clues.insert(clue).unwrap();
        }

        let mut tally = Tally::new();
        tally.record("stale").unwrap();
        tally.rebuild(&clues, &directory).unwrap();
        // pre-order: Mapa, Faca, Carta, Poeira
        assert_eq!(pairs(&tally), vec![("Mordomo", 2), ("Cozinheiro", 1)]);

        tally.rebuild(&clues, &directory).unwrap();
        assert_eq!(pairs(&tally), vec![("Mordomo", 2), ("Cozinheiro", 1)]);
    }

    #[test]
    fn record_keeps_its_own_copy_of_the_name() {
        let mut tally = Tally::new();
        let mut name = String::from("Enfermeira");
        assert!(tally.record(&name).is_ok());
        name.clear();
        assert!(tally.record("Enfermeira").is_ok());
        assert_eq!(pairs(&tally), vec![("Enfermeira", 2)]);
    }
}
