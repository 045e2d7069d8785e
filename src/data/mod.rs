//! Data structures for the mansion
//!
//! Defines rooms, the clue index, the suspect directory and the tally.

pub mod clues;
pub mod room;
pub mod suspects;
pub mod tally;

pub use clues::*;
pub use room::*;
pub use suspects::*;
pub use tally::*;

use crate::GameError;
use serde::{Deserialize, Serialize};

/// Which way to leave a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Key the player presses for this direction
    pub fn key(&self) -> char {
        match self {
            Direction::Left => 'e',
            Direction::Right => 'd',
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Copy `text` into a freshly allocated `String`, reporting exhaustion
/// instead of aborting.
pub(crate) fn owned_text(text: &str, what: &'static str) -> Result<String, GameError> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(text.len())
        .map_err(|_| GameError::AllocationFailure(what))?;
    owned.push_str(text);
    Ok(owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_text_copies_contents() {
        let copy = owned_text("Biblioteca", "room").unwrap();
        assert_eq!(copy, "Biblioteca");
        assert!(owned_text("", "room").unwrap().is_empty());
    }

    #[test]
    fn direction_keys_match_commands() {
        assert_eq!(Direction::Left.key(), 'e');
        assert_eq!(Direction::Right.key(), 'd');
        assert_eq!(Direction::Right.to_string(), "right");
    }
}
