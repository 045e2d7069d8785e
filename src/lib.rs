//! Detective Quest: the Mystery of the Mansion
//!
//! A text adventure where you walk the rooms of a mansion, pick up clues,
//! and name the culprit once you think you have enough evidence.
//!
//! # Game Mechanics
//!
//! - **Exploration**: descend left or right through a fixed tree of rooms
//! - **Clues**: every clue found is filed once, in alphabetical order
//! - **Suspects**: each clue points to a suspect through a hash table
//! - **Accusation**: a suspect backed by at least two clues closes the case
//!
//! # Architecture
//!
//! - `data` - Room tree, clue index, suspect directory, tally
//! - `game` - Exploration session, accusation, narration, mansion layouts
//! - `tui` - Terminal user interface with ratatui
//! - `console` - Line-oriented shell over any reader/writer pair

pub mod console;
pub mod data;
pub mod game;
pub mod tui;

pub use data::*;
pub use game::{ExplorationSession, GameEvent, SessionState, Verdict};

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the game
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Out of memory while building {0}")]
    AllocationFailure(&'static str),

    #[error("A room needs a non-empty name")]
    EmptyRoomName,

    #[error("The exploration is already over")]
    SessionFinished,

    #[error("No accusation can be made: {0}")]
    AccusationUnavailable(String),

    #[error("The accusation has already been made")]
    AccusationAlreadyMade,
}
