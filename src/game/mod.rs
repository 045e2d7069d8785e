//! Core game logic and state management

pub mod investigation;
pub mod narrative;
pub mod scenario;

pub use investigation::{FinalReport, ReportedClue, Verdict, ACCUSATION_THRESHOLD};

use crate::data::*;
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Which of the three games is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Edition {
    /// Walk the mansion, nothing else
    Novice,
    /// Collect clues and read them back in order
    Adventurer,
    /// Collect clues, tie them to suspects, accuse someone
    Master,
}

impl Edition {
    pub const ALL: [Edition; 3] = [Edition::Novice, Edition::Adventurer, Edition::Master];

    pub fn name(&self) -> &'static str {
        match self {
            Edition::Novice => "Novice",
            Edition::Adventurer => "Adventurer",
            Edition::Master => "Master",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Edition::Novice => "Find your way through the mansion.",
            Edition::Adventurer => "Collect clues; they are filed alphabetically.",
            Edition::Master => "Tie clues to suspects and name the culprit.",
        }
    }

    pub fn collects_clues(&self) -> bool {
        !matches!(self, Edition::Novice)
    }

    pub fn consults_suspects(&self) -> bool {
        matches!(self, Edition::Master)
    }

    /// Whether walking into a dead end ends the game on its own.
    /// The other editions wait for an explicit finish even at a leaf.
    pub fn ends_at_leaf(&self) -> bool {
        matches!(self, Edition::Novice)
    }
}

impl std::fmt::Display for Edition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One player input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Left,
    Right,
    Finish,
    Invalid(String),
}

impl Command {
    pub fn from_key(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'e' => Command::Left,
            'd' => Command::Right,
            's' => Command::Finish,
            other => Command::Invalid(other.to_string()),
        }
    }

    /// Decode a typed token. Only single-character tokens are commands.
    pub fn parse(token: &str) -> Self {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => match Command::from_key(key) {
                Command::Invalid(_) => Command::Invalid(token.to_string()),
                command => command,
            },
            _ => Command::Invalid(token.to_string()),
        }
    }
}

/// Passages out of the current room
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exits {
    pub left: Option<String>,
    pub right: Option<String>,
}

impl Exits {
    fn of(room: &Room) -> Self {
        Self {
            left: room.descend(Direction::Left).map(|r| r.name().to_string()),
            right: room.descend(Direction::Right).map(|r| r.name().to_string()),
        }
    }

    pub fn is_dead_end(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Why the exploration stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    PlayerFinished,
    DeadEnd,
}

/// Something that happened during a step, for a shell to narrate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EnteredRoom { name: String, exits: Exits },
    ClueFound {
        clue: String,
        suspect: Option<String>,
        newly_recorded: bool,
    },
    NoClueHere,
    Moved(Direction),
    NoPath(Direction),
    InvalidCommand(String),
    DeadEnd,
    ExplorationEnded(EndReason),
    ReportReady(FinalReport),
    NothingCollected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    AtRoom,
    Finished(EndReason),
}

/// A single walk through the mansion
#[derive(Debug, Clone)]
pub struct ExplorationSession {
    edition: Edition,
    mansion: RoomTree,
    directory: Option<SuspectDirectory>,
    /// Directions taken from the entrance to the current room
    path: Vec<Direction>,
    state: SessionState,
    clues: ClueIndex,
    tally: Tally,
    verdict: Option<Verdict>,
}

impl ExplorationSession {
    /// Stand the player in the entrance of `mansion`. Returns the session
    /// together with what happened on entering.
    pub fn start(
        edition: Edition,
        mansion: RoomTree,
        directory: Option<SuspectDirectory>,
    ) -> Result<(Self, Vec<GameEvent>)> {
        info!(%edition, rooms = mansion.len(), "exploration started");
        // Only the Master edition ties clues to suspects.
        let directory = directory.filter(|_| edition.consults_suspects());
        let mut session = Self {
            edition,
            mansion,
            directory,
            path: Vec::new(),
            state: SessionState::AtRoom,
            clues: ClueIndex::new(),
            tally: Tally::new(),
            verdict: None,
        };
        let mut events = Vec::new();
        session.enter_current(&mut events)?;
        Ok((session, events))
    }

    /// Start `edition` on its stock mansion
    pub fn for_edition(edition: Edition) -> Result<(Self, Vec<GameEvent>)> {
        let mansion = scenario::mansion(edition)?;
        let directory = if edition.consults_suspects() {
            Some(scenario::suspect_directory()?)
        } else {
            None
        };
        Self::start(edition, mansion, directory)
    }

    /// Apply one command
    pub fn step(&mut self, command: Command) -> Result<Vec<GameEvent>> {
        if let SessionState::Finished(_) = self.state {
            return Err(GameError::SessionFinished.into());
        }

        let mut events = Vec::new();
        match command {
            Command::Left => self.go(Direction::Left, &mut events)?,
            Command::Right => self.go(Direction::Right, &mut events)?,
            Command::Finish => self.finish(EndReason::PlayerFinished, &mut events)?,
            Command::Invalid(token) => {
                debug!(%token, "rejected command");
                events.push(GameEvent::InvalidCommand(token));
            }
        }
        Ok(events)
    }

    fn go(&mut self, direction: Direction, events: &mut Vec<GameEvent>) -> Result<()> {
        if self.current_room().descend(direction).is_none() {
            events.push(GameEvent::NoPath(direction));
            return Ok(());
        }
        self.path.push(direction);
        events.push(GameEvent::Moved(direction));
        self.enter_current(events)
    }

    fn enter_current(&mut self, events: &mut Vec<GameEvent>) -> Result<()> {
        let room = self
            .mansion
            .resolve(&self.path)
            .ok_or_else(|| anyhow::anyhow!("path {:?} leads outside the mansion", self.path))?;
        debug!(room = room.name(), depth = self.path.len(), "entered room");
        events.push(GameEvent::EnteredRoom {
            name: room.name().to_string(),
            exits: Exits::of(room),
        });

        if self.edition.collects_clues() {
            match room.clue() {
                Some(clue) => {
                    let newly_recorded = self.clues.insert(clue)?;
                    let suspect = self
                        .directory
                        .as_ref()
                        .and_then(|directory| directory.lookup(clue))
                        .map(str::to_string);
                    if newly_recorded {
                        info!(%clue, "clue filed");
                    }
                    events.push(GameEvent::ClueFound {
                        clue: clue.to_string(),
                        suspect,
                        newly_recorded,
                    });
                }
                None => events.push(GameEvent::NoClueHere),
            }
        }

        if self.edition.ends_at_leaf() && room.is_leaf() {
            events.push(GameEvent::DeadEnd);
            self.finish(EndReason::DeadEnd, events)?;
        }
        Ok(())
    }

    fn finish(&mut self, reason: EndReason, events: &mut Vec<GameEvent>) -> Result<()> {
        self.state = SessionState::Finished(reason);
        info!(?reason, clues = self.clues.count(), "exploration ended");
        events.push(GameEvent::ExplorationEnded(reason));

        if !self.edition.collects_clues() {
            return Ok(());
        }
        if self.clues.is_empty() {
            events.push(GameEvent::NothingCollected);
            return Ok(());
        }
        if let Some(directory) = &self.directory {
            self.tally.rebuild(&self.clues, directory)?;
        }
        events.push(GameEvent::ReportReady(self.report()));
        Ok(())
    }

    /// Clues filed so far, in order, with their suspects and the tally
    pub fn report(&self) -> FinalReport {
        FinalReport::compile(&self.clues, self.directory.as_ref(), &self.tally)
    }

    /// Whether [`accuse`](Self::accuse) would be accepted right now
    pub fn can_accuse(&self) -> bool {
        self.accusation_blocker().is_none()
    }

    fn accusation_blocker(&self) -> Option<GameError> {
        if self.verdict.is_some() {
            return Some(GameError::AccusationAlreadyMade);
        }
        let reason = if self.state == SessionState::AtRoom {
            "the exploration is still going"
        } else if self.directory.is_none() {
            "there are no suspects in this edition"
        } else if self.clues.is_empty() {
            "no clues were collected"
        } else {
            return None;
        };
        Some(GameError::AccusationUnavailable(reason.to_string()))
    }

    /// Accuse the suspect at 1-based `selection` in the tally. One attempt
    /// only; a selection out of range cancels the judgment.
    pub fn accuse(&mut self, selection: i64) -> Result<Verdict> {
        if let Some(blocker) = self.accusation_blocker() {
            return Err(blocker.into());
        }
        let verdict = investigation::judge(&self.tally, selection);
        match &verdict {
            Verdict::Cancelled { .. } => warn!(selection, "selection matched no suspect"),
            _ => info!(selection, ?verdict, "accusation judged"),
        }
        self.verdict = Some(verdict.clone());
        Ok(verdict)
    }

    pub fn edition(&self) -> Edition {
        self.edition
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished(_))
    }

    pub fn mansion(&self) -> &RoomTree {
        &self.mansion
    }

    pub fn current_room(&self) -> &Room {
        // `path` only ever grows by directions that had a child.
        self.mansion.resolve(&self.path).unwrap_or(self.mansion.root())
    }

    pub fn exits(&self) -> Exits {
        Exits::of(self.current_room())
    }

    /// Names of the rooms walked through, entrance first
    pub fn trail(&self) -> Vec<&str> {
        let mut room = self.mansion.root();
        let mut names = vec![room.name()];
        for direction in &self.path {
            match room.descend(*direction) {
                Some(next) => {
                    room = next;
                    names.push(room.name());
                }
                None => break,
            }
        }
        names
    }

    pub fn clues(&self) -> &ClueIndex {
        &self.clues
    }

    pub fn directory(&self) -> Option<&SuspectDirectory> {
        self.directory.as_ref()
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }
}
