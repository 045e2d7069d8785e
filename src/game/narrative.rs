//! Narration: turns game events into lines of text
//!
//! Every line starts with a bracketed tag (`[ROOM]`, `[CLUE]`, ...). The
//! TUI colours lines by tag; the console prints them as they are.

use super::{Edition, EndReason, Exits, FinalReport, GameEvent, Verdict, ACCUSATION_THRESHOLD};
use crate::data::Tally;

/// Lines describing one event
pub fn narrate(event: &GameEvent, edition: Edition) -> Vec<String> {
    match event {
        GameEvent::EnteredRoom { name, .. } => vec![format!("[ROOM] You are in: {}", name)],
        GameEvent::ClueFound {
            clue,
            suspect,
            newly_recorded,
        } => {
            let mut lines = vec![format!("[CLUE] Clue found: {}", clue)];
            if let Some(suspect) = suspect {
                lines.push(format!("[LEAD] This clue points to: {}", suspect));
            }
            if *newly_recorded {
                lines.push("[NOTE] Added to your notebook.".to_string());
            } else {
                lines.push("[NOTE] Already in your notebook.".to_string());
            }
            lines
        }
        GameEvent::NoClueHere => vec!["[NOTE] Nothing of interest in this room.".to_string()],
        GameEvent::Moved(direction) => vec![format!("[MOVE] You head {}...", direction)],
        GameEvent::NoPath(direction) => vec![format!("[WARN] There is no way {}!", direction)],
        GameEvent::InvalidCommand(token) => vec![format!(
            "[ERROR] Unknown option '{}'. Use 'e' for left, 'd' for right or 's' to {}.",
            token,
            finish_verb(edition)
        )],
        GameEvent::DeadEnd => vec![
            "[WARN] This room has no more passages!".to_string(),
        ],
        GameEvent::ExplorationEnded(EndReason::DeadEnd) => {
            vec!["[SYSTEM] End of the exploration. Thanks for playing!".to_string()]
        }
        GameEvent::ExplorationEnded(EndReason::PlayerFinished) => match edition {
            Edition::Novice => vec!["[SYSTEM] Leaving the mansion... Thanks for playing!".to_string()],
            _ => vec!["[SYSTEM] Exploration finished.".to_string()],
        },
        GameEvent::ReportReady(report) => report_lines(report),
        GameEvent::NothingCollected => vec![
            "[REPORT] No clues were collected during the exploration.".to_string(),
            "[TIP] Explore more rooms of the mansion next time!".to_string(),
        ],
    }
}

/// The options offered in the current room
pub fn exit_options(exits: &Exits, edition: Edition) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(left) = &exits.left {
        lines.push(format!("(e) Go left: {}", left));
    }
    if let Some(right) = &exits.right {
        lines.push(format!("(d) Go right: {}", right));
    }
    lines.push(format!("(s) {}", capitalize(finish_verb(edition))));
    lines
}

fn finish_verb(edition: Edition) -> &'static str {
    match edition {
        Edition::Novice => "leave the game",
        Edition::Adventurer => "finish and see the clue report",
        Edition::Master => "finish and make the accusation",
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn report_lines(report: &FinalReport) -> Vec<String> {
    let mut lines = vec![format!(
        "[REPORT] Clues collected ({} total):",
        report.clues.len()
    )];
    for clue in &report.clues {
        match &clue.suspect {
            Some(suspect) => lines.push(format!("[REPORT]   • {} → {}", clue.content, suspect)),
            None => lines.push(format!("[REPORT]   • {}", clue.content)),
        }
    }
    lines
}

/// Numbered suspect list for the accusation prompt
pub fn suspect_roster(tally: &Tally) -> Vec<String> {
    tally
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "[SUSPECT] {}. {} ({} clue{})",
                i + 1,
                entry.suspect_name,
                entry.count,
                plural(entry.count)
            )
        })
        .collect()
}

pub fn accusation_prompt(tally: &Tally) -> String {
    format!(
        "Based on the evidence, who do you accuse? (1-{}): ",
        tally.len()
    )
}

pub fn verdict_lines(verdict: &Verdict) -> Vec<String> {
    match verdict {
        Verdict::Solved { suspect, clues } => vec![
            format!("[VERDICT] You accused: {}", suspect),
            format!("[SUCCESS] CASE SOLVED! {} clues point to {}.", clues, suspect),
            format!("[SUCCESS] {} has been found guilty. Excellent work, detective!", suspect),
        ],
        Verdict::Unsolved { suspect, clues } => vec![
            format!("[VERDICT] You accused: {}", suspect),
            format!(
                "[FAILED] CASE UNSOLVED. Only {} clue{} against {}.",
                clues,
                plural(*clues),
                suspect
            ),
            format!(
                "[TIP] You need at least {} clues pointing to the same suspect.",
                ACCUSATION_THRESHOLD
            ),
        ],
        Verdict::Cancelled { .. } => {
            vec!["[WARN] Invalid choice! The judgment has been cancelled.".to_string()]
        }
    }
}

/// Opening lines for `edition`
pub fn intro(edition: Edition) -> Vec<String> {
    let mut lines = vec![
        format!("[SYSTEM] Detective Quest: {} edition", edition),
        format!("[BRIEFING] {}", edition.description()),
    ];
    if edition.consults_suspects() {
        lines.push(format!(
            "[BRIEFING] Rule: you need at least {} clues pointing to the same suspect to win.",
            ACCUSATION_THRESHOLD
        ));
    }
    lines.push(format!(
        "[TIP] Commands: 'e' (left), 'd' (right), 's' ({})",
        finish_verb(edition)
    ));
    lines
}

fn plural(count: u32) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
