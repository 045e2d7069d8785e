//! The line-oriented shell driven with in-memory input

use detective_quest::console::Console;
use detective_quest::data::{Room, RoomTree, SuspectDirectory};
use detective_quest::game::{Edition, FinalReport};
use detective_quest::{ExplorationSession, Verdict};

fn play(session: &mut ExplorationSession, opening: Vec<detective_quest::GameEvent>, input: &str) -> (Option<Verdict>, String) {
    let mut console = Console::new(input.as_bytes(), Vec::new()).with_report_json(true);
    let verdict = console.run(session, opening).unwrap();
    (verdict, String::from_utf8(console.into_output()).unwrap())
}

#[test]
fn master_game_from_menu_to_verdict() {
    let (mut session, opening) = ExplorationSession::for_edition(Edition::Master).unwrap();
    let (verdict, output) = play(&mut session, opening, "e\nd\ns\n1\n");

    assert_eq!(
        verdict,
        Some(Verdict::Solved {
            suspect: "Mordomo".to_string(),
            clues: 2
        })
    );
    assert!(output.contains("[ROOM] You are in: Quarto Principal"));
    assert!(output.contains("[LEAD] This clue points to: Mordomo"));
    assert!(output.contains("[SUSPECT] 1. Mordomo (2 clues)"));
    assert!(output.contains("[SUSPECT] 2. Jardineiro (1 clue)"));
    assert!(output.contains("CASE SOLVED"));

    // The JSON report sits between the text report and the roster.
    let start = output.find('{').unwrap();
    let end = output.rfind('}').unwrap();
    let report: FinalReport = serde_json::from_str(&output[start..=end]).unwrap();
    assert_eq!(report.clues.len(), 3);
    assert_eq!(report.suspects[0].suspect_name, "Mordomo");
}

#[test]
fn custom_mansion_without_clues_offers_no_accusation() {
    let tree = RoomTree::new(
        Room::create("Átrio", None)
            .unwrap()
            .with_left(Room::create("Porão", None).unwrap()),
    );
    let directory = SuspectDirectory::from_associations([("Luva", "Motorista")]).unwrap();
    let (mut session, opening) = ExplorationSession::start(Edition::Master, tree, Some(directory)).unwrap();
    let (verdict, output) = play(&mut session, opening, "e s\n");

    assert_eq!(verdict, None);
    assert!(output.contains("No clues were collected"));
    assert!(!output.contains("who do you accuse"));
}

#[test]
fn novice_game_exits_at_the_first_dead_end() {
    let (mut session, opening) = ExplorationSession::for_edition(Edition::Novice).unwrap();
    let (verdict, output) = play(&mut session, opening, "d\nd\nthis line is never read\n");

    assert_eq!(verdict, None);
    assert!(output.contains("You are in: Jardim"));
    assert!(output.contains("End of the exploration"));
    assert!(!output.contains("[CLUE]"));
    assert!(!output.contains("Unknown option"));
}
