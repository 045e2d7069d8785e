//! Detective Quest: The Mystery of the Mansion
//!
//! Walk the mansion room by room, gather clues and name the culprit.

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use detective_quest::console::Console;
use detective_quest::game::{Edition, ExplorationSession};
use detective_quest::tui::App;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "detective-quest")]
#[command(version = detective_quest::VERSION)]
#[command(about = "Explore the mansion, collect clues, accuse a suspect")]
struct Cli {
    /// Edition to play; the TUI shows a menu when omitted
    #[arg(long, value_enum)]
    edition: Option<Edition>,

    /// Plain line-by-line console instead of the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Print the final clue report as JSON (console only)
    #[arg(long)]
    report_json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the game on stdout.
    // Silent unless RUST_LOG is set.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    if cli.plain {
        run_console(cli.edition.unwrap_or(Edition::Master), cli.report_json)
    } else {
        run_tui(cli.edition)
    }
}

fn run_console(edition: Edition, report_json: bool) -> anyhow::Result<()> {
    let (mut session, opening) = ExplorationSession::for_edition(edition)?;
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), stdout()).with_report_json(report_json);
    console.run(&mut session, opening)?;
    Ok(())
}

fn run_tui(edition: Option<Edition>) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(edition);
    let result = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  Thanks for playing Detective Quest!                   ║");
    println!("║                                                        ║");
    println!("║  The mansion keeps its secrets... for now.             ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    // Main loop
    while app.running {
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        if !app.handle_input()? {
            break;
        }
    }
    Ok(())
}
