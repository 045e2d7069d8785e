//! Terminal User Interface
//!
//! Full-screen mansion explorer using ratatui

pub mod app;
pub mod widgets;

pub use app::App;

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the game
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Yellow,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::LightYellow,
            border: Color::DarkGray,
            header: Color::Magenta,
        }
    }
}

/// A narrated line, stamped with when it appeared
#[derive(Debug, Clone)]
pub struct GameMessage {
    pub timestamp: DateTime<Local>,
    pub text: String,
}

impl GameMessage {
    pub fn new(text: String) -> Self {
        Self {
            timestamp: Local::now(),
            text,
        }
    }
}

/// Colour and weight for a narrated line, picked by its tag
pub fn tag_style(line: &str) -> Style {
    let (color, bold) = if line.starts_with("[ERROR]") || line.starts_with("[FAILED]") {
        (Color::Red, true)
    } else if line.starts_with("[WARN]") {
        (Color::Yellow, true)
    } else if line.starts_with("[SUCCESS]") {
        (Color::Green, true)
    } else if line.starts_with("[ROOM]") {
        (Color::Cyan, true)
    } else if line.starts_with("[CLUE]") {
        (Color::Magenta, true)
    } else if line.starts_with("[LEAD]") || line.starts_with("[SUSPECT]") {
        (Color::LightRed, false)
    } else if line.starts_with("[REPORT]") || line.starts_with("[VERDICT]") {
        (Color::White, true)
    } else if line.starts_with("[BRIEFING]") {
        (Color::Yellow, false)
    } else if line.starts_with("[SYSTEM]") {
        (Color::Cyan, false)
    } else if line.starts_with("[MOVE]") {
        (Color::Blue, false)
    } else if line.starts_with("[NOTE]") || line.starts_with("[TIP]") {
        (Color::DarkGray, false)
    } else {
        (Color::White, false)
    };

    if bold {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// ASCII art logo
pub const LOGO: &str = r#"
╔══════════════════════════════════════════════════════════════╗
║                                                              ║
║   ██████╗ ███████╗████████╗███████╗ ██████╗████████╗██╗   ██╗ ║
║   ██╔══██╗██╔════╝╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██║   ██║ ║
║   ██║  ██║█████╗     ██║   █████╗  ██║        ██║   ██║   ██║ ║
║   ██║  ██║██╔══╝     ██║   ██╔══╝  ██║        ██║   ╚██╗ ██╔╝ ║
║   ██████╔╝███████╗   ██║   ███████╗╚██████╗   ██║    ╚████╔╝  ║
║   ╚═════╝ ╚══════╝   ╚═╝   ╚══════╝ ╚═════╝   ╚═╝     ╚═══╝   ║
║                                                              ║
║                  Q U E S T  ·  the Mansion                   ║
║                                                              ║
╚══════════════════════════════════════════════════════════════╝
"#;

/// Smaller logo for header
pub const SMALL_LOGO: &str = " DETECTIVE QUEST ";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════════════════════╗
║                       CONTROLS                                ║
╠═══════════════════════════════════════════════════════════════╣
║  ↑/↓   Choose an edition                                      ║
║  Enter Start / Confirm                                        ║
║  Esc   Back to the title screen                               ║
║  ?     Toggle this help                                       ║
║  q     Quit (title and closing screens)                       ║
╠═══════════════════════════════════════════════════════════════╣
║                     IN THE MANSION                            ║
╠═══════════════════════════════════════════════════════════════╣
║  e     Go left                                                ║
║  d     Go right                                               ║
║  s     Finish the exploration                                 ║
╠═══════════════════════════════════════════════════════════════╣
║                     ACCUSATION                                ║
╠═══════════════════════════════════════════════════════════════╣
║  0-9   Type the suspect's number, Enter to accuse             ║
╚═══════════════════════════════════════════════════════════════╝
"#;

/// Create the main layout
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),   // Header
            Constraint::Min(10),     // Main content
            Constraint::Length(1),   // Status bar
        ])
        .split(area)
        .to_vec()
}

/// Create the game content layout (left panel + main area)
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),  // Exits + notebook
            Constraint::Percentage(65),  // Main area
        ])
        .split(area)
        .to_vec()
}

/// Create the main area layout (narrative + lower panel)
pub fn create_main_area_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(65),  // Narrative
            Constraint::Percentage(35),  // Trail / suspects
        ])
        .split(area)
        .to_vec()
}

/// Centered popup of at most `width` x `height` inside `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_pick_colours() {
        assert_eq!(tag_style("[ERROR] nope").fg, Some(Color::Red));
        assert_eq!(tag_style("[CLUE] Faca").fg, Some(Color::Magenta));
        assert_eq!(tag_style("plain").fg, Some(Color::White));
    }

    #[test]
    fn popup_fits_inside_small_areas() {
        let area = Rect::new(0, 0, 20, 5);
        let popup = centered_rect(60, 12, area);
        assert_eq!(popup, area);
        let popup = centered_rect(10, 3, area);
        assert_eq!(popup, Rect::new(5, 1, 10, 3));
    }
}
