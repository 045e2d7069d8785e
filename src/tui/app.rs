//! Main application state and rendering

use crate::game::narrative;
use crate::game::{Command, Edition, ExplorationSession, GameEvent, Verdict, ACCUSATION_THRESHOLD};
use crate::tui::widgets::{DramaticBox, EvidenceMeter};
use crate::tui::{centered_rect, styled_block, tag_style, GameMessage, Theme, HELP_TEXT, LOGO, SMALL_LOGO};
use crate::tui::{create_content_layout, create_main_area_layout, create_main_layout};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;
use tracing::{error, info};

/// Messages kept in the narrative log
const LOG_LIMIT: usize = 200;

/// Application state
pub struct App {
    pub session: Option<ExplorationSession>,
    pub edition: Edition,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub current_screen: Screen,
    pub menu_state: ListState,
    pub input_buffer: String,
    pub message_log: Vec<GameMessage>,
}

/// Current screen being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    TitleMenu,
    Exploring,
    Accusation,
    CaseClosed,
}

impl App {
    /// With `edition` set the title menu is skipped
    pub fn new(edition: Option<Edition>) -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(Edition::ALL.len() - 1));

        let mut app = Self {
            session: None,
            edition: Edition::Master,
            theme: Theme::default(),
            running: true,
            show_help: false,
            current_screen: Screen::TitleMenu,
            menu_state,
            input_buffer: String::new(),
            message_log: Vec::new(),
        };
        if let Some(edition) = edition {
            app.start_game(edition);
        }
        app
    }

    /// Poll the terminal for a key and handle it
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(self.running)
    }

    /// React to one key press
    pub fn handle_key(&mut self, code: KeyCode) {
        if code == KeyCode::Char('?') && self.current_screen != Screen::Accusation {
            self.show_help = !self.show_help;
            return;
        }
        if self.show_help {
            if code == KeyCode::Esc {
                self.show_help = false;
            }
            return;
        }

        match self.current_screen {
            Screen::TitleMenu => self.handle_title_key(code),
            Screen::Exploring => self.handle_exploring_key(code),
            Screen::Accusation => self.handle_accusation_key(code),
            Screen::CaseClosed => match code {
                KeyCode::Enter | KeyCode::Esc => self.return_to_title(),
                KeyCode::Char('q') | KeyCode::Char('Q') => self.running = false,
                _ => {}
            },
        }
    }

    fn handle_title_key(&mut self, code: KeyCode) {
        let items = Edition::ALL.len() + 1; // editions + Quit
        match code {
            KeyCode::Up => {
                let i = self.menu_state.selected().unwrap_or(0);
                self.menu_state.select(Some((i + items - 1) % items));
            }
            KeyCode::Down => {
                let i = self.menu_state.selected().unwrap_or(0);
                self.menu_state.select(Some((i + 1) % items));
            }
            KeyCode::Enter => match self.menu_state.selected().and_then(|i| Edition::ALL.get(i)) {
                Some(edition) => self.start_game(*edition),
                None => self.running = false,
            },
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.start_game(Edition::ALL[index]);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.running = false,
            _ => {}
        }
    }

    fn handle_exploring_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.return_to_title(),
            KeyCode::Char(c) => self.apply_command(Command::from_key(c)),
            _ => {}
        }
    }

    fn handle_accusation_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() && self.input_buffer.len() < 6 => {
                self.input_buffer.push(c);
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Enter => self.submit_accusation(),
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.submit_accusation();
            }
            _ => {}
        }
    }

    /// Begin a fresh walk through the mansion
    pub fn start_game(&mut self, edition: Edition) {
        self.edition = edition;
        self.message_log.clear();
        self.input_buffer.clear();
        self.push_lines(narrative::intro(edition));

        match ExplorationSession::for_edition(edition) {
            Ok((session, events)) => {
                info!(%edition, "new game");
                self.session = Some(session);
                self.current_screen = Screen::Exploring;
                self.show_events(&events);
                self.after_step();
            }
            Err(err) => {
                error!(%err, "could not build the mansion");
                self.push_line(format!("[ERROR] Could not build the mansion: {}", err));
                self.current_screen = Screen::TitleMenu;
            }
        }
    }

    fn return_to_title(&mut self) {
        self.session = None;
        self.input_buffer.clear();
        self.current_screen = Screen::TitleMenu;
    }

    fn apply_command(&mut self, command: Command) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.step(command) {
            Ok(events) => {
                self.show_events(&events);
                self.after_step();
            }
            Err(err) => self.push_line(format!("[ERROR] {}", err)),
        }
    }

    /// Move on to the accusation or the closing screen once the walk ends
    fn after_step(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if !session.is_finished() {
            return;
        }
        if session.can_accuse() {
            let mut lines = narrative::suspect_roster(session.tally());
            lines.push(format!("[TIP] {}", narrative::accusation_prompt(session.tally())));
            self.push_lines(lines);
            self.current_screen = Screen::Accusation;
        } else {
            self.current_screen = Screen::CaseClosed;
        }
    }

    fn submit_accusation(&mut self) {
        let selection = self.input_buffer.trim().parse::<i64>().unwrap_or(0);
        self.input_buffer.clear();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.accuse(selection) {
            Ok(verdict) => self.push_lines(narrative::verdict_lines(&verdict)),
            Err(err) => self.push_line(format!("[ERROR] {}", err)),
        }
        self.current_screen = Screen::CaseClosed;
    }

    fn show_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.push_lines(narrative::narrate(event, self.edition));
        }
    }

    fn push_line(&mut self, line: String) {
        self.message_log.push(GameMessage::new(line));
        if self.message_log.len() > LOG_LIMIT {
            let excess = self.message_log.len() - LOG_LIMIT;
            self.message_log.drain(..excess);
        }
    }

    fn push_lines(&mut self, lines: Vec<String>) {
        for line in lines {
            self.push_line(line);
        }
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        match self.current_screen {
            Screen::TitleMenu => self.render_title_menu(frame),
            Screen::Exploring | Screen::Accusation => self.render_game(frame),
            Screen::CaseClosed => {
                self.render_game(frame);
                self.render_case_closed(frame);
            }
        }

        // Overlay help if showing
        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_title_menu(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.bg)),
            area,
        );

        let logo_height = if area.height >= 30 {
            LOGO.lines().count() as u16
        } else {
            2
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(logo_height),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(area);

        let logo = if area.height >= 30 {
            Paragraph::new(LOGO)
        } else {
            Paragraph::new(vec![
                Line::from("═══ DETECTIVE QUEST ═══"),
                Line::from("The Mystery of the Mansion"),
            ])
        }
        .style(Style::default().fg(self.theme.accent))
        .alignment(Alignment::Center);
        frame.render_widget(logo, chunks[0]);

        let colors = [Color::Green, Color::Cyan, Color::Magenta];
        let mut items: Vec<ListItem> = Edition::ALL
            .iter()
            .zip(colors)
            .enumerate()
            .map(|(i, (edition, color))| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        format!("  {}. {}", i + 1, edition.name()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("     {}", edition.description()),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();
        items.push(ListItem::new("  Quit"));

        let menu_area = centered_rect(64, chunks[1].height, chunks[1]);
        let menu = List::new(items)
            .block(styled_block("Choose an Edition", &self.theme))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .highlight_symbol("→ ");
        frame.render_stateful_widget(menu, menu_area, &mut self.menu_state);

        let footer = Paragraph::new("↑/↓ to select, Enter to start | ? for help | q to quit")
            .style(Style::default().fg(self.theme.border))
            .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[2]);
    }

    fn render_game(&mut self, frame: &mut Frame) {
        let layout = create_main_layout(frame.area());
        self.render_header(frame, layout[0]);

        let content_layout = create_content_layout(layout[1]);
        self.render_side_panel(frame, content_layout[0]);

        let main_layout = create_main_area_layout(content_layout[1]);
        self.render_messages(frame, main_layout[0]);
        if self.current_screen == Screen::Accusation {
            self.render_suspects(frame, main_layout[1]);
        } else {
            self.render_trail(frame, main_layout[1]);
        }

        self.render_status_bar(frame, layout[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(19),
                Constraint::Min(20),
                Constraint::Length(24),
            ])
            .split(area);
        let bordered = || {
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.border))
        };

        let logo = Paragraph::new(SMALL_LOGO)
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .block(bordered());
        frame.render_widget(logo, header_layout[0]);

        let room = self
            .session
            .as_ref()
            .map(|s| s.current_room().name().to_string())
            .unwrap_or_default();
        let title = Paragraph::new(room)
            .style(Style::default().fg(self.theme.warning).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(bordered());
        frame.render_widget(title, header_layout[1]);

        let edition = Paragraph::new(format!(" {} edition ", self.edition))
            .style(Style::default().fg(self.theme.header))
            .alignment(Alignment::Right)
            .block(bordered());
        frame.render_widget(edition, header_layout[2]);
    }

    fn render_side_panel(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(4)])
            .split(area);

        let options: Vec<ListItem> = match &self.session {
            Some(session) if !session.is_finished() => {
                narrative::exit_options(&session.exits(), self.edition)
                    .into_iter()
                    .map(ListItem::new)
                    .collect()
            }
            _ => vec![ListItem::new(Span::styled(
                "The exploration is over.",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        frame.render_widget(
            List::new(options).block(styled_block("Options", &self.theme)),
            chunks[0],
        );

        let notebook: Vec<ListItem> = match &self.session {
            Some(session) if !self.edition.collects_clues() => vec![ListItem::new(Span::styled(
                format!("No notebook in the {} edition.", session.edition()),
                Style::default().fg(Color::DarkGray),
            ))],
            Some(session) if !session.clues().is_empty() => session
                .clues()
                .iter()
                .map(|clue| {
                    let suspect = session
                        .directory()
                        .and_then(|d| d.lookup(clue))
                        .map(|s| format!(" → {}", s))
                        .unwrap_or_default();
                    ListItem::new(Line::from(vec![
                        Span::styled("• ", Style::default().fg(self.theme.accent)),
                        Span::raw(clue.to_string()),
                        Span::styled(suspect, Style::default().fg(Color::LightRed)),
                    ]))
                })
                .collect(),
            _ => vec![ListItem::new(Span::styled(
                "No clues yet.",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        let count = self.session.as_ref().map(|s| s.clues().count()).unwrap_or(0);
        frame.render_widget(
            List::new(notebook).block(styled_block(&format!("Notebook ({})", count), &self.theme)),
            chunks[1],
        );
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);

        let visible_lines = chunks[0].height.saturating_sub(2) as usize;
        let start = self.message_log.len().saturating_sub(visible_lines);
        let lines: Vec<Line> = self.message_log[start..]
            .iter()
            .map(|message| {
                Line::from(vec![
                    Span::styled(
                        message.timestamp.format("%H:%M:%S ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(message.text.as_str(), tag_style(&message.text)),
                ])
            })
            .collect();
        let narrative = Paragraph::new(lines)
            .block(styled_block("Narrative", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(narrative, chunks[0]);

        let (prompt, active) = match self.current_screen {
            Screen::Accusation => (format!("accuse #{}_", self.input_buffer), true),
            Screen::Exploring => ("press e / d / s".to_string(), false),
            _ => ("Enter: title screen | q: quit".to_string(), false),
        };
        let color = if active { self.theme.success } else { self.theme.border };
        let input = Paragraph::new(prompt)
            .style(Style::default().fg(color))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(" Command "),
            );
        frame.render_widget(input, chunks[1]);
    }

    fn render_trail(&self, frame: &mut Frame, area: Rect) {
        let trail = self
            .session
            .as_ref()
            .map(|s| s.trail().join(" → "))
            .unwrap_or_default();
        let panel = Paragraph::new(Line::from(Span::styled(trail, Style::default().fg(self.theme.fg))))
            .block(styled_block("Trail", &self.theme))
            .wrap(Wrap { trim: true });
        frame.render_widget(panel, area);
    }

    fn render_suspects(&self, frame: &mut Frame, area: Rect) {
        let block = styled_block("Suspects", &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(session) = &self.session else {
            return;
        };
        for (i, entry) in session.tally().entries().iter().enumerate() {
            let y = inner.y + (i as u16) * 2;
            if y + 1 >= inner.y + inner.height {
                break;
            }
            let meter = EvidenceMeter::new(
                &format!("{}. {}", i + 1, entry.suspect_name),
                entry.count,
                ACCUSATION_THRESHOLD,
            )
            .color(self.theme.warning)
            .met_color(self.theme.success);
            frame.render_widget(meter, Rect::new(inner.x, y, inner.width.min(40), 2));
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let (rooms, clues) = self
            .session
            .as_ref()
            .map(|s| (s.trail().len(), s.clues().count()))
            .unwrap_or((0, 0));
        let status_text = format!(
            " {} | Rooms visited: {} | Clues: {} | Press ? for help ",
            self.edition, rooms, clues,
        );
        let status = Paragraph::new(status_text)
            .style(Style::default().fg(self.theme.fg).bg(Color::DarkGray));
        frame.render_widget(status, area);
    }

    fn render_case_closed(&self, frame: &mut Frame) {
        let verdict = self.session.as_ref().and_then(|s| s.verdict());
        let (title, color) = match verdict {
            Some(Verdict::Solved { .. }) => ("CASE SOLVED", self.theme.success),
            Some(Verdict::Unsolved { .. }) => ("CASE UNSOLVED", self.theme.alert),
            _ => ("THE END", self.theme.accent),
        };

        let mut lines: Vec<String> = match (verdict, &self.session) {
            (Some(verdict), _) => narrative::verdict_lines(verdict),
            (None, Some(session)) if self.edition.collects_clues() => {
                if session.clues().is_empty() {
                    narrative::narrate(&GameEvent::NothingCollected, self.edition)
                } else {
                    narrative::report_lines(&session.report())
                }
            }
            (None, session) => {
                let rooms = session.as_ref().map(|s| s.trail().len()).unwrap_or(0);
                vec![format!("[SYSTEM] You walked through {} rooms.", rooms)]
            }
        };
        lines.push(String::new());
        lines.push("Enter: title screen   q: quit".to_string());

        let lines: Vec<String> = lines
            .into_iter()
            .map(|line| match line.find("] ") {
                Some(end) if line.starts_with('[') => line[end + 2..].to_string(),
                _ => line,
            })
            .collect();

        let height = lines.len() as u16 + 2;
        let popup = centered_rect(64, height, frame.area());
        frame.render_widget(Clear, popup);
        frame.render_widget(
            DramaticBox::new(title)
                .content(lines)
                .border_color(color)
                .text_color(self.theme.fg),
            popup,
        );
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let popup = centered_rect(67, 25, frame.area());
        frame.render_widget(Clear, popup);

        let help = Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(self.theme.fg))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.accent)));
        frame.render_widget(help, popup);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(app: &mut App, keys: &str) {
        for c in keys.chars() {
            let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
            app.handle_key(code);
        }
    }

    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(100, 36)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    #[test]
    fn title_menu_starts_the_selected_edition() {
        let mut app = App::new(None);
        assert_eq!(app.current_screen, Screen::TitleMenu);
        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.current_screen, Screen::Exploring);
        assert_eq!(app.edition, Edition::Adventurer);
    }

    #[test]
    fn quit_entry_stops_the_app() {
        let mut app = App::new(None);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter);
        assert!(!app.running);
    }

    #[test]
    fn master_walk_ends_in_a_verdict() {
        let mut app = App::new(Some(Edition::Master));
        press(&mut app, "eeDs");
        assert_eq!(app.current_screen, Screen::Accusation);
        draw(&mut app);

        press(&mut app, "1\n");
        assert_eq!(app.current_screen, Screen::CaseClosed);
        let verdict = app.session.as_ref().and_then(|s| s.verdict()).cloned();
        assert!(matches!(verdict, Some(Verdict::Unsolved { ref suspect, clues: 1 }) if suspect == "Mordomo"));
        draw(&mut app);

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.current_screen, Screen::TitleMenu);
        assert!(app.session.is_none());
    }

    #[test]
    fn novice_closes_at_a_dead_end() {
        let mut app = App::new(Some(Edition::Novice));
        press(&mut app, "dd");
        assert_eq!(app.current_screen, Screen::CaseClosed);
        draw(&mut app);
    }

    #[test]
    fn unknown_keys_are_reported_not_fatal() {
        let mut app = App::new(Some(Edition::Adventurer));
        press(&mut app, "x");
        assert_eq!(app.current_screen, Screen::Exploring);
        assert!(app.message_log.iter().any(|m| m.text.starts_with("[ERROR] Unknown option 'x'")));
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = App::new(Some(Edition::Master));
        press(&mut app, "?e");
        assert!(app.show_help);
        assert_eq!(app.session.as_ref().map(|s| s.trail().len()), Some(1));
        draw(&mut app);
        app.handle_key(KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn title_screen_renders_on_small_terminals() {
        let mut app = App::new(None);
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
