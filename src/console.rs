//! Line-oriented shell
//!
//! Prompts, reads whitespace-separated commands from any `BufRead`, and
//! writes the narration to any `Write`. Several commands may be typed on
//! one line; they run in order until the exploration ends.

use crate::game::narrative;
use crate::game::{Command, ExplorationSession, GameEvent, Verdict};
use crate::Result;
use std::io::{BufRead, Write};
use tracing::debug;

pub struct Console<R, W> {
    input: R,
    output: W,
    report_json: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            report_json: false,
        }
    }

    /// Also print the final report as JSON
    pub fn with_report_json(mut self, enabled: bool) -> Self {
        self.report_json = enabled;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Play `session` to the end. `opening` are the events returned when
    /// the session started. Returns the verdict if an accusation was made.
    pub fn run(
        &mut self,
        session: &mut ExplorationSession,
        opening: Vec<GameEvent>,
    ) -> Result<Option<Verdict>> {
        let edition = session.edition();
        self.write_lines(&narrative::intro(edition))?;
        self.show(session, &opening)?;

        while !session.is_finished() {
            self.write_lines(&narrative::exit_options(&session.exits(), edition))?;
            write!(self.output, "Choose an option: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                // Input closed: wrap up as if the player chose to finish.
                debug!("input closed during exploration");
                let events = session.step(Command::Finish)?;
                self.show(session, &events)?;
                break;
            };

            for token in line.split_whitespace() {
                let events = session.step(Command::parse(token))?;
                self.show(session, &events)?;
                if session.is_finished() {
                    break;
                }
            }
        }

        if self.report_json && session.edition().collects_clues() {
            let json = serde_json::to_string_pretty(&session.report())?;
            writeln!(self.output, "{}", json)?;
        }

        if !session.can_accuse() {
            return Ok(None);
        }

        self.write_lines(&narrative::suspect_roster(session.tally()))?;
        write!(self.output, "{}", narrative::accusation_prompt(session.tally()))?;
        self.output.flush()?;

        let selection = self
            .read_line()?
            .and_then(|line| line.trim().parse::<i64>().ok())
            .unwrap_or(0);
        let verdict = session.accuse(selection)?;
        self.write_lines(&narrative::verdict_lines(&verdict))?;
        Ok(Some(verdict))
    }

    fn show(&mut self, session: &ExplorationSession, events: &[GameEvent]) -> Result<()> {
        for event in events {
            self.write_lines(&narrative::narrate(event, session.edition()))?;
        }
        Ok(())
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
