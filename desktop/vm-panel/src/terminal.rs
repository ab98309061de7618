//! Presenter that renders the panel as lines on a terminal.

use crate::{InputLines, QUIT_LINE};

use std::fmt::Display;
use std::io::{Stdout, Write};

use console::{StyledObject, colors_enabled, style};
use tracing::warn;
use vm_control::{Emphasis, Indicator, Presenter, Severity};

pub const PROMPT: &str = "> ";

/// Where confirmation answers come from.
pub trait AnswerSource {
    /// `None` when no more input will arrive.
    fn read_answer(&mut self) -> Option<String>;
}

impl AnswerSource for InputLines {
    fn read_answer(&mut self) -> Option<String> {
        self.next_blocking()
    }
}

pub struct TerminalPresenter<W: Write, A: AnswerSource> {
    out: W,
    answers: A,
    color: bool,
    quit_requested: bool,
}

impl TerminalPresenter<Stdout, InputLines> {
    pub fn stdout(answers: InputLines) -> Self {
        Self::new(std::io::stdout(), answers, colors_enabled())
    }
}

impl<W: Write, A: AnswerSource> TerminalPresenter<W, A> {
    pub fn new(out: W, answers: A, color: bool) -> Self {
        Self {
            out,
            answers,
            color,
            quit_requested: false,
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// True once if a quit arrived while a confirmation was pending.
    pub fn take_quit_request(&mut self) -> bool {
        std::mem::take(&mut self.quit_requested)
    }

    pub fn prompt(&mut self) {
        self.write(format_args!("{PROMPT}"));
    }

    fn styled<D: Display>(&self, value: D, emphasis: Option<Emphasis>) -> StyledObject<D> {
        let styled = style(value).force_styling(self.color);
        match emphasis {
            None => styled,
            Some(Emphasis::Info) => styled.cyan(),
            Some(Emphasis::Success) => styled.green(),
            Some(Emphasis::Warning) => styled.yellow(),
            Some(Emphasis::Error) => styled.red(),
            Some(Emphasis::Muted) => styled.dim(),
        }
    }

    fn write_line<D: Display>(&mut self, line: D) {
        if let Err(e) = writeln!(self.out, "{line}") {
            warn!("Failed to write to terminal: {e}");
        }
    }

    fn write(&mut self, text: std::fmt::Arguments<'_>) {
        let result = self
            .out
            .write_fmt(text)
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!("Failed to write to terminal: {e}");
        }
    }
}

fn indicator_glyph(indicator: Indicator) -> (&'static str, Emphasis) {
    match indicator {
        Indicator::Checking => ("…", Emphasis::Info),
        Indicator::UpToDate => ("✓", Emphasis::Success),
        Indicator::Available => ("↓", Emphasis::Warning),
        Indicator::Error => ("✗", Emphasis::Error),
        Indicator::NotApplicable => ("-", Emphasis::Muted),
    }
}

fn severity_emphasis(severity: Severity) -> Emphasis {
    match severity {
        Severity::Info => Emphasis::Info,
        Severity::Warning => Emphasis::Warning,
        Severity::Error => Emphasis::Error,
    }
}

/// `y` or `yes`, any case. Anything else declines.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

impl<W: Write, A: AnswerSource> Presenter for TerminalPresenter<W, A> {
    fn set_status(&mut self, text: &str, emphasis: Option<Emphasis>) {
        let line = self.styled(text, emphasis).to_string();
        self.write_line(line);
    }

    fn set_update_indicator(&mut self, indicator: Indicator, message: &str) {
        let (glyph, emphasis) = indicator_glyph(indicator);
        let line = format!(
            "Updates: {} {}",
            self.styled(glyph, Some(emphasis)),
            self.styled(message, Some(emphasis))
        );
        self.write_line(line);
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        let heading = self.styled(title, Some(Emphasis::Warning)).bold().to_string();
        self.write_line(heading);
        self.write_line(message);
        self.write(format_args!("[y/N] "));

        match self.answers.read_answer() {
            Some(answer) if answer.trim() == QUIT_LINE => {
                self.write_line("");
                self.quit_requested = true;
                false
            }
            Some(answer) => is_affirmative(&answer),
            None => false,
        }
    }

    fn notify(&mut self, severity: Severity, title: &str, message: &str) {
        let heading = self
            .styled(title, Some(severity_emphasis(severity)))
            .bold()
            .to_string();
        self.write_line(heading);
        for line in message.lines() {
            self.write_line(format_args!("  {line}"));
        }
    }
}
