use crate::{AnswerSource, PROMPT, QUIT_LINE, TerminalPresenter, is_affirmative};

use std::collections::VecDeque;

use vm_control::{Emphasis, Indicator, Presenter, Severity};

struct ScriptedAnswers(VecDeque<String>);

impl ScriptedAnswers {
    fn new(answers: &[&str]) -> Self {
        Self(answers.iter().map(|a| a.to_string()).collect())
    }
}

impl AnswerSource for ScriptedAnswers {
    fn read_answer(&mut self) -> Option<String> {
        self.0.pop_front()
    }
}

fn presenter(answers: &[&str]) -> TerminalPresenter<Vec<u8>, ScriptedAnswers> {
    TerminalPresenter::new(Vec::new(), ScriptedAnswers::new(answers), false)
}

fn written(presenter: &TerminalPresenter<Vec<u8>, ScriptedAnswers>) -> String {
    String::from_utf8(presenter.output().clone()).unwrap()
}

#[test]
fn given_plain_output_when_status_set_then_text_written_unstyled() {
    let mut presenter = presenter(&[]);

    presenter.set_status("Server running (PID 4242)", Some(Emphasis::Success));

    assert_eq!(written(&presenter), "Server running (PID 4242)\n");
}

#[test]
fn given_colour_enabled_when_status_set_then_ansi_codes_written() {
    let mut presenter = TerminalPresenter::new(Vec::new(), ScriptedAnswers::new(&[]), true);

    presenter.set_status("Update failed", Some(Emphasis::Error));

    let output = String::from_utf8(presenter.output().clone()).unwrap();
    assert!(output.contains("\u{1b}["));
    assert!(output.contains("Update failed"));
}

#[test]
fn given_available_indicator_when_set_then_glyph_and_message_written() {
    let mut presenter = presenter(&[]);

    presenter.set_update_indicator(Indicator::Available, "3 updates available");

    assert_eq!(written(&presenter), "Updates: ↓ 3 updates available\n");
}

#[test]
fn given_each_indicator_when_set_then_distinct_glyphs() {
    let mut presenter = presenter(&[]);

    for indicator in [
        Indicator::Checking,
        Indicator::UpToDate,
        Indicator::Available,
        Indicator::Error,
        Indicator::NotApplicable,
    ] {
        presenter.set_update_indicator(indicator, "x");
    }

    let output = written(&presenter);
    let glyphs: Vec<&str> = output
        .lines()
        .map(|line| line.split_whitespace().nth(1).unwrap())
        .collect();
    let mut unique = glyphs.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 5);
}

#[test]
fn given_yes_answer_when_confirming_then_true_and_question_shown() {
    let mut presenter = presenter(&["y"]);

    let confirmed = presenter.confirm("Updates Available", "2 updates available.");

    assert!(confirmed);
    let output = written(&presenter);
    assert!(output.contains("Updates Available\n"));
    assert!(output.contains("2 updates available.\n"));
    assert!(output.ends_with("[y/N] "));
}

#[test]
fn given_no_answer_when_confirming_then_false() {
    let mut presenter = presenter(&["n"]);

    assert!(!presenter.confirm("Updates Available", "1 update available."));
}

#[test]
fn given_input_closed_when_confirming_then_declined() {
    let mut presenter = presenter(&[]);

    assert!(!presenter.confirm("Updates Available", "1 update available."));
}

#[test]
fn given_quit_while_confirming_when_answered_then_declined_and_quit_requested_once() {
    let mut presenter = presenter(&[QUIT_LINE]);

    let confirmed = presenter.confirm("Updates Available", "1 update available.");

    assert!(!confirmed);
    assert!(presenter.take_quit_request());
    assert!(!presenter.take_quit_request());
}

#[test]
fn given_plain_no_when_confirming_then_no_quit_requested() {
    let mut presenter = presenter(&["n"]);

    presenter.confirm("Updates Available", "1 update available.");

    assert!(!presenter.take_quit_request());
}

#[test]
fn given_multiline_message_when_notified_then_lines_indented_under_title() {
    let mut presenter = presenter(&[]);

    presenter.notify(
        Severity::Error,
        "Update Failed",
        "Failed to pull updates:\nerror: conflict",
    );

    assert_eq!(
        written(&presenter),
        "Update Failed\n  Failed to pull updates:\n  error: conflict\n"
    );
}

#[test]
fn given_prompt_when_written_then_no_newline() {
    let mut presenter = presenter(&[]);

    presenter.prompt();

    assert_eq!(written(&presenter), PROMPT);
}

#[test]
fn given_answers_when_checked_then_only_yes_forms_affirm() {
    assert!(is_affirmative("y"));
    assert!(is_affirmative(" YES "));
    assert!(is_affirmative("Yes\n"));
    assert!(!is_affirmative(""));
    assert!(!is_affirmative("no"));
    assert!(!is_affirmative("yep"));
}
