//! Terminal front-end for the video manager control panel.

mod app;
mod cli;
mod commands;
mod doctor;
mod input;
mod logging;
mod terminal;

#[cfg(test)]
mod tests;

pub use app::{NoInput, check_failed, interactive_loop, resolve_location, run};
pub use cli::Cli;
pub use commands::Commands;
pub use doctor::DoctorReport;
pub use input::{
    InputLines, LineSender, QUIT_LINE, spawn_signal_listener, spawn_stdin_reader,
};
pub use logging::{LOG_FILE_PREFIX, current_log_path, env_filter, setup_logging};
pub use terminal::{AnswerSource, PROMPT, TerminalPresenter, is_affirmative};
