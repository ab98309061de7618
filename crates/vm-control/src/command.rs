//! Bounded execution of short-lived external commands.

use crate::{ControlError, ControlResult};

use std::ffi::OsString;
use std::panic::Location;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use error_location::ErrorLocation;
use tracing::debug;

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn succeeded(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Resolve a program name through the executable path, falling back to the bare name.
pub(crate) fn resolve_program(program: &str) -> OsString {
    which::which(program)
        .map(|path| path.into_os_string())
        .unwrap_or_else(|_| OsString::from(program))
}

#[cfg(windows)]
pub(crate) fn hide_console_window(cmd: &mut tokio::process::Command) {
    use windows_sys::Win32::System::Threading::CREATE_NO_WINDOW;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
pub(crate) fn hide_console_window(_cmd: &mut tokio::process::Command) {}

/// Run `program` with `args` in `cwd` and capture its output.
///
/// The child is killed if it does not finish within `timeout`.
pub async fn run_command(
    program: &str,
    args: &[&str],
    cwd: &Path,
    timeout: Duration,
) -> ControlResult<CommandOutput> {
    let mut cmd = tokio::process::Command::new(resolve_program(program));
    cmd.args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    hide_console_window(&mut cmd);

    debug!(program, ?args, cwd = %cwd.display(), "Running command");

    let output = match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            return Err(ControlError::CommandSpawn {
                program: program.to_string(),
                source,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Err(_) => return Err(ControlError::command_timeout(program, timeout)),
    };

    let result = CommandOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    debug!(program, code = ?result.code, "Command finished");

    Ok(result)
}
