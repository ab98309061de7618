use crate::ToolRole;

use std::panic::Location;
use std::path::PathBuf;
use std::time::Duration;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControlError {
    #[error("{tool} ({role}) is not installed or not on PATH {location}")]
    ToolMissing {
        role: ToolRole,
        tool: String,
        location: ErrorLocation,
    },

    #[error("Dependency install failed: {stderr} {location}")]
    DependencyInstallFailed {
        stderr: String,
        location: ErrorLocation,
    },

    #[error("Failed to start server: {message} {location}")]
    ProcessStartFailed {
        message: String,
        #[source]
        source: Option<std::io::Error>,
        location: ErrorLocation,
    },

    #[error("Failed to stop server: {message} {location}")]
    ProcessStopFailed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unable to fetch from remote: {stderr} {location}")]
    FetchFailed {
        stderr: String,
        location: ErrorLocation,
    },

    #[error("Cannot determine current branch: {stderr} {location}")]
    BranchResolutionFailed {
        stderr: String,
        location: ErrorLocation,
    },

    #[error("Unexpected ahead/behind output {output:?} {location}")]
    SyncParseFailed {
        output: String,
        location: ErrorLocation,
    },

    #[error("No upstream configured ({upstream}) {location}")]
    NoUpstream {
        upstream: String,
        location: ErrorLocation,
    },

    #[error("Not a git repository: {path} {location}")]
    NotAGitRepository {
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("Pull failed: {stderr} {location}")]
    PullFailed {
        stderr: String,
        location: ErrorLocation,
    },

    #[error("Server at {url} is not reachable: {message} {location}")]
    HealthUnreachable {
        url: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Server at {url} returned HTTP {status} {location}")]
    HealthUnexpectedStatus {
        url: String,
        status: u16,
        location: ErrorLocation,
    },

    #[error("{program} did not finish within {timeout_secs}s {location}")]
    CommandTimeout {
        program: String,
        timeout_secs: u64,
        location: ErrorLocation,
    },

    #[error("Failed to run {program}: {source} {location}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("IO error: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("HTTP error: {source} {location}")]
    Http {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },
}

impl ControlError {
    #[track_caller]
    pub fn tool_missing(role: ToolRole, tool: impl Into<String>) -> Self {
        Self::ToolMissing {
            role,
            tool: tool.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn dependency_install_failed(stderr: impl Into<String>) -> Self {
        Self::DependencyInstallFailed {
            stderr: stderr.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn process_start_failed(message: impl Into<String>) -> Self {
        Self::ProcessStartFailed {
            message: message.into(),
            source: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn process_stop_failed(message: impl Into<String>) -> Self {
        Self::ProcessStopFailed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn fetch_failed(stderr: impl Into<String>) -> Self {
        Self::FetchFailed {
            stderr: stderr.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn branch_resolution_failed(stderr: impl Into<String>) -> Self {
        Self::BranchResolutionFailed {
            stderr: stderr.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn sync_parse_failed(output: impl Into<String>) -> Self {
        Self::SyncParseFailed {
            output: output.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_upstream(upstream: impl Into<String>) -> Self {
        Self::NoUpstream {
            upstream: upstream.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_a_git_repository(path: impl Into<PathBuf>) -> Self {
        Self::NotAGitRepository {
            path: path.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn pull_failed(stderr: impl Into<String>) -> Self {
        Self::PullFailed {
            stderr: stderr.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn command_timeout(program: impl Into<String>, timeout: Duration) -> Self {
        Self::CommandTimeout {
            program: program.into(),
            timeout_secs: timeout.as_secs(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message suitable for showing to the operator, without source locations.
    pub fn user_message(&self) -> String {
        match self {
            Self::ToolMissing { role, tool, .. } => {
                format!("{tool} is not installed. {}", role.install_hint())
            }
            Self::DependencyInstallFailed { stderr, .. } => {
                format!("Failed to install dependencies:\n{}", stderr.trim())
            }
            Self::ProcessStartFailed {
                message, source, ..
            } => match source {
                Some(source) => format!("Failed to start server: {message} ({source})"),
                None => format!("Failed to start server: {message}"),
            },
            Self::ProcessStopFailed { message, .. } => format!("Error stopping server: {message}"),
            Self::FetchFailed { stderr, .. } => format!("git fetch failed:\n{}", stderr.trim()),
            Self::BranchResolutionFailed { .. } => String::from("Cannot determine branch"),
            Self::SyncParseFailed { .. } => String::from("Parse error"),
            Self::NoUpstream { .. } => String::from("No upstream configured"),
            Self::NotAGitRepository { .. } => String::from("This folder is not a git repository."),
            Self::PullFailed { stderr, .. } => format!("git pull failed:\n{}", stderr.trim()),
            Self::HealthUnreachable { url, .. } => format!("Server is not reachable at {url}"),
            Self::HealthUnexpectedStatus { .. } => {
                String::from("Server returned unexpected response")
            }
            Self::CommandTimeout {
                program,
                timeout_secs,
                ..
            } => format!("{program} did not finish within {timeout_secs}s"),
            Self::CommandSpawn { program, source, .. } => {
                format!("Failed to run {program}: {source}")
            }
            Self::Io { source, .. } => format!("IO error: {source}"),
            Self::Http { source, .. } => format!("HTTP error: {source}"),
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::ToolMissing { role, .. } => role.install_hint(),
            Self::DependencyInstallFailed { .. } => {
                "Dependency installation failed. \
                   Check your network connection and run the install manually to see details."
            }
            Self::ProcessStartFailed { .. } => {
                "The server exited during startup. \
                   Check the logs and make sure the port is not used by another application."
            }
            Self::FetchFailed { .. } | Self::PullFailed { .. } => {
                "Check your network connection and repository credentials."
            }
            Self::NotAGitRepository { .. } => {
                "Updates are only available when the tool runs from a git checkout."
            }
            Self::NoUpstream { .. } => "Set an upstream branch to enable update checks.",
            Self::HealthUnreachable { .. } => "Start the server first, then check again.",
            Self::CommandTimeout { .. } => {
                "The command took too long. \
                   Increase the timeout in config.toml or try again later."
            }
            _ => "An unexpected error occurred. Please check the logs for details.",
        }
    }
}

impl From<std::io::Error> for ControlError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ControlError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::Http {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ControlError>;
