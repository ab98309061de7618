use crate::ControlError;

use serde::Serialize;

/// The five states an update indicator can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Checking,
    UpToDate,
    Available,
    Error,
    NotApplicable,
}

/// Outcome of one reconciliation pass. Recomputed on every pass, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum UpdateState {
    Checking,
    UpToDate,
    /// Commits on the remote branch not yet pulled
    Available(u32),
    /// Local commits not on the remote branch, nothing to pull
    Ahead(u32),
    Error(String),
    NotApplicable(String),
}

impl UpdateState {
    /// Classify ahead/behind counts. Behind wins over ahead.
    pub fn classify(ahead: u32, behind: u32) -> Self {
        if behind > 0 {
            Self::Available(behind)
        } else if ahead > 0 {
            Self::Ahead(ahead)
        } else {
            Self::UpToDate
        }
    }

    /// Map a failed pass to the state the indicator shows.
    pub fn from_error(error: &ControlError) -> Self {
        match error {
            ControlError::ToolMissing { tool, .. } => Self::Error(format!("{tool} is not installed")),
            ControlError::NotAGitRepository { .. } => {
                Self::NotApplicable(String::from("Not a git repository"))
            }
            ControlError::FetchFailed { .. } => Self::Error(String::from("Unable to fetch")),
            ControlError::BranchResolutionFailed { .. } => {
                Self::Error(String::from("Cannot determine branch"))
            }
            ControlError::NoUpstream { .. } => {
                Self::NotApplicable(String::from("No upstream configured"))
            }
            ControlError::SyncParseFailed { .. } => Self::Error(String::from("Parse error")),
            ControlError::PullFailed { .. } => Self::Error(String::from("Update failed")),
            ControlError::CommandTimeout { program, .. } => {
                Self::Error(format!("{program} timed out"))
            }
            _ => Self::Error(String::from("Update check failed")),
        }
    }

    pub fn indicator(&self) -> Indicator {
        match self {
            Self::Checking => Indicator::Checking,
            Self::UpToDate | Self::Ahead(_) => Indicator::UpToDate,
            Self::Available(_) => Indicator::Available,
            Self::Error(_) => Indicator::Error,
            Self::NotApplicable(_) => Indicator::NotApplicable,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Checking => String::from("Checking for updates..."),
            Self::UpToDate => String::from("Up to date"),
            Self::Available(n) => format!("{n} {} available", plural(*n, "update")),
            Self::Ahead(n) => format!("{n} {} ahead", plural(*n, "commit")),
            Self::Error(reason) | Self::NotApplicable(reason) => reason.clone(),
        }
    }

    /// Number of commits to pull, when an update prompt should be offered.
    pub fn pending_updates(&self) -> Option<u32> {
        match self {
            Self::Available(n) => Some(*n),
            _ => None,
        }
    }
}

pub(crate) fn plural(count: u32, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}
