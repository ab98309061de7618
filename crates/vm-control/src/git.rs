use crate::{CommandOutput, ControlResult, run_command};

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Quiet fetch of every remote, used by the automatic check
    Background,
    /// Fetch from every remote and prune deleted branches
    Manual,
}

impl FetchMode {
    fn args(&self) -> &'static [&'static str] {
        match self {
            Self::Background => &["fetch", "--all", "--quiet"],
            Self::Manual => &["fetch", "--all", "--prune"],
        }
    }
}

/// Version control operations used by update reconciliation.
///
/// Non-zero exits are reported through [`CommandOutput`], not as errors.
#[async_trait]
pub trait VersionControl: Send + Sync {
    async fn fetch(&self, mode: FetchMode) -> ControlResult<CommandOutput>;

    /// Prints the checked-out branch name.
    async fn current_branch(&self) -> ControlResult<CommandOutput>;

    /// Prints `<ahead>\t<behind>` relative to `upstream`.
    async fn left_right_count(&self, upstream: &str) -> ControlResult<CommandOutput>;

    async fn pull(&self, quiet: bool) -> ControlResult<CommandOutput>;
}

/// Runs the git command line client in the repository root.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    repo_root: PathBuf,
    timeout: Duration,
}

impl GitCli {
    pub fn new(program: impl Into<String>, repo_root: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            repo_root: repo_root.into(),
            timeout,
        }
    }

    async fn git(&self, args: &[&str]) -> ControlResult<CommandOutput> {
        run_command(&self.program, args, &self.repo_root, self.timeout).await
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn fetch(&self, mode: FetchMode) -> ControlResult<CommandOutput> {
        self.git(mode.args()).await
    }

    async fn current_branch(&self) -> ControlResult<CommandOutput> {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).await
    }

    async fn left_right_count(&self, upstream: &str) -> ControlResult<CommandOutput> {
        let range = format!("HEAD...{upstream}");
        self.git(&["rev-list", "--left-right", "--count", &range])
            .await
    }

    async fn pull(&self, quiet: bool) -> ControlResult<CommandOutput> {
        if quiet {
            self.git(&["pull", "--quiet"]).await
        } else {
            self.git(&["pull"]).await
        }
    }
}
