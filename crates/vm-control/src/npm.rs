use crate::{CommandOutput, ControlResult, run_command};

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    Standard,
    /// Suppress installer output; used when refreshing after a pull
    Silent,
}

#[async_trait]
pub trait PackageManager: Send + Sync {
    async fn install(&self, mode: InstallMode) -> ControlResult<CommandOutput>;
}

/// Runs `npm install` in the server project directory.
#[derive(Debug, Clone)]
pub struct NpmCli {
    program: String,
    project_dir: PathBuf,
    timeout: Duration,
}

impl NpmCli {
    pub fn new(
        program: impl Into<String>,
        project_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            project_dir: project_dir.into(),
            timeout,
        }
    }
}

#[async_trait]
impl PackageManager for NpmCli {
    async fn install(&self, mode: InstallMode) -> ControlResult<CommandOutput> {
        let args: &[&str] = match mode {
            InstallMode::Standard => &["install"],
            InstallMode::Silent => &["install", "--silent"],
        };
        run_command(&self.program, args, &self.project_dir, self.timeout).await
    }
}
