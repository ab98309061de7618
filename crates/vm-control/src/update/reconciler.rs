//! Compares the local checkout with its remote tracking branch and pulls updates.

use crate::{
    ApplyOutcome, Capabilities, ControlError, ControlResult, FetchMode, InstallMode, ManualUpdate,
    PackageManager, RepoLocation, SyncCounts, ToolAvailability, ToolLocator, Toolchain,
    UpdateState, VersionControl,
};

use std::sync::Arc;

use tracing::{debug, info, warn};
use vm_config::Config;

/// Stateless between passes; cheap to clone into background tasks.
#[derive(Clone)]
pub struct UpdateReconciler {
    location: RepoLocation,
    remote: String,
    toolchain: Toolchain,
    tools: Arc<dyn ToolLocator>,
    version_control: Arc<dyn VersionControl>,
    package_manager: Arc<dyn PackageManager>,
}

impl UpdateReconciler {
    pub fn new(config: &Config, location: RepoLocation, capabilities: &Capabilities) -> Self {
        Self {
            location,
            remote: config.repository.remote.clone(),
            toolchain: Toolchain::from_config(&config.tools),
            tools: Arc::clone(&capabilities.tools),
            version_control: Arc::clone(&capabilities.version_control),
            package_manager: Arc::clone(&capabilities.package_manager),
        }
    }

    /// Run one full reconciliation pass. Every failure becomes a terminal state.
    pub async fn reconcile(&self, mode: FetchMode) -> UpdateState {
        match self.try_reconcile(mode).await {
            Ok(state) => {
                info!(?mode, ?state, "Update check complete");
                state
            }
            Err(e) => {
                warn!(?mode, "Update check stopped: {e}");
                UpdateState::from_error(&e)
            }
        }
    }

    async fn try_reconcile(&self, mode: FetchMode) -> ControlResult<UpdateState> {
        self.ensure_tools()?;
        self.ensure_repository()?;
        self.fetch(mode).await?;

        let branch = self.current_branch().await?;
        let counts = self.sync_counts(&branch).await?;

        debug!(branch, ahead = counts.ahead, behind = counts.behind, "Sync counts");
        Ok(counts.state())
    }

    fn ensure_tools(&self) -> ControlResult<ToolAvailability> {
        ToolAvailability::detect(self.tools.as_ref(), &self.toolchain).ensure_present()
    }

    fn ensure_repository(&self) -> ControlResult<()> {
        if self.location.has_marker() {
            Ok(())
        } else {
            Err(ControlError::not_a_git_repository(self.location.root()))
        }
    }

    async fn fetch(&self, mode: FetchMode) -> ControlResult<()> {
        let output = self.version_control.fetch(mode).await?;
        if !output.success() {
            return Err(ControlError::fetch_failed(output.stderr));
        }
        Ok(())
    }

    async fn current_branch(&self) -> ControlResult<String> {
        let output = self.version_control.current_branch().await?;
        let branch = output.stdout.trim();

        if !output.success() || branch.is_empty() {
            return Err(ControlError::branch_resolution_failed(output.stderr));
        }
        Ok(branch.to_string())
    }

    async fn sync_counts(&self, branch: &str) -> ControlResult<SyncCounts> {
        let upstream = format!("{}/{branch}", self.remote);
        let output = self.version_control.left_right_count(&upstream).await?;

        if !output.success() {
            return Err(ControlError::no_upstream(upstream));
        }
        SyncCounts::parse(&output.stdout)
    }

    /// Quiet pull of the tracking branch. The failure carries git's stderr verbatim.
    pub async fn pull_updates(&self) -> ControlResult<()> {
        info!("Pulling updates");
        let output = self.version_control.pull(true).await?;
        if !output.success() {
            return Err(ControlError::pull_failed(output.stderr));
        }
        Ok(())
    }

    /// Best-effort silent install after a pull. Returns whether it succeeded.
    pub async fn refresh_dependencies(&self) -> bool {
        match self.package_manager.install(InstallMode::Silent).await {
            Ok(output) if output.success() => true,
            Ok(output) => {
                warn!(
                    code = ?output.code,
                    "Dependency refresh failed after pull: {}",
                    output.stderr.trim()
                );
                false
            }
            Err(e) => {
                warn!("Dependency refresh failed after pull: {e}");
                false
            }
        }
    }

    /// Pull then refresh dependencies. Only the pull can fail the operation.
    pub async fn apply_update(&self) -> ControlResult<ApplyOutcome> {
        self.pull_updates().await?;
        let dependencies_refreshed = self.refresh_dependencies().await;
        Ok(ApplyOutcome {
            dependencies_refreshed,
        })
    }

    /// Operator-initiated update: prune-enabled fetch followed by a pull.
    ///
    /// Stops before any git call when tools or the repository marker are missing.
    pub async fn update_from_remote(&self) -> ControlResult<ManualUpdate> {
        self.ensure_tools()?;
        self.ensure_repository()?;
        self.fetch(FetchMode::Manual).await?;

        let pull = self.version_control.pull(false).await?;
        if !pull.success() {
            return Err(ControlError::pull_failed(pull.stderr));
        }

        Ok(ManualUpdate {
            pull_output: pull.stdout.trim().to_string(),
        })
    }
}
