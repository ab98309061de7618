//! Server process lifecycle: dependency bootstrap, start, stop and health.

use crate::{
    Browser, Capabilities, ControlError, ControlResult, HealthChecker, HealthStatus, InstallMode,
    PackageManager, ProcessSpawner, RepoLocation, ServerHandle, ServerProcess, ServerState,
    SpawnSpec, StartOutcome, StopOutcome, ToolAvailability, ToolLocator, Toolchain,
};

use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use error_location::ErrorLocation;
use tokio::sync::watch;
use tracing::{error, info, warn};
use vm_config::Config;

/// Owns the server the panel started.
///
/// Responsibilities:
/// - Verify tools and install dependencies on first run
/// - Start the server at most once and reopen the UI when it is already up
/// - Stop it gracefully, escalating to a kill after the stop timeout
/// - Publish [`ServerState`] transitions to subscribers
pub struct ProcessController {
    location: RepoLocation,
    toolchain: Toolchain,
    entry_script: String,
    dependency_dir: PathBuf,
    ui_url: String,
    authority: String,
    startup_grace: Duration,
    stop_timeout: Duration,
    tools: Arc<dyn ToolLocator>,
    package_manager: Arc<dyn PackageManager>,
    spawner: Arc<dyn ProcessSpawner>,
    browser: Arc<dyn Browser>,
    health: HealthChecker,
    handle: Option<ServerHandle>,
    state_tx: watch::Sender<ServerState>,
}

impl ProcessController {
    pub fn new(
        config: &Config,
        location: RepoLocation,
        capabilities: &Capabilities,
    ) -> ControlResult<Self> {
        let health = HealthChecker::new(
            config.server.health_url(),
            config.timeouts.health_timeout(),
        )?;
        let (state_tx, _) = watch::channel(ServerState::Stopped);

        Ok(Self {
            dependency_dir: location.dependency_dir(&config.tools.dependency_dir),
            location,
            toolchain: Toolchain::from_config(&config.tools),
            entry_script: config.server.entry_script.clone(),
            ui_url: config.server.ui_url(),
            authority: config.server.authority(),
            startup_grace: config.timeouts.startup_grace(),
            stop_timeout: config.timeouts.stop_timeout(),
            tools: Arc::clone(&capabilities.tools),
            package_manager: Arc::clone(&capabilities.package_manager),
            spawner: Arc::clone(&capabilities.spawner),
            browser: Arc::clone(&capabilities.browser),
            health,
            handle: None,
            state_tx,
        })
    }

    /// Receiver for state transitions; the current state counts as seen.
    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.state_tx.subscribe()
    }

    /// Current state, after noticing a server that exited on its own.
    pub fn status(&mut self) -> ServerState {
        self.reap_exited();
        self.state_tx.borrow().clone()
    }

    pub fn location(&self) -> &RepoLocation {
        &self.location
    }

    pub fn ui_url(&self) -> &str {
        &self.ui_url
    }

    pub fn health_url(&self) -> &str {
        self.health.url()
    }

    /// `host:port` the server listens on.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// PID of the live server, if this panel started one.
    pub fn server_pid(&mut self) -> Option<u32> {
        self.reap_exited();
        self.handle.as_ref().map(ServerHandle::pid)
    }

    pub fn ensure_tools_present(&self) -> ControlResult<ToolAvailability> {
        ToolAvailability::detect(self.tools.as_ref(), &self.toolchain).ensure_present()
    }

    /// Install dependencies when the dependency directory is missing.
    ///
    /// Returns whether an install ran.
    pub async fn ensure_dependencies_installed(&self) -> ControlResult<bool> {
        if self.dependency_dir.exists() {
            return Ok(false);
        }

        info!(
            "{} not found, installing dependencies",
            self.dependency_dir.display()
        );
        self.set_state(ServerState::InstallingDependencies);

        let output = self.package_manager.install(InstallMode::Standard).await?;
        if !output.success() {
            error!(code = ?output.code, "Dependency install failed: {}", output.stderr.trim());
            return Err(ControlError::dependency_install_failed(output.stderr));
        }

        info!("Dependencies installed");
        Ok(true)
    }

    /// Start the server, or reopen the UI when it is already running.
    pub async fn start(&mut self) -> ControlResult<StartOutcome> {
        if let Some(pid) = self.server_pid() {
            info!(pid, "Server already running, reopening UI");
            self.open_ui();
            return Ok(StartOutcome::AlreadyRunning { pid });
        }

        match self.launch().await {
            Ok(pid) => Ok(StartOutcome::Started { pid }),
            Err(e) => {
                error!("Server start failed: {e}");
                self.set_state(ServerState::Failed {
                    error: e.user_message(),
                });
                Err(e)
            }
        }
    }

    async fn launch(&mut self) -> ControlResult<u32> {
        self.ensure_tools_present()?;
        self.ensure_dependencies_installed().await?;

        self.set_state(ServerState::Starting);

        let spec = self.spawn_spec();
        let process = self
            .spawner
            .spawn(&spec)
            .map_err(|source| ControlError::ProcessStartFailed {
                message: format!("could not launch {}", spec.program),
                source: Some(source),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let pid = process
            .id()
            .ok_or_else(|| ControlError::process_start_failed("process exited immediately"))?;
        let mut handle = ServerHandle::new(pid, process);

        info!(pid, "Server spawned, waiting {:?} before opening UI", self.startup_grace);
        tokio::time::sleep(self.startup_grace).await;

        if !handle.is_running() {
            return Err(ControlError::process_start_failed(format!(
                "server exited during startup (exit code {:?})",
                handle.exit_code()
            )));
        }

        self.handle = Some(handle);
        self.set_state(ServerState::Running { pid });
        self.open_ui();

        info!(pid, "Server started");
        Ok(pid)
    }

    fn spawn_spec(&self) -> SpawnSpec {
        SpawnSpec {
            program: self.toolchain.runtime.clone(),
            args: vec![self.entry_script.clone()],
            cwd: self.location.server_dir().to_path_buf(),
        }
    }

    /// Stop the server. The handle is cleared whatever the outcome.
    pub async fn stop(&mut self) -> StopOutcome {
        self.reap_exited();

        let Some(mut handle) = self.handle.take() else {
            return StopOutcome::NotRunning;
        };

        let pid = handle.pid();
        self.set_state(ServerState::Stopping);

        let outcome = Self::shut_down(handle.process_mut(), pid, self.stop_timeout).await;

        match &outcome {
            StopOutcome::Stopped { exit_code } => info!(pid, ?exit_code, "Server stopped"),
            StopOutcome::ForceStopped => warn!(pid, "Server force stopped"),
            StopOutcome::Failed { error } => error!(pid, "Error stopping server: {error}"),
            StopOutcome::NotRunning => {}
        }

        self.set_state(ServerState::Stopped);
        outcome
    }

    async fn shut_down(process: &mut dyn ServerProcess, pid: u32, timeout: Duration) -> StopOutcome {
        info!(pid, "Requesting graceful shutdown");

        if let Err(e) = process.terminate().await {
            return StopOutcome::Failed {
                error: ControlError::process_stop_failed(e.to_string()),
            };
        }

        match tokio::time::timeout(timeout, process.wait()).await {
            Ok(Ok(exit)) => StopOutcome::Stopped {
                exit_code: exit.code,
            },
            Ok(Err(e)) => StopOutcome::Failed {
                error: ControlError::process_stop_failed(e.to_string()),
            },
            Err(_) => {
                warn!(
                    pid,
                    "Server did not exit within {}s, killing",
                    timeout.as_secs()
                );
                match tokio::time::timeout(timeout, process.kill()).await {
                    Ok(Ok(())) => StopOutcome::ForceStopped,
                    Ok(Err(e)) => StopOutcome::Failed {
                        error: ControlError::process_stop_failed(e.to_string()),
                    },
                    Err(_) => StopOutcome::Failed {
                        error: ControlError::process_stop_failed(
                            "process did not exit after kill",
                        ),
                    },
                }
            }
        }
    }

    pub async fn check_health(&self) -> HealthStatus {
        let status = self.health.check().await;
        info!(url = self.health.url(), ?status, "Health check");
        status
    }

    /// Open the UI page. Failures are logged, never raised.
    pub fn open_ui(&self) {
        info!("Opening {}", self.ui_url);
        if let Err(e) = self.browser.open(&self.ui_url) {
            warn!("Failed to open browser at {}: {e}", self.ui_url);
        }
    }

    fn reap_exited(&mut self) {
        if let Some(handle) = self.handle.as_mut()
            && !handle.is_running()
        {
            warn!(
                pid = handle.pid(),
                exit_code = ?handle.exit_code(),
                "Server exited on its own"
            );
            self.handle = None;
            self.set_state(ServerState::Stopped);
        }
    }

    fn set_state(&self, state: ServerState) {
        self.state_tx.send_replace(state);
    }
}
