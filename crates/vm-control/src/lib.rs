//! Server lifecycle and update reconciliation for the video manager control panel.

mod browser;
mod capabilities;
mod command;
mod dispatch;
mod error;
mod git;
mod location;
mod npm;
mod panel;
mod presenter;
mod process;
mod server;
mod tools;
mod update;

#[cfg(test)]
mod tests;

pub use browser::{Browser, SystemBrowser};
pub use capabilities::Capabilities;
pub use command::{CommandOutput, run_command};
pub use dispatch::{Dispatcher, PanelEvent, spawn_update_check};
pub use error::{ControlError, Result as ControlResult};
pub use git::{FetchMode, GitCli, VersionControl};
pub use location::RepoLocation;
pub use npm::{InstallMode, NpmCli, PackageManager};
pub use panel::{ControlPanel, PanelCommand};
pub use presenter::{Emphasis, Presenter, Severity};
pub use process::{
    ChildProcess, DetachedSpawner, ExitInfo, ProcessSpawner, ServerHandle, ServerProcess,
    SpawnSpec,
};
pub use server::{
    HealthChecker, HealthStatus, ProcessController, ServerState, StartOutcome, StopOutcome,
};
pub use tools::{ToolAvailability, ToolLocator, ToolLookup, ToolRole, Toolchain, WhichLocator};
pub use update::{
    ApplyOutcome, Indicator, ManualUpdate, SyncCounts, UpdateReconciler, UpdateState,
};
