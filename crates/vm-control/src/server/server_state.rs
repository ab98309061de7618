use serde::Serialize;

/// Current state of the managed server process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ServerState {
    /// No server started by this panel is alive
    Stopped,
    /// Installing dependencies before the first start
    InstallingDependencies,
    /// Spawned, waiting out the startup grace period
    Starting,
    Running { pid: u32 },
    /// Graceful stop requested
    Stopping,
    /// The last start attempt failed
    Failed { error: String },
}

impl ServerState {
    /// Short status line for the operator.
    pub fn describe(&self) -> String {
        match self {
            Self::Stopped => String::from("Ready"),
            Self::InstallingDependencies => String::from("Installing dependencies (first run)..."),
            Self::Starting => String::from("Starting server..."),
            Self::Running { pid } => format!("Server running (PID {pid})"),
            Self::Stopping => String::from("Stopping server..."),
            Self::Failed { error } => format!("Server failed: {error}"),
        }
    }
}
