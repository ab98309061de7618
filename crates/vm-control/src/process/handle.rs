use crate::{ExitInfo, ServerProcess};

use tracing::warn;

/// The controller's record of the server it started.
pub struct ServerHandle {
    pid: u32,
    process: Box<dyn ServerProcess>,
    exit: Option<ExitInfo>,
}

impl ServerHandle {
    pub fn new(pid: u32, process: Box<dyn ServerProcess>) -> Self {
        Self {
            pid,
            process,
            exit: None,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Polls the process; once an exit is observed it is remembered.
    pub fn is_running(&mut self) -> bool {
        if self.exit.is_some() {
            return false;
        }

        match self.process.try_wait() {
            Ok(Some(exit)) => {
                self.exit = Some(exit);
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!(pid = self.pid, "Unable to poll server process: {e}");
                true
            }
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit.and_then(|exit| exit.code)
    }

    pub(crate) fn process_mut(&mut self) -> &mut dyn ServerProcess {
        self.process.as_mut()
    }
}

impl std::fmt::Debug for ServerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerHandle")
            .field("pid", &self.pid)
            .field("exit", &self.exit)
            .finish()
    }
}
