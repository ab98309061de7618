use std::io;

use async_trait::async_trait;
use tokio::process::Child;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitInfo {
    /// `None` when the process was ended by a signal
    pub code: Option<i32>,
}

/// A running server process the controller can observe and stop.
#[async_trait]
pub trait ServerProcess: Send + Sync {
    fn id(&self) -> Option<u32>;

    /// Non-blocking liveness check; `Some` once the process has exited.
    fn try_wait(&mut self) -> io::Result<Option<ExitInfo>>;

    /// Ask the process to shut down gracefully.
    async fn terminate(&mut self) -> io::Result<()>;

    async fn wait(&mut self) -> io::Result<ExitInfo>;

    /// Forcefully end the process and reap it.
    async fn kill(&mut self) -> io::Result<()>;
}

/// A real child process spawned by [`DetachedSpawner`](crate::DetachedSpawner).
#[derive(Debug)]
pub struct ChildProcess {
    child: Child,
}

impl ChildProcess {
    pub fn new(child: Child) -> Self {
        Self { child }
    }
}

#[async_trait]
impl ServerProcess for ChildProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn try_wait(&mut self) -> io::Result<Option<ExitInfo>> {
        Ok(self
            .child
            .try_wait()?
            .map(|status| ExitInfo { code: status.code() }))
    }

    async fn terminate(&mut self) -> io::Result<()> {
        // Already reaped
        let Some(pid) = self.child.id() else {
            return Ok(());
        };

        #[cfg(unix)]
        {
            send_sigterm(pid)
        }

        #[cfg(not(unix))]
        {
            tracing::debug!(pid, "No graceful signal on this platform, killing");
            self.child.start_kill()
        }
    }

    async fn wait(&mut self) -> io::Result<ExitInfo> {
        let status = self.child.wait().await?;
        Ok(ExitInfo {
            code: status.code(),
        })
    }

    async fn kill(&mut self) -> io::Result<()> {
        self.child.kill().await
    }
}

#[cfg(unix)]
fn send_sigterm(pid: u32) -> io::Result<()> {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    match kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        // Exited between the liveness check and the signal
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(errno) => Err(io::Error::from(errno)),
    }
}
