use crate::command::{hide_console_window, resolve_program};
use crate::{ChildProcess, ServerProcess};

use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, info};

/// What to launch for the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

pub trait ProcessSpawner: Send + Sync {
    fn spawn(&self, spec: &SpawnSpec) -> io::Result<Box<dyn ServerProcess>>;
}

/// Spawns the server in its own session so terminal signals aimed at the
/// control panel do not reach it. Output is forwarded to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedSpawner;

impl ProcessSpawner for DetachedSpawner {
    fn spawn(&self, spec: &SpawnSpec) -> io::Result<Box<dyn ServerProcess>> {
        let mut cmd = tokio::process::Command::new(resolve_program(&spec.program));
        cmd.args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(unix)]
        unsafe {
            cmd.pre_exec(|| {
                libc::setsid();
                Ok(())
            });
        }

        hide_console_window(&mut cmd);

        let mut child = cmd.spawn()?;
        info!(
            pid = ?child.id(),
            "Spawned {} {}",
            spec.program,
            spec.args.join(" ")
        );

        if let Some(stdout) = child.stdout.take() {
            forward_lines(stdout, "stdout");
        }
        if let Some(stderr) = child.stderr.take() {
            forward_lines(stderr, "stderr");
        }

        Ok(Box::new(ChildProcess::new(child)))
    }
}

fn forward_lines<R>(stream: R, name: &'static str)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!(target: "vm_server", stream = name, "{line}");
        }
    });
}
