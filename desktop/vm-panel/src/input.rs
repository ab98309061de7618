//! Operator input: stdin lines and shutdown signals feed one queue.

use std::io::BufRead;
use std::sync::Arc;

use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info};

/// Sent in place of a typed command when the process is asked to exit.
pub const QUIT_LINE: &str = "quit";

pub type LineSender = mpsc::UnboundedSender<String>;

/// Shared reader for the operator's input lines.
///
/// The interactive loop awaits [`InputLines::next`]; the presenter reads
/// confirmation answers through [`InputLines::next_blocking`]. `None` means
/// every sender is gone.
#[derive(Clone)]
pub struct InputLines {
    rx: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl InputLines {
    pub fn channel() -> (LineSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            tx,
            Self {
                rx: Arc::new(Mutex::new(rx)),
            },
        )
    }

    pub async fn next(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }

    /// Blocks the current thread. Inside a multi-thread runtime the worker is
    /// handed off first.
    pub fn next_blocking(&self) -> Option<String> {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(self.next()))
            }
            _ => self.rx.blocking_lock().blocking_recv(),
        }
    }
}

/// Forward stdin lines until EOF on a dedicated thread.
pub fn spawn_stdin_reader(tx: LineSender) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    error!("Failed to read stdin: {e}");
                    break;
                }
            }
        }
        debug!("stdin closed");
        let _ = tx.send(QUIT_LINE.to_string());
    });
}

/// Turn SIGINT/SIGTERM into a quit command so the server is stopped first.
#[cfg(unix)]
pub fn spawn_signal_listener(tx: LineSender) {
    std::thread::spawn(move || {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals = match Signals::new([SIGINT, SIGTERM]) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to register signal handlers: {e}");
                return;
            }
        };

        for sig in signals.forever() {
            info!("Received signal {sig}, shutting down...");
            if tx.send(QUIT_LINE.to_string()).is_err() {
                return;
            }
        }
    });
}

/// Must be called inside the runtime.
#[cfg(not(unix))]
pub fn spawn_signal_listener(tx: LineSender) {
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down...");
            if tx.send(QUIT_LINE.to_string()).is_err() {
                return;
            }
        }
    });
}
