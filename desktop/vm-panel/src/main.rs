//! video-manager - control panel for the local video manager server
//!
//! ```bash
//! # Interactive panel: start/stop the server, check for and apply updates
//! video-manager
//!
//! # One-shot commands
//! video-manager health
//! video-manager check
//! video-manager doctor --json
//! ```

use std::process::ExitCode;

use clap::Parser;
use vm_panel::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    vm_panel::run(Cli::parse()).await
}
