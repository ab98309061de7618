use crate::commands::Commands;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "video-manager")]
#[command(about = "Control panel for the local video manager server")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Defaults to the interactive panel
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config directory (defaults to VM_CONFIG_DIR, then the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Repository root, skipping discovery from the executable's directory
    #[arg(long, global = true)]
    pub repo_root: Option<PathBuf>,

    /// Show all log output on the console
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn selected_command(&self) -> Commands {
        self.command.clone().unwrap_or_default()
    }
}
