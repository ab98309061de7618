use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive control panel
    Run {
        /// Skip the update check on startup
        #[arg(long)]
        no_update_check: bool,
    },

    /// Check the server health endpoint once
    Health,

    /// Compare the local checkout with its remote once
    Check,

    /// Fetch and pull from the remote repository
    Update,

    /// Report tool availability and the resolved repository location
    Doctor {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Run {
            no_update_check: false,
        }
    }
}
