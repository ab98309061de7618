//! The control panel: turns operator commands and background results into
//! presenter calls. The only owner of presentation-visible state.

use crate::update::plural;
use crate::{
    ControlError, Dispatcher, Emphasis, FetchMode, PanelEvent, Presenter, ProcessController,
    ServerState, Severity, StartOutcome, StopOutcome, UpdateReconciler, UpdateState,
    spawn_update_check,
};

use std::ops::ControlFlow;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Operator commands understood by [`ControlPanel::execute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    Start,
    Stop,
    Open,
    Health,
    Check,
    Update,
    Apply,
    Status,
    Help,
    Quit,
}

impl PanelCommand {
    pub const ALL: [PanelCommand; 10] = [
        PanelCommand::Start,
        PanelCommand::Stop,
        PanelCommand::Open,
        PanelCommand::Health,
        PanelCommand::Check,
        PanelCommand::Update,
        PanelCommand::Apply,
        PanelCommand::Status,
        PanelCommand::Help,
        PanelCommand::Quit,
    ];

    /// Case-insensitive; accepts the command name or its one-letter alias.
    pub fn parse(input: &str) -> Option<Self> {
        let word = input.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|command| command.name() == word || command.alias() == word)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Open => "open",
            Self::Health => "health",
            Self::Check => "check",
            Self::Update => "update",
            Self::Apply => "apply",
            Self::Status => "status",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            Self::Start => "s",
            Self::Stop => "x",
            Self::Open => "o",
            Self::Health => "h",
            Self::Check => "c",
            Self::Update => "u",
            Self::Apply => "a",
            Self::Status => "i",
            Self::Help => "?",
            Self::Quit => "q",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Start => "Start the server and open the manager in the browser",
            Self::Stop => "Stop the server",
            Self::Open => "Open the manager in the browser",
            Self::Health => "Check whether the server responds",
            Self::Check => "Check the remote repository for updates",
            Self::Update => "Fetch and pull from the remote repository",
            Self::Apply => "Pull pending updates and refresh dependencies",
            Self::Status => "Show server and update status",
            Self::Help => "List commands",
            Self::Quit => "Stop the server and exit",
        }
    }

    /// One line per command, for help output.
    pub fn help_text() -> String {
        Self::ALL
            .iter()
            .map(|command| {
                format!(
                    "  {:<8} ({})  {}",
                    command.name(),
                    command.alias(),
                    command.description()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct ControlPanel<P: Presenter> {
    presenter: P,
    server: ProcessController,
    updates: UpdateReconciler,
    dispatcher: Dispatcher,
    events: mpsc::UnboundedReceiver<PanelEvent>,
    update_state: UpdateState,
}

impl<P: Presenter> ControlPanel<P> {
    pub fn new(presenter: P, server: ProcessController, updates: UpdateReconciler) -> Self {
        let (dispatcher, events) = Dispatcher::channel();

        Self {
            presenter,
            server,
            updates,
            dispatcher,
            events,
            update_state: UpdateState::Checking,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn update_state(&self) -> &UpdateState {
        &self.update_state
    }

    /// Run one operator command. Breaks on [`PanelCommand::Quit`].
    pub async fn execute(&mut self, command: PanelCommand) -> ControlFlow<()> {
        info!(command = command.name(), "Executing command");

        match command {
            PanelCommand::Start => self.start_server().await,
            PanelCommand::Stop => self.stop_server().await,
            PanelCommand::Open => self.open_ui(),
            PanelCommand::Health => self.check_health().await,
            PanelCommand::Check => {
                self.check_for_updates();
            }
            PanelCommand::Update => self.update_from_remote().await,
            PanelCommand::Apply => self.apply_update().await,
            PanelCommand::Status => self.show_status(),
            PanelCommand::Help => {
                self.presenter
                    .notify(Severity::Info, "Commands", &PanelCommand::help_text());
            }
            PanelCommand::Quit => {
                self.shutdown().await;
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    /// Start the server, rendering state transitions while it boots.
    pub async fn start_server(&mut self) {
        let mut states = self.server.subscribe();

        let result = {
            let start = self.server.start();
            tokio::pin!(start);

            loop {
                tokio::select! {
                    result = &mut start => break result,
                    Ok(()) = states.changed() => {
                        let state = states.borrow_and_update().clone();
                        Self::render_transition(&mut self.presenter, &state);
                    }
                }
            }
        };

        match result {
            Ok(StartOutcome::Started { pid }) => {
                self.presenter
                    .set_status(&format!("Server running (PID {pid})"), Some(Emphasis::Success));
            }
            Ok(StartOutcome::AlreadyRunning { .. }) => {
                self.presenter.set_status(
                    "Server already running. Opening browser...",
                    Some(Emphasis::Info),
                );
            }
            Err(e) => {
                self.presenter
                    .notify(Severity::Error, "Error", &e.user_message());
                self.presenter.set_status("Ready", None);
            }
        }
    }

    fn render_transition(presenter: &mut P, state: &ServerState) {
        match state {
            ServerState::InstallingDependencies | ServerState::Starting => {
                presenter.set_status(&state.describe(), Some(Emphasis::Info));
            }
            _ => {}
        }
    }

    pub async fn stop_server(&mut self) {
        match self.server.stop().await {
            StopOutcome::NotRunning => {
                self.presenter
                    .set_status("Server is not running.", Some(Emphasis::Muted));
            }
            StopOutcome::Stopped { .. } => {
                self.presenter
                    .set_status("Server stopped.", Some(Emphasis::Muted));
            }
            StopOutcome::ForceStopped => {
                self.presenter
                    .set_status("Server force stopped.", Some(Emphasis::Warning));
            }
            StopOutcome::Failed { error } => {
                self.presenter
                    .set_status(&error.user_message(), Some(Emphasis::Error));
            }
        }
    }

    pub fn open_ui(&mut self) {
        self.server.open_ui();
    }

    pub async fn check_health(&mut self) {
        let url = self.server.health_url().to_string();

        match self.server.check_health().await.into_result(&url) {
            Ok(_) => {
                self.presenter
                    .notify(Severity::Info, "Health Check", "Server responded: OK");
            }
            Err(e @ ControlError::HealthUnexpectedStatus { .. }) => {
                self.presenter
                    .notify(Severity::Warning, "Health Check", &e.user_message());
            }
            Err(e) => {
                warn!("Health check failed: {e}");
                let message = format!("Server is not reachable on {}", self.server.authority());
                self.presenter
                    .notify(Severity::Warning, "Health Check", &message);
            }
        }
    }

    /// Start a background pass; its results arrive as [`PanelEvent`]s.
    pub fn check_for_updates(&self) -> JoinHandle<()> {
        spawn_update_check(
            self.updates.clone(),
            FetchMode::Background,
            self.dispatcher.clone(),
        )
    }

    /// Operator-initiated fetch and pull, then a fresh background pass.
    pub async fn update_from_remote(&mut self) {
        self.presenter
            .set_status("Fetching updates from remote...", Some(Emphasis::Info));

        match self.updates.update_from_remote().await {
            Ok(update) => {
                self.presenter
                    .set_status("Repository is up to date.", Some(Emphasis::Success));
                self.check_for_updates();

                if !update.pull_output.is_empty() {
                    self.presenter
                        .notify(Severity::Info, "Git Output", &update.pull_output);
                }
            }
            Err(e) => {
                warn!("Manual update failed: {e}");
                self.presenter
                    .notify(Severity::Error, "Error", &e.user_message());
                self.presenter.set_status("Ready", None);
            }
        }
    }

    /// Pull pending updates, blocking the panel until done.
    pub async fn apply_update(&mut self) {
        self.presenter
            .set_status("Pulling updates...", Some(Emphasis::Info));
        self.update_state = UpdateState::Checking;
        self.presenter
            .set_update_indicator(UpdateState::Checking.indicator(), "Pulling updates...");

        if let Err(e) = self.updates.pull_updates().await {
            self.presenter.set_status("Update failed", Some(Emphasis::Error));
            self.set_update_state(UpdateState::from_error(&e));

            let stderr = match &e {
                ControlError::PullFailed { stderr, .. } => stderr.clone(),
                other => other.user_message(),
            };
            self.presenter.notify(
                Severity::Error,
                "Update Failed",
                &format!("Failed to pull updates:\n{stderr}"),
            );
            return;
        }

        self.presenter
            .set_status("Updating dependencies...", Some(Emphasis::Info));
        self.updates.refresh_dependencies().await;

        self.presenter
            .set_status("Updates applied successfully!", Some(Emphasis::Success));
        self.update_state = UpdateState::UpToDate;
        self.presenter
            .set_update_indicator(UpdateState::UpToDate.indicator(), "Updated successfully");
        self.presenter.notify(
            Severity::Info,
            "Update Complete",
            "Updates have been applied successfully!",
        );
    }

    fn show_status(&mut self) {
        let server = self.server.status();
        let message = format!(
            "Server: {}\nUpdates: {}\nRepository: {}",
            server.describe(),
            self.update_state.message(),
            self.server.location().root().display()
        );
        self.presenter.notify(Severity::Info, "Status", &message);
    }

    /// Apply one event posted by a background task.
    pub async fn handle_event(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::Indicator(state) => self.set_update_state(state),
            PanelEvent::PromptUpdate { behind } => {
                let message = format!(
                    "{behind} {} available from the remote repository.\n\nDo you want to update now?",
                    plural(behind, "update")
                );
                if self.presenter.confirm("Updates Available", &message) {
                    self.apply_update().await;
                }
            }
        }
    }

    /// Next posted event. Never `None` while the panel holds a [`Dispatcher`].
    pub async fn next_event(&mut self) -> Option<PanelEvent> {
        self.events.recv().await
    }

    /// Handle every event already queued, without waiting for more.
    pub async fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event).await;
        }
    }

    /// Stop the server before the panel goes away.
    pub async fn shutdown(&mut self) {
        info!("Control panel shutting down");
        self.stop_server().await;
    }

    fn set_update_state(&mut self, state: UpdateState) {
        self.presenter
            .set_update_indicator(state.indicator(), &state.message());
        self.update_state = state;
    }
}
