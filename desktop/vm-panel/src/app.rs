//! Wires configuration, logging and capabilities to the selected command.

use crate::{
    AnswerSource, Cli, Commands, DoctorReport, InputLines, TerminalPresenter, current_log_path,
    setup_logging, spawn_signal_listener, spawn_stdin_reader,
};

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use console::colors_enabled;
use tracing::{error, info};
use vm_config::Config;
use vm_control::{
    Capabilities, ControlError, ControlPanel, ControlResult, Emphasis, FetchMode, HealthChecker,
    PanelCommand, Presenter, ProcessController, RepoLocation, Severity,
    ToolAvailability, Toolchain, UpdateReconciler, UpdateState, WhichLocator,
};

/// Answer source for one-shot commands, which never prompt.
pub struct NoInput;

impl AnswerSource for NoInput {
    fn read_answer(&mut self) -> Option<String> {
        None
    }
}

struct Context {
    config: Config,
    config_dir: PathBuf,
    log_dir: PathBuf,
    location: RepoLocation,
}

pub async fn run(cli: Cli) -> ExitCode {
    let context = match prepare(&cli) {
        Ok(context) => context,
        Err(message) => {
            eprintln!("Error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let capabilities = Capabilities::system(&context.config, &context.location);

    match cli.selected_command() {
        Commands::Run { no_update_check } => {
            let check_on_startup = !no_update_check && context.config.repository.check_on_startup;
            run_panel(&context, &capabilities, check_on_startup).await
        }
        Commands::Health => health(&context.config).await,
        Commands::Check => check(&context, &capabilities).await,
        Commands::Update => update(&context, &capabilities).await,
        Commands::Doctor { json } => doctor(&context, json),
    }
}

fn prepare(cli: &Cli) -> Result<Context, String> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => Config::config_dir().map_err(|e| e.to_string())?,
    };

    let config = Config::load_from(&config_dir).map_err(|e| e.to_string())?;
    config
        .validate()
        .map_err(|e| format!("invalid configuration: {e}"))?;

    let log_dir = config.log_dir(&config_dir);
    if let Err(e) = setup_logging(&log_dir, config.logging.level, cli.verbose) {
        eprintln!("Warning: failed to set up logging in {}: {e}", log_dir.display());
    }

    info!("video-manager {} starting", env!("CARGO_PKG_VERSION"));
    info!("Config directory: {}", config_dir.display());
    config.log_summary();

    let location =
        resolve_location(&config, cli.repo_root.as_deref()).map_err(|e| e.user_message())?;
    info!(
        root = %location.root().display(),
        discovered = location.was_discovered(),
        "Repository located"
    );

    Ok(Context {
        config,
        config_dir,
        log_dir,
        location,
    })
}

/// `--repo-root` wins over `repository.root`, which wins over discovery.
pub fn resolve_location(config: &Config, repo_root: Option<&Path>) -> ControlResult<RepoLocation> {
    match repo_root {
        Some(root) => Ok(RepoLocation::from_root(
            root,
            &config.repository.marker,
            &config.repository.project_dir,
        )),
        None => Ok(RepoLocation::from_config(
            config,
            &RepoLocation::executable_dir()?,
        )),
    }
}

async fn run_panel(context: &Context, capabilities: &Capabilities, check_on_startup: bool) -> ExitCode {
    let server = match ProcessController::new(&context.config, context.location.clone(), capabilities)
    {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to create process controller: {e}");
            eprintln!("Error: {}", e.user_message());
            return ExitCode::FAILURE;
        }
    };
    let updates = UpdateReconciler::new(&context.config, context.location.clone(), capabilities);

    let (tx, input) = InputLines::channel();
    spawn_stdin_reader(tx.clone());
    spawn_signal_listener(tx);

    let presenter = TerminalPresenter::stdout(input.clone());
    let mut panel = ControlPanel::new(presenter, server, updates);

    panel
        .presenter_mut()
        .notify(Severity::Info, "Video Manager", &PanelCommand::help_text());
    panel.presenter_mut().set_status("Ready", None);

    if check_on_startup {
        panel.check_for_updates();
    }

    interactive_loop(&mut panel, &input).await;

    info!("Control panel closed");
    ExitCode::SUCCESS
}

/// Read commands and background events until the operator quits or input ends.
///
/// The server is stopped before returning.
pub async fn interactive_loop<W: Write, A: AnswerSource>(
    panel: &mut ControlPanel<TerminalPresenter<W, A>>,
    input: &InputLines,
) {
    loop {
        panel.presenter_mut().prompt();

        tokio::select! {
            biased;

            Some(event) = panel.next_event() => {
                panel.handle_event(event).await;
                if panel.presenter_mut().take_quit_request() {
                    panel.shutdown().await;
                    break;
                }
            }
            line = input.next() => {
                let Some(line) = line else {
                    panel.shutdown().await;
                    break;
                };

                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match PanelCommand::parse(line) {
                    Some(command) => {
                        if panel.execute(command).await.is_break() {
                            break;
                        }
                    }
                    None => panel.presenter_mut().set_status(
                        &format!("Unknown command '{line}'. Type 'help' for commands."),
                        Some(Emphasis::Warning),
                    ),
                }
            }
        }
    }
}

async fn health(config: &Config) -> ExitCode {
    let checker =
        match HealthChecker::new(config.server.health_url(), config.timeouts.health_timeout()) {
            Ok(checker) => checker,
            Err(e) => {
                eprintln!("Error: {}", e.user_message());
                return ExitCode::FAILURE;
            }
        };

    match checker.check().await.into_result(checker.url()) {
        Ok(latency_ms) => {
            println!("Server responded: OK ({latency_ms} ms)");
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn check(context: &Context, capabilities: &Capabilities) -> ExitCode {
    let reconciler = UpdateReconciler::new(&context.config, context.location.clone(), capabilities);
    let state = reconciler.reconcile(FetchMode::Background).await;

    let mut presenter = TerminalPresenter::new(std::io::stdout(), NoInput, colors_enabled());
    presenter.set_update_indicator(state.indicator(), &state.message());

    if check_failed(&state) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Only `Error` fails; a folder that is not a repository does not.
pub fn check_failed(state: &UpdateState) -> bool {
    matches!(state, UpdateState::Error(_))
}

async fn update(context: &Context, capabilities: &Capabilities) -> ExitCode {
    let reconciler = UpdateReconciler::new(&context.config, context.location.clone(), capabilities);

    println!("Fetching updates from remote...");
    match reconciler.update_from_remote().await {
        Ok(update) => {
            if !update.pull_output.is_empty() {
                println!("{}", update.pull_output);
            }
            println!("Repository is up to date.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_error(error: &ControlError) {
    let message = error.user_message();
    eprintln!("Error: {message}");

    let hint = error.recovery_hint();
    if !message.contains(hint) {
        eprintln!("{hint}");
    }
}

fn doctor(context: &Context, json: bool) -> ExitCode {
    let toolchain = Toolchain::from_config(&context.config.tools);
    let tools = ToolAvailability::detect(&WhichLocator, &toolchain);

    let report = DoctorReport::gather(
        &context.config,
        tools,
        context.location.clone(),
        context.config_dir.clone(),
        current_log_path(&context.log_dir),
    );

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{report}");
    }

    if report.is_healthy() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
