use super::fakes::{FakeTools, Harness, ScriptedGit, ScriptedInstaller};
use crate::{CommandOutput, ControlError, FetchMode, Indicator, InstallMode, UpdateState};

use std::sync::Arc;

fn harness_with(git: ScriptedGit) -> Harness {
    let mut harness = Harness::new();
    harness.git = Arc::new(git);
    harness
}

// =========================================================================
// Background pass
// =========================================================================

#[tokio::test]
async fn given_three_commits_behind_when_reconciled_then_three_updates_available() {
    let harness = harness_with(ScriptedGit::default().with_sync(CommandOutput::succeeded("0\t3\n")));

    let state = harness.reconciler().reconcile(FetchMode::Background).await;

    assert_eq!(state, UpdateState::Available(3));
    assert_eq!(state.message(), "3 updates available");
    assert_eq!(
        harness.git.calls(),
        vec!["fetch --all --quiet", "rev-parse", "rev-list origin/main"]
    );
}

#[tokio::test]
async fn given_two_commits_ahead_when_reconciled_then_ahead_state() {
    let harness = harness_with(ScriptedGit::default().with_sync(CommandOutput::succeeded("2\t0\n")));

    let state = harness.reconciler().reconcile(FetchMode::Background).await;

    assert_eq!(state, UpdateState::Ahead(2));
    assert_eq!(state.message(), "2 commits ahead");
    assert_eq!(state.indicator(), Indicator::UpToDate);
}

#[tokio::test]
async fn given_in_sync_when_reconciled_then_up_to_date() {
    let harness = Harness::new();

    let state = harness.reconciler().reconcile(FetchMode::Background).await;

    assert_eq!(state, UpdateState::UpToDate);
}

#[tokio::test]
async fn given_no_marker_when_reconciled_then_not_applicable_without_git_calls() {
    let harness = Harness::new().without_marker();

    let state = harness.reconciler().reconcile(FetchMode::Background).await;

    assert_eq!(state, UpdateState::NotApplicable("Not a git repository".into()));
    assert!(harness.git.calls().is_empty());
}

#[tokio::test]
async fn given_git_missing_when_reconciled_then_tool_error_without_git_calls() {
    let mut harness = Harness::new();
    harness.tools = Arc::new(FakeTools::missing(&["git"]));

    let state = harness.reconciler().reconcile(FetchMode::Background).await;

    assert_eq!(state, UpdateState::Error("git is not installed".into()));
    assert!(harness.git.calls().is_empty());
}

#[tokio::test]
async fn given_fetch_fails_when_reconciled_then_unable_to_fetch_and_pass_stops() {
    let harness = harness_with(
        ScriptedGit::default().with_fetch(CommandOutput::failed(128, "fatal: unable to access")),
    );

    let state = harness.reconciler().reconcile(FetchMode::Background).await;

    assert_eq!(state, UpdateState::Error("Unable to fetch".into()));
    assert_eq!(harness.git.calls(), vec!["fetch --all --quiet"]);
}

#[tokio::test]
async fn given_branch_fails_when_reconciled_then_cannot_determine_branch() {
    let harness = harness_with(
        ScriptedGit::default().with_branch(CommandOutput::failed(128, "fatal: not a branch")),
    );

    let state = harness.reconciler().reconcile(FetchMode::Background).await;

    assert_eq!(state, UpdateState::Error("Cannot determine branch".into()));
    assert_eq!(harness.git.calls().len(), 2);
}

#[tokio::test]
async fn given_sync_exits_non_zero_with_counts_when_reconciled_then_no_upstream() {
    let harness = harness_with(ScriptedGit::default().with_sync(CommandOutput {
        code: Some(128),
        stdout: String::from("0\t5\n"),
        stderr: String::from("fatal: ambiguous argument"),
    }));

    let state = harness.reconciler().reconcile(FetchMode::Background).await;

    assert_eq!(state, UpdateState::NotApplicable("No upstream configured".into()));
}

#[tokio::test]
async fn given_malformed_sync_output_when_reconciled_then_parse_error() {
    for output in ["garbage", "1\t2\t3", "4"] {
        let harness =
            harness_with(ScriptedGit::default().with_sync(CommandOutput::succeeded(output)));

        let state = harness.reconciler().reconcile(FetchMode::Background).await;

        assert_eq!(state, UpdateState::Error("Parse error".into()), "for {output:?}");
    }
}

#[tokio::test]
async fn given_custom_remote_and_branch_when_reconciled_then_compares_against_them() {
    let mut harness = harness_with(
        ScriptedGit::default().with_branch(CommandOutput::succeeded("feature/videos\n")),
    );
    harness.config.repository.remote = String::from("upstream");

    harness.reconciler().reconcile(FetchMode::Background).await;

    assert_eq!(
        harness.git.calls().last().map(String::as_str),
        Some("rev-list upstream/feature/videos")
    );
}

#[tokio::test]
async fn given_marker_appears_later_when_reconciled_again_then_pass_proceeds() {
    let harness = Harness::new().without_marker();
    let reconciler = harness.reconciler();

    assert!(matches!(
        reconciler.reconcile(FetchMode::Background).await,
        UpdateState::NotApplicable(_)
    ));

    std::fs::create_dir(harness.temp.path().join(".git")).unwrap();

    assert_eq!(
        reconciler.reconcile(FetchMode::Background).await,
        UpdateState::UpToDate
    );
}

// =========================================================================
// Apply update
// =========================================================================

#[tokio::test]
async fn given_pull_ok_and_install_fails_when_applying_then_still_success() {
    let mut harness = Harness::new();
    harness.installer =
        Arc::new(ScriptedInstaller::default().with_result(CommandOutput::failed(1, "npm ERR!")));

    let outcome = harness.reconciler().apply_update().await.unwrap();

    assert!(!outcome.dependencies_refreshed);
    assert_eq!(harness.git.calls(), vec!["pull --quiet"]);
    assert_eq!(harness.installer.calls(), vec![InstallMode::Silent]);
}

#[tokio::test]
async fn given_pull_fails_when_applying_then_stderr_verbatim_and_no_install() {
    let harness = harness_with(ScriptedGit::default().with_pull(CommandOutput::failed(
        1,
        "error: Your local changes would be overwritten",
    )));

    let result = harness.reconciler().apply_update().await;

    match result {
        Err(ControlError::PullFailed { stderr, .. }) => {
            assert_eq!(stderr, "error: Your local changes would be overwritten");
        }
        other => panic!("expected PullFailed, got {other:?}"),
    }
    assert!(harness.installer.calls().is_empty());
}

#[tokio::test]
async fn given_everything_succeeds_when_applying_then_dependencies_refreshed() {
    let harness = Harness::new();

    let outcome = harness.reconciler().apply_update().await.unwrap();

    assert!(outcome.dependencies_refreshed);
}

// =========================================================================
// Manual update
// =========================================================================

#[tokio::test]
async fn given_no_marker_when_updating_manually_then_not_a_repository_and_no_fetch() {
    let harness = Harness::new().without_marker();

    let result = harness.reconciler().update_from_remote().await;

    assert!(matches!(result, Err(ControlError::NotAGitRepository { .. })));
    assert!(harness.git.calls().is_empty());
}

#[tokio::test]
async fn given_manual_update_when_successful_then_prunes_pulls_and_trims_output() {
    let harness = harness_with(
        ScriptedGit::default().with_pull(CommandOutput::succeeded("Updating a1b2c3..d4e5f6\n")),
    );

    let update = harness.reconciler().update_from_remote().await.unwrap();

    assert_eq!(update.pull_output, "Updating a1b2c3..d4e5f6");
    assert_eq!(harness.git.calls(), vec!["fetch --all --prune", "pull"]);
}

#[tokio::test]
async fn given_manual_fetch_fails_when_updating_then_fetch_error_and_no_pull() {
    let harness = harness_with(
        ScriptedGit::default().with_fetch(CommandOutput::failed(1, "fatal: could not read")),
    );

    let result = harness.reconciler().update_from_remote().await;

    match result {
        Err(ControlError::FetchFailed { stderr, .. }) => assert_eq!(stderr, "fatal: could not read"),
        other => panic!("expected FetchFailed, got {other:?}"),
    }
    assert_eq!(harness.git.calls(), vec!["fetch --all --prune"]);
}

#[tokio::test]
async fn given_npm_missing_when_updating_manually_then_tool_missing() {
    let mut harness = Harness::new();
    harness.tools = Arc::new(FakeTools::missing(&["npm"]));

    let result = harness.reconciler().update_from_remote().await;

    assert!(matches!(result, Err(ControlError::ToolMissing { .. })));
    assert!(harness.git.calls().is_empty());
}
