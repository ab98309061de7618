use crate::{check_failed, resolve_location};

use tempfile::TempDir;
use vm_config::Config;
use vm_control::UpdateState;

#[test]
fn given_repo_root_flag_when_resolved_then_used_without_discovery() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join(".git")).unwrap();

    let location = resolve_location(&Config::default(), Some(temp.path())).unwrap();

    assert_eq!(location.root(), temp.path());
    assert_eq!(location.server_dir(), temp.path().join("pr"));
    assert!(location.has_marker());
}

#[test]
fn given_repo_root_flag_when_config_names_another_root_then_flag_wins() {
    let flagged = TempDir::new().unwrap();
    let configured = TempDir::new().unwrap();
    let mut config = Config::default();
    config.repository.root = Some(configured.path().to_string_lossy().into_owned());

    let location = resolve_location(&config, Some(flagged.path())).unwrap();

    assert_eq!(location.root(), flagged.path());
}

#[test]
fn given_configured_root_without_flag_when_resolved_then_config_root_used() {
    let configured = TempDir::new().unwrap();
    let mut config = Config::default();
    config.repository.root = Some(configured.path().to_string_lossy().into_owned());

    let location = resolve_location(&config, None).unwrap();

    assert_eq!(location.root(), configured.path());
}

#[test]
fn given_check_results_when_classified_then_only_errors_fail() {
    assert!(check_failed(&UpdateState::Error(String::from("Unable to fetch"))));
    assert!(!check_failed(&UpdateState::UpToDate));
    assert!(!check_failed(&UpdateState::Available(2)));
    assert!(!check_failed(&UpdateState::Ahead(1)));
    assert!(!check_failed(&UpdateState::NotApplicable(String::from(
        "Not a git repository"
    ))));
}
