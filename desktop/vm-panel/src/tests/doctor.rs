use crate::DoctorReport;

use std::path::PathBuf;

use tempfile::TempDir;
use vm_config::Config;
use vm_control::{RepoLocation, ToolAvailability, ToolLookup, ToolRole};

fn tools(missing: Option<ToolRole>) -> ToolAvailability {
    ToolAvailability {
        lookups: ToolRole::CHECK_ORDER
            .into_iter()
            .map(|role| ToolLookup {
                role,
                program: role.label().to_lowercase(),
                path: (Some(role) != missing).then(|| PathBuf::from("/usr/bin/tool")),
            })
            .collect(),
    }
}

fn repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join(".git")).unwrap();
    std::fs::create_dir_all(temp.path().join("pr")).unwrap();
    std::fs::write(temp.path().join("pr").join("package.json"), "{}").unwrap();
    temp
}

fn report(temp: &TempDir, missing: Option<ToolRole>) -> DoctorReport {
    let config = Config::default();
    let location = RepoLocation::from_root(temp.path(), ".git", "pr");
    DoctorReport::gather(
        &config,
        tools(missing),
        location,
        PathBuf::from("/home/op/.config/video-manager"),
        PathBuf::from("/home/op/.config/video-manager/logs/video-manager.2026-01-01.log"),
    )
}

#[test]
fn given_repo_without_dependencies_when_gathered_then_files_checked() {
    let temp = repo();

    let report = report(&temp, None);

    assert!(report.marker_present);
    assert!(report.manifest_present);
    assert!(!report.dependencies_installed);
    assert!(report.is_healthy());
}

#[test]
fn given_missing_tool_when_gathered_then_unhealthy_and_hint_rendered() {
    let temp = repo();

    let report = report(&temp, Some(ToolRole::VersionControl));

    assert!(!report.is_healthy());
    let text = report.to_string();
    assert!(text.contains("not found."));
    assert!(text.contains(ToolRole::VersionControl.install_hint()));
}

#[test]
fn given_folder_without_marker_when_gathered_then_unhealthy() {
    let temp = TempDir::new().unwrap();

    let report = report(&temp, None);

    assert!(!report.marker_present);
    assert!(!report.is_healthy());
    assert!(report.to_string().contains("marker           missing"));
}

#[test]
fn given_report_when_serialized_then_json_carries_location_and_tools() {
    let temp = repo();
    let report = report(&temp, None);

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["marker_present"], serde_json::Value::Bool(true));
    assert_eq!(
        json["location"]["root"].as_str().map(PathBuf::from),
        Some(temp.path().to_path_buf())
    );
    assert_eq!(json["tools"]["lookups"].as_array().map(Vec::len), Some(3));
}
