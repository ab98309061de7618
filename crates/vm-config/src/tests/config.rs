use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, none, ok, some};
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let _temp = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
    assert_that!(config.server.host.as_str(), eq("localhost"));
    assert_that!(config.tools.runtime.as_str(), eq("node"));
    assert_that!(config.tools.package_manager.as_str(), eq("npm"));
    assert_that!(config.tools.version_control.as_str(), eq("git"));
    assert_that!(config.repository.remote.as_str(), eq("origin"));
    assert_that!(config.repository.root, none());
    assert_that!(config.timeouts.stop_timeout_secs, eq(5));
    assert_that!(config.timeouts.health_timeout_secs, eq(2));
}

#[test]
#[serial]
fn given_no_config_file_when_load_and_validate_then_ok() {
    // Given
    let _temp = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_directory_created() {
    // Given
    let temp = tempfile::TempDir::new().unwrap();
    let nested = temp.path().join("nested").join("video-manager");
    let _dir = EnvGuard::set(crate::CONFIG_DIR_ENV, nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    assert!(nested.is_dir());
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_ok_and_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join(crate::CONFIG_FILENAME),
        r#"
              [server]
              port = 4000
              entry_script = "server.js"

              [repository]
              project_dir = "web"
              check_on_startup = false

              [timeouts]
              startup_grace_ms = 500
          "#,
    )
    .unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(4000));
    assert_that!(config.server.entry_script.as_str(), eq("server.js"));
    assert_that!(config.repository.project_dir.as_str(), eq("web"));
    assert_that!(config.repository.check_on_startup, eq(false));
    assert_that!(config.timeouts.startup_grace_ms, eq(500));
    // Untouched sections keep their defaults
    assert_that!(config.tools.runtime.as_str(), eq("node"));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join(crate::CONFIG_FILENAME),
        r#"
              [server]
              port = 4000
          "#,
    )
    .unwrap();
    let _port = EnvGuard::set("VM_SERVER_PORT", "5000");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(5000));
}

#[test]
#[serial]
fn given_repo_root_env_var_when_load_then_root_set() {
    // Given
    let _temp = setup_config_dir();
    let _root = EnvGuard::set("VM_REPO_ROOT", "/srv/video-site");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.repository.root.as_deref(), some(eq("/srv/video-site")));
}

#[test]
#[serial]
fn given_check_on_startup_env_zero_when_load_then_disabled() {
    // Given
    let _temp = setup_config_dir();
    let _check = EnvGuard::set("VM_REPO_CHECK_ON_STARTUP", "0");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.repository.check_on_startup, eq(false));
}

#[test]
#[serial]
fn given_explicit_dir_when_load_from_then_reads_that_dir() {
    // Given
    let _temp = setup_config_dir();
    let other = tempfile::TempDir::new().unwrap();
    std::fs::write(
        other.path().join(crate::CONFIG_FILENAME),
        "[server]\nport = 4321\n",
    )
    .unwrap();

    // When
    let config = Config::load_from(other.path()).unwrap();

    // Then
    assert_that!(config.server.port, eq(4321));
}

#[test]
#[serial]
fn given_config_dir_when_log_dir_then_joined_with_logging_dir() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let config = Config::load().unwrap();

    // When
    let log_dir = config.log_dir(temp.path());

    // Then
    assert_that!(log_dir, eq(&temp.path().join("logs")));
}
