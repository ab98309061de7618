use crate::{
    APP_DIR_NAME, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, LoggingConfig,
    RepositoryConfig, ServerConfig, TimeoutConfig, ToolsConfig,
};

use std::path::{Component, Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub repository: RepositoryConfig,
    pub tools: ToolsConfig,
    pub timeouts: TimeoutConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config from the default config directory.
    ///
    /// Loading order:
    /// 1. VM_CONFIG_DIR env var, else `<platform config dir>/video-manager/`
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply VM_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;
        Self::load_from(&config_dir)
    }

    /// Same as [`Config::load`] with an explicit config directory.
    pub fn load_from(config_dir: &Path) -> ConfigErrorResult<Self> {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.to_path_buf(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: VM_CONFIG_DIR env var > platform config dir
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.repository.validate()?;
        self.tools.validate()?;
        self.timeouts.validate()?;

        let log_dir = Path::new(&self.logging.dir);
        if log_dir.is_absolute()
            || log_dir
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ConfigError::config(
                "logging.dir must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Absolute log directory for a given config directory.
    pub fn log_dir(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.logging.dir)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {} (entry {}, health {}, ui {})",
            self.server.base_url(),
            self.server.entry_script,
            self.server.health_path,
            self.server.ui_path
        );
        info!(
            "  repository: root={}, marker={}, project={}, remote={}, check_on_startup={}",
            self.repository.root.as_deref().unwrap_or("<discover>"),
            self.repository.marker,
            self.repository.project_dir,
            self.repository.remote,
            self.repository.check_on_startup
        );
        info!(
            "  tools: runtime={}, package_manager={}, version_control={}",
            self.tools.runtime, self.tools.package_manager, self.tools.version_control
        );
        info!(
            "  timeouts: grace={}ms, stop={}s, health={}s, git={}s, install={}s",
            self.timeouts.startup_grace_ms,
            self.timeouts.stop_timeout_secs,
            self.timeouts.health_timeout_secs,
            self.timeouts.git_timeout_secs,
            self.timeouts.install_timeout_secs
        );
        info!("  logging: {} ({})", *self.logging.level, self.logging.dir);
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("VM_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("VM_SERVER_PORT", &mut self.server.port);
        Self::apply_env_string("VM_SERVER_ENTRY_SCRIPT", &mut self.server.entry_script);
        Self::apply_env_string("VM_SERVER_HEALTH_PATH", &mut self.server.health_path);
        Self::apply_env_string("VM_SERVER_UI_PATH", &mut self.server.ui_path);

        // Repository
        Self::apply_env_option_string("VM_REPO_ROOT", &mut self.repository.root);
        Self::apply_env_string("VM_REPO_MARKER", &mut self.repository.marker);
        Self::apply_env_string("VM_REPO_PROJECT_DIR", &mut self.repository.project_dir);
        Self::apply_env_string("VM_REPO_REMOTE", &mut self.repository.remote);
        Self::apply_env_bool(
            "VM_REPO_CHECK_ON_STARTUP",
            &mut self.repository.check_on_startup,
        );

        // Tools
        Self::apply_env_string("VM_TOOLS_RUNTIME", &mut self.tools.runtime);
        Self::apply_env_string("VM_TOOLS_PACKAGE_MANAGER", &mut self.tools.package_manager);
        Self::apply_env_string("VM_TOOLS_VERSION_CONTROL", &mut self.tools.version_control);

        // Timeouts
        Self::apply_env_parse(
            "VM_STARTUP_GRACE_MS",
            &mut self.timeouts.startup_grace_ms,
        );
        Self::apply_env_parse(
            "VM_STOP_TIMEOUT_SECS",
            &mut self.timeouts.stop_timeout_secs,
        );
        Self::apply_env_parse(
            "VM_HEALTH_TIMEOUT_SECS",
            &mut self.timeouts.health_timeout_secs,
        );
        Self::apply_env_parse("VM_GIT_TIMEOUT_SECS", &mut self.timeouts.git_timeout_secs);
        Self::apply_env_parse(
            "VM_INSTALL_TIMEOUT_SECS",
            &mut self.timeouts.install_timeout_secs,
        );

        // Logging
        Self::apply_env_parse("VM_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_string("VM_LOG_DIR", &mut self.logging.dir);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
