mod config;
mod error;
mod log_level;
mod logging_config;
mod repository_config;
mod server_config;
mod timeout_config;
mod tools_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use repository_config::RepositoryConfig;
pub use server_config::ServerConfig;
pub use timeout_config::TimeoutConfig;
pub use tools_config::ToolsConfig;

pub const CONFIG_DIR_ENV: &str = "VM_CONFIG_DIR";
pub const CONFIG_FILENAME: &str = "config.toml";
pub const APP_DIR_NAME: &str = "video-manager";

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ENTRY_SCRIPT: &str = "video-manager-server.js";
const DEFAULT_HEALTH_PATH: &str = "/health";
const DEFAULT_UI_PATH: &str = "/manage-videos.html";

const DEFAULT_MARKER: &str = ".git";
const DEFAULT_PROJECT_DIR: &str = "pr";
const DEFAULT_REMOTE: &str = "origin";

const DEFAULT_RUNTIME: &str = "node";
const DEFAULT_PACKAGE_MANAGER: &str = "npm";
const DEFAULT_VERSION_CONTROL: &str = "git";
const DEFAULT_DEPENDENCY_DIR: &str = "node_modules";
const DEFAULT_MANIFEST: &str = "package.json";

const DEFAULT_STARTUP_GRACE_MS: u64 = 2000;
const DEFAULT_STOP_TIMEOUT_SECS: u64 = 5;
const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 2;
const DEFAULT_GIT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_INSTALL_TIMEOUT_SECS: u64 = 600;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "logs";

const MAX_STARTUP_GRACE_MS: u64 = 60_000;
const MAX_STOP_TIMEOUT_SECS: u64 = 60;
