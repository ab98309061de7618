use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ENTRY_SCRIPT, DEFAULT_HEALTH_PATH, DEFAULT_HOST,
    DEFAULT_PORT, DEFAULT_UI_PATH,
};

use serde::Deserialize;

const ALLOWED_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Script handed to the runtime, relative to the project directory
    pub entry_script: String,
    pub health_path: String,
    /// Page opened in the browser once the server is up
    pub ui_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            entry_script: String::from(DEFAULT_ENTRY_SCRIPT),
            health_path: String::from(DEFAULT_HEALTH_PATH),
            ui_path: String::from(DEFAULT_UI_PATH),
        }
    }
}

impl ServerConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url(), Self::normalize_path(&self.health_path))
    }

    pub fn ui_url(&self) -> String {
        format!("{}{}", self.base_url(), Self::normalize_path(&self.ui_path))
    }

    /// `host:port` as shown to the user.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn normalize_path(path: &str) -> String {
        if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        }
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.port == 0 {
            return Err(ConfigError::server("server.port must be a fixed port, got 0"));
        }

        // The panel only ever manages a server on this machine.
        if !ALLOWED_HOSTS.contains(&self.host.as_str()) {
            return Err(ConfigError::server(format!(
                "server.host must be one of {ALLOWED_HOSTS:?}, got {}",
                self.host
            )));
        }

        if self.entry_script.trim().is_empty() {
            return Err(ConfigError::server("server.entry_script cannot be empty"));
        }

        Ok(())
    }
}
