use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_GIT_TIMEOUT_SECS, DEFAULT_HEALTH_TIMEOUT_SECS,
    DEFAULT_INSTALL_TIMEOUT_SECS, DEFAULT_STARTUP_GRACE_MS, DEFAULT_STOP_TIMEOUT_SECS,
    MAX_STARTUP_GRACE_MS, MAX_STOP_TIMEOUT_SECS,
};

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Pause after spawning the server before the UI page is opened
    pub startup_grace_ms: u64,
    /// Time allowed for a graceful stop before the server is killed
    pub stop_timeout_secs: u64,
    pub health_timeout_secs: u64,
    /// Upper bound for a single git invocation
    pub git_timeout_secs: u64,
    /// Upper bound for a single package manager install
    pub install_timeout_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            startup_grace_ms: DEFAULT_STARTUP_GRACE_MS,
            stop_timeout_secs: DEFAULT_STOP_TIMEOUT_SECS,
            health_timeout_secs: DEFAULT_HEALTH_TIMEOUT_SECS,
            git_timeout_secs: DEFAULT_GIT_TIMEOUT_SECS,
            install_timeout_secs: DEFAULT_INSTALL_TIMEOUT_SECS,
        }
    }
}

impl TimeoutConfig {
    pub fn startup_grace(&self) -> Duration {
        Duration::from_millis(self.startup_grace_ms)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_secs(self.stop_timeout_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs)
    }

    pub fn install_timeout(&self) -> Duration {
        Duration::from_secs(self.install_timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.startup_grace_ms > MAX_STARTUP_GRACE_MS {
            return Err(ConfigError::timeout(format!(
                "timeouts.startup_grace_ms must be <= {MAX_STARTUP_GRACE_MS}, got {}",
                self.startup_grace_ms
            )));
        }

        if self.stop_timeout_secs == 0 || self.stop_timeout_secs > MAX_STOP_TIMEOUT_SECS {
            return Err(ConfigError::timeout(format!(
                "timeouts.stop_timeout_secs must be 1-{MAX_STOP_TIMEOUT_SECS}, got {}",
                self.stop_timeout_secs
            )));
        }

        for (key, value) in [
            ("timeouts.health_timeout_secs", self.health_timeout_secs),
            ("timeouts.git_timeout_secs", self.git_timeout_secs),
            ("timeouts.install_timeout_secs", self.install_timeout_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::timeout(format!("{key} must be > 0")));
            }
        }

        Ok(())
    }
}
