use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DEPENDENCY_DIR, DEFAULT_MANIFEST,
    DEFAULT_PACKAGE_MANAGER, DEFAULT_RUNTIME, DEFAULT_VERSION_CONTROL,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Runtime that executes the server entry script
    pub runtime: String,
    pub package_manager: String,
    pub version_control: String,
    /// Directory the package manager installs into, inside the project directory
    pub dependency_dir: String,
    /// Dependency manifest expected in the project directory
    pub manifest: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            runtime: String::from(DEFAULT_RUNTIME),
            package_manager: String::from(DEFAULT_PACKAGE_MANAGER),
            version_control: String::from(DEFAULT_VERSION_CONTROL),
            dependency_dir: String::from(DEFAULT_DEPENDENCY_DIR),
            manifest: String::from(DEFAULT_MANIFEST),
        }
    }
}

impl ToolsConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (key, value) in [
            ("tools.runtime", &self.runtime),
            ("tools.package_manager", &self.package_manager),
            ("tools.version_control", &self.version_control),
            ("tools.dependency_dir", &self.dependency_dir),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::tools(format!("{key} cannot be empty")));
            }
        }

        Ok(())
    }
}
