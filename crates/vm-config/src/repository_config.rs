use crate::{ConfigError, ConfigErrorResult, DEFAULT_MARKER, DEFAULT_PROJECT_DIR, DEFAULT_REMOTE};

use std::path::{Component, Path};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Explicit repository root. Discovered from the executable location when unset.
    pub root: Option<String>,
    /// Directory whose presence marks the repository root
    pub marker: String,
    /// Server project directory, relative to the repository root
    pub project_dir: String,
    /// Remote whose tracking branch is compared against HEAD
    pub remote: String,
    /// Run an update check as soon as the panel starts
    pub check_on_startup: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            root: None,
            marker: String::from(DEFAULT_MARKER),
            project_dir: String::from(DEFAULT_PROJECT_DIR),
            remote: String::from(DEFAULT_REMOTE),
            check_on_startup: true,
        }
    }
}

impl RepositoryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.marker.trim().is_empty() {
            return Err(ConfigError::repository("repository.marker cannot be empty"));
        }

        if self.remote.trim().is_empty() {
            return Err(ConfigError::repository("repository.remote cannot be empty"));
        }

        let project_dir = Path::new(&self.project_dir);
        if project_dir.is_absolute()
            || project_dir
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ConfigError::repository(
                "repository.project_dir must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
