use crate::ControlResult;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use vm_config::Config;

/// Where the repository and the server project live on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoLocation {
    root: PathBuf,
    server_dir: PathBuf,
    marker: String,
    discovered: bool,
}

impl RepoLocation {
    /// Walk upward from `start` looking for a directory containing `marker`.
    ///
    /// Falls back to the parent of `start` (or `start` itself at the filesystem root)
    /// when no ancestor carries the marker.
    pub fn discover(start: &Path, marker: &str, project_dir: &str) -> Self {
        match start.ancestors().find(|dir| dir.join(marker).exists()) {
            Some(root) => {
                debug!("Found {marker} at {}", root.display());
                Self::build(root.to_path_buf(), marker, project_dir, true)
            }
            None => {
                let root = start.parent().unwrap_or(start).to_path_buf();
                debug!(
                    "No {marker} above {}, using {}",
                    start.display(),
                    root.display()
                );
                Self::build(root, marker, project_dir, false)
            }
        }
    }

    /// Use an explicit repository root without searching.
    pub fn from_root(root: impl Into<PathBuf>, marker: &str, project_dir: &str) -> Self {
        let root = root.into();
        let discovered = root.join(marker).exists();
        Self::build(root, marker, project_dir, discovered)
    }

    /// Resolve from configuration: an explicit `repository.root` wins over discovery from `start`.
    pub fn from_config(config: &Config, start: &Path) -> Self {
        let repo = &config.repository;
        let location = match repo.root.as_deref() {
            Some(root) => Self::from_root(root, &repo.marker, &repo.project_dir),
            None => Self::discover(start, &repo.marker, &repo.project_dir),
        };

        let manifest = location.server_dir.join(&config.tools.manifest);
        if !manifest.exists() {
            warn!(
                "Server manifest not found at {}; starting the server will likely fail",
                manifest.display()
            );
        }

        location
    }

    /// Directory of the running executable, the default starting point for discovery.
    pub fn executable_dir() -> ControlResult<PathBuf> {
        let exe = std::env::current_exe()?;
        Ok(exe.parent().map(Path::to_path_buf).unwrap_or(exe))
    }

    fn build(root: PathBuf, marker: &str, project_dir: &str, discovered: bool) -> Self {
        Self {
            server_dir: root.join(project_dir),
            root,
            marker: marker.to_string(),
            discovered,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn server_dir(&self) -> &Path {
        &self.server_dir
    }

    pub fn marker_path(&self) -> PathBuf {
        self.root.join(&self.marker)
    }

    /// Checked on every call; the marker may appear or vanish while the panel runs.
    pub fn has_marker(&self) -> bool {
        self.marker_path().exists()
    }

    /// Whether the root was found by locating the marker rather than by fallback.
    pub fn was_discovered(&self) -> bool {
        self.discovered
    }

    pub fn dependency_dir(&self, name: &str) -> PathBuf {
        self.server_dir.join(name)
    }
}
