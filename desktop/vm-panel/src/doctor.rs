use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use vm_config::Config;
use vm_control::{RepoLocation, ToolAvailability};

/// Environment report printed by `video-manager doctor`.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    pub tools: ToolAvailability,
    pub location: RepoLocation,
    pub marker_present: bool,
    pub manifest_present: bool,
    pub dependencies_installed: bool,
    pub config_dir: PathBuf,
    pub log_file: PathBuf,
}

impl DoctorReport {
    pub fn gather(
        config: &Config,
        tools: ToolAvailability,
        location: RepoLocation,
        config_dir: PathBuf,
        log_file: PathBuf,
    ) -> Self {
        Self {
            marker_present: location.has_marker(),
            manifest_present: location.server_dir().join(&config.tools.manifest).exists(),
            dependencies_installed: location.dependency_dir(&config.tools.dependency_dir).exists(),
            tools,
            location,
            config_dir,
            log_file,
        }
    }

    /// Tools present and the repository marker found.
    pub fn is_healthy(&self) -> bool {
        self.tools.all_present() && self.marker_present
    }
}

fn mark(ok: bool) -> &'static str {
    if ok { "ok" } else { "missing" }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tools:")?;
        for lookup in &self.tools.lookups {
            match &lookup.path {
                Some(path) => writeln!(
                    f,
                    "  {:<16} {:<8} {}",
                    lookup.role.label(),
                    lookup.program,
                    path.display()
                )?,
                None => writeln!(
                    f,
                    "  {:<16} {:<8} not found. {}",
                    lookup.role.label(),
                    lookup.program,
                    lookup.role.install_hint()
                )?,
            }
        }

        writeln!(f, "Repository:")?;
        writeln!(f, "  root             {}", self.location.root().display())?;
        writeln!(
            f,
            "  found by         {}",
            if self.location.was_discovered() {
                "marker"
            } else {
                "fallback"
            }
        )?;
        writeln!(f, "  marker           {}", mark(self.marker_present))?;
        writeln!(f, "  server dir       {}", self.location.server_dir().display())?;
        writeln!(f, "  manifest         {}", mark(self.manifest_present))?;
        writeln!(f, "  dependencies     {}", mark(self.dependencies_installed))?;

        writeln!(f, "Files:")?;
        writeln!(f, "  config dir       {}", self.config_dir.display())?;
        write!(f, "  log file         {}", self.log_file.display())
    }
}
