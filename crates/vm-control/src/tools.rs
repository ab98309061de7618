//! Detection of the external programs the control panel depends on.

use crate::{ControlError, ControlResult};

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use vm_config::ToolsConfig;

/// The part an external program plays for the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolRole {
    Runtime,
    PackageManager,
    VersionControl,
}

impl ToolRole {
    /// Order in which tools are checked; the first missing one is reported.
    pub const CHECK_ORDER: [ToolRole; 3] = [
        ToolRole::Runtime,
        ToolRole::PackageManager,
        ToolRole::VersionControl,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Runtime => "server runtime",
            Self::PackageManager => "package manager",
            Self::VersionControl => "version control",
        }
    }

    pub fn install_hint(&self) -> &'static str {
        match self {
            Self::Runtime => "Install the server runtime (Node.js) and restart the control panel.",
            Self::PackageManager => {
                "The package manager ships with the runtime. Verify the runtime installation."
            }
            Self::VersionControl => "Install Git and restart the control panel.",
        }
    }
}

impl fmt::Display for ToolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Program names for each role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub runtime: String,
    pub package_manager: String,
    pub version_control: String,
}

impl Toolchain {
    pub fn from_config(tools: &ToolsConfig) -> Self {
        Self {
            runtime: tools.runtime.clone(),
            package_manager: tools.package_manager.clone(),
            version_control: tools.version_control.clone(),
        }
    }

    pub fn program(&self, role: ToolRole) -> &str {
        match role {
            ToolRole::Runtime => &self.runtime,
            ToolRole::PackageManager => &self.package_manager,
            ToolRole::VersionControl => &self.version_control,
        }
    }
}

/// Looks up an executable by name.
pub trait ToolLocator: Send + Sync {
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Searches the executable path.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhichLocator;

impl ToolLocator for WhichLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolLookup {
    pub role: ToolRole,
    pub program: String,
    pub path: Option<PathBuf>,
}

impl ToolLookup {
    pub fn is_present(&self) -> bool {
        self.path.is_some()
    }
}

/// Result of looking up every tool role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolAvailability {
    pub lookups: Vec<ToolLookup>,
}

impl ToolAvailability {
    pub fn detect(locator: &dyn ToolLocator, toolchain: &Toolchain) -> Self {
        let lookups = ToolRole::CHECK_ORDER
            .iter()
            .map(|&role| {
                let program = toolchain.program(role);
                ToolLookup {
                    role,
                    program: program.to_string(),
                    path: locator.locate(program),
                }
            })
            .collect();

        Self { lookups }
    }

    pub fn first_missing(&self) -> Option<&ToolLookup> {
        self.lookups.iter().find(|lookup| !lookup.is_present())
    }

    pub fn all_present(&self) -> bool {
        self.first_missing().is_none()
    }

    #[track_caller]
    pub fn ensure_present(self) -> ControlResult<Self> {
        match self.first_missing() {
            Some(missing) => Err(ControlError::tool_missing(
                missing.role,
                missing.program.clone(),
            )),
            None => Ok(self),
        }
    }
}
