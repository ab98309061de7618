use crate::{
    Browser, DetachedSpawner, GitCli, NpmCli, PackageManager, ProcessSpawner, RepoLocation,
    SystemBrowser, ToolLocator, VersionControl, WhichLocator,
};

use std::sync::Arc;

use vm_config::Config;

/// External effects the controllers depend on, injectable for tests.
#[derive(Clone)]
pub struct Capabilities {
    pub tools: Arc<dyn ToolLocator>,
    pub version_control: Arc<dyn VersionControl>,
    pub package_manager: Arc<dyn PackageManager>,
    pub spawner: Arc<dyn ProcessSpawner>,
    pub browser: Arc<dyn Browser>,
}

impl Capabilities {
    /// Real implementations backed by the configured command line tools.
    pub fn system(config: &Config, location: &RepoLocation) -> Self {
        let tools = &config.tools;
        let timeouts = &config.timeouts;

        Self {
            tools: Arc::new(WhichLocator),
            version_control: Arc::new(GitCli::new(
                tools.version_control.clone(),
                location.root(),
                timeouts.git_timeout(),
            )),
            package_manager: Arc::new(NpmCli::new(
                tools.package_manager.clone(),
                location.server_dir(),
                timeouts.install_timeout(),
            )),
            spawner: Arc::new(DetachedSpawner),
            browser: Arc::new(SystemBrowser),
        }
    }
}
