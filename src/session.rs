//! Per-invocation context
//!
//! Holds the loaded configuration and the cache location for one run and
//! wires the concrete collaborators into a [`BuildCache`]. Nothing here is
//! global, so tests can open sessions against temporary directories.

use crate::builder::MakeScriptExecutor;
use crate::cache::{BuildCache, CacheLayout};
use crate::config::{Config, ConfigManager};
use crate::error::GoverResult;
use crate::repo::{GitCli, VcsClient, KNOWN_REPOSITORIES};
use crate::ui::{self, UiContext};
use crate::version::{ToolchainVersion, VersionSpec};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Version run when no default is configured: the latest release
const FALLBACK_VERSION: &str = ".";

pub struct Session {
    pub ui: UiContext,
    config_manager: ConfigManager,
    config: Config,
    layout: CacheLayout,
}

impl Session {
    /// Load the configuration and settle the cache root
    pub async fn open(
        config_path: Option<PathBuf>,
        cache_dir: Option<PathBuf>,
        ui: UiContext,
    ) -> GoverResult<Self> {
        let config_manager = match config_path {
            Some(path) => ConfigManager::with_path(path),
            None => ConfigManager::new(),
        };
        let config = config_manager.load().await?;
        let root = cache_dir.unwrap_or_else(ConfigManager::default_cache_dir);
        debug!(
            "Config {}, cache root {}",
            config_manager.path().display(),
            root.display()
        );

        Ok(Self {
            ui,
            config_manager,
            config,
            layout: CacheLayout::new(root),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Store a new default version
    pub async fn set_default_version(&mut self, version: String) -> GoverResult<()> {
        self.config.default_version = Some(version);
        self.config_manager.save(&self.config).await
    }

    /// The configured default version, or the latest release when none is
    /// configured or the stored one no longer parses
    pub fn default_spec(&self) -> VersionSpec {
        if let Some(ref stored) = self.config.default_version {
            match VersionSpec::parse_required(stored) {
                Ok(spec) => return spec,
                Err(e) => warn!("Ignoring default version {:?}: {}", stored, e),
            }
        }
        VersionSpec::new(ToolchainVersion::Release(FALLBACK_VERSION.to_string()))
    }

    /// Client for the repository mirror. Cloning fails without a
    /// configured address; see [`Session::cache_with_remote`].
    pub fn repository(&self) -> GitCli {
        GitCli::new(
            self.layout.repository_dir(),
            self.config.repository.url.clone(),
            self.config.repository.default_branch.clone(),
        )
        .with_sync_timeout(self.config.timeouts.sync())
    }

    /// Build cache for operations that never touch the repository
    pub fn cache(&self) -> BuildCache {
        let builder = MakeScriptExecutor::new(self.ui, self.config.timeouts.build());
        BuildCache::new(
            self.layout.clone(),
            Box::new(self.repository()),
            Box::new(builder),
        )
        .with_bootstrap_override(self.bootstrap_override())
    }

    /// Build cache for operations that may need to clone the repository.
    ///
    /// Asks for the repository address, and saves it, when the mirror is
    /// missing and no address is configured.
    pub async fn cache_with_remote(&mut self) -> GoverResult<BuildCache> {
        if !self.repository().has_mirror() && self.config.repository.url.is_none() {
            let url = self.choose_repository().await?;
            self.config.repository.url = Some(url);
            self.config_manager.save(&self.config).await?;
        }
        Ok(self.cache())
    }

    /// Timeout for a command run with a resolved toolchain
    pub fn run_timeout(&self) -> Option<Duration> {
        self.config.timeouts.run()
    }

    async fn choose_repository(&self) -> GoverResult<String> {
        let options: Vec<(String, &str, &str)> = KNOWN_REPOSITORIES
            .iter()
            .map(|(url, hint)| (url.to_string(), *url, *hint))
            .collect();
        ui::select(&self.ui, "Which repository should the toolchain be cloned from?", &options).await
    }

    /// `GOROOT_BOOTSTRAP` from the environment, else the configured root
    fn bootstrap_override(&self) -> Option<PathBuf> {
        std::env::var_os("GOROOT_BOOTSTRAP")
            .filter(|root| !root.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.config.build.bootstrap_root.clone())
    }
}
