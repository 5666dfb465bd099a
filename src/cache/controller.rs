//! Build cache controller

use crate::builder::{go_command_path, local_toolchain_root, BuildExecutor};
use crate::cache::layout::{BuildState, CacheLayout};
use crate::cache::marker::BuildMarker;
use crate::cache::{discard, remove_dir_if_exists};
use crate::error::{GoverError, GoverResult};
use crate::repo::{RepositoryMetadata, VcsClient};
use crate::version::{bootstrap_for, resolve, Bootstrap, ConcreteVersion, VersionSpec};
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::fs;
use tracing::{debug, info, warn};

/// Decides which toolchain bootstraps a build
pub type BootstrapPolicy = fn(&ConcreteVersion) -> Bootstrap;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Entries removed from a finished build tree
const VCS_METADATA: &[&str] = &[".git", ".gitignore", ".github"];

/// Keeps built toolchains in the cache current with the repository
pub struct BuildCache {
    layout: CacheLayout,
    vcs: Box<dyn VcsClient>,
    builder: Box<dyn BuildExecutor>,
    bootstrap_override: Option<PathBuf>,
    policy: BootstrapPolicy,
}

impl BuildCache {
    pub fn new(
        layout: CacheLayout,
        vcs: Box<dyn VcsClient>,
        builder: Box<dyn BuildExecutor>,
    ) -> Self {
        Self {
            layout,
            vcs,
            builder,
            bootstrap_override: None,
            policy: bootstrap_for,
        }
    }

    /// Use this toolchain to bootstrap every build instead of the policy
    pub fn with_bootstrap_override(mut self, root: Option<PathBuf>) -> Self {
        self.bootstrap_override = root;
        self
    }

    pub fn with_bootstrap_policy(mut self, policy: BootstrapPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn layout(&self) -> &CacheLayout {
        &self.layout
    }

    pub fn vcs(&self) -> &dyn VcsClient {
        self.vcs.as_ref()
    }

    /// Current tags and branches of the mirror
    pub async fn metadata(&self) -> GoverResult<RepositoryMetadata> {
        RepositoryMetadata::collect(self.vcs.as_ref()).await
    }

    /// Make sure the toolchain for `spec` is built and current, returning
    /// its directory.
    ///
    /// With `pinning`, the build goes to the pin directory instead of the
    /// version's cache directory.
    pub async fn ensure(&self, spec: &VersionSpec, pinning: bool) -> GoverResult<PathBuf> {
        self.vcs.ensure_mirror(spec.force_sync).await?;
        let metadata = self.metadata().await?;
        let version = resolve(&spec.version, &metadata)?;
        debug!("{} resolved to {}", spec.version, version);

        let mut chain = Vec::new();
        self.ensure_version(&metadata, version, pinning, &mut chain)
            .await
    }

    /// Resolve a batch of specifiers against the current mirror without
    /// syncing it
    pub async fn resolve_all(&self, specs: &[VersionSpec]) -> GoverResult<Vec<ConcreteVersion>> {
        self.vcs.ensure_mirror(false).await?;
        let metadata = self.metadata().await?;
        specs
            .iter()
            .map(|spec| resolve(&spec.version, &metadata))
            .collect()
    }

    /// Delete the cached build of `version`; returns the removed directory,
    /// or `None` if it was not cached
    pub async fn uncache(&self, version: &ConcreteVersion) -> GoverResult<Option<PathBuf>> {
        let dir = self.layout.build_dir(version);
        match fs::metadata(&dir).await {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(GoverError::io(format!("inspecting {}", dir.display()), e)),
        }
        remove_dir_if_exists(&dir).await?;
        info!("Removed {}", dir.display());
        Ok(Some(dir))
    }

    /// State of the cached build of `version` against `revision`
    pub async fn state(&self, version: &ConcreteVersion, revision: &str) -> BuildState {
        BuildState::of(&self.layout.build_dir(version), revision).await
    }

    fn ensure_version<'a>(
        &'a self,
        metadata: &'a RepositoryMetadata,
        version: ConcreteVersion,
        pinning: bool,
        chain: &'a mut Vec<ConcreteVersion>,
    ) -> BoxFuture<'a, GoverResult<PathBuf>> {
        Box::pin(async move {
            let revision = metadata
                .commit_for(&version)
                .ok_or_else(|| GoverError::RefNotFound {
                    kind: version.kind(),
                    name: version.value().to_string(),
                })?
                .to_string();

            let target = if pinning {
                self.layout.pin_dir()
            } else {
                self.layout.build_dir(&version)
            };

            match BuildMarker::read(&target).await {
                Some(marker)
                    if marker.revision == revision
                        && (!pinning || marker.version == version.to_string()) =>
                {
                    debug!("{} is up to date at {}", version, target.display());
                    return Ok(target);
                }
                Some(marker) => info!(
                    "{} at {} was built from {}, rebuilding",
                    marker.version,
                    target.display(),
                    marker.revision
                ),
                None => info!("{} is not built yet", version),
            }

            if chain.contains(&version) {
                let cycle = chain
                    .iter()
                    .chain(std::iter::once(&version))
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(GoverError::BootstrapCycle(cycle));
            }

            chain.push(version.clone());
            let bootstrap = self.bootstrap_root(metadata, &version, chain).await;
            chain.pop();
            let bootstrap = bootstrap?;

            let build_dir = if pinning {
                self.layout.pin_temp_dir()
            } else {
                target.clone()
            };
            remove_dir_if_exists(&build_dir).await?;

            if let Err(e) = self
                .build_into(&build_dir, &version, &revision, bootstrap.as_deref())
                .await
            {
                discard(&build_dir).await;
                return Err(e);
            }

            if pinning {
                self.replace_pin(&build_dir, &target).await?;
            }

            info!("{} is ready at {}", version, target.display());
            Ok(target)
        })
    }

    /// Toolchain to bootstrap a build of `version` with, building it first
    /// when the policy names another version
    async fn bootstrap_root(
        &self,
        metadata: &RepositoryMetadata,
        version: &ConcreteVersion,
        chain: &mut Vec<ConcreteVersion>,
    ) -> GoverResult<Option<PathBuf>> {
        if let Some(ref root) = self.bootstrap_override {
            debug!("Bootstrapping {} with {}", version, root.display());
            return Ok(Some(root.clone()));
        }

        match (self.policy)(version) {
            Bootstrap::Build(bootstrap) => {
                info!("{} is bootstrapped by {}", version, bootstrap);
                let dir = self
                    .ensure_version(metadata, bootstrap, false, chain)
                    .await?;
                Ok(Some(dir))
            }
            // make.bat cannot locate a bootstrap toolchain by itself
            Bootstrap::Local | Bootstrap::Undetermined if cfg!(windows) => local_toolchain_root()
                .map(Some)
                .ok_or_else(|| GoverError::BootstrapUndetermined(version.to_string())),
            Bootstrap::Local => Ok(None),
            Bootstrap::Undetermined => {
                debug!("No bootstrap policy for {}, leaving it to the build script", version);
                Ok(None)
            }
        }
    }

    /// Export, build and mark one toolchain tree
    async fn build_into(
        &self,
        dir: &Path,
        version: &ConcreteVersion,
        revision: &str,
        bootstrap_root: Option<&Path>,
    ) -> GoverResult<()> {
        if let Some(parent) = dir.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| GoverError::io(format!("creating {}", parent.display()), e))?;
        }

        self.vcs.export_tree_at_commit(dir, revision).await?;
        self.builder
            .build(dir, &version.to_string(), bootstrap_root)
            .await?;

        let go = go_command_path(dir);
        if !go.is_file() {
            return Err(GoverError::MissingArtifact {
                version: version.to_string(),
                path: go,
            });
        }

        BuildMarker::new(version, revision).write(dir).await?;
        strip_vcs_metadata(dir).await;
        Ok(())
    }
}

async fn strip_vcs_metadata(dir: &Path) {
    for name in VCS_METADATA {
        let path = dir.join(name);
        let result = if path.is_dir() {
            fs::remove_dir_all(&path).await
        } else {
            fs::remove_file(&path).await
        };
        match result {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                warn!("Failed to remove {}: {}", path.display(), e)
            }
            _ => {}
        }
    }
}
