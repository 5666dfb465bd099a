//! Git command-line implementation of [`VcsClient`]

use crate::error::{GoverError, GoverResult};
use crate::process::{self, CommandSpec, Finished, Output};
use crate::repo::vcs::{RefMap, VcsClient};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

const TAG_REF_PREFIX: &str = "refs/tags/";
const BRANCH_REF_PREFIX: &str = "refs/remotes/origin/";

/// Official addresses of the Go repository
pub const KNOWN_REPOSITORIES: &[(&str, &str)] = &[
    ("https://go.googlesource.com/go", "canonical"),
    ("https://github.com/golang/go.git", "GitHub mirror"),
];

/// Repository mirror managed with the `git` executable
pub struct GitCli {
    mirror_dir: PathBuf,
    url: Option<String>,
    default_branch: String,
    sync_timeout: Option<Duration>,
}

impl GitCli {
    /// Create a client for the mirror at `mirror_dir`.
    ///
    /// `url` is only needed when the mirror has to be cloned.
    pub fn new(mirror_dir: PathBuf, url: Option<String>, default_branch: impl Into<String>) -> Self {
        Self {
            mirror_dir,
            url,
            default_branch: default_branch.into(),
            sync_timeout: None,
        }
    }

    /// Bound clone and fetch operations
    pub fn with_sync_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.sync_timeout = timeout;
        self
    }

    fn git_in(dir: &Path) -> CommandSpec {
        CommandSpec::new("git").arg("-C").arg(dir)
    }

    /// Run a git command, turning a non-zero exit into a VCS error
    async fn git(&self, operation: &str, spec: CommandSpec) -> GoverResult<Finished> {
        let finished = process::run(&spec, Output::Capture).await?;
        if finished.success() {
            Ok(finished)
        } else {
            Err(GoverError::vcs(operation, finished.error_output()))
        }
    }

    async fn clone_mirror(&self) -> GoverResult<()> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| GoverError::RepositoryMissing(self.mirror_dir.clone()))?;

        if let Some(parent) = self.mirror_dir.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| GoverError::io(format!("creating {}", parent.display()), e))?;
        }

        info!("Cloning {} into {}", url, self.mirror_dir.display());
        let spec = CommandSpec::new("git")
            .arg("clone")
            .arg(url)
            .arg(&self.mirror_dir)
            .timeout(self.sync_timeout);

        let result = match process::run(&spec, Output::Inherit).await {
            Ok(finished) if finished.success() => Ok(()),
            Ok(finished) => Err(GoverError::vcs(
                "clone",
                format!("{} exited with code {}", spec.display(), finished.code),
            )),
            Err(e) => Err(e),
        };

        if result.is_err() {
            if let Err(e) = fs::remove_dir_all(&self.mirror_dir).await {
                warn!("Failed to remove partial clone {}: {}", self.mirror_dir.display(), e);
            }
        }
        result
    }
}

#[async_trait]
impl VcsClient for GitCli {
    async fn ensure_mirror(&self, force_sync: bool) -> GoverResult<bool> {
        if self.has_mirror() {
            if force_sync {
                self.fetch_all().await?;
            }
            return Ok(false);
        }

        self.clone_mirror().await?;
        Ok(true)
    }

    async fn fetch_all(&self) -> GoverResult<()> {
        info!("Fetching all refs in {}", self.mirror_dir.display());
        let spec = Self::git_in(&self.mirror_dir)
            .args(["fetch", "--all", "--tags", "--force", "--prune"])
            .timeout(self.sync_timeout);
        self.git("fetch", spec).await?;
        Ok(())
    }

    async fn list_tags_and_branches(&self) -> GoverResult<(RefMap, RefMap)> {
        let spec = Self::git_in(&self.mirror_dir).args([
            "for-each-ref",
            "--format=%(refname)%09%(objectname)%09%(*objectname)",
            "refs/tags",
            "refs/remotes/origin",
        ]);
        let finished = self.git("for-each-ref", spec).await?;
        Ok(parse_ref_listing(&finished.stdout))
    }

    async fn export_tree_at_commit(&self, dest: &Path, commit: &str) -> GoverResult<()> {
        debug!("Exporting {} to {}", commit, dest.display());

        let clone = CommandSpec::new("git")
            .args(["clone", "--local", "--no-checkout", "--quiet"])
            .arg(&self.mirror_dir)
            .arg(dest)
            .timeout(self.sync_timeout);
        self.git("clone", clone).await?;

        let checkout = Self::git_in(dest).args(["checkout", "--force", "--quiet", commit]);
        self.git("checkout", checkout).await?;
        Ok(())
    }

    fn has_mirror(&self) -> bool {
        self.mirror_dir.join(".git").exists()
    }

    fn default_branch(&self) -> &str {
        &self.default_branch
    }
}

/// Parse `refname<TAB>object<TAB>peeled-object` lines into tag and branch
/// maps. Annotated tags resolve to the commit they point at.
fn parse_ref_listing(listing: &str) -> (RefMap, RefMap) {
    let mut tags = RefMap::new();
    let mut branches = RefMap::new();

    for line in listing.lines() {
        let mut fields = line.split('\t');
        let (Some(name), Some(object)) = (fields.next(), fields.next()) else {
            continue;
        };
        let commit = match fields.next() {
            Some(peeled) if !peeled.is_empty() => peeled,
            _ => object,
        };

        if let Some(tag) = name.strip_prefix(TAG_REF_PREFIX) {
            tags.insert(tag.to_string(), commit.to_string());
        } else if let Some(branch) = name.strip_prefix(BRANCH_REF_PREFIX) {
            if branch != "HEAD" {
                branches.insert(branch.to_string(), commit.to_string());
            }
        }
    }

    (tags, branches)
}
