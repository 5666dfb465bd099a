//! Version control abstraction
//!
//! The build cache only needs a handful of operations from the toolchain's
//! repository. Keeping them behind a trait lets the cache controller run
//! against an in-memory repository in tests.

use crate::error::GoverResult;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;

/// Ref name to commit id
pub type RefMap = BTreeMap<String, String>;

/// Operations the build cache needs from the toolchain repository
#[async_trait]
pub trait VcsClient: Send + Sync {
    /// Make sure the local mirror exists, cloning it if needed.
    ///
    /// With `force_sync`, an existing mirror is fetched. Returns whether a
    /// fresh clone was made.
    async fn ensure_mirror(&self, force_sync: bool) -> GoverResult<bool>;

    /// Fetch all remote refs into the mirror
    async fn fetch_all(&self) -> GoverResult<()>;

    /// Tags and remote branches of the mirror, each mapped to a commit id
    async fn list_tags_and_branches(&self) -> GoverResult<(RefMap, RefMap)>;

    /// Populate `dest` with a working tree of the mirror at `commit`,
    /// discarding any local changes
    async fn export_tree_at_commit(&self, dest: &Path, commit: &str) -> GoverResult<()>;

    /// Whether the mirror is present locally
    fn has_mirror(&self) -> bool;

    /// Name of the branch `:tip` refers to
    fn default_branch(&self) -> &str;
}
