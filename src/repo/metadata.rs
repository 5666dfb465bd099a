//! Snapshot of the repository's release tags and release branches

use crate::error::GoverResult;
use crate::repo::vcs::{RefMap, VcsClient};
use crate::version::{compare::sort_ascending, ConcreteVersion};
use tracing::debug;

const RELEASE_TAG_PREFIX: &str = "go";
const RELEASE_BRANCH_PREFIX: &str = "release-branch.go";

/// Tags and branches of the repository, indexed for version lookup.
///
/// Built fresh for every resolving operation and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryMetadata {
    /// Tag name to commit id
    pub tags: RefMap,
    /// Branch name to commit id
    pub branches: RefMap,
    /// Release number (`1.21.3`) to tag name (`go1.21.3`)
    pub release_index: RefMap,
    /// Release-branch number (`1.21`) to branch name (`release-branch.go1.21`)
    pub alias_index: RefMap,
    /// Name of the default branch
    pub default_branch: String,
    /// Commit id of the default branch, if present
    pub tip_commit: Option<String>,
}

impl RepositoryMetadata {
    /// Index raw tag and branch listings
    pub fn from_refs(tags: RefMap, branches: RefMap, default_branch: &str) -> Self {
        let release_index = tags
            .keys()
            .filter_map(|tag| {
                release_number(tag, RELEASE_TAG_PREFIX).map(|r| (r.to_string(), tag.clone()))
            })
            .collect();

        let alias_index = branches
            .keys()
            .filter_map(|branch| {
                release_number(branch, RELEASE_BRANCH_PREFIX)
                    .map(|r| (r.to_string(), branch.clone()))
            })
            .collect();

        let tip_commit = branches.get(default_branch).cloned();

        Self {
            tags,
            branches,
            release_index,
            alias_index,
            default_branch: default_branch.to_string(),
            tip_commit,
        }
    }

    /// Query the repository and index the result
    pub async fn collect(vcs: &dyn VcsClient) -> GoverResult<Self> {
        let (tags, branches) = vcs.list_tags_and_branches().await?;
        let metadata = Self::from_refs(tags, branches, vcs.default_branch());
        debug!(
            "Collected {} tags ({} releases), {} branches ({} release branches)",
            metadata.tags.len(),
            metadata.release_index.len(),
            metadata.branches.len(),
            metadata.alias_index.len()
        );
        Ok(metadata)
    }

    /// Commit id a concrete version currently points at
    pub fn commit_for<'a>(&'a self, version: &'a ConcreteVersion) -> Option<&'a str> {
        match version {
            ConcreteVersion::Tag(name) => self.tags.get(name).map(String::as_str),
            ConcreteVersion::Branch(name) => self.branches.get(name).map(String::as_str),
            ConcreteVersion::Revision(rev) => Some(rev.as_str()),
        }
    }

    /// Release numbers, oldest first
    pub fn sorted_releases(&self) -> Vec<&str> {
        let mut releases: Vec<&str> = self.release_index.keys().map(String::as_str).collect();
        sort_ascending(&mut releases);
        releases
    }

    /// Release-branch numbers, oldest first
    pub fn sorted_release_branches(&self) -> Vec<&str> {
        let mut branches: Vec<&str> = self.alias_index.keys().map(String::as_str).collect();
        sort_ascending(&mut branches);
        branches
    }
}

/// `go1.21.3` -> `1.21.3`; requires a non-zero leading digit so `go0x`
/// style tags and unrelated names are skipped
fn release_number<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = name.strip_prefix(prefix)?;
    match rest.as_bytes().first() {
        Some(b'1'..=b'9') => Some(rest),
        _ => None,
    }
}

/// What changed between two snapshots of the repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataDiff {
    /// Release branches whose head moved
    pub updated_branches: Vec<String>,
    pub new_branches: Vec<String>,
    pub new_releases: Vec<String>,
    pub tip_changed: bool,
}

impl MetadataDiff {
    pub fn between(old: &RepositoryMetadata, new: &RepositoryMetadata) -> Self {
        let mut diff = Self::default();

        for (alias, branch) in &new.alias_index {
            match old.alias_index.get(alias) {
                Some(old_branch) => {
                    if old.branches.get(old_branch) != new.branches.get(branch) {
                        diff.updated_branches.push(alias.clone());
                    }
                }
                None => diff.new_branches.push(alias.clone()),
            }
        }

        diff.new_releases = new
            .release_index
            .keys()
            .filter(|release| !old.release_index.contains_key(*release))
            .cloned()
            .collect();

        diff.tip_changed = old.tip_commit != new.tip_commit;

        sort_ascending(&mut diff.updated_branches);
        sort_ascending(&mut diff.new_branches);
        sort_ascending(&mut diff.new_releases);
        diff
    }

    pub fn has_new_versions(&self) -> bool {
        !self.new_branches.is_empty() || !self.new_releases.is_empty()
    }
}
