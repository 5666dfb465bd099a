//! Resolution of symbolic versions against repository metadata

use crate::error::{GoverError, GoverResult};
use crate::repo::RepositoryMetadata;
use crate::version::compare::{compare_versions, max_version};
use crate::version::{ConcreteVersion, ToolchainVersion};
use std::cmp::Ordering;

/// Releases from this one on are published as `X.Y.0`, `X.Y.1`, ..., so a
/// bare `X.Y` means the newest patch release.
const PATCH_RELEASE_SCHEME_FROM: &str = "1.21";

/// Resolve releases and aliases into tags and branches.
///
/// Tags, branches and revisions are returned unchanged. With
/// `keep_release_form`, a release only has its "latest of" form expanded
/// (`1.21.` -> `1.21.13`) and stays a release.
pub fn normalize(
    version: &ToolchainVersion,
    metadata: &RepositoryMetadata,
    keep_release_form: bool,
) -> GoverResult<ToolchainVersion> {
    match version {
        ToolchainVersion::Tag(_) | ToolchainVersion::Branch(_) | ToolchainVersion::Revision(_) => {
            Ok(version.clone())
        }
        ToolchainVersion::Release(value) => {
            let release = match latest_prefix(value) {
                Some(prefix) => latest_release(metadata, prefix)
                    .ok_or_else(|| GoverError::NoLatestRelease(value.clone()))?
                    .to_string(),
                None => value.clone(),
            };

            if keep_release_form {
                return Ok(ToolchainVersion::Release(release));
            }

            metadata
                .release_index
                .get(&release)
                .map(|tag| ToolchainVersion::Tag(tag.clone()))
                .ok_or(GoverError::ReleaseNotFound(release))
        }
        ToolchainVersion::Alias(value) if value == "tip" => {
            Ok(ToolchainVersion::Branch(metadata.default_branch.clone()))
        }
        ToolchainVersion::Alias(value) => metadata
            .alias_index
            .get(value)
            .map(|branch| ToolchainVersion::Branch(branch.clone()))
            .ok_or_else(|| GoverError::ReleaseBranchNotFound(value.clone())),
        ToolchainVersion::Default => Err(GoverError::UnresolvedDefault),
        ToolchainVersion::Invalid(reason) => Err(GoverError::InvalidVersion(reason.clone())),
    }
}

/// Fully resolve a version to a tag, branch or revision
pub fn resolve(
    version: &ToolchainVersion,
    metadata: &RepositoryMetadata,
) -> GoverResult<ConcreteVersion> {
    normalize(version, metadata, false)?
        .try_into()
        .map_err(|v: ToolchainVersion| GoverError::InvalidVersion(format!("unresolved version {}", v)))
}

/// The prefix to search when a release asks for "the latest of" something
fn latest_prefix(value: &str) -> Option<&str> {
    if let Some(prefix) = value.strip_suffix('.') {
        return Some(prefix);
    }
    let patch_scheme = value.matches('.').count() == 1
        && compare_versions(value, PATCH_RELEASE_SCHEME_FROM) != Ordering::Less;
    patch_scheme.then_some(value)
}

fn latest_release<'a>(metadata: &'a RepositoryMetadata, prefix: &str) -> Option<&'a str> {
    max_version(
        metadata
            .release_index
            .keys()
            .map(String::as_str)
            .filter(|release| within_prefix(release, prefix)),
    )
}

/// `1.21.3` and `1.21rc1` are within `1.21`; `1.210` is not
fn within_prefix(release: &str, prefix: &str) -> bool {
    match release.strip_prefix(prefix) {
        Some(rest) => prefix.is_empty() || !rest.starts_with(|c: char| c.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::vcs::RefMap;

    fn metadata() -> RepositoryMetadata {
        let tags: RefMap = [
            "go1", "go1.4", "go1.19", "go1.19.2", "go1.19.10", "go1.2", "go1.20rc1",
            "go1.21.0", "go1.21.3", "go1.21rc2", "go1.210",
        ]
        .iter()
        .map(|t| (t.to_string(), format!("{}-commit", t)))
        .collect();
        let branches: RefMap = ["master", "release-branch.go1.21"]
            .iter()
            .map(|b| (b.to_string(), format!("{}-head", b)))
            .collect();
        RepositoryMetadata::from_refs(tags, branches, "master")
    }

    fn release(v: &str) -> ToolchainVersion {
        ToolchainVersion::Release(v.to_string())
    }

    #[test]
    fn concrete_versions_are_unchanged() {
        let meta = metadata();
        for version in [
            ToolchainVersion::Tag("go1.19".into()),
            ToolchainVersion::Branch("anything".into()),
            ToolchainVersion::Revision("abc".into()),
        ] {
            let once = normalize(&version, &meta, false).unwrap();
            assert_eq!(once, version);
            assert_eq!(normalize(&once, &meta, false).unwrap(), once);
        }
    }

    #[test]
    fn exact_release_maps_to_tag() {
        let meta = metadata();
        assert_eq!(
            normalize(&release("1.19.2"), &meta, false).unwrap(),
            ToolchainVersion::Tag("go1.19.2".into())
        );
        assert_eq!(
            normalize(&release("1.19"), &meta, false).unwrap(),
            ToolchainVersion::Tag("go1.19".into())
        );
    }

    #[test]
    fn trailing_dot_selects_latest() {
        let meta = metadata();
        assert_eq!(
            normalize(&release("1.19."), &meta, false).unwrap(),
            ToolchainVersion::Tag("go1.19.10".into())
        );
        assert_eq!(
            normalize(&release("1.19."), &meta, true).unwrap(),
            release("1.19.10")
        );
        // `1.2.` must not pick up 1.21 or 1.210
        assert_eq!(normalize(&release("1.2."), &meta, true).unwrap(), release("1.2"));
    }

    #[test]
    fn dot_alone_selects_newest_release() {
        let meta = metadata();
        assert_eq!(normalize(&release("."), &meta, true).unwrap(), release("1.210"));
    }

    #[test]
    fn patch_scheme_releases_select_latest() {
        let meta = metadata();
        assert_eq!(
            normalize(&release("1.21"), &meta, false).unwrap(),
            ToolchainVersion::Tag("go1.21.3".into())
        );
        // Release candidates are looked up exactly
        assert_eq!(
            normalize(&release("1.21rc2"), &meta, false).unwrap(),
            ToolchainVersion::Tag("go1.21rc2".into())
        );
    }

    #[test]
    fn missing_releases_are_errors() {
        let meta = metadata();
        let err = normalize(&release("1.18"), &meta, false).unwrap_err();
        assert_eq!(err.to_string(), "release version 1.18 not found");

        let err = normalize(&release("1.30."), &meta, false).unwrap_err();
        assert_eq!(err.to_string(), "no latest version found for fake version: 1.30.");

        // Keeping the release form skips the tag lookup
        assert_eq!(normalize(&release("1.18"), &meta, true).unwrap(), release("1.18"));
    }

    #[test]
    fn aliases_map_to_branches() {
        let meta = metadata();
        assert_eq!(
            normalize(&ToolchainVersion::Alias("tip".into()), &meta, false).unwrap(),
            ToolchainVersion::Branch("master".into())
        );
        assert_eq!(
            normalize(&ToolchainVersion::Alias("1.21".into()), &meta, false).unwrap(),
            ToolchainVersion::Branch("release-branch.go1.21".into())
        );
        let err = normalize(&ToolchainVersion::Alias("1.17".into()), &meta, false).unwrap_err();
        assert_eq!(err.to_string(), "release branch 1.17 not found");
    }

    #[test]
    fn default_is_never_normalized() {
        let meta = metadata();
        assert!(matches!(
            normalize(&ToolchainVersion::Default, &meta, false),
            Err(GoverError::UnresolvedDefault)
        ));
    }

    #[test]
    fn resolve_narrows_to_concrete() {
        let meta = metadata();
        assert_eq!(
            resolve(&ToolchainVersion::Alias("tip".into()), &meta).unwrap(),
            ConcreteVersion::Branch("master".into())
        );
    }

    #[test]
    fn patch_scheme_threshold_is_numeric() {
        assert_eq!(latest_prefix("1.21"), Some("1.21"));
        assert_eq!(latest_prefix("1.100"), Some("1.100"));
        assert_eq!(latest_prefix("1.3"), None);
        assert_eq!(latest_prefix("1.20"), None);
        assert_eq!(latest_prefix("1.21.3"), None);
        assert_eq!(latest_prefix("1.19."), Some("1.19"));
    }
}
