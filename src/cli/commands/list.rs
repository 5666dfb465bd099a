//! list-versions: release branches and releases, oldest first

use crate::cache::{BuildCache, BuildState};
use crate::error::GoverResult;
use crate::session::Session;
use crate::ui;
use crate::repo::RepositoryMetadata;
use crate::version::ConcreteVersion;

/// Execute the list-versions command
pub async fn execute(session: &mut Session) -> GoverResult<()> {
    let cache = session.cache_with_remote().await?;
    cache.vcs().ensure_mirror(false).await?;
    let metadata = cache.metadata().await?;
    let pinned = cache.pinned().await.map(|marker| marker.version);

    let branches = metadata.sorted_release_branches();
    let releases = metadata.sorted_releases();
    if branches.is_empty() && releases.is_empty() {
        println!("No releases and version branches are found.");
        return Ok(());
    }

    if !branches.is_empty() {
        ui::section("Version branches:");
        for alias in branches {
            let version = ConcreteVersion::Branch(metadata.alias_index[alias].clone());
            print_entry(&cache, &metadata, alias, &version, pinned.as_deref()).await;
        }
        println!();
    }

    if !releases.is_empty() {
        ui::section("Releases:");
        for release in releases {
            let version = ConcreteVersion::Tag(metadata.release_index[release].clone());
            print_entry(&cache, &metadata, release, &version, pinned.as_deref()).await;
        }
    }

    Ok(())
}

async fn print_entry(
    cache: &BuildCache,
    metadata: &RepositoryMetadata,
    name: &str,
    version: &ConcreteVersion,
    pinned: Option<&str>,
) {
    let state = match metadata.commit_for(version) {
        Some(revision) => cache.state(version, revision).await,
        None => BuildState::Absent,
    };
    let is_pinned = pinned == Some(version.to_string().as_str());
    ui::list_item(name, &labels(state, is_pinned));
}

fn labels(state: BuildState, pinned: bool) -> Vec<&'static str> {
    let mut labels = Vec::new();
    match state {
        BuildState::Ready => labels.push("cached"),
        // Built, but the branch has moved since
        BuildState::Stale => labels.extend(["cached", "outdated"]),
        BuildState::Absent => {}
    }
    if pinned {
        labels.push("pinned");
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_reflect_build_state() {
        assert!(labels(BuildState::Absent, false).is_empty());
        assert_eq!(labels(BuildState::Ready, false), ["cached"]);
        assert_eq!(labels(BuildState::Stale, true), ["cached", "outdated", "pinned"]);
        assert_eq!(labels(BuildState::Absent, true), ["pinned"]);
    }
}
