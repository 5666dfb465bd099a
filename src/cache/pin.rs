//! The pinned toolchain: one build kept at a fixed path

use crate::cache::controller::BuildCache;
use crate::cache::marker::BuildMarker;
use crate::cache::{discard, remove_dir_if_exists};
use crate::error::{GoverError, GoverResult};
use crate::version::VersionSpec;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

impl BuildCache {
    /// Build `spec` into the pin directory, replacing any previous pin
    pub async fn pin(&self, spec: &VersionSpec) -> GoverResult<PathBuf> {
        self.ensure(spec, true).await
    }

    /// Remove the pinned toolchain. Returns whether one was present.
    pub async fn unpin(&self) -> GoverResult<bool> {
        let pin = self.layout().pin_dir();
        let existed = pin.exists();
        remove_dir_if_exists(&pin).await?;
        remove_dir_if_exists(&self.layout().pin_temp_dir()).await?;
        if existed {
            info!("Removed {}", pin.display());
        }
        Ok(existed)
    }

    /// Marker of the pinned toolchain, if one is pinned
    pub async fn pinned(&self) -> Option<BuildMarker> {
        BuildMarker::read(&self.layout().pin_dir()).await
    }

    /// Move a finished build from `staged` to `pin`.
    ///
    /// Interrupting between the removal and the rename leaves no pin.
    pub(super) async fn replace_pin(&self, staged: &Path, pin: &Path) -> GoverResult<()> {
        if let Err(e) = remove_dir_if_exists(pin).await {
            discard(staged).await;
            return Err(e);
        }
        if let Err(e) = fs::rename(staged, pin).await {
            discard(staged).await;
            return Err(GoverError::io(
                format!("moving {} to {}", staged.display(), pin.display()),
                e,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::go_command_path;
    use crate::cache::testing::{FakeBuilder, FakeVcs};
    use crate::cache::{BuildCache, CacheLayout};
    use crate::error::GoverError;
    use crate::version::VersionSpec;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn cache(temp: &TempDir, vcs: &FakeVcs, builder: &FakeBuilder) -> BuildCache {
        BuildCache::new(
            CacheLayout::new(temp.path()),
            Box::new(vcs.clone()),
            Box::new(builder.clone()),
        )
        .with_bootstrap_override(Some(PathBuf::from("/opt/go")))
    }

    #[tokio::test]
    async fn pin_builds_at_the_fixed_path() {
        let temp = TempDir::new().unwrap();
        let vcs = FakeVcs::sample();
        let builder = FakeBuilder::default();
        let cache = cache(&temp, &vcs, &builder);

        let dir = cache.pin(&VersionSpec::parse("1.21.3")).await.unwrap();
        assert_eq!(dir, temp.path().join("pinned-toolchain"));
        assert!(go_command_path(&dir).is_file());
        assert!(!temp.path().join("pinned-toolchain.tmp").exists());
        assert_eq!(cache.pinned().await.unwrap().version, "tag:go1.21.3");

        // Same version again is a no-op
        cache.pin(&VersionSpec::parse("1.21.3")).await.unwrap();
        assert_eq!(builder.build_count(), 1);

        cache.pin(&VersionSpec::parse(":tip")).await.unwrap();
        assert_eq!(builder.build_count(), 2);
        assert_eq!(cache.pinned().await.unwrap().version, "bra:master");
    }

    #[tokio::test]
    async fn failed_pin_keeps_previous_pin() {
        let temp = TempDir::new().unwrap();
        let vcs = FakeVcs::sample();
        cache(&temp, &vcs, &FakeBuilder::default())
            .pin(&VersionSpec::parse("1.21.3"))
            .await
            .unwrap();

        let failing = cache(&temp, &vcs, &FakeBuilder::failing());
        let err = failing.pin(&VersionSpec::parse(":tip")).await.unwrap_err();
        assert!(matches!(err, GoverError::BuildFailed { .. }));

        assert_eq!(failing.pinned().await.unwrap().version, "tag:go1.21.3");
        assert!(!temp.path().join("pinned-toolchain.tmp").exists());
    }

    #[tokio::test]
    async fn unpin_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let vcs = FakeVcs::sample();
        let cache = cache(&temp, &vcs, &FakeBuilder::default());

        assert!(!cache.unpin().await.unwrap());
        cache.pin(&VersionSpec::parse("1.21.3")).await.unwrap();
        assert!(cache.unpin().await.unwrap());
        assert!(!cache.unpin().await.unwrap());
        assert!(cache.pinned().await.is_none());
    }
}
