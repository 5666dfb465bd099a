//! On-disk layout of the cache root

use crate::cache::marker::BuildMarker;
use crate::version::ConcreteVersion;
use std::fmt;
use std::path::{Path, PathBuf};

const REPOSITORY_DIR: &str = "repository";
const PIN_DIR: &str = "pinned-toolchain";
const PIN_TEMP_DIR: &str = "pinned-toolchain.tmp";

/// Paths inside the cache root.
///
/// ```text
/// <root>/repository/            mirror of the toolchain repository
/// <root>/tag_go1.21.3/          one directory per cached build
/// <root>/bra_master/
/// <root>/pinned-toolchain/      the pinned build
/// <root>/pinned-toolchain.tmp/  pin being built
/// ```
#[derive(Debug, Clone)]
pub struct CacheLayout {
    root: PathBuf,
}

impl CacheLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn repository_dir(&self) -> PathBuf {
        self.root.join(REPOSITORY_DIR)
    }

    pub fn build_dir(&self, version: &ConcreteVersion) -> PathBuf {
        self.root.join(version.folder_name())
    }

    pub fn pin_dir(&self) -> PathBuf {
        self.root.join(PIN_DIR)
    }

    pub fn pin_temp_dir(&self) -> PathBuf {
        self.root.join(PIN_TEMP_DIR)
    }
}

/// State of a build directory relative to the commit it should hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// No directory, or a directory without a readable marker
    Absent,
    /// Built from a different commit
    Stale,
    /// Built from the wanted commit
    Ready,
}

impl BuildState {
    pub async fn of(dir: &Path, revision: &str) -> Self {
        match BuildMarker::read(dir).await {
            Some(marker) if marker.revision == revision => Self::Ready,
            Some(_) => Self::Stale,
            None => Self::Absent,
        }
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Stale => write!(f, "stale"),
            Self::Ready => write!(f, "ready"),
        }
    }
}
