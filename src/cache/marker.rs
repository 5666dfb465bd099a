//! Build marker file
//!
//! Written last into a build directory. Its presence with the current
//! revision is what makes a cached build usable.

use crate::error::{GoverError, GoverResult};
use crate::version::ConcreteVersion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub const MARKER_FILE: &str = "build-marker.json";

/// Record of the commit a cached build was produced from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMarker {
    /// Commit id the tree was checked out at
    pub revision: String,
    /// Version the build was requested as (`tag:go1.21.3`)
    pub version: String,
    pub built_at: DateTime<Utc>,
}

impl BuildMarker {
    pub fn new(version: &ConcreteVersion, revision: impl Into<String>) -> Self {
        Self {
            revision: revision.into(),
            version: version.to_string(),
            built_at: Utc::now(),
        }
    }

    pub fn path(dir: &Path) -> PathBuf {
        dir.join(MARKER_FILE)
    }

    /// Read the marker in `dir`; missing, unreadable and malformed markers
    /// all yield `None`
    pub async fn read(dir: &Path) -> Option<Self> {
        let path = Self::path(dir);
        let content = fs::read_to_string(&path).await.ok()?;
        match serde_json::from_str(&content) {
            Ok(marker) => Some(marker),
            Err(e) => {
                debug!("Ignoring malformed marker {}: {}", path.display(), e);
                None
            }
        }
    }

    pub async fn write(&self, dir: &Path) -> GoverResult<()> {
        let path = Self::path(dir);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)
            .await
            .map_err(|e| GoverError::io(format!("writing {}", path.display()), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn write_then_read() {
        let temp = TempDir::new().unwrap();
        let marker = BuildMarker::new(&ConcreteVersion::Tag("go1.21.3".into()), "abc123");
        marker.write(temp.path()).await.unwrap();

        let read = BuildMarker::read(temp.path()).await.unwrap();
        assert_eq!(read, marker);
        assert_eq!(read.version, "tag:go1.21.3");
    }

    #[tokio::test]
    async fn missing_or_malformed_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(BuildMarker::read(temp.path()).await.is_none());

        std::fs::write(BuildMarker::path(temp.path()), r#"{"revision": 42}"#).unwrap();
        assert!(BuildMarker::read(temp.path()).await.is_none());
    }

    #[tokio::test]
    async fn reads_marker_without_unknown_fields_failing() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            BuildMarker::path(temp.path()),
            r#"{"revision":"r1","version":"bra:master","built_at":"2024-05-01T10:00:00Z","extra":1}"#,
        )
        .unwrap();
        let marker = BuildMarker::read(temp.path()).await.unwrap();
        assert_eq!(marker.revision, "r1");
    }
}
