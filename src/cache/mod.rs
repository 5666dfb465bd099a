//! Build cache for toolchain versions
//!
//! Every concrete version gets its own directory under the cache root,
//! holding a complete toolchain built from the commit the version resolved
//! to. A marker file written after a successful build records that commit.
//!
//! # Build States
//!
//! | State | Directory | Marker | Next `ensure` |
//! |-------|-----------|--------|---------------|
//! | Absent | missing or partial | none | build |
//! | Stale | present | other commit | rebuild |
//! | Ready | present | current commit | reuse |
//!
//! A directory only becomes Ready through the marker write, which is the
//! last step of a build. Failed builds delete their directory.
//!
//! Concurrent invocations against the same cache root are not coordinated.

mod controller;
pub mod layout;
pub mod marker;
mod pin;

#[cfg(test)]
mod testing;

pub use controller::{BootstrapPolicy, BuildCache};
pub use layout::{BuildState, CacheLayout};
pub use marker::BuildMarker;

use crate::error::{GoverError, GoverResult};
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::warn;

/// Remove a directory tree; a missing directory is not an error
pub(crate) async fn remove_dir_if_exists(dir: &Path) -> GoverResult<()> {
    match fs::remove_dir_all(dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(GoverError::io(format!("removing {}", dir.display()), e)),
    }
}

/// Best-effort removal after a failure; the first error wins
async fn discard(dir: &Path) {
    if let Err(e) = remove_dir_if_exists(dir).await {
        warn!("{}", e);
    }
}
