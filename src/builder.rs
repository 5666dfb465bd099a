//! Toolchain compilation
//!
//! A source tree is built in place by the make script shipped in its `src`
//! directory. The [`BuildExecutor`] trait is the seam the build cache uses,
//! so tests can substitute a builder that only writes the expected files.

use crate::error::{GoverError, GoverResult};
use crate::process::{self, CommandSpec, Output};
use crate::ui::{BuildProgress, UiContext};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

#[cfg(windows)]
const MAKE_SCRIPT: &str = "make.bat";
#[cfg(not(windows))]
const MAKE_SCRIPT: &str = "make.bash";

/// File name of the `go` command on this platform
pub fn go_command_name() -> &'static str {
    if cfg!(windows) {
        "go.exe"
    } else {
        "go"
    }
}

/// Path of the `go` command inside a toolchain tree
pub fn go_command_path(toolchain_dir: &Path) -> PathBuf {
    toolchain_dir.join("bin").join(go_command_name())
}

/// Builds a toolchain from a checked-out source tree
#[async_trait]
pub trait BuildExecutor: Send + Sync {
    /// Build the tree at `source_dir` in place.
    ///
    /// `label` names the version for progress output. Without a
    /// `bootstrap_root` the build script looks for a toolchain itself.
    async fn build(
        &self,
        source_dir: &Path,
        label: &str,
        bootstrap_root: Option<&Path>,
    ) -> GoverResult<()>;
}

/// Runs `src/make.bash` (`src/make.bat` on Windows)
pub struct MakeScriptExecutor {
    ui: UiContext,
    timeout: Option<Duration>,
}

impl MakeScriptExecutor {
    pub fn new(ui: UiContext, timeout: Option<Duration>) -> Self {
        Self { ui, timeout }
    }
}

#[async_trait]
impl BuildExecutor for MakeScriptExecutor {
    async fn build(
        &self,
        source_dir: &Path,
        label: &str,
        bootstrap_root: Option<&Path>,
    ) -> GoverResult<()> {
        let script_dir = source_dir.join("src");
        let script = script_dir.join(MAKE_SCRIPT);

        // A user's GODEBUG must not change how the toolchain is built
        let mut spec = CommandSpec::new(&script)
            .cwd(&script_dir)
            .env_remove("GODEBUG")
            .timeout(self.timeout);
        if cfg!(windows) {
            spec = spec.env("CGO_ENABLED", "0");
        }
        if let Some(root) = bootstrap_root {
            debug!("GOROOT_BOOTSTRAP={}", root.display());
            spec = spec.env("GOROOT_BOOTSTRAP", root);
        }

        info!("Running {}", script.display());
        let progress = BuildProgress::new(&self.ui, label);
        let on_line = |line: String| progress.on_line(line);
        let result = process::run(&spec, Output::Stream(&on_line)).await;
        progress.finish();

        let finished = result?;
        if !finished.success() {
            return Err(GoverError::BuildFailed {
                version: label.to_string(),
                code: finished.code,
                output: finished.error_output(),
            });
        }
        Ok(())
    }
}

/// Root of the Go installation whose `go` command is first on `PATH`
pub fn local_toolchain_root() -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    find_toolchain_root(&path)
}

fn find_toolchain_root(path_var: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .find(|dir| dir.join(go_command_name()).is_file())
        .and_then(|bin| bin.parent().map(Path::to_path_buf))
}
