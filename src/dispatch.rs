//! Running commands with a resolved toolchain

use crate::builder::go_command_path;
use crate::error::{GoverError, GoverResult};
use crate::process::{self, CommandSpec, Output};
use std::env;
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Run the `go` command of the toolchain at `toolchain_dir` with `args`.
///
/// Standard streams are shared with the child. Its `bin` directory comes
/// first on `PATH` and `GOROOT` points at it. Returns the child's exit
/// code; a non-zero code is not an error.
pub async fn run(toolchain_dir: &Path, args: &[String], timeout: Option<Duration>) -> GoverResult<i32> {
    let go = go_command_path(toolchain_dir);
    if !go.is_file() {
        return Err(GoverError::MissingArtifact {
            version: toolchain_dir.display().to_string(),
            path: go,
        });
    }

    let path = prepend_path(&toolchain_dir.join("bin"), env::var_os("PATH"))?;
    let spec = CommandSpec::new(&go)
        .args(args)
        .env("PATH", path)
        .env("GOROOT", toolchain_dir)
        .timeout(timeout);

    info!("Running {}", spec.display());
    let finished = process::run(&spec, Output::Inherit).await?;
    Ok(finished.code)
}

fn prepend_path(dir: &Path, current: Option<OsString>) -> GoverResult<OsString> {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(ref current) = current {
        paths.extend(env::split_paths(current));
    }
    env::join_paths(paths)
        .map_err(|e| GoverError::User(format!("cannot add {} to PATH: {}", dir.display(), e)))
}
