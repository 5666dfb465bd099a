//! Resolve a version and run its go command

use crate::dispatch;
use crate::error::{GoverError, GoverResult};
use crate::session::Session;
use crate::version::{ToolchainVersion, VersionSpec};
use tracing::debug;

/// Execute `gover <version> [args...]` or `gover [args...]`, returning the
/// go command's exit code
pub async fn execute(args: Vec<String>, session: &mut Session) -> GoverResult<i32> {
    let Some((first, rest)) = args.split_first() else {
        return Err(GoverError::User("no version or command given".to_string()));
    };

    let parsed = VersionSpec::parse(first);
    let (spec, go_args) = match parsed.version {
        ToolchainVersion::Invalid(reason) => return Err(GoverError::InvalidVersion(reason)),
        ToolchainVersion::Default => {
            let spec = session.default_spec();
            debug!("No version given, using {}", spec);
            (spec, args.as_slice())
        }
        version => (
            VersionSpec {
                version,
                force_sync: parsed.force_sync,
            },
            rest,
        ),
    };

    let cache = session.cache_with_remote().await?;
    let dir = cache.ensure(&spec, false).await?;
    dispatch::run(&dir, go_args, session.run_timeout()).await
}
