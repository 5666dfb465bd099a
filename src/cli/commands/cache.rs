//! cache-version and uncache-version

use crate::cli::args::VersionsArgs;
use crate::error::GoverResult;
use crate::session::Session;
use crate::ui;
use crate::version::{take_force_sync, VersionSpec};

/// Execute the cache-version command
pub async fn cache(args: VersionsArgs, session: &mut Session) -> GoverResult<()> {
    let mut specs = VersionSpec::parse_all(&args.versions)?;
    let force_sync = take_force_sync(&mut specs);

    let cache = session.cache_with_remote().await?;
    if force_sync {
        cache.vcs().ensure_mirror(true).await?;
    }

    for spec in &specs {
        let dir = cache.ensure(spec, false).await?;
        ui::step_ok(&session.ui, &format!("{} is cached at {}", spec, dir.display()));
    }
    Ok(())
}

/// Execute the uncache-version command
pub async fn uncache(args: VersionsArgs, session: &mut Session) -> GoverResult<()> {
    let mut specs = VersionSpec::parse_all(&args.versions)?;
    if take_force_sync(&mut specs) {
        ui::step_info(&session.ui, "The ! sign is ignored.");
    }

    let cache = session.cache_with_remote().await?;
    let versions = cache.resolve_all(&specs).await?;
    for version in &versions {
        match cache.uncache(version).await? {
            Some(dir) => ui::step_ok(&session.ui, &format!("Removed {}", dir.display())),
            None => ui::step_info(&session.ui, &format!("Version {} is not cached.", version)),
        }
    }
    Ok(())
}
