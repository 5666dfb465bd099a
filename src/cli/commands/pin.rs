//! pin-version and unpin-version

use crate::cli::args::PinArgs;
use crate::error::GoverResult;
use crate::session::Session;
use crate::ui;
use crate::version::VersionSpec;

/// Execute the pin-version command
pub async fn pin(args: PinArgs, session: &mut Session) -> GoverResult<()> {
    let spec = VersionSpec::parse_required(&args.version)?;
    let cache = session.cache_with_remote().await?;
    let dir = cache.pin(&spec).await?;

    ui::step_ok(&session.ui, &format!("Pinned {} at {}", spec, dir.display()));
    ui::remark(
        &session.ui,
        &format!(
            "Put {} in your PATH to use the pinned go command directly",
            dir.join("bin").display()
        ),
    );
    Ok(())
}

/// Execute the unpin-version command
pub async fn unpin(session: &Session) -> GoverResult<()> {
    if session.cache().unpin().await? {
        ui::step_ok(&session.ui, "Unpinned");
    } else {
        ui::step_info(&session.ui, "No version is pinned.");
    }
    Ok(())
}
