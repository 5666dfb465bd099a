//! default-version: query or set the version used without one

use crate::cli::args::DefaultArgs;
use crate::error::GoverResult;
use crate::repo::{RepositoryMetadata, VcsClient};
use crate::session::Session;
use crate::ui;
use crate::version::{normalize, VersionSpec};

/// Execute the default-version command
pub async fn execute(args: DefaultArgs, session: &mut Session) -> GoverResult<()> {
    let Some(arg) = args.version else {
        match session.config().default_version {
            Some(ref version) => println!("{}", version),
            None => println!("Default version is not set."),
        }
        return Ok(());
    };

    let mut spec = VersionSpec::parse_required(&arg)?;
    if spec.force_sync {
        ui::step_info(&session.ui, "The ! sign is ignored.");
        spec.force_sync = false;
    }

    let stored = spec.to_string();
    session.set_default_version(stored.clone()).await?;
    println!("Default version is set as {} now.", stored);

    let repository = session.repository();
    if repository.has_mirror() {
        let metadata = RepositoryMetadata::collect(&repository).await?;
        match normalize(&spec.version, &metadata, true) {
            Ok(current) if current != spec.version => {
                ui::remark(&session.ui, &format!("It currently resolves to {}", current))
            }
            Ok(_) => {}
            Err(e) => ui::step_warn(&session.ui, &e.to_string()),
        }
    }
    Ok(())
}
