//! fetch-versions: sync the mirror and report what changed

use crate::error::GoverResult;
use crate::repo::{MetadataDiff, RepositoryMetadata};
use crate::session::Session;
use crate::ui::{self, TaskSpinner};

/// Execute the fetch-versions command
pub async fn execute(session: &mut Session) -> GoverResult<()> {
    let cache = session.cache_with_remote().await?;
    let cloned = cache.vcs().ensure_mirror(false).await?;

    let old = if cloned {
        RepositoryMetadata::default()
    } else {
        let old = cache.metadata().await?;
        let mut spinner = TaskSpinner::new(&session.ui);
        spinner.start("Fetching the toolchain repository...");
        if let Err(e) = cache.vcs().fetch_all().await {
            spinner.stop_error("Fetch failed");
            return Err(e);
        }
        spinner.stop("Repository is up to date");
        old
    };

    let new = cache.metadata().await?;
    print_report(&MetadataDiff::between(&old, &new));
    Ok(())
}

fn print_report(diff: &MetadataDiff) {
    let mut blocks = 0;
    let mut block = |title: &str, items: &[String]| {
        if blocks > 0 {
            println!();
        }
        blocks += 1;
        ui::section(title);
        for item in items {
            ui::list_item(item, &[]);
        }
    };

    if !diff.updated_branches.is_empty() {
        block("Updated version branches:", &diff.updated_branches);
    }
    if !diff.has_new_versions() {
        block("No new releases and version branches are found.", &[]);
    }
    if !diff.new_branches.is_empty() {
        block("New version branches:", &diff.new_branches);
    }
    if !diff.new_releases.is_empty() {
        block("New releases:", &diff.new_releases);
    }
    if diff.tip_changed {
        block("Tip changed.", &[]);
    }
}
