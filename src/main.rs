//! gover - Go toolchain version manager
//!
//! CLI entry point that dispatches to subcommands.

use clap::error::ErrorKind;
use clap::Parser;
use console::style;
use gover::cli::{commands, Cli, Commands};
use gover::error::GoverResult;
use gover::session::Session;
use gover::ui::UiContext;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> GoverResult<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit 1 like every other gover failure
            let _ = e.print();
            return Ok(match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            });
        }
    };

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("gover=warn"),
        1 => EnvFilter::new("gover=info"),
        _ => EnvFilter::new("gover=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Completions don't need config loading
    if let Commands::Completions(args) = cli.command {
        commands::completions(args);
        return Ok(ExitCode::SUCCESS);
    }

    let mut session = Session::open(cli.config, cli.cache_dir, UiContext::detect()).await?;

    match cli.command {
        Commands::Completions(_) => unreachable!("Completions handled above"),
        Commands::FetchVersions => commands::fetch(&mut session).await?,
        Commands::ListVersions => commands::list(&mut session).await?,
        Commands::CacheVersion(args) => commands::cache(args, &mut session).await?,
        Commands::UncacheVersion(args) => commands::uncache(args, &mut session).await?,
        Commands::PinVersion(args) => commands::pin(args, &mut session).await?,
        Commands::UnpinVersion => commands::unpin(&session).await?,
        Commands::DefaultVersion(args) => commands::default_version(args, &mut session).await?,
        Commands::Run(args) => {
            let code = commands::run(args, &mut session).await?;
            // Exit statuses are a byte on Unix; -1 (killed by a signal) becomes 255
            return Ok(ExitCode::from(code as u8));
        }
    }

    Ok(ExitCode::SUCCESS)
}
