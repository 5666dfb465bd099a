//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// gover - build, cache and run any Go toolchain version
///
/// Run `gover <version> [go arguments...]` to run the go command of that
/// version, building it first if needed. Versions are written as `1.21.3`
/// (release), `1.21.` (latest 1.21 release), `.` (latest release), `:1.21`
/// (release branch), `:tip`, `tag:NAME`, `bra:NAME` or `rev:HASH`. A
/// trailing `!` syncs the repository first. Without a version, the default
/// version runs.
#[derive(Parser, Debug)]
#[command(name = "gover")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GOVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cache root holding the repository mirror and built toolchains
    #[arg(long, global = true, env = "GOVER_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the repository and report new releases and branches
    #[command(alias = "fetch-version")]
    FetchVersions,

    /// List release branches and releases
    #[command(alias = "list-version")]
    ListVersions,

    /// Build versions into the cache
    #[command(alias = "cache-versions")]
    CacheVersion(VersionsArgs),

    /// Remove versions from the cache
    #[command(alias = "uncache-versions")]
    UncacheVersion(VersionsArgs),

    /// Build a version at the fixed pinned-toolchain path
    PinVersion(PinArgs),

    /// Remove the pinned toolchain
    UnpinVersion,

    /// Show or set the version run when none is given
    DefaultVersion(DefaultArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),

    /// `<version> [go arguments...]`, or go arguments for the default version
    #[command(external_subcommand)]
    Run(Vec<String>),
}

/// Arguments for cache-version and uncache-version
#[derive(Parser, Debug)]
pub struct VersionsArgs {
    /// Versions to operate on
    #[arg(required = true)]
    pub versions: Vec<String>,
}

/// Arguments for pin-version
#[derive(Parser, Debug)]
pub struct PinArgs {
    /// Version to pin
    #[arg(id = "spec", value_name = "VERSION")]
    pub version: String,
}

/// Arguments for default-version
#[derive(Parser, Debug)]
pub struct DefaultArgs {
    /// New default version; prints the current one when omitted
    #[arg(id = "spec", value_name = "VERSION")]
    pub version: Option<String>,
}

/// Arguments for completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
