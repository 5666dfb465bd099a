//! Toolchain source repository: VCS access and ref metadata

pub mod git;
pub mod metadata;
pub mod vcs;

pub use git::{GitCli, KNOWN_REPOSITORIES};
pub use metadata::{MetadataDiff, RepositoryMetadata};
pub use vcs::{RefMap, VcsClient};
