//! Version specifiers and their resolution
//!
//! A specifier moves through three stages:
//!
//! 1. [`VersionSpec::parse`] turns text into one of seven
//!    [`ToolchainVersion`] kinds.
//! 2. [`normalize`] resolves releases and aliases against the current
//!    [`RepositoryMetadata`](crate::repo::RepositoryMetadata), narrowing the
//!    kind to a [`ConcreteVersion`] (tag, branch or revision).
//! 3. [`bootstrap_for`] decides which toolchain builds it.

pub mod bootstrap;
pub mod compare;
pub mod normalize;
pub mod specifier;

pub use bootstrap::{bootstrap_for, Bootstrap};
pub use compare::{compare_versions, sort_ascending};
pub use normalize::{normalize, resolve};
pub use specifier::{take_force_sync, ToolchainVersion, VersionSpec};

use std::fmt;

/// A version that names exactly one commit in the repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConcreteVersion {
    Tag(String),
    Branch(String),
    Revision(String),
}

impl ConcreteVersion {
    /// Cache directory name for this version.
    ///
    /// The kind prefix keeps a tag and a branch with the same name apart.
    /// `/`, `\` and `%` are percent-escaped so branch names with slashes stay a
    /// single directory and distinct values never share a name.
    pub fn folder_name(&self) -> String {
        let (prefix, value) = match self {
            Self::Tag(v) => ("tag_", v),
            Self::Branch(v) => ("bra_", v),
            Self::Revision(v) => ("rev_", v),
        };
        let mut folder = String::with_capacity(prefix.len() + value.len());
        folder.push_str(prefix);
        for c in value.chars() {
            match c {
                '%' => folder.push_str("%25"),
                '/' => folder.push_str("%2F"),
                '\\' => folder.push_str("%5C"),
                c => folder.push(c),
            }
        }
        folder
    }

    /// Kind name for messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tag(_) => "tag",
            Self::Branch(_) => "branch",
            Self::Revision(_) => "revision",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Tag(v) | Self::Branch(v) | Self::Revision(v) => v,
        }
    }
}

impl From<ConcreteVersion> for ToolchainVersion {
    fn from(version: ConcreteVersion) -> Self {
        match version {
            ConcreteVersion::Tag(v) => Self::Tag(v),
            ConcreteVersion::Branch(v) => Self::Branch(v),
            ConcreteVersion::Revision(v) => Self::Revision(v),
        }
    }
}

impl TryFrom<ToolchainVersion> for ConcreteVersion {
    type Error = ToolchainVersion;

    fn try_from(version: ToolchainVersion) -> Result<Self, Self::Error> {
        match version {
            ToolchainVersion::Tag(v) => Ok(Self::Tag(v)),
            ToolchainVersion::Branch(v) => Ok(Self::Branch(v)),
            ToolchainVersion::Revision(v) => Ok(Self::Revision(v)),
            other => Err(other),
        }
    }
}

impl fmt::Display for ConcreteVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(v) => write!(f, "tag:{}", v),
            Self::Branch(v) => write!(f, "bra:{}", v),
            Self::Revision(v) => write!(f, "rev:{}", v),
        }
    }
}
