//! Version specifier grammar
//!
//! Turns the text a user types into a [`VersionSpec`]. Parsing is pure: it
//! never touches the repository, so an unknown release is still a valid
//! specifier at this stage.
//!
//! | Text        | Meaning                                  |
//! |-------------|------------------------------------------|
//! | `1.21.3`    | release tag `go1.21.3`                   |
//! | `1.21.`     | latest `go1.21.*` release                |
//! | `.`         | latest release                           |
//! | `:1.21`     | branch `release-branch.go1.21`           |
//! | `:tip`      | the default branch                       |
//! | `tag:NAME`  | any tag                                  |
//! | `bra:NAME`  | any branch                               |
//! | `rev:HASH`  | any revision                             |
//!
//! A trailing `!` asks for the repository to be synced before resolving.

use crate::error::{GoverError, GoverResult};
use std::fmt;

/// A version in one of its symbolic or concrete forms
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ToolchainVersion {
    /// Release number without the `go` prefix, trailing `.0`s removed
    Release(String),
    /// `tip` or a release-branch number
    Alias(String),
    Tag(String),
    Branch(String),
    Revision(String),
    /// No version given; the argument is a command for the default toolchain
    Default,
    /// Unparseable input, carrying the reason
    Invalid(String),
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release(v) => write!(f, "{}", v),
            Self::Alias(v) => write!(f, ":{}", v),
            Self::Tag(v) => write!(f, "tag:{}", v),
            Self::Branch(v) => write!(f, "bra:{}", v),
            Self::Revision(v) => write!(f, "rev:{}", v),
            Self::Default => write!(f, "(default)"),
            Self::Invalid(reason) => write!(f, "(invalid: {})", reason),
        }
    }
}

/// A parsed version argument
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionSpec {
    pub version: ToolchainVersion,
    /// Sync the repository mirror before resolving
    pub force_sync: bool,
}

impl VersionSpec {
    pub fn new(version: ToolchainVersion) -> Self {
        Self {
            version,
            force_sync: false,
        }
    }

    fn invalid(reason: impl Into<String>, force_sync: bool) -> Self {
        Self {
            version: ToolchainVersion::Invalid(reason.into()),
            force_sync,
        }
    }

    /// Parse a single argument
    pub fn parse(arg: &str) -> Self {
        let arg = arg.trim();
        if arg.is_empty() {
            return Self::invalid("version is unspecified", false);
        }

        let (arg, force_sync) = match arg.strip_suffix('!') {
            Some(rest) => (rest.trim(), true),
            None => (arg, false),
        };
        if arg.is_empty() {
            return Self::invalid("! should not be used solely as an argument", true);
        }

        let version = if arg == "." {
            ToolchainVersion::Release(arg.to_string())
        } else if arg.starts_with(|c: char| c.is_ascii_digit()) {
            ToolchainVersion::Release(trim_trailing_dot_zeros(arg).to_string())
        } else {
            match arg.split_once(':') {
                None if force_sync => {
                    return Self::invalid(
                        format!("unrecognized command or invalid version: {}", arg),
                        true,
                    );
                }
                // Looks like a command meant for the default toolchain
                None => return Self::new(ToolchainVersion::Default),
                Some((kind, "")) => {
                    return Self::invalid(
                        format!("unspecified version for kind ({})", kind),
                        force_sync,
                    );
                }
                Some(("tag", value)) => ToolchainVersion::Tag(value.to_string()),
                Some(("bra", value)) => ToolchainVersion::Branch(value.to_string()),
                Some(("rev", value)) => ToolchainVersion::Revision(value.to_string()),
                Some(("", "tip")) => ToolchainVersion::Alias("tip".to_string()),
                Some(("", value)) => {
                    if !value.starts_with(|c: char| c.is_ascii_digit()) {
                        return Self::invalid(
                            "an alias version must be tip or a go version",
                            force_sync,
                        );
                    }
                    ToolchainVersion::Alias(trim_trailing_dot_zeros(value).to_string())
                }
                Some((kind, _)) => {
                    return Self::invalid(
                        format!("undetermined version kind: {}", kind),
                        force_sync,
                    );
                }
            }
        };

        Self {
            version,
            force_sync,
        }
    }

    /// Parse a single argument that must name a version
    pub fn parse_required(arg: &str) -> GoverResult<Self> {
        let spec = Self::parse(arg);
        match spec.version {
            ToolchainVersion::Invalid(reason) => Err(GoverError::InvalidVersion(reason)),
            ToolchainVersion::Default => Err(GoverError::InvalidVersion(format!(
                "unrecognized version: {}",
                arg.trim()
            ))),
            _ => Ok(spec),
        }
    }

    /// Parse a batch of arguments.
    ///
    /// Stops at the first invalid argument. At most one result keeps
    /// `force_sync`: the earliest one that asked for it.
    pub fn parse_all<S: AsRef<str>>(args: &[S]) -> GoverResult<Vec<Self>> {
        let mut specs = args
            .iter()
            .map(|arg| Self::parse_required(arg.as_ref()))
            .collect::<GoverResult<Vec<_>>>()?;

        let mut seen = false;
        for spec in &mut specs {
            if spec.force_sync {
                if seen {
                    spec.force_sync = false;
                }
                seen = true;
            }
        }

        Ok(specs)
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

/// Whether any spec in the batch asked for a sync; clears the flag on all.
pub fn take_force_sync(specs: &mut [VersionSpec]) -> bool {
    let mut found = false;
    for spec in specs {
        found |= std::mem::take(&mut spec.force_sync);
    }
    found
}

/// `1.18.0` -> `1.18`, `1.0` -> `1`
pub fn trim_trailing_dot_zeros(mut version: &str) -> &str {
    while let Some(rest) = version.strip_suffix(".0") {
        version = rest;
    }
    version
}
