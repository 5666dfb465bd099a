//! Which toolchain builds which
//!
//! Since Go 1.5 the toolchain is written in Go and needs an existing Go
//! toolchain to compile it. The policy below is plain data: each row gives
//! the first release it applies to and the tag to build first, if any.

use crate::version::compare::{compare_versions, release_floor};
use crate::version::ConcreteVersion;
use std::cmp::Ordering;

/// How to obtain the bootstrap toolchain for a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bootstrap {
    /// No policy applies; use `GOROOT_BOOTSTRAP` or whatever the build
    /// script finds on its own
    Undetermined,
    /// Use the toolchain installed on this system
    Local,
    /// Build this version first and use it
    Build(ConcreteVersion),
}

struct BootstrapRule {
    /// First release (inclusive) the rule covers
    from: &'static str,
    /// Tag to build first; `None` uses the local toolchain
    bootstrap: Option<&'static str>,
}

/// Newest first. Every bootstrap tag falls in a later row, so chains end.
const BOOTSTRAP_POLICY: &[BootstrapRule] = &[
    BootstrapRule {
        from: "1.26",
        bootstrap: Some("go1.24.6"),
    },
    BootstrapRule {
        from: "1.24",
        bootstrap: Some("go1.22.6"),
    },
    BootstrapRule {
        from: "1.22",
        bootstrap: Some("go1.20.6"),
    },
    BootstrapRule {
        from: "1.20",
        bootstrap: Some("go1.17.13"),
    },
    BootstrapRule {
        from: "1.5",
        bootstrap: None,
    },
    // Older releases are built with a C compiler
    BootstrapRule {
        from: "1",
        bootstrap: None,
    },
];

/// Decide how to bootstrap a build of `version`
pub fn bootstrap_for(version: &ConcreteVersion) -> Bootstrap {
    match version {
        ConcreteVersion::Tag(tag) => match tag.strip_prefix("go") {
            Some(release) if release.starts_with(|c: char| c.is_ascii_digit()) => {
                bootstrap_for_release(release)
            }
            _ => Bootstrap::Undetermined,
        },
        ConcreteVersion::Branch(branch) => match branch.strip_prefix("release-branch.go") {
            Some(release) if release.starts_with(|c: char| c.is_ascii_digit()) => {
                bootstrap_for_release(release)
            }
            // Development branches track the newest release requirements
            _ => rule_outcome(&BOOTSTRAP_POLICY[0]),
        },
        ConcreteVersion::Revision(_) => Bootstrap::Undetermined,
    }
}

fn bootstrap_for_release(release: &str) -> Bootstrap {
    let floor = release_floor(release);
    BOOTSTRAP_POLICY
        .iter()
        .find(|rule| compare_versions(&floor, rule.from) != Ordering::Less)
        .map(rule_outcome)
        .unwrap_or(Bootstrap::Undetermined)
}

fn rule_outcome(rule: &BootstrapRule) -> Bootstrap {
    match rule.bootstrap {
        Some(tag) => Bootstrap::Build(ConcreteVersion::Tag(tag.to_string())),
        None => Bootstrap::Local,
    }
}
