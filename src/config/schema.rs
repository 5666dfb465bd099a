//! Configuration schema for gover
//!
//! Configuration is stored at `~/.config/gover/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version used when a command is run without one
    pub default_version: Option<String>,

    /// Toolchain repository settings
    pub repository: RepositoryConfig,

    /// Toolchain build settings
    pub build: BuildConfig,

    /// Bounds on long-running steps
    pub timeouts: TimeoutConfig,
}

/// Toolchain repository settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Clone address; asked for on first clone when unset
    pub url: Option<String>,

    /// Branch that `:tip` refers to
    pub default_branch: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            url: None,
            default_branch: "master".to_string(),
        }
    }
}

/// Toolchain build settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Toolchain used to bootstrap every build (GOROOT_BOOTSTRAP wins)
    pub bootstrap_root: Option<PathBuf>,
}

/// Timeouts in seconds; 0 disables the bound
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Clone and fetch
    pub sync_secs: u64,

    /// One toolchain build
    pub build_secs: u64,

    /// A command run with a resolved toolchain
    pub run_secs: u64,
}

impl TimeoutConfig {
    pub fn sync(&self) -> Option<Duration> {
        secs(self.sync_secs)
    }

    pub fn build(&self) -> Option<Duration> {
        secs(self.build_secs)
    }

    pub fn run(&self) -> Option<Duration> {
        secs(self.run_secs)
    }
}

fn secs(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value))
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            sync_secs: 3600,
            build_secs: 3600,
            run_secs: 3600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[repository]"));
        assert!(toml.contains("[timeouts]"));
        assert!(!toml.contains("default_version"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.default_version.is_none());
        assert_eq!(config.repository.default_branch, "master");
        assert_eq!(config.timeouts.build(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            default_version = ":tip"

            [timeouts]
            run_secs = 0
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.default_version.as_deref(), Some(":tip"));
        assert_eq!(config.timeouts.run(), None);
        assert_eq!(config.timeouts.sync_secs, 3600); // default preserved
    }
}
