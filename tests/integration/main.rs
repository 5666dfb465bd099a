//! Integration tests for gover

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// gover with config and cache isolated in `temp`
    fn gover(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("gover");
        cmd.arg("--config")
            .arg(temp.path().join("config.toml"))
            .arg("--cache-dir")
            .arg(temp.path().join("cache"))
            .env_remove("GOVER_CONFIG")
            .env_remove("GOVER_CACHE_DIR");
        cmd
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("gover")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Go toolchain"))
            .stdout(predicate::str::contains("cache-version"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("gover")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("gover"));
    }

    #[test]
    fn default_version_not_set() {
        let temp = TempDir::new().unwrap();
        gover(&temp)
            .arg("default-version")
            .assert()
            .success()
            .stdout(predicate::str::contains("Default version is not set."));
    }

    #[test]
    fn default_version_set_and_query() {
        let temp = TempDir::new().unwrap();
        gover(&temp)
            .args(["default-version", "1.21.0!"])
            .assert()
            .success()
            .stdout(predicate::str::contains("The ! sign is ignored."))
            .stdout(predicate::str::contains("Default version is set as 1.21 now."));

        gover(&temp)
            .arg("default-version")
            .assert()
            .success()
            .stdout(predicate::str::diff("1.21\n"));

        let config = std::fs::read_to_string(temp.path().join("config.toml")).unwrap();
        assert!(config.contains("default_version = \"1.21\""));
    }

    #[test]
    fn default_version_rejects_invalid() {
        let temp = TempDir::new().unwrap();
        gover(&temp)
            .args(["default-version", "foo:1"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("undetermined version kind: foo"));
        assert!(!temp.path().join("config.toml").exists());
    }

    #[test]
    fn invalid_run_version_fails() {
        let temp = TempDir::new().unwrap();
        gover(&temp)
            .args(["bad:1.21", "version"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Error:"));
        assert!(!temp.path().join("cache").exists());
    }

    #[test]
    fn cache_version_rejects_invalid_before_any_work() {
        let temp = TempDir::new().unwrap();
        gover(&temp)
            .args(["cache-version", "1.21", "tag:"])
            .assert()
            .code(1);
        assert!(!temp.path().join("cache").exists());
        assert!(!temp.path().join("config.toml").exists());
    }

    #[test]
    fn pin_version_needs_one_argument() {
        let temp = TempDir::new().unwrap();
        gover(&temp).arg("pin-version").assert().code(1);
        gover(&temp).args(["pin-version", "1.20", "1.21"]).assert().code(1);
    }

    #[test]
    fn usage_errors_exit_one() {
        let temp = TempDir::new().unwrap();
        gover(&temp)
            .args(["fetch-versions", "extra"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("unexpected argument"));
        assert!(!temp.path().join("cache").exists());
    }

    #[test]
    fn pin_version_help_displays() {
        let temp = TempDir::new().unwrap();
        gover(&temp)
            .args(["pin-version", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("VERSION"));
    }

    #[test]
    fn unpin_is_idempotent() {
        let temp = TempDir::new().unwrap();
        gover(&temp)
            .arg("unpin-version")
            .assert()
            .success()
            .stdout(predicate::str::contains("No version is pinned."));

        let pinned = temp.path().join("cache").join("pinned-toolchain");
        std::fs::create_dir_all(pinned.join("bin")).unwrap();
        gover(&temp)
            .arg("unpin-version")
            .assert()
            .success()
            .stdout(predicate::str::contains("Unpinned"));
        assert!(!pinned.exists());
    }

    #[test]
    fn completions_for_bash() {
        cargo_bin_cmd!("gover")
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("gover"));
    }
}
