//! In-memory collaborators for build cache tests

use crate::builder::{go_command_path, BuildExecutor};
use crate::error::{GoverError, GoverResult};
use crate::repo::{RefMap, VcsClient};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeRepo {
    tags: RefMap,
    branches: RefMap,
    cloned: bool,
    fetches: usize,
}

/// Repository whose refs live in memory; exports write a tiny source tree
#[derive(Clone, Default)]
pub struct FakeVcs {
    repo: Arc<Mutex<FakeRepo>>,
}

impl FakeVcs {
    pub fn sample() -> Self {
        let vcs = Self::default();
        {
            let mut repo = vcs.repo.lock().unwrap();
            for (tag, commit) in [
                ("go1.17.13", "t1"),
                ("go1.20.6", "t2"),
                ("go1.21.3", "t3"),
                ("go1.22.0", "t4"),
            ] {
                repo.tags.insert(tag.to_string(), commit.to_string());
            }
            for (branch, commit) in [("master", "m1"), ("release-branch.go1.22", "b1")] {
                repo.branches.insert(branch.to_string(), commit.to_string());
            }
        }
        vcs
    }

    pub fn set_branch(&self, name: &str, commit: &str) {
        self.repo
            .lock()
            .unwrap()
            .branches
            .insert(name.to_string(), commit.to_string());
    }

    pub fn fetch_count(&self) -> usize {
        self.repo.lock().unwrap().fetches
    }
}

#[async_trait]
impl VcsClient for FakeVcs {
    async fn ensure_mirror(&self, force_sync: bool) -> GoverResult<bool> {
        let mut repo = self.repo.lock().unwrap();
        if !repo.cloned {
            repo.cloned = true;
            return Ok(true);
        }
        if force_sync {
            repo.fetches += 1;
        }
        Ok(false)
    }

    async fn fetch_all(&self) -> GoverResult<()> {
        self.repo.lock().unwrap().fetches += 1;
        Ok(())
    }

    async fn list_tags_and_branches(&self) -> GoverResult<(RefMap, RefMap)> {
        let repo = self.repo.lock().unwrap();
        Ok((repo.tags.clone(), repo.branches.clone()))
    }

    async fn export_tree_at_commit(&self, dest: &Path, commit: &str) -> GoverResult<()> {
        std::fs::create_dir_all(dest.join("src")).unwrap();
        std::fs::create_dir_all(dest.join(".git")).unwrap();
        std::fs::write(dest.join(".git").join("HEAD"), commit).unwrap();
        std::fs::write(dest.join(".gitignore"), "/bin\n").unwrap();
        std::fs::write(dest.join("src").join("make.bash"), commit).unwrap();
        Ok(())
    }

    fn has_mirror(&self) -> bool {
        self.repo.lock().unwrap().cloned
    }

    fn default_branch(&self) -> &str {
        "master"
    }
}

#[derive(Clone, Copy, Default)]
enum Outcome {
    #[default]
    Succeed,
    Fail,
    NoArtifact,
}

/// Records build calls; a successful build writes an empty `bin/go`
#[derive(Clone, Default)]
pub struct FakeBuilder {
    calls: Arc<Mutex<Vec<(String, Option<PathBuf>)>>>,
    outcome: Outcome,
}

impl FakeBuilder {
    pub fn failing() -> Self {
        Self {
            outcome: Outcome::Fail,
            ..Self::default()
        }
    }

    pub fn without_artifact() -> Self {
        Self {
            outcome: Outcome::NoArtifact,
            ..Self::default()
        }
    }

    /// (label, bootstrap root) of every build, in order
    pub fn calls(&self) -> Vec<(String, Option<PathBuf>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn build_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BuildExecutor for FakeBuilder {
    async fn build(
        &self,
        source_dir: &Path,
        label: &str,
        bootstrap_root: Option<&Path>,
    ) -> GoverResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((label.to_string(), bootstrap_root.map(Path::to_path_buf)));

        match self.outcome {
            Outcome::Succeed => {
                let go = go_command_path(source_dir);
                std::fs::create_dir_all(go.parent().unwrap()).unwrap();
                std::fs::write(go, "").unwrap();
                Ok(())
            }
            Outcome::Fail => Err(GoverError::BuildFailed {
                version: label.to_string(),
                code: 2,
                output: "cmd/dist: broken".to_string(),
            }),
            Outcome::NoArtifact => Ok(()),
        }
    }
}
