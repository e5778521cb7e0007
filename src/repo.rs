//! Version control setup for provisioned projects.
//!
//! Every project gets a git repository with a single commit holding the
//! provisioned tree, so later build steps can be diffed against it.

use crate::error::Result;
use crate::git::{commit_count, query_git, run_git};
use std::path::Path;
use tracing::{debug, info, warn};

/// Message of the commit holding the provisioned tree.
pub const INITIAL_COMMIT_MESSAGE: &str = "First commit";

/// Outcome of [`RepositoryInitializer::ensure_repository`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoStatus {
    /// `.git` already existed; nothing was touched.
    AlreadyPresent,
    /// A repository was created with one commit.
    Initialized,
}

/// Ensures a project directory has version control history.
pub trait RepositoryInitializer {
    /// Idempotent: a directory that already has a repository is left alone.
    fn ensure_repository(&self, dir: &Path) -> Result<RepoStatus>;
}

/// Committer identity used when none is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
}

/// Marker that identifies an already-configured bot name.
const NAME_MARKER: &str = "Vaadin";

/// [`RepositoryInitializer`] backed by the git CLI.
#[derive(Debug, Clone)]
pub struct GitRepositoryInitializer {
    identity: GitIdentity,
}

impl GitRepositoryInitializer {
    pub fn new(identity: GitIdentity) -> Self {
        Self { identity }
    }

    /// Set `user.email`/`user.name` locally unless usable values are configured.
    fn ensure_identity(&self, dir: &Path) -> Result<()> {
        let email = query_git(dir, &["config", "user.email"])?;
        if !email.combined().contains('@') {
            self.set_config(dir, "user.email", &self.identity.email)?;
        }

        let name = query_git(dir, &["config", "user.name"])?;
        if !name.combined().contains(NAME_MARKER) {
            self.set_config(dir, "user.name", &self.identity.name)?;
        }
        Ok(())
    }

    fn set_config(&self, dir: &Path, key: &str, value: &str) -> Result<()> {
        let output = query_git(dir, &["config", key, value])?;
        if !output.success {
            warn!(key, "git config failed: {}", output.combined());
        }
        Ok(())
    }
}

impl RepositoryInitializer for GitRepositoryInitializer {
    fn ensure_repository(&self, dir: &Path) -> Result<RepoStatus> {
        if dir.join(".git").exists() {
            debug!(
                dir = %dir.display(),
                commits = commit_count(dir).unwrap_or_default(),
                "repository already present"
            );
            return Ok(RepoStatus::AlreadyPresent);
        }

        info!("Initializing git repository in {}", dir.display());
        run_git(dir, &["init", "-q"])?;
        self.ensure_identity(dir)?;
        self.set_config(dir, "advice.addIgnoredFile", "false")?;

        // `.` picks up dotfiles as well.
        run_git(dir, &["add", "."])?;
        run_git(dir, &["commit", "-q", "-m", INITIAL_COMMIT_MESSAGE, "-a"])?;

        Ok(RepoStatus::Initialized)
    }
}
