use crate::error::{PitError, Result};
use crate::preset::Preset;
use crate::process::{CommandLine, CommandRunner};
use crate::provision::{ArchiveProvisioner, GeneratorProvisioner};
use crate::repo::{RepoStatus, RepositoryInitializer};
use crate::validate::{ValidationPhase, Validator};
use crate::version::VersionRewriter;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Deterministic default branch across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    temp_dir
}

fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Command runner that records every command and exits 0 unless told otherwise.
#[derive(Default)]
pub(crate) struct RecordingRunner {
    exit_codes: HashMap<String, i32>,
    creates: Option<PathBuf>,
    commands: RefCell<Vec<CommandLine>>,
}

impl RecordingRunner {
    pub(crate) fn with_exit_codes<'a>(codes: impl IntoIterator<Item = (&'a str, i32)>) -> Self {
        Self {
            exit_codes: codes
                .into_iter()
                .map(|(line, code)| (line.to_string(), code))
                .collect(),
            ..Self::default()
        }
    }

    /// Every run creates `dir`, the way a scaffolding command would.
    pub(crate) fn creating(dir: impl Into<PathBuf>) -> Self {
        Self {
            creates: Some(dir.into()),
            ..Self::default()
        }
    }

    pub(crate) fn commands(&self) -> Vec<CommandLine> {
        self.commands.borrow().clone()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.commands.borrow().iter().map(|c| c.line.clone()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandLine) -> Result<i32> {
        self.commands.borrow_mut().push(command.clone());
        if let Some(dir) = &self.creates {
            std::fs::create_dir_all(dir).unwrap();
            std::fs::write(dir.join("pom.xml"), "<project/>").unwrap();
        }
        Ok(self.exit_codes.get(&command.line).copied().unwrap_or(0))
    }
}

/// Provisioner for both strategies that materializes a stub project.
#[derive(Default)]
pub(crate) struct FakeProvisioner {
    /// Leave the project directory uncreated.
    pub(crate) skip_create: bool,
    /// Fail every call with a provisioning error.
    pub(crate) fail: bool,
    pub(crate) calls: RefCell<Vec<String>>,
}

impl FakeProvisioner {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Calls as `generate:<preset>` or `download:<preset>`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn provision(&self, action: &str, preset: &Preset, dir: &Path) -> Result<PathBuf> {
        self.calls.borrow_mut().push(format!("{}:{}", action, preset));
        if self.fail {
            return Err(PitError::NetworkError(format!("{} refused", preset)));
        }

        let project = dir.join(preset.dir_name());
        if !self.skip_create {
            std::fs::create_dir_all(&project).unwrap();
            std::fs::write(project.join("pom.xml"), "<project/>").unwrap();
        }
        Ok(project)
    }
}

impl GeneratorProvisioner for FakeProvisioner {
    fn generate(&self, preset: &Preset, working_dir: &Path) -> Result<PathBuf> {
        self.provision("generate", preset, working_dir)
    }
}

impl ArchiveProvisioner for FakeProvisioner {
    fn download(&self, preset: &Preset, target_dir: &Path) -> Result<PathBuf> {
        self.provision("download", preset, target_dir)
    }
}

#[derive(Default)]
pub(crate) struct FakeRepository {
    pub(crate) fail: bool,
    pub(crate) dirs: RefCell<Vec<PathBuf>>,
}

impl FakeRepository {
    pub(crate) fn dirs(&self) -> Vec<PathBuf> {
        self.dirs.borrow().clone()
    }
}

impl RepositoryInitializer for FakeRepository {
    fn ensure_repository(&self, dir: &Path) -> Result<RepoStatus> {
        self.dirs.borrow_mut().push(dir.to_path_buf());
        if self.fail {
            return Err(PitError::GitError("commit rejected".to_string()));
        }
        Ok(RepoStatus::Initialized)
    }
}

#[derive(Default)]
pub(crate) struct RecordingValidator {
    pub(crate) fail_on: Option<ValidationPhase>,
    pub(crate) phases: RefCell<Vec<ValidationPhase>>,
}

impl RecordingValidator {
    pub(crate) fn phases(&self) -> Vec<ValidationPhase> {
        self.phases.borrow().clone()
    }
}

impl Validator for RecordingValidator {
    fn validate(&self, _project_dir: &Path, preset: &Preset, phase: ValidationPhase) -> Result<()> {
        self.phases.borrow_mut().push(phase);
        if self.fail_on == Some(phase) {
            return Err(PitError::ValidationError(format!("{} failed {}", preset, phase)));
        }
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingVersioner {
    versions: RefCell<Vec<String>>,
}

impl RecordingVersioner {
    pub(crate) fn versions(&self) -> Vec<String> {
        self.versions.borrow().clone()
    }
}

impl VersionRewriter for RecordingVersioner {
    fn rewrite(&self, _project_dir: &Path, _preset: &Preset, version: &str) -> Result<()> {
        self.versions.borrow_mut().push(version.to_string());
        Ok(())
    }
}
