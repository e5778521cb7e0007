//! Validation step execution.
//!
//! A step can require that some project file matches a glob and/or that a
//! shell command succeeds in the project directory.

use crate::config::ValidationStep;
use crate::process::{CommandLine, CommandRunner};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use walkdir::WalkDir;

/// Directories never searched for `require_any` matches.
const SKIPPED_DIRS: &[&str] = &[".git", "node_modules", "target", "build"];

/// Status of a validation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStepStatus {
    Pass,
    Fail,
}

/// Result of a single validation step.
#[derive(Debug, Clone)]
pub struct ValidationStepResult {
    pub name: String,
    pub status: ValidationStepStatus,
    pub message: Option<String>,
}

impl ValidationStepResult {
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ValidationStepStatus::Pass,
            message: None,
        }
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ValidationStepStatus::Fail,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ValidationStepStatus::Pass
    }
}

/// Run an ordered list of validation steps in the project directory.
pub fn run_validation_steps(
    steps: &[ValidationStep],
    project_dir: &Path,
    runner: &dyn CommandRunner,
) -> Vec<ValidationStepResult> {
    steps
        .iter()
        .map(|step| run_validation_step(step, project_dir, runner))
        .collect()
}

fn run_validation_step(
    step: &ValidationStep,
    project_dir: &Path,
    runner: &dyn CommandRunner,
) -> ValidationStepResult {
    if !step.require_any.is_empty() {
        let globs = match build_globset(&step.require_any) {
            Ok(globs) => globs,
            Err(e) => {
                return ValidationStepResult::fail(
                    &step.name,
                    format!("invalid glob in require_any: {}", e),
                );
            }
        };

        if !any_file_matches(project_dir, &globs) {
            return ValidationStepResult::fail(
                &step.name,
                format!(
                    "no file in {} matches any of: {}",
                    project_dir.display(),
                    step.require_any.join(", ")
                ),
            );
        }
    }

    if let Some(command) = step.command.as_deref().map(str::trim) {
        if !command.is_empty() {
            let line = CommandLine::new(command, project_dir);
            match runner.run(&line) {
                Ok(0) => {}
                Ok(code) => {
                    return ValidationStepResult::fail(
                        &step.name,
                        format!("Command failed with exit code {}\nCommand: {}", code, command),
                    );
                }
                Err(e) => return ValidationStepResult::fail(&step.name, e.to_string()),
            }
        }
    }

    ValidationStepResult::pass(&step.name)
}

fn any_file_matches(root: &Path, globs: &GlobSet) -> bool {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .any(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .map(|rel| globs.is_match(normalize(rel)))
                .unwrap_or(false)
        })
}

fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let normalized = pattern.trim().replace('\\', "/");
        if normalized.is_empty() {
            continue;
        }
        builder.add(Glob::new(&normalized)?);
    }

    builder.build()
}
