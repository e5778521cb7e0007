//! Git command runner for pit.
//!
//! Wraps git invocations with captured stdout/stderr. Unlike build commands,
//! git output is never streamed to the terminal.

use crate::error::{PitError, Result};
use std::path::Path;
use std::process::{Command, Output};

/// Captured output of a git command.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
    /// Whether git exited with status 0.
    pub success: bool,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            success: output.status.success(),
        }
    }

    /// Stdout and stderr joined, the way an operator would see them.
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout, self.stderr),
        }
    }
}

fn spawn_git(cwd: &Path, args: &[&str]) -> Result<Output> {
    Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            PitError::GitError(format!(
                "failed to execute git {}: {} (is git installed?)",
                args.first().unwrap_or(&""),
                e
            ))
        })
}

/// Run a git command, failing on a non-zero exit code.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On exit code 0
/// * `Err(PitError::GitError)` - On spawn failure or non-zero exit
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let output = spawn_git(cwd.as_ref(), args)?;
    let git_output = GitOutput::from_output(&output);

    if git_output.success {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.clone()
        } else {
            git_output.stderr.clone()
        };

        Err(PitError::GitError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            exit_code,
            error_msg
        )))
    }
}

/// Run a git command whose exit code is informational.
///
/// Lookups such as `git config user.email` exit non-zero when the key is
/// unset; callers inspect [`GitOutput::success`] instead. Only a failure to
/// start git is an error.
pub fn query_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let output = spawn_git(cwd.as_ref(), args)?;
    Ok(GitOutput::from_output(&output))
}

/// Number of commits reachable from HEAD, or 0 when HEAD is unborn.
pub fn commit_count<P: AsRef<Path>>(cwd: P) -> Result<usize> {
    let output = query_git(cwd, &["rev-list", "--count", "HEAD"])?;
    if !output.success {
        return Ok(0);
    }
    output
        .stdout
        .parse()
        .map_err(|e| PitError::GitError(format!("unexpected rev-list output '{}': {}", output.stdout, e)))
}
