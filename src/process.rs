//! External command execution.
//!
//! Build, run and generator commands are passed to the host shell with the
//! parent's stdin/stdout/stderr inherited, so the operator watches their
//! output live. Nothing is captured or replayed.

use crate::error::{PitError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// One shell command line and the environment it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// The command, interpreted by the host shell.
    pub line: String,
    /// Working directory.
    pub cwd: PathBuf,
    /// Extra environment variables layered over the inherited environment.
    pub env: Vec<(String, String)>,
}

impl CommandLine {
    pub fn new(line: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            line: line.into(),
            cwd: cwd.as_ref().to_path_buf(),
            env: Vec::new(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Runs command lines and reports their exit code.
pub trait CommandRunner {
    /// Run the command to completion.
    ///
    /// Returns the exit code (`-1` when the process was terminated by a
    /// signal). Failing to start or wait for the process is an error.
    fn run(&self, command: &CommandLine) -> Result<i32>;
}

/// Runs commands through `sh -c` (or `cmd /C` on Windows) with inherited I/O.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &CommandLine) -> Result<i32> {
        debug!(cwd = %command.cwd.display(), "spawning: {}", command.line);

        let mut cmd = shell_command(&command.line);
        cmd.current_dir(&command.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        for (key, value) in &command.env {
            cmd.env(key, value);
        }

        let status = cmd
            .spawn()
            .and_then(|mut child| child.wait())
            .map_err(|e| PitError::CommandSpawn {
                command: command.line.clone(),
                reason: format!("{} (in {})", e, command.cwd.display()),
            })?;

        Ok(status.code().unwrap_or(-1))
    }
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new("cmd.exe");
    cmd.arg("/C").arg(line);
    cmd
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new("/bin/sh");
    cmd.arg("-c").arg(line);
    cmd
}

/// Run a command and treat a non-zero exit as [`PitError::CommandFailed`].
pub fn run_checked(runner: &dyn CommandRunner, command: &CommandLine) -> Result<()> {
    match runner.run(command)? {
        0 => Ok(()),
        code => Err(PitError::CommandFailed {
            command: command.line.clone(),
            code,
        }),
    }
}
