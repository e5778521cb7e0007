//! Error types for the pit CLI.
//!
//! Uses thiserror for derive macros and provides operator-readable messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for pit operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum PitError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// The generator has no command for this preset.
    #[error("don't know how to generate preset '{0}'")]
    UnsupportedPreset(String),

    /// An external command ran and exited with a non-zero code.
    #[error("command `{command}` failed with exit code {code}")]
    CommandFailed { command: String, code: i32 },

    /// An external command could not be started or waited on.
    #[error("failed to execute `{command}`: {reason}")]
    CommandSpawn { command: String, reason: String },

    /// Fetching a starter archive failed at the transport or HTTP level.
    #[error("download failed: {0}")]
    NetworkError(String),

    /// A fetched starter archive could not be read or extracted.
    #[error("archive extraction failed: {0}")]
    ArchiveError(String),

    /// Creating or deleting a directory failed.
    #[error("filesystem operation failed: {0}")]
    FilesystemError(String),

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// A configured validation step failed.
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl PitError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PitError::UserError(_) => exit_codes::USER_ERROR,
            PitError::UnsupportedPreset(_)
            | PitError::NetworkError(_)
            | PitError::ArchiveError(_) => exit_codes::PROVISION_FAILURE,
            PitError::CommandFailed { .. } | PitError::CommandSpawn { .. } => {
                exit_codes::COMMAND_FAILURE
            }
            PitError::FilesystemError(_) => exit_codes::FILESYSTEM_FAILURE,
            PitError::GitError(_) => exit_codes::GIT_FAILURE,
            PitError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
        }
    }

    /// Wrap an I/O error on `path` as a filesystem error.
    pub fn fs(action: &str, path: &std::path::Path, err: std::io::Error) -> Self {
        PitError::FilesystemError(format!("failed to {} '{}': {}", action, path.display(), err))
    }
}

/// Result type alias for pit operations.
pub type Result<T> = std::result::Result<T, PitError>;
