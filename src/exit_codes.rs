//! Exit code constants for the pit CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, bad config, unknown preset name)
//! - 2: Provisioning failure (unsupported preset, download or archive error)
//! - 3: External command failure (non-zero exit or spawn failure)
//! - 4: Git operation failure
//! - 5: Filesystem failure
//! - 6: Project validation failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or empty preset name.
pub const USER_ERROR: i32 = 1;

/// Provisioning failure: unsupported preset, network or archive error.
pub const PROVISION_FAILURE: i32 = 2;

/// An external command exited non-zero or could not be started.
pub const COMMAND_FAILURE: i32 = 3;

/// Git operation failure while initializing a project repository.
pub const GIT_FAILURE: i32 = 4;

/// Directory creation or removal failed.
pub const FILESYSTEM_FAILURE: i32 = 5;

/// A configured validation step failed.
pub const VALIDATION_FAILURE: i32 = 6;
