//! Filesystem utilities for pit.
//!
//! Directory lifecycle for project directories plus atomic file rewrites.

pub mod atomic;

pub use atomic::atomic_write_file;

use crate::error::{PitError, Result};
use std::path::Path;

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| PitError::fs("create directory", dir, e))
}

/// Recursively delete `dir` if it exists. Returns whether anything was removed.
pub fn remove_dir_if_exists(dir: &Path) -> Result<bool> {
    match std::fs::symlink_metadata(dir) {
        Ok(meta) if meta.is_dir() => {
            std::fs::remove_dir_all(dir).map_err(|e| PitError::fs("remove directory", dir, e))?;
            Ok(true)
        }
        Ok(_) => {
            std::fs::remove_file(dir).map_err(|e| PitError::fs("remove", dir, e))?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PitError::fs("inspect", dir, e)),
    }
}
