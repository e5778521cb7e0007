//! Atomic file replacement.
//!
//! Build descriptors are rewritten by writing a sibling temp file, syncing
//! it, and renaming it over the original, so an interrupted run never leaves
//! a half-written `pom.xml` behind.
//!
//! Source and destination share a directory, so the rename stays on one
//! filesystem. On crash a `.{filename}.tmp` file may remain.

use crate::error::{PitError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replace the contents of `path` with `content`.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path)?;

    write_and_sync(&temp_path, content.as_bytes())?;

    // std::fs::rename replaces an existing target on every supported platform.
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PitError::fs("replace", path, e)
    })
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            PitError::FilesystemError(format!("invalid file path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| PitError::fs("create", path, e))?;

    file.write_all(content)
        .and_then(|_| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            PitError::fs("write", path, e)
        })
}
