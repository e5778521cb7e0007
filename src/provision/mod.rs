//! Project provisioning.
//!
//! A preset's project directory is materialized either by running a
//! scaffolding command ([`StarterGenerator`]) or by downloading a generated
//! archive from the start service ([`StarterDownloader`]). Which one applies
//! is decided by [`Preset::strategy`](crate::preset::Preset::strategy).

pub mod archive;
pub mod generator;

pub use archive::{StarterDownloader, archive_url, extract_archive};
pub use generator::{StarterGenerator, generator_command};

use crate::error::Result;
use crate::preset::Preset;
use std::path::{Path, PathBuf};

/// Materializes a project by running a generator in `working_dir`.
pub trait GeneratorProvisioner {
    /// Returns `<working_dir>/<dir_name>`.
    fn generate(&self, preset: &Preset, working_dir: &Path) -> Result<PathBuf>;
}

/// Materializes a project by fetching and extracting an archive into `target_dir`.
pub trait ArchiveProvisioner {
    /// Returns `<target_dir>/<dir_name>`.
    fn download(&self, preset: &Preset, target_dir: &Path) -> Result<PathBuf>;
}
