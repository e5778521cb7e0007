//! Starter archives from the start service.
//!
//! The archive is saved as `<target>/<preset>.zip`, extracted in place and
//! then removed, whether or not extraction succeeded.

use super::ArchiveProvisioner;
use crate::error::{PitError, Result};
use crate::preset::Preset;
use reqwest::Url;
use reqwest::blocking::Client;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use zip::ZipArchive;

const USER_AGENT: &str = concat!("pit/", env!("CARGO_PKG_VERSION"));

/// Build the download URL for a (possibly composite) preset.
///
/// Each `_`-separated component becomes a `preset` parameter; `projectName`
/// carries the literal preset name.
pub fn archive_url(base: &str, preset: &Preset) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| PitError::UserError(format!("invalid start url '{}': {}", base, e)))?;
    {
        let mut query = url.query_pairs_mut();
        for component in preset.components() {
            query.append_pair("preset", component);
        }
        query.append_pair("projectName", preset.name());
    }
    Ok(url)
}

/// [`ArchiveProvisioner`] backed by a blocking HTTP client.
#[derive(Debug, Clone)]
pub struct StarterDownloader {
    start_url: String,
    timeout: Option<Duration>,
}

impl StarterDownloader {
    /// `timeout` of `None` waits indefinitely.
    pub fn new(start_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            start_url: start_url.into(),
            timeout,
        }
    }

    fn fetch(&self, url: &Url, dest: &Path) -> Result<()> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
            .map_err(|e| PitError::NetworkError(format!("failed to build HTTP client: {}", e)))?;

        let mut response = client
            .get(url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| PitError::NetworkError(format!("{}: {}", url, e)))?;

        let mut file = File::create(dest).map_err(|e| PitError::fs("create", dest, e))?;
        let bytes = response
            .copy_to(&mut file)
            .map_err(|e| PitError::NetworkError(format!("{}: {}", url, e)))?;

        debug!("Downloaded {} bytes to {}", bytes, dest.display());
        Ok(())
    }
}

impl ArchiveProvisioner for StarterDownloader {
    fn download(&self, preset: &Preset, target_dir: &Path) -> Result<PathBuf> {
        let url = archive_url(&self.start_url, preset)?;
        let zip_path = target_dir.join(format!("{}.zip", preset.name()));

        info!("Downloading starter {}", preset);
        debug!("GET {}", url);

        let fetched = self.fetch(&url, &zip_path);
        let extracted = fetched.and_then(|()| extract_archive(&zip_path, target_dir));

        if let Err(e) = std::fs::remove_file(&zip_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to remove {}: {}", zip_path.display(), e);
            }
        }

        let entries = extracted?;
        debug!("Extracted {} entries into {}", entries, target_dir.display());
        Ok(target_dir.join(preset.dir_name()))
    }
}

/// Extract every entry of `archive` into `dest`, returning the entry count.
///
/// Entries that would land outside `dest` are rejected. Unix permission bits
/// recorded in the archive are restored on files.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(archive).map_err(|e| {
        PitError::ArchiveError(format!("failed to open '{}': {}", archive.display(), e))
    })?;
    let mut zip = ZipArchive::new(file)
        .map_err(|e| PitError::ArchiveError(format!("'{}': {}", archive.display(), e)))?;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| PitError::ArchiveError(format!("'{}': {}", archive.display(), e)))?;

        let relative = entry.enclosed_name().ok_or_else(|| {
            PitError::ArchiveError(format!(
                "entry '{}' escapes the target directory",
                entry.name()
            ))
        })?;
        let out_path = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)
                .map_err(|e| PitError::fs("create directory", &out_path, e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PitError::fs("create directory", parent, e))?;
        }
        let mut out = File::create(&out_path).map_err(|e| PitError::fs("create", &out_path, e))?;
        std::io::copy(&mut entry, &mut out).map_err(|e| {
            PitError::ArchiveError(format!("failed to extract '{}': {}", entry.name(), e))
        })?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode & 0o7777))
                .map_err(|e| PitError::fs("set permissions on", &out_path, e))?;
        }
    }

    Ok(zip.len())
}
