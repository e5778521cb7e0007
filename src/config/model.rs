//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for a pit run.
///
/// This struct represents the contents of `pit.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Provisioning
    // =========================================================================
    /// Start-service endpoint that returns starter archives.
    #[serde(default = "default_start_url")]
    pub start_url: String,

    /// Base directory that holds one project directory per preset.
    #[serde(default = "default_tmp_dir")]
    pub tmp_dir: String,

    /// Seconds before an archive download is abandoned (0 disables).
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,

    /// Commands that generate presets locally.
    #[serde(default)]
    pub generators: GeneratorTemplates,

    // =========================================================================
    // Running
    // =========================================================================
    /// Port the application under test listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    // =========================================================================
    // Git settings
    // =========================================================================
    /// Committer name used when none is configured in git.
    #[serde(default = "default_git_user_name")]
    pub git_user_name: String,

    /// Committer email used when none is configured in git.
    #[serde(default = "default_git_user_email")]
    pub git_user_email: String,

    // =========================================================================
    // Version rewriting
    // =========================================================================
    /// Rewrite version properties in build descriptors when a version is given.
    /// When false the version step only logs.
    #[serde(default)]
    pub rewrite_versions: bool,

    /// Maven property holding the platform version.
    #[serde(default = "default_maven_version_property")]
    pub maven_version_property: String,

    /// Gradle property holding the platform version.
    #[serde(default = "default_gradle_version_property")]
    pub gradle_version_property: String,

    // =========================================================================
    // Validation settings
    // =========================================================================
    /// Validation steps keyed by phase label (`post-setup`, `post-version`).
    #[serde(default)]
    pub validations: BTreeMap<String, Vec<ValidationStep>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_url: default_start_url(),
            tmp_dir: default_tmp_dir(),
            download_timeout_secs: default_download_timeout_secs(),
            generators: GeneratorTemplates::default(),
            port: default_port(),
            git_user_name: default_git_user_name(),
            git_user_email: default_git_user_email(),
            rewrite_versions: false,
            maven_version_property: default_maven_version_property(),
            gradle_version_property: default_gradle_version_property(),
            validations: BTreeMap::new(),
        }
    }
}
