//! Config loading, validation, and accessors.

use super::model::Config;
use super::types::ValidationStep;
use crate::error::{PitError, Result};
use crate::repo::GitIdentity;
use crate::template::CommandTemplate;
use crate::validate::ValidationPhase;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "pit.yaml";

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(PitError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PitError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the config for a run.
    ///
    /// An explicit path must exist. Otherwise `pit.yaml` in `cwd` is used when
    /// present, and built-in defaults when not.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Ok((Self::load(&candidate)?, Some(candidate)))
        } else {
            Ok((Self::default(), None))
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| PitError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `start_url` must be an absolute http(s) URL
    /// - `tmp_dir` must be non-empty and `port` non-zero
    /// - generator templates may only reference `{name}`
    /// - validation phases must be known labels, and every step needs a name
    ///   and at least one check
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.start_url).map_err(|e| {
            PitError::UserError(format!(
                "config validation failed: start_url '{}' is not a valid URL: {}",
                self.start_url, e
            ))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(PitError::UserError(format!(
                "config validation failed: start_url must use http or https (found '{}')",
                url.scheme()
            )));
        }

        if self.tmp_dir.trim().is_empty() {
            return Err(PitError::UserError(
                "config validation failed: tmp_dir must not be empty".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(PitError::UserError(
                "config validation failed: port must be greater than 0".to_string(),
            ));
        }

        if self.maven_version_property.trim().is_empty()
            || self.gradle_version_property.trim().is_empty()
        {
            return Err(PitError::UserError(
                "config validation failed: version property names must not be empty".to_string(),
            ));
        }

        for (key, template) in self.generators.named() {
            let parsed = CommandTemplate::parse(template).map_err(|e| {
                PitError::UserError(format!(
                    "config validation failed: generators.{}: {}",
                    key, e
                ))
            })?;
            if !parsed.uses_name() {
                return Err(PitError::UserError(format!(
                    "config validation failed: generators.{} must use {{name}} for the project directory",
                    key
                )));
            }
        }

        for (phase, steps) in &self.validations {
            if ValidationPhase::from_label(phase).is_none() {
                return Err(PitError::UserError(format!(
                    "config validation failed: unknown validation phase '{}' (expected one of: {})",
                    phase,
                    ValidationPhase::ALL
                        .iter()
                        .map(|p| p.label())
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }
            for step in steps {
                validate_step(phase, step)?;
            }
        }

        Ok(())
    }

    /// Identity used for the initial commit when git has none configured.
    pub fn git_identity(&self) -> GitIdentity {
        GitIdentity {
            name: self.git_user_name.clone(),
            email: self.git_user_email.clone(),
        }
    }

    /// Download timeout, `None` when disabled.
    pub fn download_timeout(&self) -> Option<Duration> {
        match self.download_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Validation steps configured for a phase.
    pub fn validation_steps(&self, phase: ValidationPhase) -> &[ValidationStep] {
        self.validations
            .get(phase.label())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn validate_step(phase: &str, step: &ValidationStep) -> Result<()> {
    if step.name.trim().is_empty() {
        return Err(PitError::UserError(format!(
            "config validation failed: a '{}' validation step has no name",
            phase
        )));
    }

    let has_command = step
        .command
        .as_deref()
        .is_some_and(|c| !c.trim().is_empty());
    if step.require_any.is_empty() && !has_command {
        return Err(PitError::UserError(format!(
            "config validation failed: validation step '{}' needs `require_any` or `command`",
            step.name
        )));
    }

    Ok(())
}
