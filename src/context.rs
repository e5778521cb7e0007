//! Run context resolution for pit.
//!
//! Combines the config file (if any) with command-line overrides and fixes
//! the base directory every project directory lives under. All commands
//! resolve their environment through this module.

use crate::cli::GlobalArgs;
use crate::config::Config;
use crate::error::{PitError, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: Config,

    /// Config file the settings came from, `None` for built-in defaults.
    pub config_path: Option<PathBuf>,

    /// Absolute directory holding one project directory per preset.
    pub base_dir: PathBuf,
}

impl RunContext {
    /// Resolve the context from the current working directory.
    ///
    /// `tmp_override` replaces the config's `tmp_dir`. Relative paths are
    /// taken from the current directory.
    pub fn resolve(global: &GlobalArgs, tmp_override: Option<&Path>) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            PitError::UserError(format!("failed to get current working directory: {}", e))
        })?;
        Self::resolve_from(&cwd, global, tmp_override)
    }

    /// Resolve the context from a specific directory.
    pub fn resolve_from(
        cwd: &Path,
        global: &GlobalArgs,
        tmp_override: Option<&Path>,
    ) -> Result<Self> {
        let explicit = global.config.as_deref().map(|p| cwd.join(p));
        let (config, config_path) = Config::discover(explicit.as_deref(), cwd)?;

        let base_dir = match tmp_override {
            Some(dir) => cwd.join(dir),
            None => cwd.join(&config.tmp_dir),
        };

        debug!(
            config = ?config_path.as_ref().map(|p| p.display().to_string()),
            base_dir = %base_dir.display(),
            "resolved run context"
        );

        Ok(Self {
            config,
            config_path,
            base_dir,
        })
    }
}
