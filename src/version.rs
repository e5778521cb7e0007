//! Platform version rewriting for provisioned projects.

use crate::config::Config;
use crate::error::{PitError, Result};
use crate::fs::atomic_write_file;
use crate::preset::Preset;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Directories never searched for `pom.xml` files.
const SKIPPED_DIRS: &[&str] = &["target", "bin", "node_modules", ".git"];

/// Sets the platform version declared by a project.
pub trait VersionRewriter {
    fn rewrite(&self, project_dir: &Path, preset: &Preset, version: &str) -> Result<()>;
}

/// Records the requested version without touching any file.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingVersionRewriter;

impl VersionRewriter for LoggingVersionRewriter {
    fn rewrite(&self, project_dir: &Path, _preset: &Preset, version: &str) -> Result<()> {
        info!(
            "[Versioning] Setting version to {} in {}",
            version,
            project_dir.display()
        );
        Ok(())
    }
}

/// Rewrites the version property in `pom.xml` and `gradle.properties` files.
#[derive(Debug, Clone)]
pub struct PropertyVersionRewriter {
    maven_property: String,
    gradle_property: String,
}

impl PropertyVersionRewriter {
    pub fn new(maven_property: impl Into<String>, gradle_property: impl Into<String>) -> Self {
        Self {
            maven_property: maven_property.into(),
            gradle_property: gradle_property.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.maven_version_property, &config.gradle_version_property)
    }

    fn maven_pattern(&self) -> Result<Regex> {
        let prop = regex::escape(&self.maven_property);
        compile(&format!(r"(<{prop}>)[^<]*(</{prop}>)"))
    }

    fn gradle_pattern(&self) -> Result<Regex> {
        let prop = regex::escape(&self.gradle_property);
        compile(&format!(r"(?m)^([ \t]*{prop}[ \t]*=[ \t]*)[^\r\n]*"))
    }
}

impl VersionRewriter for PropertyVersionRewriter {
    fn rewrite(&self, project_dir: &Path, preset: &Preset, version: &str) -> Result<()> {
        let maven = self.maven_pattern()?;
        let gradle = self.gradle_pattern()?;
        let mut changed = Vec::new();

        for pom in pom_files(project_dir) {
            if rewrite_file(&pom, &maven, |caps| {
                format!("{}{}{}", &caps[1], version, &caps[2])
            })? {
                changed.push(pom);
            }
        }

        let gradle_props = project_dir.join("gradle.properties");
        if gradle_props.is_file()
            && rewrite_file(&gradle_props, &gradle, |caps| format!("{}{}", &caps[1], version))?
        {
            changed.push(gradle_props);
        }

        if changed.is_empty() {
            warn!(
                "[Versioning] No {} or {} property found for {} in {}",
                self.maven_property,
                self.gradle_property,
                preset,
                project_dir.display()
            );
        }
        for path in &changed {
            info!("[Versioning] Set version {} in {}", version, path.display());
        }
        Ok(())
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| PitError::UserError(format!("invalid version property pattern: {}", e)))
}

/// Apply `pattern` to a file, writing it back only when the content changed.
fn rewrite_file<F>(path: &Path, pattern: &Regex, replace: F) -> Result<bool>
where
    F: Fn(&Captures) -> String,
{
    let content = std::fs::read_to_string(path).map_err(|e| PitError::fs("read", path, e))?;
    let updated = pattern.replace_all(&content, |caps: &Captures| replace(caps));

    if updated == content {
        return Ok(false);
    }
    atomic_write_file(path, &updated)?;
    Ok(true)
}

fn pom_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !(entry.file_type().is_dir()
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == "pom.xml")
        .map(|entry| entry.into_path())
        .collect()
}
