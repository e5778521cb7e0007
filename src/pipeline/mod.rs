//! Per-preset pipeline execution.
//!
//! Each preset runs strictly in order:
//! provision, repository, validate (post-setup), version, validate
//! (post-version), build, run. The first failure ends that preset.
//!
//! Whether a failure also ends the whole run is decided by
//! [`Phase::aborts_run`]: a failing run command is logged and the next
//! preset still runs, every other phase stops everything.


use crate::error::{PitError, Result};
use crate::fs::remove_dir_if_exists;
use crate::preset::{Preset, ProvisionStrategy};
use crate::process::{CommandLine, CommandRunner, run_checked};
use crate::provision::{ArchiveProvisioner, GeneratorProvisioner};
use crate::repo::RepositoryInitializer;
use crate::resolve;
use crate::validate::{ValidationPhase, Validator};
use crate::version::VersionRewriter;
use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Environment variables that carry the application port.
pub const PORT_ENV_VARS: [&str; 3] = ["PORT", "SERVER_PORT", "QUARKUS_HTTP_PORT"];

/// Pipeline stage a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Provision,
    Validate,
    Version,
    Build,
    Run,
}

impl Phase {
    /// Whether a failure in this phase stops the remaining presets.
    pub fn aborts_run(self) -> bool {
        !matches!(self, Phase::Run)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Provision => "provision",
            Phase::Validate => "validate",
            Phase::Version => "version",
            Phase::Build => "build",
            Phase::Run => "run",
        };
        f.write_str(label)
    }
}

/// Which run command the pipeline ends with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Development server (`run-dev` command).
    #[default]
    Dev,
    /// Production build output (`run-prod` command).
    Prod,
}

impl RunMode {
    pub fn command(self, preset: &Preset) -> &'static str {
        match self {
            RunMode::Dev => resolve::run_dev_command(preset),
            RunMode::Prod => resolve::run_prod_command(preset),
        }
    }
}

/// The error that ended a preset's pipeline and where it happened.
#[derive(Debug)]
pub struct PhaseFailure {
    pub phase: Phase,
    pub error: PitError,
}

fn at(phase: Phase) -> impl FnOnce(PitError) -> PhaseFailure {
    move |error| PhaseFailure { phase, error }
}

/// Result of running one preset.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub preset: String,
    pub failure: Option<PhaseFailure>,
}

impl PipelineOutcome {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    pub fn failing_phase(&self) -> Option<Phase> {
        self.failure.as_ref().map(|f| f.phase)
    }

    /// Whether this outcome stops the remaining presets.
    pub fn is_fatal(&self) -> bool {
        self.failing_phase().is_some_and(Phase::aborts_run)
    }

    /// Hand back the error of a fatal outcome, or the outcome itself otherwise.
    pub fn into_fatal(self) -> Result<Self> {
        match self.failure {
            Some(failure) if failure.phase.aborts_run() => Err(failure.error),
            failure => Ok(Self {
                preset: self.preset,
                failure,
            }),
        }
    }
}

/// Outcomes of every preset that ran, in order.
///
/// A fatal outcome ends the run, so only the last outcome can be fatal.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<PipelineOutcome>,
}

impl RunReport {
    pub fn fatal(&self) -> Option<&PipelineOutcome> {
        self.outcomes.last().filter(|o| o.is_fatal())
    }

    /// The error that cut the run short, if any.
    pub fn into_result(self) -> Result<()> {
        match self.outcomes.into_iter().last() {
            Some(last) => last.into_fatal().map(|_| ()),
            None => Ok(()),
        }
    }
}

/// External collaborators a pipeline drives.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub generator: &'a dyn GeneratorProvisioner,
    pub downloader: &'a dyn ArchiveProvisioner,
    pub repository: &'a dyn RepositoryInitializer,
    pub validator: &'a dyn Validator,
    pub versioner: &'a dyn VersionRewriter,
    pub runner: &'a dyn CommandRunner,
}

/// Per-run settings shared by every preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Directory holding one project directory per preset.
    pub base_dir: PathBuf,
    /// Reuse an existing project directory instead of provisioning again.
    pub offline: bool,
    /// Platform version to write into the project, if any.
    pub target_version: Option<String>,
    pub port: u16,
    pub mode: RunMode,
}

pub struct Pipeline<'a> {
    collaborators: Collaborators<'a>,
    settings: PipelineSettings,
}

impl<'a> Pipeline<'a> {
    pub fn new(collaborators: Collaborators<'a>, settings: PipelineSettings) -> Self {
        Self {
            collaborators,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// `<base_dir>/<dir_name>`.
    pub fn project_dir(&self, preset: &Preset) -> PathBuf {
        self.settings.base_dir.join(preset.dir_name())
    }

    /// Run presets in order, stopping after the first fatal outcome.
    pub fn run_all(&self, presets: &[Preset]) -> RunReport {
        let mut report = RunReport::default();
        for preset in presets {
            let outcome = self.run(preset);
            let fatal = outcome.is_fatal();
            report.outcomes.push(outcome);
            if fatal {
                break;
            }
        }
        report
    }

    /// Run the full pipeline for one preset.
    pub fn run(&self, preset: &Preset) -> PipelineOutcome {
        info!("Running preset {}", preset);
        let project_dir = self.project_dir(preset);
        let failure = self.execute(preset, &project_dir).err();

        match &failure {
            None => info!("Preset {} completed", preset),
            Some(f) if f.phase.aborts_run() => {
                error!(preset = %preset, phase = %f.phase, "{}", f.error)
            }
            Some(f) => warn!(preset = %preset, phase = %f.phase, "{}", f.error),
        }

        PipelineOutcome {
            preset: preset.name().to_string(),
            failure,
        }
    }

    fn execute(&self, preset: &Preset, dir: &Path) -> std::result::Result<(), PhaseFailure> {
        let c = &self.collaborators;

        self.provision(preset, dir).map_err(at(Phase::Provision))?;
        c.repository
            .ensure_repository(dir)
            .map_err(at(Phase::Provision))?;

        c.validator
            .validate(dir, preset, ValidationPhase::PostSetup)
            .map_err(at(Phase::Validate))?;

        if let Some(version) = self.target_version() {
            c.versioner
                .rewrite(dir, preset, version)
                .map_err(at(Phase::Version))?;
        }

        c.validator
            .validate(dir, preset, ValidationPhase::PostVersion)
            .map_err(at(Phase::Validate))?;

        let build = resolve::build_command(preset);
        info!("[Command] Building project: {}", build);
        run_checked(c.runner, &self.command(build, dir)).map_err(at(Phase::Build))?;

        let run = self.settings.mode.command(preset);
        info!("[Command] Running project ({:?}): {}", self.settings.mode, run);
        run_checked(c.runner, &self.command(run, dir)).map_err(at(Phase::Run))
    }

    fn provision(&self, preset: &Preset, dir: &Path) -> Result<()> {
        ensure_project_dir(&self.settings.base_dir, dir)?;

        if self.settings.offline && dir.exists() {
            info!("Offline: reusing {}", dir.display());
            return Ok(());
        }

        if remove_dir_if_exists(dir)? {
            debug!("Removed previous {}", dir.display());
        }

        let base = &self.settings.base_dir;
        let produced = match preset.strategy() {
            ProvisionStrategy::Generate => self.collaborators.generator.generate(preset, base)?,
            ProvisionStrategy::Download => self.collaborators.downloader.download(preset, base)?,
        };
        debug!("Provisioned {} at {}", preset, produced.display());

        if !dir.is_dir() {
            return Err(PitError::FilesystemError(format!(
                "provisioning {} did not create '{}'",
                preset,
                dir.display()
            )));
        }
        Ok(())
    }

    fn target_version(&self) -> Option<&str> {
        self.settings
            .target_version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn command(&self, line: &str, dir: &Path) -> CommandLine {
        let port = self.settings.port.to_string();
        PORT_ENV_VARS
            .iter()
            .fold(CommandLine::new(line, dir), |cmd, key| {
                cmd.with_env(*key, port.as_str())
            })
    }
}

/// Refuse any project directory that is not a plain entry directly under
/// `base`, since provisioning deletes it first.
pub(crate) fn ensure_project_dir(base: &Path, dir: &Path) -> Result<()> {
    let direct_child = dir.parent() == Some(base)
        && matches!(dir.components().next_back(), Some(Component::Normal(_)));
    if direct_child {
        Ok(())
    } else {
        Err(PitError::FilesystemError(format!(
            "refusing to replace '{}': not a directory directly under '{}'",
            dir.display(),
            base.display()
        )))
    }
}
