//! Project validation between pipeline phases.
//!
//! The pipeline validates the provisioned project after setup and again after
//! the version rewrite. Without configured steps a phase only logs.

pub mod pipeline;

pub use pipeline::{ValidationStepResult, ValidationStepStatus, run_validation_steps};

use crate::config::Config;
use crate::error::{PitError, Result};
use crate::preset::Preset;
use crate::process::CommandRunner;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

/// Points in the pipeline where validation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPhase {
    PostSetup,
    PostVersion,
}

impl ValidationPhase {
    pub const ALL: [ValidationPhase; 2] = [ValidationPhase::PostSetup, ValidationPhase::PostVersion];

    pub fn label(self) -> &'static str {
        match self {
            ValidationPhase::PostSetup => "post-setup",
            ValidationPhase::PostVersion => "post-version",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl fmt::Display for ValidationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Checks a project directory at a pipeline phase.
pub trait Validator {
    fn validate(&self, project_dir: &Path, preset: &Preset, phase: ValidationPhase) -> Result<()>;
}

/// Validator driven by the `validations` section of the config.
pub struct ProjectValidator<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
}

impl<'a> ProjectValidator<'a> {
    pub fn new(config: &'a Config, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }
}

impl Validator for ProjectValidator<'_> {
    fn validate(&self, project_dir: &Path, preset: &Preset, phase: ValidationPhase) -> Result<()> {
        info!("[Validation] Phase: {} for {}", phase, project_dir.display());

        let steps = self.config.validation_steps(phase);
        if steps.is_empty() {
            return Ok(());
        }

        let results = run_validation_steps(steps, project_dir, self.runner);
        let failures: Vec<&ValidationStepResult> =
            results.iter().filter(|r| !r.is_success()).collect();

        for result in &results {
            match &result.message {
                Some(msg) if !result.is_success() => warn!(step = %result.name, "FAIL: {}", msg),
                _ => info!(step = %result.name, "PASS"),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(PitError::ValidationError(format!(
                "{} {} check(s) failed for {}: {}",
                failures.len(),
                phase,
                preset,
                failures
                    .iter()
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationStep;
    use crate::test_support::RecordingRunner;
    use tempfile::TempDir;

    fn config_with(phase: ValidationPhase, steps: Vec<ValidationStep>) -> Config {
        let mut config = Config::default();
        config.validations.insert(phase.label().to_string(), steps);
        config
    }

    #[test]
    fn test_phase_labels_round_trip() {
        for phase in ValidationPhase::ALL {
            assert_eq!(ValidationPhase::from_label(phase.label()), Some(phase));
        }
        assert_eq!(ValidationPhase::from_label("post-build"), None);
    }

    #[test]
    fn test_without_steps_only_logs() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let runner = RecordingRunner::default();
        let validator = ProjectValidator::new(&config, &runner);

        let preset = Preset::parse("react").unwrap();
        validator
            .validate(temp.path(), &preset, ValidationPhase::PostSetup)
            .unwrap();
        assert!(runner.lines().is_empty());
    }

    #[test]
    fn test_failing_step_is_validation_error() {
        let temp = TempDir::new().unwrap();
        let config = config_with(
            ValidationPhase::PostSetup,
            vec![ValidationStep {
                name: "descriptor".to_string(),
                require_any: vec!["pom.xml".to_string()],
                command: None,
            }],
        );
        let runner = RecordingRunner::default();
        let validator = ProjectValidator::new(&config, &runner);
        let preset = Preset::parse("react").unwrap();

        let err = validator
            .validate(temp.path(), &preset, ValidationPhase::PostSetup)
            .unwrap_err();
        assert!(matches!(err, PitError::ValidationError(_)));
        assert!(err.to_string().contains("post-setup"));
        assert!(err.to_string().contains("descriptor"));

        // Steps for one phase do not run in the other.
        validator
            .validate(temp.path(), &preset, ValidationPhase::PostVersion)
            .unwrap();
    }
}
