//! Local project generation through scaffolding commands.

use super::GeneratorProvisioner;
use crate::config::GeneratorTemplates;
use crate::error::{PitError, Result};
use crate::preset::{ArchetypeKind, Preset, PresetKind};
use crate::process::{CommandLine, CommandRunner, run_checked};
use crate::repo::RepositoryInitializer;
use crate::template::CommandTemplate;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Render the generator command for a preset.
///
/// The project directory name is shell-quoted before it is substituted for
/// `{name}`. Kinds without a generator fail with
/// [`PitError::UnsupportedPreset`].
pub fn generator_command(templates: &GeneratorTemplates, preset: &Preset) -> Result<String> {
    let template = match preset.kind() {
        PresetKind::Archetype(ArchetypeKind::Spring) => &templates.archetype_spring,
        PresetKind::Archetype(_) => &templates.archetype,
        PresetKind::Quarkus => &templates.quarkus,
        PresetKind::HillaCli => &templates.hilla_cli,
        PresetKind::Cli | PresetKind::Initializer | PresetKind::Starter => {
            return Err(PitError::UnsupportedPreset(preset.name().to_string()));
        }
    };

    let template = CommandTemplate::parse(template).map_err(|e| {
        PitError::UserError(format!("generator template for '{}': {}", preset, e))
    })?;
    Ok(template.render(&shell_words::quote(&preset.dir_name())))
}

/// [`GeneratorProvisioner`] that runs the configured templates.
pub struct StarterGenerator<'a> {
    templates: &'a GeneratorTemplates,
    runner: &'a dyn CommandRunner,
    repository: &'a dyn RepositoryInitializer,
}

impl<'a> StarterGenerator<'a> {
    pub fn new(
        templates: &'a GeneratorTemplates,
        runner: &'a dyn CommandRunner,
        repository: &'a dyn RepositoryInitializer,
    ) -> Self {
        Self {
            templates,
            runner,
            repository,
        }
    }
}

impl GeneratorProvisioner for StarterGenerator<'_> {
    fn generate(&self, preset: &Preset, working_dir: &Path) -> Result<PathBuf> {
        let command = generator_command(self.templates, preset)?;
        info!("Generating {} with: {}", preset, command);

        run_checked(self.runner, &CommandLine::new(&command, working_dir))?;

        let project_dir = working_dir.join(preset.dir_name());
        if project_dir.is_dir() {
            self.repository.ensure_repository(&project_dir)?;
        } else {
            warn!(
                "generator for {} did not create {}",
                preset,
                project_dir.display()
            );
        }
        Ok(project_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeRepository, RecordingRunner};
    use tempfile::TempDir;

    fn command(name: &str) -> Result<String> {
        generator_command(&GeneratorTemplates::default(), &Preset::parse(name).unwrap())
    }

    #[test]
    fn test_archetype_commands() {
        let jetty = command("archetype-jetty").unwrap();
        assert!(jetty.contains("-DarchetypeArtifactId=vaadin-archetype-application "));
        assert!(jetty.ends_with("-DartifactId=archetype-jetty"));

        let spring = command("archetype-spring").unwrap();
        assert!(spring.contains("vaadin-archetype-spring-application"));
        assert!(spring.ends_with("-DartifactId=archetype-spring"));
    }

    #[test]
    fn test_quarkus_and_hilla_commands() {
        let quarkus = command("vaadin-quarkus").unwrap();
        assert!(quarkus.contains("quarkus-maven-plugin:create"));
        assert!(quarkus.contains("-Dextensions=vaadin"));
        assert!(quarkus.ends_with("-DprojectArtifactId=vaadin-quarkus"));

        assert_eq!(
            command("hilla-react-cli").unwrap(),
            "npx @hilla/cli init --react hilla-react-cli"
        );
    }

    #[test]
    fn test_name_is_shell_quoted() {
        let templates = GeneratorTemplates {
            archetype: "generate {name}".to_string(),
            ..GeneratorTemplates::default()
        };
        let preset = Preset::parse("archetype-x;rm -rf").unwrap();
        assert_eq!(
            generator_command(&templates, &preset).unwrap(),
            "generate 'archetype-x;rm -rf'"
        );
    }

    #[test]
    fn test_unsupported_kinds() {
        for name in ["foo-cli", "mystery-preset", "initializer-demo-maven"] {
            match command(name) {
                Err(PitError::UnsupportedPreset(p)) => assert_eq!(p, name),
                other => panic!("expected UnsupportedPreset for {}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_generate_runs_command_and_initializes_repository() {
        let temp = TempDir::new().unwrap();
        let runner = RecordingRunner::creating(temp.path().join("archetype-jetty"));
        let repository = FakeRepository::default();
        let templates = GeneratorTemplates::default();
        let generator = StarterGenerator::new(&templates, &runner, &repository);

        let dir = generator
            .generate(&Preset::parse("archetype-jetty").unwrap(), temp.path())
            .unwrap();

        assert_eq!(dir, temp.path().join("archetype-jetty"));
        let commands = runner.commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].cwd, temp.path());
        assert_eq!(repository.dirs(), vec![dir]);
    }

    #[test]
    fn test_generate_skips_repository_when_directory_missing() {
        let temp = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let repository = FakeRepository::default();
        let templates = GeneratorTemplates::default();
        let generator = StarterGenerator::new(&templates, &runner, &repository);

        generator
            .generate(&Preset::parse("vaadin-quarkus").unwrap(), temp.path())
            .unwrap();
        assert!(repository.dirs().is_empty());
    }

    #[test]
    fn test_generate_failure_is_command_failed() {
        let temp = TempDir::new().unwrap();
        let templates = GeneratorTemplates::default();
        let line = templates.hilla_cli.replace("{name}", "hilla-react-cli");
        let runner = RecordingRunner::with_exit_codes([(line.as_str(), 1)]);
        let repository = FakeRepository::default();
        let generator = StarterGenerator::new(&templates, &runner, &repository);

        let err = generator
            .generate(&Preset::parse("hilla-react-cli").unwrap(), temp.path())
            .unwrap_err();
        assert!(matches!(err, PitError::CommandFailed { code: 1, .. }));
        assert!(repository.dirs().is_empty());
    }

    #[test]
    fn test_unsupported_preset_runs_nothing() {
        let temp = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let repository = FakeRepository::default();
        let templates = GeneratorTemplates::default();
        let generator = StarterGenerator::new(&templates, &runner, &repository);

        let err = generator
            .generate(&Preset::parse("react-cli").unwrap(), temp.path())
            .unwrap_err();
        assert!(matches!(err, PitError::UnsupportedPreset(_)));
        assert!(runner.lines().is_empty());
    }
}
