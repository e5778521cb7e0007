//! What a run would do for each preset, without doing it.

use crate::config::Config;
use crate::error::{PitError, Result};
use crate::preset::{BuildHints, Preset, PresetKind, ProvisionStrategy};
use crate::provision::{archive_url, generator_command};
use crate::resolve::CommandSet;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a preset's project would come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProvisionSource {
    Archive { url: String },
    Generator { command: String },
    /// Routed to the generator, which has no command for it.
    Unsupported { reason: String },
}

impl fmt::Display for ProvisionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionSource::Archive { url } => write!(f, "GET {}", url),
            ProvisionSource::Generator { command } => f.write_str(command),
            ProvisionSource::Unsupported { reason } => write!(f, "unsupported ({})", reason),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetPlan {
    pub preset: String,
    pub kind: PresetKind,
    pub hints: BuildHints,
    pub directory: PathBuf,
    pub strategy: ProvisionStrategy,
    pub source: ProvisionSource,
    pub commands: CommandSet,
    pub needs_license: bool,
    pub ui_test_file: Option<&'static str>,
}

impl PresetPlan {
    pub fn new(preset: &Preset, config: &Config, base_dir: &Path) -> Result<Self> {
        let strategy = preset.strategy();
        let source = match strategy {
            ProvisionStrategy::Download => ProvisionSource::Archive {
                url: archive_url(&config.start_url, preset)?.to_string(),
            },
            ProvisionStrategy::Generate => match generator_command(&config.generators, preset) {
                Ok(command) => ProvisionSource::Generator { command },
                Err(e @ PitError::UnsupportedPreset(_)) => ProvisionSource::Unsupported {
                    reason: e.to_string(),
                },
                Err(e) => return Err(e),
            },
        };

        Ok(Self {
            preset: preset.name().to_string(),
            kind: preset.kind(),
            hints: preset.hints(),
            directory: base_dir.join(preset.dir_name()),
            strategy,
            source,
            commands: CommandSet::for_preset(preset),
            needs_license: preset.needs_license(),
            ui_test_file: preset.ui_test_file(),
        })
    }
}

impl fmt::Display for PresetPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.preset)?;
        writeln!(f, "  directory: {}", self.directory.display())?;
        writeln!(f, "  strategy:  {}", self.strategy)?;
        writeln!(f, "  source:    {}", self.source)?;
        writeln!(f, "  clean:     {}", self.commands.clean)?;
        writeln!(f, "  build:     {}", self.commands.build)?;
        writeln!(f, "  run-dev:   {}", self.commands.run_dev)?;
        writeln!(f, "  run-prod:  {}", self.commands.run_prod)?;
        writeln!(f, "  license:   {}", if self.needs_license { "required" } else { "no" })?;
        write!(f, "  ui test:   {}", self.ui_test_file.unwrap_or("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(name: &str) -> PresetPlan {
        PresetPlan::new(&Preset::parse(name).unwrap(), &Config::default(), Path::new("tmp")).unwrap()
    }

    #[test]
    fn test_download_plan() {
        let plan = plan("latest-java_partial-auth");
        assert_eq!(plan.directory, Path::new("tmp/latest-java-partial-auth"));
        assert_eq!(plan.strategy, ProvisionStrategy::Download);
        assert_eq!(
            plan.source,
            ProvisionSource::Archive {
                url: "https://start.vaadin.com/dl?preset=latest-java&preset=partial-auth&projectName=latest-java_partial-auth".to_string()
            }
        );
        assert!(plan.needs_license);
        assert_eq!(plan.ui_test_file, Some("start-auth.js"));
    }

    #[test]
    fn test_generator_plan() {
        let plan = plan("archetype-jetty");
        assert_eq!(plan.strategy, ProvisionStrategy::Generate);
        assert!(matches!(plan.source, ProvisionSource::Generator { .. }));
        assert_eq!(plan.commands.build, "mvn -ntp -B clean");
        assert!(!plan.needs_license);
    }

    #[test]
    fn test_cli_gap_is_reported_not_raised() {
        let plan = plan("react-cli");
        assert_eq!(plan.strategy, ProvisionStrategy::Generate);
        assert!(matches!(plan.source, ProvisionSource::Unsupported { .. }));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(plan("initializer-demo-gradle")).unwrap();
        assert_eq!(json["strategy"], "download");
        assert_eq!(json["source"]["type"], "archive");
        assert_eq!(json["kind"]["kind"], "initializer");
        assert_eq!(json["hints"]["initializer_gradle"], true);
        assert_eq!(json["commands"]["run_dev"], "./gradlew bootRun");
        assert_eq!(json["ui_test_file"], "initializer.js");
    }

    #[test]
    fn test_text_rendering() {
        let text = plan("react").to_string();
        assert!(text.starts_with("react\n"));
        assert!(text.contains("run-dev:   mvn -ntp -B\n"));
        assert!(text.ends_with("ui test:   react-starter.js"));
    }
}
