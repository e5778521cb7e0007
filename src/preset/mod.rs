//! Starter preset classification.
//!
//! A preset name is parsed once into a [`Preset`] carrying a [`PresetKind`]
//! and the [`BuildHints`] read from its name. Provisioning switches on the
//! kind; build commands test the hints in a fixed order.
//!
//! Composite presets join several start-service presets with `_`, e.g.
//! `latest-java_partial-auth`. The project directory uses `-` in place of `_`.

mod catalog;

#[cfg(test)]
mod tests;

use crate::error::{PitError, Result};
use serde::Serialize;
use std::fmt;

/// Maven archetype flavors that need distinct handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchetypeKind {
    /// Name ends with `spring`: generated from the Spring application archetype.
    Spring,
    /// `archetype-jetty`: no production build, runs through the Jetty plugin.
    Jetty,
    /// `archetype-hotswap`: same build handling as Jetty.
    Hotswap,
    /// Any other `archetype*` name.
    Plain,
}

/// Classification of a preset name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "variant", rename_all = "kebab-case")]
pub enum PresetKind {
    /// Generated from a Maven archetype (`archetype*`).
    Archetype(ArchetypeKind),
    /// `vaadin-quarkus`, generated through the Quarkus Maven plugin.
    Quarkus,
    /// `hilla-*-cli`, scaffolded by the Hilla CLI.
    HillaCli,
    /// Any other `*-cli` name. Routed to the generator, which rejects it.
    Cli,
    /// `initializer-*`, downloaded from the start service.
    Initializer,
    /// Any other name, downloaded from the start service.
    Starter,
}

impl PresetKind {
    /// Classify a raw (already trimmed) preset name.
    pub fn classify(name: &str) -> Self {
        if let Some(rest) = name.strip_prefix("archetype") {
            let flavor = if name.ends_with("spring") {
                ArchetypeKind::Spring
            } else if rest == "-jetty" {
                ArchetypeKind::Jetty
            } else if rest == "-hotswap" {
                ArchetypeKind::Hotswap
            } else {
                ArchetypeKind::Plain
            };
            return PresetKind::Archetype(flavor);
        }

        if name == "vaadin-quarkus" {
            return PresetKind::Quarkus;
        }

        if name.ends_with("-cli") {
            return if name.starts_with("hilla-") {
                PresetKind::HillaCli
            } else {
                PresetKind::Cli
            };
        }

        if name.starts_with("initializer-") {
            return PresetKind::Initializer;
        }

        PresetKind::Starter
    }
}

/// Build-tool markers found in a preset name.
///
/// These are read from the raw name regardless of [`PresetKind`], so a name
/// like `hilla-gradle-cli` is still generated but runs its Gradle jar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildHints {
    /// `initializer-` name containing `-maven`.
    pub initializer_maven: bool,
    /// `initializer-` name containing `-gradle`.
    pub initializer_gradle: bool,
    /// `gradle` appears anywhere in the name.
    pub mentions_gradle: bool,
}

impl BuildHints {
    pub fn read(name: &str) -> Self {
        let initializer = name.starts_with("initializer-");
        Self {
            initializer_maven: initializer && name.contains("-maven"),
            initializer_gradle: initializer && name.contains("-gradle"),
            mentions_gradle: name.contains("gradle"),
        }
    }
}

/// How a preset's project directory gets materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvisionStrategy {
    /// Run a scaffolding generator command.
    Generate,
    /// Download a generated archive from the start service.
    Download,
}

impl fmt::Display for ProvisionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionStrategy::Generate => write!(f, "generate"),
            ProvisionStrategy::Download => write!(f, "download"),
        }
    }
}

/// A parsed and classified preset name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    name: String,
    kind: PresetKind,
    hints: BuildHints,
}

impl Preset {
    /// Parse a preset name.
    ///
    /// Surrounding whitespace is ignored. Empty names, `.`, `..` and names
    /// containing a path separator are user errors, since the name becomes a
    /// directory under the base directory.
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PitError::UserError("preset name must not be empty".to_string()));
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(PitError::UserError(format!(
                "invalid preset name '{}': must not be a path",
                name
            )));
        }

        Ok(Self {
            name: name.to_string(),
            kind: PresetKind::classify(name),
            hints: BuildHints::read(name),
        })
    }

    /// Parse a list of preset names, preserving order.
    pub fn parse_all<S: AsRef<str>>(names: &[S]) -> Result<Vec<Self>> {
        names.iter().map(|n| Self::parse(n.as_ref())).collect()
    }

    /// The literal preset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PresetKind {
        self.kind
    }

    pub fn hints(&self) -> BuildHints {
        self.hints
    }

    /// Directory name for the provisioned project (`_` becomes `-`).
    pub fn dir_name(&self) -> String {
        self.name.replace('_', "-")
    }

    /// Start-service presets making up this (possibly composite) preset.
    pub fn components(&self) -> Vec<&str> {
        self.name.split('_').filter(|c| !c.is_empty()).collect()
    }

    /// Whether this preset is generated locally or downloaded.
    pub fn strategy(&self) -> ProvisionStrategy {
        match self.kind {
            PresetKind::Archetype(_)
            | PresetKind::Quarkus
            | PresetKind::HillaCli
            | PresetKind::Cli => ProvisionStrategy::Generate,
            PresetKind::Initializer | PresetKind::Starter => ProvisionStrategy::Download,
        }
    }

    /// Whether running the project requires a commercial license key.
    pub fn needs_license(&self) -> bool {
        catalog::needs_license(self)
    }

    /// UI test script that exercises this preset, if any.
    pub fn ui_test_file(&self) -> Option<&'static str> {
        catalog::ui_test_file(self)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
