//! Config sub-types and field defaults.

use serde::{Deserialize, Serialize};

/// Command templates used to generate presets locally.
///
/// Each template may reference `{name}`, which is replaced by the
/// shell-quoted project directory name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorTemplates {
    /// Archetypes whose name ends with `spring`.
    pub archetype_spring: String,
    /// All other archetypes.
    pub archetype: String,
    /// `vaadin-quarkus`.
    pub quarkus: String,
    /// `hilla-*-cli`.
    pub hilla_cli: String,
}

impl Default for GeneratorTemplates {
    fn default() -> Self {
        Self {
            archetype_spring: "mvn -ntp -q -B archetype:generate -DarchetypeGroupId=com.vaadin -DarchetypeArtifactId=vaadin-archetype-spring-application -DarchetypeVersion=LATEST -DgroupId=com.vaadin.starter -DartifactId={name}".to_string(),
            archetype: "mvn -ntp -q -B archetype:generate -DarchetypeGroupId=com.vaadin -DarchetypeArtifactId=vaadin-archetype-application -DarchetypeVersion=LATEST -DgroupId=com.vaadin.starter -DartifactId={name}".to_string(),
            quarkus: "mvn -ntp -q -B io.quarkus.platform:quarkus-maven-plugin:create -Dextensions=vaadin -DwithCodestart -DprojectGroupId=com.vaadin.starter -DprojectArtifactId={name}".to_string(),
            hilla_cli: "npx @hilla/cli init --react {name}".to_string(),
        }
    }
}

impl GeneratorTemplates {
    pub(super) fn named(&self) -> [(&'static str, &str); 4] {
        [
            ("archetype_spring", &self.archetype_spring),
            ("archetype", &self.archetype),
            ("quarkus", &self.quarkus),
            ("hilla_cli", &self.hilla_cli),
        ]
    }
}

/// A single project validation step.
///
/// A step passes when every configured check passes: at least one project
/// file matches `require_any` (if non-empty) and `command` exits 0 (if set).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationStep {
    /// Step name used in logs and error messages.
    pub name: String,

    /// Glob patterns, relative to the project root.
    pub require_any: Vec<String>,

    /// Shell command run in the project directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

pub(crate) fn default_start_url() -> String {
    "https://start.vaadin.com/dl".to_string()
}

pub(crate) fn default_tmp_dir() -> String {
    "tmp".to_string()
}

pub(crate) fn default_port() -> u16 {
    8080
}

pub(crate) fn default_download_timeout_secs() -> u64 {
    300
}

pub(crate) fn default_git_user_name() -> String {
    "Vaadin Bot".to_string()
}

pub(crate) fn default_git_user_email() -> String {
    "vaadin-bot@vaadin.com".to_string()
}

pub(crate) fn default_maven_version_property() -> String {
    "vaadin.version".to_string()
}

pub(crate) fn default_gradle_version_property() -> String {
    "vaadinVersion".to_string()
}
