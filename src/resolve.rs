//! Build and run command resolution.
//!
//! Maps a classified preset to the shell commands for each lifecycle step.
//! Each resolver checks its rules in order and takes the first match; Maven
//! invocations are the fallback, so every preset resolves to some command.

use crate::preset::{ArchetypeKind, Preset, PresetKind};
use serde::Serialize;

const MVN_CLEAN: &str = "mvn -ntp -B clean";
const MVN_PACKAGE_PRODUCTION: &str = "mvn -ntp -B -Pproduction clean package";
const MVN_RUN: &str = "mvn -ntp -B";
const MVN_SPRING_BOOT_RUN: &str = "mvn -ntp -B spring-boot:run";
const MVN_QUARKUS_DEV: &str = "mvn -ntp -B quarkus:dev";
const MVN_JETTY_RUN_WAR: &str = "mvn -ntp -B -Pproduction -Dvaadin.productionMode jetty:run-war";

const GRADLE_CLEAN: &str = "./gradlew clean";
const GRADLE_BUILD_PRODUCTION: &str = "./gradlew clean build -Dhilla.productionMode -Dvaadin.productionMode && rm -f ./build/libs/*-plain.jar";
const GRADLE_BOOT_RUN: &str = "./gradlew bootRun";

const JAR_QUARKUS: &str = "java -jar target/quarkus-app/quarkus-run.jar";
const JAR_GRADLE: &str = "java -jar ./build/libs/*.jar";
const JAR_MAVEN: &str = "java -jar -Dvaadin.productionMode target/*.jar";

fn is_jetty_archetype(kind: PresetKind) -> bool {
    matches!(
        kind,
        PresetKind::Archetype(ArchetypeKind::Jetty | ArchetypeKind::Hotswap)
    )
}

/// Command that removes previous build output.
pub fn clean_command(preset: &Preset) -> &'static str {
    if preset.hints().initializer_gradle {
        GRADLE_CLEAN
    } else {
        MVN_CLEAN
    }
}

/// Command that compiles the project for production.
///
/// The Jetty and hotswap archetypes only clean here: they are packaged by the
/// production run goal instead.
pub fn build_command(preset: &Preset) -> &'static str {
    if is_jetty_archetype(preset.kind()) {
        MVN_CLEAN
    } else if preset.hints().initializer_gradle {
        GRADLE_BUILD_PRODUCTION
    } else {
        MVN_PACKAGE_PRODUCTION
    }
}

/// Command that starts the application in development mode.
///
/// An initializer name carrying both `-maven` and `-gradle` runs with Maven.
pub fn run_dev_command(preset: &Preset) -> &'static str {
    let hints = preset.hints();
    if preset.kind() == PresetKind::Quarkus {
        MVN_QUARKUS_DEV
    } else if hints.initializer_maven {
        MVN_SPRING_BOOT_RUN
    } else if hints.initializer_gradle {
        GRADLE_BOOT_RUN
    } else {
        MVN_RUN
    }
}

/// Command that starts the production build of the application.
///
/// Any name mentioning `gradle` runs the Gradle jar, archetypes and CLI
/// presets included.
pub fn run_prod_command(preset: &Preset) -> &'static str {
    let kind = preset.kind();
    if is_jetty_archetype(kind) {
        MVN_JETTY_RUN_WAR
    } else if kind == PresetKind::Quarkus {
        JAR_QUARKUS
    } else if preset.hints().mentions_gradle {
        JAR_GRADLE
    } else {
        JAR_MAVEN
    }
}

/// All resolved lifecycle commands for one preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSet {
    pub clean: &'static str,
    pub build: &'static str,
    pub run_dev: &'static str,
    pub run_prod: &'static str,
}

impl CommandSet {
    pub fn for_preset(preset: &Preset) -> Self {
        Self {
            clean: clean_command(preset),
            build: build_command(preset),
            run_dev: run_dev_command(preset),
            run_prod: run_prod_command(preset),
        }
    }
}
