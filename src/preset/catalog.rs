//! Per-preset facts that only matter to the operator: license needs and the
//! UI test script paired with each starter.

use super::{Preset, PresetKind};

pub(super) fn needs_license(preset: &Preset) -> bool {
    !(matches!(preset.kind(), PresetKind::Archetype(_)) || preset.name().starts_with("default"))
}

pub(super) fn ui_test_file(preset: &Preset) -> Option<&'static str> {
    let name = preset.name();

    if name.contains("-auth") {
        return Some("start-auth.js");
    }
    if name.starts_with("flow-crm-tutorial") {
        return None;
    }
    if name == "react-tutorial" {
        return Some("react.js");
    }
    if name.starts_with("default")
        || preset.kind() == PresetKind::Quarkus
        || name.ends_with("_prerelease")
    {
        return Some("hello.js");
    }
    if name.starts_with("initializer") {
        return Some("initializer.js");
    }

    let file = match preset.kind() {
        PresetKind::Archetype(_) => "click-hotswap.js",
        _ => match name {
            "hilla-react-cli" => "hilla-react-cli.js",
            "react" => "react-starter.js",
            "react-crm-tutorial" => "noop.js",
            "collaboration" => "collaboration.js",
            _ if name.starts_with("test-hybrid-react") => "hybrid-react.js",
            _ if name.starts_with("test-hybrid") => "hybrid.js",
            _ => "start.js",
        },
    };
    Some(file)
}
