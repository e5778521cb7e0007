//! Tests for preset classification.

use super::*;

fn preset(name: &str) -> Preset {
    Preset::parse(name).unwrap()
}

#[test]
fn test_archetype_names_are_generated() {
    for name in [
        "archetype",
        "archetype-jetty",
        "archetype-hotswap",
        "archetype-spring",
        "archetype_prerelease",
        "archetypes-anything",
    ] {
        assert_eq!(
            preset(name).strategy(),
            ProvisionStrategy::Generate,
            "{} should be generated",
            name
        );
    }
}

#[test]
fn test_quarkus_and_cli_names_are_generated() {
    assert_eq!(preset("vaadin-quarkus").strategy(), ProvisionStrategy::Generate);
    assert_eq!(preset("hilla-react-cli").strategy(), ProvisionStrategy::Generate);
    assert_eq!(preset("some-tool-cli").strategy(), ProvisionStrategy::Generate);
}

#[test]
fn test_everything_else_is_downloaded() {
    for name in [
        "latest-java",
        "default",
        "react",
        "initializer-demo-gradle",
        "initializer-demo-maven",
        "vaadin-quarkus-extra",
        "cli-tool",
        "flow-crm-tutorial",
        "a_b",
    ] {
        assert_eq!(
            preset(name).strategy(),
            ProvisionStrategy::Download,
            "{} should be downloaded",
            name
        );
    }
}

#[test]
fn test_archetype_flavors() {
    assert_eq!(
        preset("archetype-jetty").kind(),
        PresetKind::Archetype(ArchetypeKind::Jetty)
    );
    assert_eq!(
        preset("archetype-hotswap").kind(),
        PresetKind::Archetype(ArchetypeKind::Hotswap)
    );
    assert_eq!(
        preset("archetype-spring").kind(),
        PresetKind::Archetype(ArchetypeKind::Spring)
    );
    assert_eq!(
        preset("archetype-jetty-extra").kind(),
        PresetKind::Archetype(ArchetypeKind::Plain)
    );
}

#[test]
fn test_initializer_hints() {
    let gradle = preset("initializer-demo-gradle");
    assert_eq!(gradle.kind(), PresetKind::Initializer);
    assert!(gradle.hints().initializer_gradle);
    assert!(!gradle.hints().initializer_maven);

    let maven = preset("initializer-demo-maven").hints();
    assert!(maven.initializer_maven);
    assert!(!maven.initializer_gradle);

    assert_eq!(preset("initializer-demo").hints(), BuildHints::default());

    let both = preset("initializer-maven-gradle").hints();
    assert!(both.initializer_maven);
    assert!(both.initializer_gradle);
}

#[test]
fn test_cli_kinds() {
    assert_eq!(preset("hilla-react-cli").kind(), PresetKind::HillaCli);
    assert_eq!(preset("mystery-cli").kind(), PresetKind::Cli);
}

#[test]
fn test_gradle_mention_is_independent_of_kind() {
    assert_eq!(preset("latest-java-gradle").kind(), PresetKind::Starter);
    assert!(preset("latest-java-gradle").hints().mentions_gradle);
    assert!(!preset("latest-java").hints().mentions_gradle);
    assert!(preset("archetype-gradle").hints().mentions_gradle);

    // Only `initializer-` names set the initializer markers.
    let cli = preset("hilla-gradle-cli").hints();
    assert!(cli.mentions_gradle);
    assert!(!cli.initializer_gradle);
}

#[test]
fn test_parse_trims_and_rejects_empty() {
    assert_eq!(preset("  react  ").name(), "react");

    let err = Preset::parse("   ").unwrap_err();
    assert!(matches!(err, PitError::UserError(_)));
}

#[test]
fn test_parse_rejects_path_like_names() {
    for name in [".", "..", " .. ", "../outside", "a/b", "/abs", "a\\b", "..\\x"] {
        let err = Preset::parse(name).unwrap_err();
        assert!(
            matches!(err, PitError::UserError(_)),
            "{:?} should be rejected",
            name
        );
    }

    // Dots inside a name are fine.
    assert_eq!(preset("v24.1").dir_name(), "v24.1");
    assert_eq!(preset("..a").name(), "..a");
}

#[test]
fn test_parse_all_preserves_order() {
    let presets = Preset::parse_all(&["react", "archetype-jetty", "default"]).unwrap();
    let names: Vec<&str> = presets.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["react", "archetype-jetty", "default"]);
}

#[test]
fn test_composite_preset_components_and_dir_name() {
    let p = preset("a_b");
    assert_eq!(p.components(), vec!["a", "b"]);
    assert_eq!(p.dir_name(), "a-b");
    assert_eq!(p.name(), "a_b");

    let single = preset("latest-java");
    assert_eq!(single.components(), vec!["latest-java"]);
    assert_eq!(single.dir_name(), "latest-java");
}

#[test]
fn test_needs_license() {
    assert!(!preset("archetype-jetty").needs_license());
    assert!(!preset("default").needs_license());
    assert!(!preset("default-auth").needs_license());
    assert!(preset("latest-java").needs_license());
    assert!(preset("vaadin-quarkus").needs_license());
}

#[test]
fn test_ui_test_file_mapping() {
    let cases = [
        ("latest-java_partial-auth", Some("start-auth.js")),
        ("flow-crm-tutorial", None),
        ("react-tutorial", Some("react.js")),
        ("default", Some("hello.js")),
        ("vaadin-quarkus", Some("hello.js")),
        ("latest-java_prerelease", Some("hello.js")),
        ("initializer-demo-gradle", Some("initializer.js")),
        ("initializerX", Some("initializer.js")),
        ("initializer-x-cli", Some("initializer.js")),
        ("archetype-jetty", Some("click-hotswap.js")),
        ("hilla-react-cli", Some("hilla-react-cli.js")),
        ("react", Some("react-starter.js")),
        ("test-hybrid-react", Some("hybrid-react.js")),
        ("test-hybrid", Some("hybrid.js")),
        ("react-crm-tutorial", Some("noop.js")),
        ("collaboration", Some("collaboration.js")),
        ("latest-java", Some("start.js")),
    ];

    for (name, expected) in cases {
        assert_eq!(preset(name).ui_test_file(), expected, "test file for {}", name);
    }
}

#[test]
fn test_auth_takes_precedence_over_kind() {
    assert_eq!(preset("archetype-auth").ui_test_file(), Some("start-auth.js"));
}

#[test]
fn test_kind_serializes_with_tag() {
    let json = serde_json::to_value(preset("initializer-demo-gradle").kind()).unwrap();
    assert_eq!(json["kind"], "initializer");

    let json = serde_json::to_value(preset("archetype-jetty").kind()).unwrap();
    assert_eq!(json["kind"], "archetype");
    assert_eq!(json["variant"], "jetty");
}
