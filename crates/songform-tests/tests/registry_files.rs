//! Registries loaded from files, end to end through the CLI library.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::process::ExitCode;

use songform_cli::commands;
use songform_cli::config::{CliConfig, ENV_REGISTRY};
use songform_cli::input::{load_registry, FormInput};
use songform_spec::validation::{check_values, validate_registry};
use songform_spec::{
    format_payload, group_visible, initial_values, resolve_visible, Catalog, FeatureSet,
    IssueCode, LintWarningCode, Registry, ResolveContext, Tier, ViolationCode,
};
use songform_tests::fixtures::{fixture, values, visible_ids};

#[test]
fn yaml_fixture_lints_clean() {
    let registry = Registry::load(&fixture("arrangement.yaml")).unwrap();
    let result = validate_registry(&registry);
    assert!(result.is_ok(), "errors: {:?}", result.errors);
    assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
}

#[test]
fn yaml_fixture_visibility() {
    let registry = Registry::load(&fixture("arrangement.yaml")).unwrap();
    let none = FeatureSet::new();
    let stems: FeatureSet = ["stems-export"].into_iter().collect();

    let vocal = initial_values(&registry, "vocal");
    assert_eq!(vocal.get("voice"), Some(&json!("female")));
    assert_eq!(
        visible_ids(&registry, "vocal", Tier::Free, &vocal, &none),
        vec!["title", "voice", "hasDrums", "drumStyle"]
    );

    // Stems need both the premium tier and the feature flag. Unordered
    // parameters sort as 0, ahead of stems (1).
    assert_eq!(
        visible_ids(&registry, "vocal", Tier::Premium, &vocal, &stems),
        vec!["title", "voice", "stems", "hasDrums", "drumStyle"]
    );
    assert_eq!(
        visible_ids(&registry, "vocal", Tier::Standard, &vocal, &stems),
        vec!["title", "voice", "hasDrums", "drumStyle"]
    );

    // Instrumental clears the voice and turns the drums off, hiding the drum style.
    let instrumental = initial_values(&registry, "instrumental");
    assert_eq!(instrumental.get("voice"), None);
    assert_eq!(instrumental.get("hasDrums"), Some(&json!(false)));
    assert_eq!(
        visible_ids(&registry, "instrumental", Tier::Free, &instrumental, &none),
        vec!["title", "hasDrums"]
    );
}

#[test]
fn yaml_fixture_groups_and_checks() {
    let registry = Registry::load(&fixture("arrangement.yaml")).unwrap();
    let vals = values(&[("title", json!("Late Night #2")), ("hasDrums", json!(true))]);
    let features = FeatureSet::new();
    let ctx = ResolveContext::new("vocal", Tier::Free, &vals, &features);
    let visible = resolve_visible(&registry, &ctx);

    let groups: Vec<(&str, usize)> = group_visible(&registry, &visible)
        .iter()
        .map(|g| (g.group_id, g.parameters.len()))
        .collect();
    assert_eq!(groups, vec![("main", 2), ("arrangement", 2)]);

    let violations = check_values(&visible, &vals);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code, ViolationCode::PatternMismatch);
    assert_eq!(violations[0].message, "Use letters, digits and spaces");

    let payload = format_payload(&registry, &vals, "vocal");
    assert_eq!(payload.get("name"), Some(&json!("Late Night #2")));
    assert!(!payload.contains_key("title"));
}

#[test]
fn broken_fixture_reports_every_issue() {
    // Construction is permissive; only linting complains.
    let registry = Registry::load(&fixture("broken.json")).unwrap();
    assert_eq!(
        registry.parameter("title").map(|p| p.label.as_str()),
        Some("Title")
    );

    let result = validate_registry(&registry);
    let codes: Vec<IssueCode> = result.errors.iter().map(|e| e.code).collect();
    assert_eq!(
        codes,
        vec![
            IssueCode::DuplicateParameterId,
            IssueCode::DuplicateModeId,
            IssueCode::DanglingDependency,
            IssueCode::UnknownOverrideParameter,
            IssueCode::InvalidLengthBounds,
            IssueCode::InvalidPattern,
        ]
    );

    let warnings: Vec<LintWarningCode> = result.warnings.iter().map(|w| w.code).collect();
    assert_eq!(
        warnings,
        vec![LintWarningCode::SelectWithoutOptions, LintWarningCode::UnusedGroup]
    );
}

#[test]
fn lint_command_exit_codes() {
    let catalog = Catalog::builtin();

    let good = load_registry(Some(&fixture("arrangement.yaml")), &catalog).unwrap();
    assert_eq!(
        commands::lint::run(&good, "arrangement.yaml", true).unwrap(),
        ExitCode::SUCCESS
    );

    let bad = load_registry(Some(&fixture("broken.json")), &catalog).unwrap();
    assert_eq!(
        commands::lint::run(&bad, "broken.json", true).unwrap(),
        ExitCode::from(1)
    );
}

#[test]
fn registry_path_from_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = tmp.path().join("config.yaml");
    let registry_path = fixture("arrangement.yaml");
    std::fs::write(
        &config_path,
        format!("registry: {}\n", serde_json::to_string(&registry_path).unwrap()),
    )
    .unwrap();

    let config = CliConfig::load_from(None, Some(&config_path), |_| None).unwrap();
    assert_eq!(config.registry.as_deref(), Some(registry_path.as_path()));

    let registry = load_registry(config.registry.as_deref(), &Catalog::builtin()).unwrap();
    assert!(registry.contains("drumStyle"));

    // The environment still wins over the file.
    let config = CliConfig::load_from(None, Some(&config_path), |key| {
        (key == ENV_REGISTRY).then(|| "other.json".to_string())
    })
    .unwrap();
    assert_eq!(config.registry, Some("other.json".into()));
}

#[test]
fn check_command_on_file_registry() {
    let registry = Registry::load(&fixture("arrangement.yaml")).unwrap();
    let sets = vec!["title=Harbor Lights".to_string()];
    let input = FormInput::from_args("vocal", None, &[], &sets, None).unwrap();
    assert_eq!(
        commands::check::run(&registry, &input, true).unwrap(),
        ExitCode::SUCCESS
    );
}
