//! Property-based visibility tests using proptest.
//!
//! These tests check that visibility resolution behaves the same for any
//! mode, tier, feature set and value map, not just the hand-picked cases in
//! the unit tests.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p songform-tests --test visibility_properties
//! ```

use proptest::prelude::*;
use serde_json::{json, Value};

use songform_spec::validation::validate_registry;
use songform_spec::{
    default_for, resolve_visible, DefaultValue, FeatureSet, ParameterKind, ParameterSpec, Registry,
    ResolveContext, Tier, ValueMap, Visibility, MODE_CUSTOM, MODE_INSPIRATION, MODE_INSTRUMENTAL,
};
use songform_tests::fixtures::{builtin_registry, visible_ids};

// ============================================================================
// Strategies
// ============================================================================

fn arbitrary_tier() -> impl Strategy<Value = Tier> {
    prop_oneof![Just(Tier::Free), Just(Tier::Standard), Just(Tier::Premium)]
}

/// Known modes plus arbitrary strings.
fn arbitrary_mode() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(MODE_INSPIRATION.to_string()),
        Just(MODE_CUSTOM.to_string()),
        Just(MODE_INSTRUMENTAL.to_string()),
        "[a-z]{0,12}",
    ]
}

fn arbitrary_features() -> impl Strategy<Value = FeatureSet> {
    prop::collection::vec(
        prop_oneof![
            Just("high-quality".to_string()),
            Just("custom-parameters".to_string()),
            "[a-z\\-]{1,16}",
        ],
        0..4,
    )
    .prop_map(|fs| fs.into_iter().collect())
}

fn arbitrary_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z ]{0,20}".prop_map(Value::from),
        prop::collection::vec("[a-z]{1,6}", 0..3).prop_map(|v| json!(v)),
    ]
}

/// Value maps keyed by built-in parameter ids plus a few unknown ids.
fn arbitrary_values() -> impl Strategy<Value = ValueMap> {
    let keys = prop_oneof![
        Just("modelId".to_string()),
        Just("musicName".to_string()),
        Just("lyrics".to_string()),
        Just("vocalType".to_string()),
        Just("hasDrums".to_string()),
        Just("duration".to_string()),
        "[a-zA-Z]{1,10}",
    ];
    prop::collection::btree_map(keys, arbitrary_value(), 0..6)
}

fn text(id: &str) -> ParameterSpec {
    ParameterSpec::new(id, id, ParameterKind::Text, "main")
}

// ============================================================================
// 1. Resolution invariants over the built-in registry
// ============================================================================

proptest! {
    /// Parameters without a visibility clause are visible for every input.
    #[test]
    fn unconditional_parameters_always_visible(
        mode in arbitrary_mode(),
        tier in arbitrary_tier(),
        features in arbitrary_features(),
        values in arbitrary_values(),
    ) {
        let registry = builtin_registry();
        let visible = visible_ids(&registry, &mode, tier, &values, &features);
        for param in registry.parameters().iter().filter(|p| p.is_unconditional()) {
            prop_assert!(
                visible.contains(&param.id),
                "'{}' missing for mode={} tier={}", param.id, mode, tier
            );
        }
    }

    /// Resolving twice with the same input gives the same answer.
    #[test]
    fn resolution_is_idempotent(
        mode in arbitrary_mode(),
        tier in arbitrary_tier(),
        features in arbitrary_features(),
        values in arbitrary_values(),
    ) {
        let registry = builtin_registry();
        let first = visible_ids(&registry, &mode, tier, &values, &features);
        let second = visible_ids(&registry, &mode, tier, &values, &features);
        prop_assert_eq!(first, second);
    }

    /// The visible list is a subsequence of the registry, with no duplicates.
    #[test]
    fn visible_ids_are_unique(
        mode in arbitrary_mode(),
        tier in arbitrary_tier(),
        values in arbitrary_values(),
    ) {
        let registry = builtin_registry();
        let visible = visible_ids(&registry, &mode, tier, &values, &FeatureSet::new());
        let mut deduped = visible.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), visible.len());
        prop_assert!(visible.iter().all(|id| registry.contains(id)));
    }

    /// A higher tier never sees fewer built-in parameters than a lower one.
    #[test]
    fn higher_tiers_see_more(mode in arbitrary_mode(), values in arbitrary_values()) {
        let registry = builtin_registry();
        let features = FeatureSet::new();
        let free = visible_ids(&registry, &mode, Tier::Free, &values, &features);
        let standard = visible_ids(&registry, &mode, Tier::Standard, &values, &features);
        let premium = visible_ids(&registry, &mode, Tier::Premium, &values, &features);
        prop_assert!(free.iter().all(|id| standard.contains(id)));
        prop_assert!(standard.iter().all(|id| premium.contains(id)));
    }

    /// Modes that are not declared get no mode defaults.
    #[test]
    fn unknown_mode_uses_parameter_defaults(mode in "[a-z]{1,12}") {
        prop_assume!(![MODE_INSPIRATION, MODE_CUSTOM, MODE_INSTRUMENTAL].contains(&mode.as_str()));
        let registry = builtin_registry();
        for param in registry.parameters() {
            prop_assert_eq!(
                default_for(&registry, &param.id, &mode),
                Some(DefaultValue::Value(param.default_value.clone()))
            );
        }
    }
}

// ============================================================================
// 2. Single-condition semantics
// ============================================================================

proptest! {
    /// A `depends_on` condition holds exactly when the value is listed.
    #[test]
    fn depends_on_matches_listed_values(current in proptest::option::of("[a-d]")) {
        let registry = Registry::new(
            vec![
                text("source"),
                text("target").visibility(
                    Visibility::new().depends_on("source", [json!("a"), json!("b")]),
                ),
            ],
            vec![],
            vec![],
        );
        let mut values = ValueMap::new();
        if let Some(ref v) = current {
            values.insert("source".to_string(), json!(v));
        }

        let features = FeatureSet::new();
        let ctx = ResolveContext::new("any", Tier::Free, &values, &features);
        let shown = resolve_visible(&registry, &ctx).iter().any(|p| p.id == "target");

        let expected = matches!(current.as_deref(), Some("a") | Some("b"));
        prop_assert_eq!(shown, expected);
    }

    /// Sorting by `order` is stable and ascending regardless of declaration order.
    #[test]
    fn order_sorts_ascending(orders in prop::collection::vec(-5i32..5, 1..8)) {
        let params: Vec<ParameterSpec> = orders
            .iter()
            .enumerate()
            .map(|(i, order)| text(&format!("p{}", i)).order(*order))
            .collect();
        let registry = Registry::new(params, vec![], vec![]);

        let values = ValueMap::new();
        let features = FeatureSet::new();
        let ctx = ResolveContext::new("any", Tier::Free, &values, &features);
        let resolved = resolve_visible(&registry, &ctx);

        prop_assert_eq!(resolved.len(), orders.len());
        for pair in resolved.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.sort_key() <= b.sort_key());
            if a.sort_key() == b.sort_key() {
                // Ties keep declaration order.
                let ia: usize = a.id[1..].parse().unwrap();
                let ib: usize = b.id[1..].parse().unwrap();
                prop_assert!(ia < ib);
            }
        }
    }
}

// ============================================================================
// 3. Fixed cases
// ============================================================================

#[test]
fn tier_allow_list_is_not_ordinal() {
    let registry = Registry::new(
        vec![
            text("premiumOnly").visibility(Visibility::new().tiers([Tier::Premium])),
            text("paid").visibility(Visibility::new().tiers([Tier::Standard])),
            text("everyone").visibility(Visibility::new().tiers([Tier::Free])),
        ],
        vec![],
        vec![],
    );
    let values = ValueMap::new();
    let features = FeatureSet::new();

    assert_eq!(
        visible_ids(&registry, "any", Tier::Standard, &values, &features),
        vec!["paid", "everyone"]
    );
    assert_eq!(
        visible_ids(&registry, "any", Tier::Premium, &values, &features),
        vec!["premiumOnly", "paid", "everyone"]
    );
    assert_eq!(
        visible_ids(&registry, "any", Tier::Free, &values, &features),
        vec!["everyone"]
    );
}

#[test]
fn mode_condition_excludes_other_modes() {
    let registry = Registry::new(
        vec![text("prompt").visibility(Visibility::new().mode(MODE_INSPIRATION))],
        vec![],
        vec![],
    );
    let values = ValueMap::new();
    let features = FeatureSet::new();
    assert_eq!(
        visible_ids(&registry, MODE_INSPIRATION, Tier::Free, &values, &features),
        vec!["prompt"]
    );
    assert!(visible_ids(&registry, MODE_CUSTOM, Tier::Free, &values, &features).is_empty());
}

#[test]
fn vocal_type_defaults_per_mode() {
    let registry = builtin_registry();
    assert_eq!(
        default_for(&registry, "vocalType", MODE_INSTRUMENTAL),
        Some(DefaultValue::Cleared)
    );
    assert_eq!(
        default_for(&registry, "vocalType", MODE_INSPIRATION),
        Some(DefaultValue::Value(json!("random")))
    );
}

#[test]
fn builtin_registry_lints_clean() {
    let result = validate_registry(&builtin_registry());
    assert!(result.errors.is_empty(), "errors: {:?}", result.errors);
    assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
}
