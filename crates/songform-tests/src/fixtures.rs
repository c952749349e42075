//! Test fixtures.

use serde_json::Value;
use songform_spec::{
    resolve_visible, Catalog, FeatureSet, ParameterSpec, Registry, ResolveContext, Tier, ValueMap,
};
use std::path::PathBuf;

/// The built-in registry over the built-in catalog.
pub fn builtin_registry() -> Registry {
    Registry::builtin(&Catalog::builtin())
}

/// Builds a value map from pairs.
pub fn values(pairs: &[(&str, Value)]) -> ValueMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Ids of the parameters visible for the given inputs, in display order.
pub fn visible_ids(
    registry: &Registry,
    mode: &str,
    tier: Tier,
    values: &ValueMap,
    features: &FeatureSet,
) -> Vec<String> {
    let ctx = ResolveContext::new(mode, tier, values, features);
    resolve_visible(registry, &ctx)
        .into_iter()
        .map(|p: &ParameterSpec| p.id.clone())
        .collect()
}

/// Directory holding the on-disk fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Path of a named fixture file.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}
