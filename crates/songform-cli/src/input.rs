//! Loading registries and form values from the command line.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use songform_spec::{
    tier_for, Catalog, FeatureSet, Registry, ResolveContext, Tier, ValueMap,
    FEATURE_CUSTOM_PARAMETERS, FEATURE_HIGH_QUALITY,
};
use std::path::Path;

/// Everything a form command needs besides the registry.
#[derive(Debug, Clone)]
pub struct FormInput {
    pub mode: String,
    pub tier: Tier,
    pub features: FeatureSet,
    pub values: ValueMap,
}

impl FormInput {
    /// Builds the input from raw command-line pieces.
    ///
    /// `values_file` is read first and each `--set` assignment is applied on
    /// top. An explicit tier grants the entitlements that tier implies; without
    /// one, the tier is derived from the `--feature` flags.
    pub fn from_args(
        mode: &str,
        tier: Option<Tier>,
        features: &[String],
        assignments: &[String],
        values_file: Option<&Path>,
    ) -> Result<Self> {
        let mut granted: FeatureSet = features.iter().map(String::as_str).collect();
        if let Some(tier) = tier {
            for feature in implied_features(tier) {
                granted.insert(*feature);
            }
        }
        let tier = tier.unwrap_or_else(|| tier_for(&granted));

        let mut values = match values_file {
            Some(path) => load_values(path)?,
            None => ValueMap::new(),
        };
        for assignment in assignments {
            let (key, value) = parse_assignment(assignment)?;
            values.insert(key, value);
        }

        tracing::debug!(mode, %tier, values = values.len(), "form input ready");

        Ok(Self {
            mode: mode.to_string(),
            tier,
            features: granted,
            values,
        })
    }

    /// Returns the resolver context for this input.
    pub fn context(&self) -> ResolveContext<'_> {
        ResolveContext::new(&self.mode, self.tier, &self.values, &self.features)
    }
}

/// Entitlements held by every user on `tier`.
pub fn implied_features(tier: Tier) -> &'static [&'static str] {
    match tier {
        Tier::Free => &[],
        Tier::Standard => &[FEATURE_CUSTOM_PARAMETERS],
        Tier::Premium => &[FEATURE_HIGH_QUALITY, FEATURE_CUSTOM_PARAMETERS],
    }
}

/// Parses a `key=value` assignment.
///
/// The value is read as JSON when it parses (`true`, `42`, `["a","b"]`,
/// `null`) and as a plain string otherwise.
pub fn parse_assignment(assignment: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = assignment.split_once('=') else {
        bail!("invalid assignment '{}': expected key=value", assignment);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("invalid assignment '{}': key is empty", assignment);
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Reads a value map from a JSON or YAML file.
pub fn load_values(path: &Path) -> Result<ValueMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read values file: {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let values: ValueMap = match extension.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse values file: {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse values file: {}", path.display()))?,
    };
    Ok(values)
}

/// Loads the registry from `path`, or returns the built-in one.
pub fn load_registry(path: Option<&Path>, catalog: &Catalog) -> Result<Registry> {
    match path {
        Some(path) => Registry::load(path)
            .with_context(|| format!("Failed to load registry file: {}", path.display())),
        None => Ok(Registry::builtin(catalog)),
    }
}
