//! Visibility and default resolution.
//!
//! Everything here is a pure function of a borrowed [`Registry`] and a
//! borrowed value map, so it can run concurrently from any number of callers.

use serde_json::Value;

use crate::mode::ModeDefault;
use crate::parameter::{ParameterGroup, ParameterSpec};
use crate::registry::Registry;
use crate::tier::{FeatureSet, Tier};
use crate::value::ValueMap;

/// Inputs to visibility resolution.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub mode: &'a str,
    pub tier: Tier,
    pub values: &'a ValueMap,
    pub features: &'a FeatureSet,
}

impl<'a> ResolveContext<'a> {
    pub fn new(mode: &'a str, tier: Tier, values: &'a ValueMap, features: &'a FeatureSet) -> Self {
        Self {
            mode,
            tier,
            values,
            features,
        }
    }
}

/// Returns the parameters to render for `ctx`, in display order.
///
/// Parameters without a visibility clause are always included. Others are
/// included only when every condition holds. The result is stably sorted by
/// `order` (missing = 0), so ties keep registry declaration order. Unknown
/// modes and missing values never error; they just exclude parameters.
pub fn resolve_visible<'r>(
    registry: &'r Registry,
    ctx: &ResolveContext<'_>,
) -> Vec<&'r ParameterSpec> {
    let mut visible: Vec<&ParameterSpec> = registry
        .parameters()
        .iter()
        .filter(|p| match &p.visibility {
            None => true,
            Some(clause) => match clause.first_failure(ctx) {
                None => true,
                Some(failed) => {
                    tracing::trace!(param = %p.id, condition = %failed, "parameter hidden");
                    false
                }
            },
        })
        .collect();

    visible.sort_by_key(|p| p.sort_key());
    visible
}

/// Initial value of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Start with this value.
    Value(Value),
    /// The mode deliberately clears this field.
    Cleared,
}

impl DefaultValue {
    /// Returns the value, or `None` when cleared.
    pub fn into_value(self) -> Option<Value> {
        match self {
            DefaultValue::Value(v) => Some(v),
            DefaultValue::Cleared => None,
        }
    }

    /// Returns the value as JSON, with `Cleared` as null.
    pub fn to_json(&self) -> Value {
        match self {
            DefaultValue::Value(v) => v.clone(),
            DefaultValue::Cleared => Value::Null,
        }
    }
}

/// Returns the initial value of `param_id` in `mode`.
///
/// A mode override wins, including an override that clears the field.
/// Otherwise the parameter's own default applies. Returns `None` when the
/// registry has no such parameter.
pub fn default_for(registry: &Registry, param_id: &str, mode: &str) -> Option<DefaultValue> {
    let param = registry.parameter(param_id)?;

    if let Some(over) = registry.mode(mode).and_then(|m| m.override_for(param_id)) {
        return Some(match over {
            ModeDefault::Set(v) => DefaultValue::Value(v.clone()),
            ModeDefault::Cleared => DefaultValue::Cleared,
        });
    }

    Some(DefaultValue::Value(param.default_value.clone()))
}

/// Builds a fresh value map for `mode` from defaults.
///
/// Cleared fields and parameters whose default is null are left out. Callers
/// switching modes should replace their map with this rather than merge.
pub fn initial_values(registry: &Registry, mode: &str) -> ValueMap {
    registry
        .parameters()
        .iter()
        .filter_map(|p| {
            let value = default_for(registry, &p.id, mode)?.into_value()?;
            if value.is_null() {
                return None;
            }
            Some((p.id.clone(), value))
        })
        .collect()
}

/// Resolved parameters belonging to one group.
#[derive(Debug, Clone)]
pub struct GroupedParameters<'r> {
    /// `None` when the parameter names a group the registry does not declare.
    pub group: Option<&'r ParameterGroup>,
    pub group_id: &'r str,
    pub parameters: Vec<&'r ParameterSpec>,
}

/// Clusters resolved parameters by group for rendering.
///
/// Groups come out in group `order`; undeclared groups go last, in first-seen
/// order. Within a group the resolver's order is kept.
pub fn group_visible<'r>(
    registry: &'r Registry,
    visible: &[&'r ParameterSpec],
) -> Vec<GroupedParameters<'r>> {
    let mut clusters: Vec<GroupedParameters<'r>> = Vec::new();

    for &param in visible {
        match clusters.iter_mut().find(|c| c.group_id == param.group) {
            Some(cluster) => cluster.parameters.push(param),
            None => clusters.push(GroupedParameters {
                group: registry.group(&param.group),
                group_id: param.group.as_str(),
                parameters: vec![param],
            }),
        }
    }

    clusters.sort_by_key(|c| c.group.map_or(i32::MAX, |g| g.order));
    clusters
}
