//! Visibility clauses.
//!
//! A clause is a list of [`Condition`]s that must all hold for a parameter
//! to be shown. Conditions are evaluated left to right and stop at the first
//! failure. An empty clause always holds.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::resolve::ResolveContext;
use crate::tier::Tier;
use crate::value::ValueMap;

/// Predicate signature for custom conditions.
pub type ValuePredicate = dyn Fn(&ValueMap) -> bool + Send + Sync;

/// A named predicate over the whole value map.
///
/// Custom conditions only exist in registries built in code; they have no
/// file representation.
#[derive(Clone)]
pub struct CustomCondition {
    name: String,
    predicate: Arc<ValuePredicate>,
}

impl CustomCondition {
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&ValueMap) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Returns the predicate's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the predicate.
    pub fn test(&self, values: &ValueMap) -> bool {
        (self.predicate)(values)
    }
}

impl fmt::Debug for CustomCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCondition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// Predicates cannot be compared, so identity is the name.
impl PartialEq for CustomCondition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// One visibility condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Current mode must be one of `modes`.
    Mode {
        #[serde(deserialize_with = "one_or_many")]
        modes: Vec<String>,
    },
    /// Current tier must satisfy at least one of `tiers` (see [`Tier::satisfies`]).
    Tier {
        #[serde(deserialize_with = "one_or_many")]
        tiers: Vec<Tier>,
    },
    /// The named feature flag must be present.
    Feature { feature: String },
    /// Another parameter's current value must equal one of `values`.
    DependsOn {
        param_id: String,
        #[serde(deserialize_with = "one_or_many")]
        values: Vec<Value>,
    },
    /// Arbitrary predicate over the value map.
    #[serde(skip)]
    Custom(CustomCondition),
}

impl Condition {
    /// Evaluates this condition in the given context.
    pub fn holds(&self, ctx: &ResolveContext<'_>) -> bool {
        match self {
            Condition::Mode { modes } => modes.iter().any(|m| m == ctx.mode),
            Condition::Tier { tiers } => tiers.iter().any(|t| ctx.tier.satisfies(*t)),
            Condition::Feature { feature } => ctx.features.contains(feature),
            Condition::DependsOn { param_id, values } => ctx
                .values
                .get(param_id)
                .map_or(false, |current| values.contains(current)),
            Condition::Custom(custom) => custom.test(ctx.values),
        }
    }

    /// Short name of the condition kind, for logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Condition::Mode { .. } => "mode",
            Condition::Tier { .. } => "tier",
            Condition::Feature { .. } => "feature",
            Condition::DependsOn { .. } => "depends_on",
            Condition::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Mode { modes } => write!(f, "mode({})", modes.join("|")),
            Condition::Tier { tiers } => {
                let names: Vec<_> = tiers.iter().map(Tier::as_str).collect();
                write!(f, "tier({})", names.join("|"))
            }
            Condition::Feature { feature } => write!(f, "feature({})", feature),
            Condition::DependsOn { param_id, values } => {
                let shown: Vec<_> = values.iter().map(Value::to_string).collect();
                write!(f, "depends_on({} in [{}])", param_id, shown.join(", "))
            }
            Condition::Custom(custom) => write!(f, "custom({})", custom.name()),
        }
    }
}

/// A conjunction of conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Visibility {
    conditions: Vec<Condition>,
}

impl Visibility {
    /// Creates an empty clause (always visible).
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires one of the given modes.
    pub fn modes<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions.push(Condition::Mode {
            modes: modes.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Requires a single mode.
    pub fn mode(self, mode: impl Into<String>) -> Self {
        let mode: String = mode.into();
        self.modes([mode])
    }

    /// Requires one of the given tiers.
    pub fn tiers(mut self, tiers: impl IntoIterator<Item = Tier>) -> Self {
        self.conditions.push(Condition::Tier {
            tiers: tiers.into_iter().collect(),
        });
        self
    }

    /// Requires a feature flag.
    pub fn feature(mut self, feature: impl Into<String>) -> Self {
        self.conditions.push(Condition::Feature {
            feature: feature.into(),
        });
        self
    }

    /// Requires another parameter to hold one of the given values.
    pub fn depends_on(
        mut self,
        param_id: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> Self {
        self.conditions.push(Condition::DependsOn {
            param_id: param_id.into(),
            values: values.into_iter().collect(),
        });
        self
    }

    /// Adds a custom predicate.
    pub fn custom(
        mut self,
        name: impl Into<String>,
        predicate: impl Fn(&ValueMap) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.conditions
            .push(Condition::Custom(CustomCondition::new(name, predicate)));
        self
    }

    /// Returns the conditions in evaluation order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the first condition that fails, or `None` if the clause holds.
    pub fn first_failure(&self, ctx: &ResolveContext<'_>) -> Option<&Condition> {
        self.conditions.iter().find(|c| !c.holds(ctx))
    }

    /// Returns true if every condition holds.
    pub fn holds(&self, ctx: &ResolveContext<'_>) -> bool {
        self.conditions.iter().all(|c| c.holds(ctx))
    }

    /// Iterates the parameter ids this clause depends on.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().filter_map(|c| match c {
            Condition::DependsOn { param_id, .. } => Some(param_id.as_str()),
            _ => None,
        })
    }
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    // `Many` first: a JSON array must be read as a list, not as a single value.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}
