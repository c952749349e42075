//! Subscription tiers and entitlement-based tier resolution.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Entitlement that unlocks the premium tier.
pub const FEATURE_HIGH_QUALITY: &str = "high-quality";

/// Entitlement that unlocks the standard tier.
pub const FEATURE_CUSTOM_PARAMETERS: &str = "custom-parameters";

/// Subscription tier, ordered `Free < Standard < Premium`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// No paid plan.
    #[default]
    Free,
    /// Standard paid plan.
    Standard,
    /// Top paid plan.
    Premium,
}

impl Tier {
    /// Returns the tier as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Standard => "standard",
            Tier::Premium => "premium",
        }
    }

    /// Returns all tiers in ascending order.
    pub fn all() -> &'static [Tier] {
        &[Tier::Free, Tier::Standard, Tier::Premium]
    }

    /// Returns true if a user on `self` passes a visibility clause that lists `required`.
    ///
    /// This is an allow-list per listed level, not an ordinal comparison:
    /// `Free` admits everyone, `Standard` admits standard and premium users,
    /// `Premium` admits premium users only.
    pub fn satisfies(&self, required: Tier) -> bool {
        match required {
            Tier::Free => true,
            Tier::Standard => matches!(self, Tier::Standard | Tier::Premium),
            Tier::Premium => *self == Tier::Premium,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Tier::Free),
            "standard" => Ok(Tier::Standard),
            "premium" => Ok(Tier::Premium),
            _ => Err(format!("unknown tier: {}", s)),
        }
    }
}

/// Source of feature entitlements, supplied by the subscription backend.
pub trait Entitlements {
    /// Returns true if the current user may use the named feature.
    fn can_use_feature(&self, feature: &str) -> bool;
}

impl<F> Entitlements for F
where
    F: Fn(&str) -> bool,
{
    fn can_use_feature(&self, feature: &str) -> bool {
        self(feature)
    }
}

/// A fixed set of granted feature names.
///
/// Doubles as the feature-flag set passed to the visibility resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet {
    features: BTreeSet<String>,
}

impl FeatureSet {
    /// Creates an empty feature set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feature.
    pub fn insert(&mut self, feature: impl Into<String>) {
        self.features.insert(feature.into());
    }

    /// Returns true if the feature is present.
    pub fn contains(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    /// Iterates the features in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }

    /// Returns the number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if no features are granted.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Entitlements for FeatureSet {
    fn can_use_feature(&self, feature: &str) -> bool {
        self.contains(feature)
    }
}

/// Derives the coarse tier from entitlement checks.
///
/// Checks run from most to least privileged, so a caller holding both
/// entitlements resolves to `Premium`.
pub fn tier_for(entitlements: &impl Entitlements) -> Tier {
    if entitlements.can_use_feature(FEATURE_HIGH_QUALITY) {
        Tier::Premium
    } else if entitlements.can_use_feature(FEATURE_CUSTOM_PARAMETERS) {
        Tier::Standard
    } else {
        Tier::Free
    }
}
