//! Generation modes and their default overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Describe the music in prose.
pub const MODE_INSPIRATION: &str = "inspiration";
/// Write the lyrics yourself.
pub const MODE_CUSTOM: &str = "custom";
/// No vocals.
pub const MODE_INSTRUMENTAL: &str = "instrumental";

/// A mode's override for one parameter's initial value.
///
/// In files, `null` means [`ModeDefault::Cleared`] and any other value means
/// [`ModeDefault::Set`]. A parameter with no entry at all has no override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<Value>", into = "Option<Value>")]
pub enum ModeDefault {
    /// Start the field with this value.
    Set(Value),
    /// Start the field with no value.
    Cleared,
}

impl From<Option<Value>> for ModeDefault {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(Value::Null) | None => ModeDefault::Cleared,
            Some(v) => ModeDefault::Set(v),
        }
    }
}

impl From<ModeDefault> for Option<Value> {
    fn from(default: ModeDefault) -> Self {
        match default {
            ModeDefault::Set(v) => Some(v),
            ModeDefault::Cleared => None,
        }
    }
}

/// One generation workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeSpec {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Parameter id to initial-value override.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default_overrides: BTreeMap<String, ModeDefault>,
}

impl ModeSpec {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            default_overrides: BTreeMap::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Overrides a parameter's initial value in this mode.
    pub fn set_default(mut self, param_id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_overrides
            .insert(param_id.into(), ModeDefault::Set(value.into()));
        self
    }

    /// Clears a parameter's initial value in this mode.
    pub fn clear_default(mut self, param_id: impl Into<String>) -> Self {
        self.default_overrides
            .insert(param_id.into(), ModeDefault::Cleared);
        self
    }

    /// Returns the override for a parameter, if any.
    pub fn override_for(&self, param_id: &str) -> Option<&ModeDefault> {
        self.default_overrides.get(param_id)
    }
}
