//! The parameter registry.
//!
//! A [`Registry`] bundles the parameter specs, the generation modes, and the
//! presentation groups. It is built once (from [`Registry::builtin`] or from a
//! file) and then only read. Lookups by unknown id return `None`.
//!
//! Construction is permissive: duplicate ids or dangling references are kept
//! as-is and reported by [`crate::validation::validate_registry`].

mod builtin;


use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::SpecError;
use crate::mode::ModeSpec;
use crate::parameter::{ParameterGroup, ParameterSpec};

/// File representation of a registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryDocument {
    #[serde(default)]
    pub groups: Vec<ParameterGroup>,
    #[serde(default)]
    pub modes: Vec<ModeSpec>,
    pub parameters: Vec<ParameterSpec>,
}

/// Read-only collection of parameters, modes, and groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RegistryDocument", into = "RegistryDocument")]
pub struct Registry {
    parameters: Vec<ParameterSpec>,
    modes: Vec<ModeSpec>,
    groups: Vec<ParameterGroup>,
    parameter_index: HashMap<String, usize>,
}

impl Registry {
    /// Builds a registry. The first parameter with a given id wins lookups.
    pub fn new(
        parameters: Vec<ParameterSpec>,
        modes: Vec<ModeSpec>,
        groups: Vec<ParameterGroup>,
    ) -> Self {
        let mut parameter_index = HashMap::with_capacity(parameters.len());
        for (i, p) in parameters.iter().enumerate() {
            parameter_index.entry(p.id.clone()).or_insert(i);
        }

        tracing::debug!(
            parameters = parameters.len(),
            modes = modes.len(),
            groups = groups.len(),
            "registry built"
        );

        Self {
            parameters,
            modes,
            groups,
            parameter_index,
        }
    }

    /// Returns the registry shipped with the product, with options drawn from `catalog`.
    pub fn builtin(catalog: &Catalog) -> Self {
        builtin::registry(catalog)
    }

    /// Parses a registry from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let document: RegistryDocument = serde_json::from_str(json)?;
        Ok(document.into())
    }

    /// Parses a registry from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, SpecError> {
        let document: RegistryDocument = serde_yaml::from_str(yaml)?;
        Ok(document.into())
    }

    /// Loads a registry file, choosing the parser by extension (`.json`, `.yaml`, `.yml`).
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let content = std::fs::read_to_string(path)?;

        tracing::debug!(path = %path.display(), "loading registry file");

        match extension.as_str() {
            "json" => Self::from_json(&content),
            "yaml" | "yml" => Self::from_yaml(&content),
            other => Err(SpecError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Serializes the registry to pretty-printed JSON.
    ///
    /// Fails if any parameter carries a custom condition.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// All parameters in declaration order.
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Looks up a parameter by id.
    pub fn parameter(&self, id: &str) -> Option<&ParameterSpec> {
        self.parameter_index.get(id).map(|&i| &self.parameters[i])
    }

    /// Returns true if a parameter with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.parameter_index.contains_key(id)
    }

    /// All modes in declaration order.
    pub fn modes(&self) -> &[ModeSpec] {
        &self.modes
    }

    /// Looks up a mode by id.
    pub fn mode(&self, id: &str) -> Option<&ModeSpec> {
        self.modes.iter().find(|m| m.id == id)
    }

    /// All groups in declaration order.
    pub fn groups(&self) -> &[ParameterGroup] {
        &self.groups
    }

    /// Looks up a group by id.
    pub fn group(&self, id: &str) -> Option<&ParameterGroup> {
        self.groups.iter().find(|g| g.id == id)
    }
}

impl From<RegistryDocument> for Registry {
    fn from(document: RegistryDocument) -> Self {
        Registry::new(document.parameters, document.modes, document.groups)
    }
}

impl From<Registry> for RegistryDocument {
    fn from(registry: Registry) -> Self {
        RegistryDocument {
            groups: registry.groups,
            modes: registry.modes,
            parameters: registry.parameters,
        }
    }
}
