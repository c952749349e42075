//! Registry linting and field checks.
//!
//! [`validate_registry`] catches configuration mistakes (duplicate ids,
//! dangling dependencies, bad patterns) at load time. The resolvers tolerate
//! those mistakes at runtime, so linting is the only place they surface.
//!
//! [`check_values`], [`check_options`] and [`check_duration_entitlement`]
//! inspect user input and return violations
//! for the caller to display; nothing here panics or throws.

mod fields;


use std::collections::HashSet;

use crate::error::{IssueCode, LintResult, LintWarning, LintWarningCode, RegistryIssue};
use crate::parameter::ParameterKind;
use crate::registry::Registry;

pub use fields::{
    check_duration_entitlement, check_options, check_values, MAX_FREE_DURATION_SECONDS,
};

/// Lints a registry and returns every issue found.
///
/// # Example
/// ```
/// use songform_spec::{Catalog, Registry};
/// use songform_spec::validation::validate_registry;
///
/// let registry = Registry::builtin(&Catalog::builtin());
/// let result = validate_registry(&registry);
/// assert!(result.is_ok(), "errors: {:?}", result.errors);
/// ```
pub fn validate_registry(registry: &Registry) -> LintResult {
    let mut result = LintResult::default();

    validate_parameter_ids(registry, &mut result);
    validate_mode_ids(registry, &mut result);
    validate_references(registry, &mut result);
    validate_shapes(registry, &mut result);
    check_warnings(registry, &mut result);

    tracing::debug!(
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "registry linted"
    );

    result
}

/// Parameter ids must be non-empty and unique.
fn validate_parameter_ids(registry: &Registry, result: &mut LintResult) {
    let mut seen: HashSet<&str> = HashSet::new();
    for (i, param) in registry.parameters().iter().enumerate() {
        if param.id.trim().is_empty() {
            result.add_error(RegistryIssue::with_path(
                IssueCode::EmptyParameterId,
                "parameter id must not be empty",
                format!("parameters[{}].id", i),
            ));
            continue;
        }
        if !seen.insert(&param.id) {
            result.add_error(RegistryIssue::with_path(
                IssueCode::DuplicateParameterId,
                format!("duplicate parameter id: '{}'", param.id),
                format!("parameters[{}].id", i),
            ));
        }
    }
}

/// Mode ids must be unique.
fn validate_mode_ids(registry: &Registry, result: &mut LintResult) {
    let mut seen: HashSet<&str> = HashSet::new();
    for (i, mode) in registry.modes().iter().enumerate() {
        if !seen.insert(&mode.id) {
            result.add_error(RegistryIssue::with_path(
                IssueCode::DuplicateModeId,
                format!("duplicate mode id: '{}'", mode.id),
                format!("modes[{}].id", i),
            ));
        }
    }
}

/// Dependencies, overrides, and groups must point at things that exist.
fn validate_references(registry: &Registry, result: &mut LintResult) {
    for (i, param) in registry.parameters().iter().enumerate() {
        if let Some(ref clause) = param.visibility {
            for dep in clause.dependencies() {
                if dep == param.id {
                    result.add_error(RegistryIssue::with_path(
                        IssueCode::SelfDependency,
                        format!("parameter '{}' depends on itself", param.id),
                        format!("parameters[{}].visibility", i),
                    ));
                } else if !registry.contains(dep) {
                    result.add_error(RegistryIssue::with_path(
                        IssueCode::DanglingDependency,
                        format!(
                            "parameter '{}' depends on unknown parameter '{}'",
                            param.id, dep
                        ),
                        format!("parameters[{}].visibility", i),
                    ));
                }
            }
        }

        // Registries without declared groups are allowed; only check when some exist.
        if !registry.groups().is_empty() && registry.group(&param.group).is_none() {
            result.add_error(RegistryIssue::with_path(
                IssueCode::UnknownGroup,
                format!(
                    "parameter '{}' belongs to undeclared group '{}'",
                    param.id, param.group
                ),
                format!("parameters[{}].group", i),
            ));
        }
    }

    for (i, mode) in registry.modes().iter().enumerate() {
        for param_id in mode.default_overrides.keys() {
            if !registry.contains(param_id) {
                result.add_error(RegistryIssue::with_path(
                    IssueCode::UnknownOverrideParameter,
                    format!(
                        "mode '{}' overrides unknown parameter '{}'",
                        mode.id, param_id
                    ),
                    format!("modes[{}].default_overrides.{}", i, param_id),
                ));
            }
        }
    }
}

/// Options and validation rules must make sense for the parameter.
fn validate_shapes(registry: &Registry, result: &mut LintResult) {
    for (i, param) in registry.parameters().iter().enumerate() {
        if !param.options.is_empty() && !param.kind.accepts_options() {
            result.add_error(RegistryIssue::with_path(
                IssueCode::UnexpectedOptions,
                format!(
                    "parameter '{}' of kind '{}' cannot declare options",
                    param.id, param.kind
                ),
                format!("parameters[{}].options", i),
            ));
        }

        let Some(ref rule) = param.validation else {
            continue;
        };

        if let Some(Err(err)) = rule.compiled_pattern() {
            result.add_error(RegistryIssue::with_path(
                IssueCode::InvalidPattern,
                format!("invalid validation pattern for '{}': {}", param.id, err),
                format!("parameters[{}].validation.pattern", i),
            ));
        }

        if let (Some(min), Some(max)) = (rule.min_length, rule.max_length) {
            if min > max {
                result.add_error(RegistryIssue::with_path(
                    IssueCode::InvalidLengthBounds,
                    format!(
                        "min_length {} exceeds max_length {} for '{}'",
                        min, max, param.id
                    ),
                    format!("parameters[{}].validation", i),
                ));
            }
        }
    }
}

fn check_warnings(registry: &Registry, result: &mut LintResult) {
    for (i, param) in registry.parameters().iter().enumerate() {
        if param.kind == ParameterKind::SingleSelect && param.options.is_empty() {
            result.add_warning(LintWarning::with_path(
                LintWarningCode::SelectWithoutOptions,
                format!("select parameter '{}' has no options", param.id),
                format!("parameters[{}].options", i),
            ));
        }
    }

    for (i, mode) in registry.modes().iter().enumerate() {
        if mode.default_overrides.is_empty() && mode.description.is_empty() {
            result.add_warning(LintWarning::with_path(
                LintWarningCode::EmptyMode,
                format!("mode '{}' has no description and no overrides", mode.id),
                format!("modes[{}]", i),
            ));
        }
    }

    for (i, group) in registry.groups().iter().enumerate() {
        if !registry.parameters().iter().any(|p| p.group == group.id) {
            result.add_warning(LintWarning::with_path(
                LintWarningCode::UnusedGroup,
                format!("group '{}' has no parameters", group.id),
                format!("groups[{}]", i),
            ));
        }
    }
}
