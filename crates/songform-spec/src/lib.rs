//! Songform Parameter Library
//!
//! This crate decides which fields of the music generation form are shown,
//! what they start out as, whether the entered values are acceptable, and
//! what request body is sent to the generation backend.
//!
//! # Overview
//!
//! Everything is driven by a [`Registry`]: a declarative list of
//! [`ParameterSpec`]s, the generation [`ModeSpec`]s, and presentation
//! [`ParameterGroup`]s. Visibility is a list of [`Condition`]s (mode, tier,
//! feature flag, dependency on another field) that must all hold.
//!
//! # Example
//!
//! ```
//! use songform_spec::{
//!     format_payload, initial_values, resolve_visible, Catalog, FeatureSet, Registry,
//!     ResolveContext, Tier,
//! };
//! use songform_spec::validation::{check_values, validate_registry};
//!
//! let catalog = Catalog::builtin();
//! let registry = Registry::builtin(&catalog);
//! assert!(validate_registry(&registry).is_ok());
//!
//! // Start the form in the custom lyrics mode
//! let mut values = initial_values(&registry, "custom");
//! values.insert("musicName".into(), "Rainy Window".into());
//! values.insert("lyrics".into(), "drops on the glass, one by one".into());
//!
//! // Work out what to show a free user
//! let features = FeatureSet::new();
//! let ctx = ResolveContext::new("custom", Tier::Free, &values, &features);
//! let visible = resolve_visible(&registry, &ctx);
//! assert!(visible.iter().any(|p| p.id == "lyrics"));
//! assert!(check_values(&visible, &values).is_empty());
//!
//! // Build the request body
//! let payload = format_payload(&registry, &values, "custom");
//! assert_eq!(payload["name"], "Rainy Window");
//! assert_eq!(payload["description"], payload["lyrics"]);
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Models and option lists
//! - [`error`]: Diagnostic codes and error types
//! - [`mode`]: Generation modes and their default overrides
//! - [`parameter`]: Parameter specs, groups, and validation rules
//! - [`payload`]: Request body formatting
//! - [`registry`]: The parameter registry and its file formats
//! - [`resolve`]: Visibility, default, and grouping resolution
//! - [`tier`]: Subscription tiers and entitlements
//! - [`validation`]: Registry linting and field checks
//! - [`value`]: Form value maps
//! - [`visibility`]: Visibility conditions

pub mod catalog;
pub mod error;
pub mod mode;
pub mod parameter;
pub mod payload;
pub mod registry;
pub mod resolve;
pub mod tier;
pub mod validation;
pub mod value;
pub mod visibility;

// Re-export commonly used types at the crate root
pub use catalog::{find_option, Catalog, ModelSpec, OptionItem, OptionValue};
pub use error::{
    FieldViolation, IssueCode, LintResult, LintWarning, LintWarningCode, RegistryIssue, SpecError,
    ViolationCode,
};
pub use mode::{ModeDefault, ModeSpec, MODE_CUSTOM, MODE_INSPIRATION, MODE_INSTRUMENTAL};
pub use parameter::{ParameterGroup, ParameterKind, ParameterSpec, ValidationRule};
pub use payload::{format_payload, ApiResponse, Payload, PatchRule, PATCH_RULES, PAYLOAD_TIER};
pub use registry::{Registry, RegistryDocument};
pub use resolve::{
    default_for, group_visible, initial_values, resolve_visible, DefaultValue, GroupedParameters,
    ResolveContext,
};
pub use tier::{
    tier_for, Entitlements, FeatureSet, Tier, FEATURE_CUSTOM_PARAMETERS, FEATURE_HIGH_QUALITY,
};
pub use value::ValueMap;
pub use visibility::{Condition, CustomCondition, Visibility};
