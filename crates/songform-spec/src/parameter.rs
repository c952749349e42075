//! Parameter specifications.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::OptionItem;
use crate::error::{FieldViolation, ViolationCode};
use crate::visibility::Visibility;

/// Input control type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Single-line text.
    Text,
    /// Numeric input.
    Number,
    /// Pick one option.
    SingleSelect,
    /// Pick any number of options.
    MultiSelect,
    /// Multi-line text.
    LongText,
    /// Checkbox.
    Boolean,
    /// Free-form tags, optionally with suggestions.
    TagList,
}

impl ParameterKind {
    /// Returns the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::Text => "text",
            ParameterKind::Number => "number",
            ParameterKind::SingleSelect => "single_select",
            ParameterKind::MultiSelect => "multi_select",
            ParameterKind::LongText => "long_text",
            ParameterKind::Boolean => "boolean",
            ParameterKind::TagList => "tag_list",
        }
    }

    /// Returns true if parameters of this kind may declare options.
    pub fn accepts_options(&self) -> bool {
        matches!(
            self,
            ParameterKind::SingleSelect | ParameterKind::MultiSelect | ParameterKind::TagList
        )
    }
}

impl std::fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Constraints on a user-entered text value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regex the whole value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Message shown instead of the generated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Compiles the pattern, anchored to the whole value.
    pub fn compiled_pattern(&self) -> Option<Result<Regex, regex::Error>> {
        self.pattern
            .as_ref()
            .map(|p| Regex::new(&format!("^(?:{})$", p)))
    }

    /// Checks a string value against this rule.
    ///
    /// Non-string values are not length- or pattern-checked. An uncompilable
    /// pattern is skipped here; registry linting reports it.
    pub fn check(&self, param_id: &str, value: &Value) -> Option<FieldViolation> {
        let Value::String(text) = value else {
            return None;
        };
        let len = text.chars().count();

        if let Some(min) = self.min_length {
            if len < min {
                return Some(self.violation(
                    ViolationCode::TooShort,
                    param_id,
                    format!("must be at least {} characters, got {}", min, len),
                ));
            }
        }

        if let Some(max) = self.max_length {
            if len > max {
                return Some(self.violation(
                    ViolationCode::TooLong,
                    param_id,
                    format!("must be at most {} characters, got {}", max, len),
                ));
            }
        }

        match self.compiled_pattern() {
            Some(Ok(re)) if !re.is_match(text) => Some(self.violation(
                ViolationCode::PatternMismatch,
                param_id,
                format!("must match pattern '{}'", self.pattern.as_deref().unwrap_or_default()),
            )),
            Some(Err(err)) => {
                tracing::warn!(param_id, %err, "skipping uncompilable validation pattern");
                None
            }
            _ => None,
        }
    }

    fn violation(&self, code: ViolationCode, param_id: &str, fallback: String) -> FieldViolation {
        let message = self.message.clone().unwrap_or(fallback);
        FieldViolation::new(code, param_id, message)
    }
}

/// Presentational cluster of parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterGroup {
    pub id: String,
    pub label: String,
    /// Display position among groups.
    pub order: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub collapsible: bool,
}

impl ParameterGroup {
    pub fn new(id: impl Into<String>, label: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            order,
            description: String::new(),
            collapsible: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn collapsible(mut self) -> Self {
        self.collapsible = true;
        self
    }
}

/// Declarative description of one form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Unique key across the registry.
    pub id: String,
    pub label: String,
    pub kind: ParameterKind,
    /// Group id; presentation only.
    pub group: String,
    /// Enforced only while the parameter is visible.
    #[serde(default)]
    pub required: bool,
    /// Baseline value used when the mode has no override.
    #[serde(default)]
    pub default_value: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Outbound payload key; falls back to `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    /// Sort key; missing means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterSpec {
    /// Creates a parameter with no default, no visibility clause, and no rule.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: ParameterKind,
        group: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            group: group.into(),
            required: false,
            default_value: Value::Null,
            options: Vec::new(),
            visibility: None,
            api_key: None,
            validation: None,
            order: None,
            placeholder: None,
            description: None,
        }
    }

    /// Marks the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn options(mut self, options: Vec<OptionItem>) -> Self {
        self.options = options;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn validation(mut self, rule: ValidationRule) -> Self {
        self.validation = Some(rule);
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Key used for this parameter in the outbound payload.
    pub fn payload_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or(&self.id)
    }

    /// Sort key used by the visibility resolver.
    pub fn sort_key(&self) -> i32 {
        self.order.unwrap_or(0)
    }

    /// Returns true if the parameter is shown regardless of context.
    pub fn is_unconditional(&self) -> bool {
        self.visibility.is_none()
    }
}
