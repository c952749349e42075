//! JSON output types for the `--json` flag.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use songform_spec::{FieldViolation, LintWarning, RegistryIssue};

/// A coded diagnostic in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonDiagnostic {
    /// Stable code (e.g. "R010", "W001", "F002")
    pub code: String,
    pub message: String,
    /// Registry path or field id the diagnostic points at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&RegistryIssue> for JsonDiagnostic {
    fn from(issue: &RegistryIssue) -> Self {
        Self {
            code: issue.code.code().to_string(),
            message: issue.message.clone(),
            path: issue.path.clone(),
        }
    }
}

impl From<&LintWarning> for JsonDiagnostic {
    fn from(warning: &LintWarning) -> Self {
        Self {
            code: warning.code.code().to_string(),
            message: warning.message.clone(),
            path: warning.path.clone(),
        }
    }
}

impl From<&FieldViolation> for JsonDiagnostic {
    fn from(violation: &FieldViolation) -> Self {
        Self {
            code: violation.code.code().to_string(),
            message: violation.message.clone(),
            path: Some(violation.param_id.clone()),
        }
    }
}

/// Output of `songform lint --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LintOutput {
    pub ok: bool,
    /// Registry file, or "builtin"
    pub source: String,
    pub errors: Vec<JsonDiagnostic>,
    pub warnings: Vec<JsonDiagnostic>,
}

/// Output of `songform check --json` and the validation half of `submit --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckOutput {
    pub ok: bool,
    pub mode: String,
    pub tier: String,
    pub violations: Vec<JsonDiagnostic>,
}

/// One visible parameter in `songform resolve --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonParameter {
    pub id: String,
    pub label: String,
    pub kind: String,
    pub required: bool,
    /// Current value, if the input supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// One group in `songform resolve --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonGroup {
    pub id: String,
    pub label: String,
    pub collapsible: bool,
    pub parameters: Vec<JsonParameter>,
}

/// Output of `songform resolve --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolveOutput {
    pub mode: String,
    pub tier: String,
    pub groups: Vec<JsonGroup>,
}

/// Output of `songform submit --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitOutput {
    pub ok: bool,
    pub dry_run: bool,
    pub payload: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<JsonDiagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
