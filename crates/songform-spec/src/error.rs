//! Error types for registry loading, registry linting, and field checks.

use thiserror::Error;

/// Issue codes reported by registry linting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    // Identity errors (R001-R003)
    /// R001: Two parameters share an id
    DuplicateParameterId,
    /// R002: Two modes share an id
    DuplicateModeId,
    /// R003: Parameter id is empty
    EmptyParameterId,

    // Reference errors (R010-R013)
    /// R010: `depends_on` names a parameter that does not exist
    DanglingDependency,
    /// R011: Mode override names a parameter that does not exist
    UnknownOverrideParameter,
    /// R012: Parameter belongs to an undeclared group
    UnknownGroup,
    /// R013: `depends_on` points at the parameter itself
    SelfDependency,

    // Shape errors (R020-R022)
    /// R020: Options declared on a parameter kind that does not take options
    UnexpectedOptions,
    /// R021: Validation pattern is not a valid regex
    InvalidPattern,
    /// R022: min_length exceeds max_length
    InvalidLengthBounds,
}

impl IssueCode {
    /// Returns the issue code string (e.g., "R001").
    pub fn code(&self) -> &'static str {
        match self {
            IssueCode::DuplicateParameterId => "R001",
            IssueCode::DuplicateModeId => "R002",
            IssueCode::EmptyParameterId => "R003",
            IssueCode::DanglingDependency => "R010",
            IssueCode::UnknownOverrideParameter => "R011",
            IssueCode::UnknownGroup => "R012",
            IssueCode::SelfDependency => "R013",
            IssueCode::UnexpectedOptions => "R020",
            IssueCode::InvalidPattern => "R021",
            IssueCode::InvalidLengthBounds => "R022",
        }
    }
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes reported by registry linting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LintWarningCode {
    /// W001: Select parameter declares no options
    SelectWithoutOptions,
    /// W002: Mode overrides nothing and has no description
    EmptyMode,
    /// W003: Group declared but never used
    UnusedGroup,
}

impl LintWarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            LintWarningCode::SelectWithoutOptions => "W001",
            LintWarningCode::EmptyMode => "W002",
            LintWarningCode::UnusedGroup => "W003",
        }
    }
}

impl std::fmt::Display for LintWarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A registry configuration error with code, message, and optional location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryIssue {
    /// The issue code.
    pub code: IssueCode,
    /// Human-readable message.
    pub message: String,
    /// Location in the registry (e.g., "parameters\[3\].visibility").
    pub path: Option<String>,
}

impl RegistryIssue {
    /// Creates a new registry issue.
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new registry issue with a location.
    pub fn with_path(code: IssueCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for RegistryIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for RegistryIssue {}

/// A registry lint warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintWarning {
    pub code: LintWarningCode,
    pub message: String,
    pub path: Option<String>,
}

impl LintWarning {
    /// Creates a new lint warning with a location.
    pub fn with_path(
        code: LintWarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for LintWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Result of linting a registry.
#[derive(Debug, Clone)]
pub struct LintResult {
    /// Whether linting passed (no errors).
    pub ok: bool,
    /// Configuration errors.
    pub errors: Vec<RegistryIssue>,
    /// Non-fatal findings.
    pub warnings: Vec<LintWarning>,
}

impl LintResult {
    /// Creates a passing result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: RegistryIssue) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: LintWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<LintWarning>, Vec<RegistryIssue>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for LintResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Violation codes for user-entered field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationCode {
    /// F001: Required field is empty
    Required,
    /// F002: Value shorter than min_length
    TooShort,
    /// F003: Value longer than max_length
    TooLong,
    /// F004: Value does not match the pattern
    PatternMismatch,
    /// F005: Value requires an entitlement the user lacks
    NotEntitled,
    /// F006: Value is not one of the parameter's options
    UnknownOption,
}

impl ViolationCode {
    /// Returns the violation code string (e.g., "F001").
    pub fn code(&self) -> &'static str {
        match self {
            ViolationCode::Required => "F001",
            ViolationCode::TooShort => "F002",
            ViolationCode::TooLong => "F003",
            ViolationCode::PatternMismatch => "F004",
            ViolationCode::NotEntitled => "F005",
            ViolationCode::UnknownOption => "F006",
        }
    }
}

impl std::fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A user-facing problem with one field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// The violation code.
    pub code: ViolationCode,
    /// Id of the offending parameter.
    pub param_id: String,
    /// Message suitable for showing next to the field.
    pub message: String,
}

impl FieldViolation {
    /// Creates a new field violation.
    pub fn new(
        code: ViolationCode,
        param_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            param_id: param_id.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (field {})", self.code, self.message, self.param_id)
    }
}

impl std::error::Error for FieldViolation {}

/// Top-level error type for loading registries.
#[derive(Debug, Error)]
pub enum SpecError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Registry file has an extension we do not read.
    #[error("unsupported registry file extension: {0}")]
    UnsupportedFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
