//! Checks on user-entered field values.

use serde_json::Value;

use crate::catalog::find_option;
use crate::error::{FieldViolation, ViolationCode};
use crate::parameter::{ParameterKind, ParameterSpec};
use crate::tier::{Entitlements, Tier, FEATURE_CUSTOM_PARAMETERS};
use crate::value::{is_blank, ValueMap};

/// Longest duration, in seconds, available without the custom-parameters entitlement.
pub const MAX_FREE_DURATION_SECONDS: u64 = 30;

/// Checks the values of the currently visible parameters.
///
/// Hidden parameters are never checked, so pass the output of
/// [`crate::resolve::resolve_visible`]. Each field reports at most one
/// violation; a required field that is blank reports `Required` and skips
/// its rule.
pub fn check_values(visible: &[&ParameterSpec], values: &ValueMap) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    for param in visible {
        let value = values.get(&param.id);
        let blank = value.map_or(true, is_blank);

        if blank {
            if param.required {
                violations.push(FieldViolation::new(
                    ViolationCode::Required,
                    &param.id,
                    format!("{} is required", param.label),
                ));
            }
            continue;
        }

        if let (Some(rule), Some(value)) = (&param.validation, value) {
            if let Some(violation) = rule.check(&param.id, value) {
                violations.push(violation);
            }
        }
    }

    violations
}

/// Checks select values against the parameter's options.
///
/// Every chosen value must be one of the options, and the option must be
/// open to `tier`. Parameters that declare no options are skipped, as are
/// blank values (those are reported by [`check_values`]). A multi-select
/// reports its first offending item only.
pub fn check_options(
    visible: &[&ParameterSpec],
    values: &ValueMap,
    tier: Tier,
) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    for param in visible {
        if param.options.is_empty() {
            continue;
        }
        let value = match values.get(&param.id) {
            Some(value) if !is_blank(value) => value,
            _ => continue,
        };

        let chosen: Vec<&Value> = match (param.kind, value) {
            (ParameterKind::MultiSelect, Value::Array(items)) => items.iter().collect(),
            (ParameterKind::SingleSelect, value) => vec![value],
            _ => continue,
        };

        if let Some(violation) = chosen
            .into_iter()
            .find_map(|item| option_violation(param, item, tier))
        {
            violations.push(violation);
        }
    }

    violations
}

fn option_violation(param: &ParameterSpec, item: &Value, tier: Tier) -> Option<FieldViolation> {
    match find_option(&param.options, item) {
        None => Some(FieldViolation::new(
            ViolationCode::UnknownOption,
            &param.id,
            format!("{} is not a valid choice for {}", item, param.label),
        )),
        Some(option) if !option.is_available_to(tier) => Some(FieldViolation::new(
            ViolationCode::NotEntitled,
            &param.id,
            format!(
                "{} for {} requires the {} plan",
                option.label,
                param.label,
                option.eligible_from.unwrap_or(tier)
            ),
        )),
        Some(_) => None,
    }
}

/// Rejects long durations for users without the custom-parameters entitlement.
///
/// `duration` is the form's duration value in seconds, as a number or a
/// string. Strings are read up to the first non-digit, so `"60s"` and
/// `"60.5"` both count as 60; fractional numbers are truncated. Values with
/// no leading digits are left to other checks.
pub fn check_duration_entitlement(
    duration: &Value,
    entitlements: &impl Entitlements,
) -> Option<FieldViolation> {
    let seconds = match duration {
        Value::String(s) => leading_integer(s)?,
        Value::Number(n) => n.as_f64()?.trunc(),
        _ => return None,
    };

    if seconds <= MAX_FREE_DURATION_SECONDS as f64
        || entitlements.can_use_feature(FEATURE_CUSTOM_PARAMETERS)
    {
        return None;
    }

    Some(FieldViolation::new(
        ViolationCode::NotEntitled,
        "duration",
        format!(
            "durations over {} seconds require a paid plan",
            MAX_FREE_DURATION_SECONDS
        ),
    ))
}

/// Reads an optionally signed run of digits at the start of `s`, after
/// leading whitespace.
fn leading_integer(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude: f64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
