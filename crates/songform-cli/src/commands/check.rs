//! Check command implementation
//!
//! Checks form values against the parameters visible for the given mode and tier.

use anyhow::Result;
use colored::Colorize;
use songform_spec::validation::{check_duration_entitlement, check_options, check_values};
use songform_spec::{resolve_visible, FieldViolation, Registry};
use std::process::ExitCode;

use super::json_output::{print_json, CheckOutput, JsonDiagnostic};
use super::reporting;
use crate::input::FormInput;

/// Collects every problem with the input: field rules for visible
/// parameters, option choices for the user's tier, then the duration
/// entitlement gate. Each field reports at most once.
pub fn collect_violations(registry: &Registry, input: &FormInput) -> Vec<FieldViolation> {
    let visible = resolve_visible(registry, &input.context());
    let mut violations = check_values(&visible, &input.values);

    for violation in check_options(&visible, &input.values, input.tier) {
        if !violations.iter().any(|v| v.param_id == violation.param_id) {
            violations.push(violation);
        }
    }

    let duration_visible = visible.iter().any(|p| p.id == "duration");
    let duration_reported = violations.iter().any(|v| v.param_id == "duration");
    if let Some(duration) = input
        .values
        .get("duration")
        .filter(|_| duration_visible && !duration_reported)
    {
        violations.extend(check_duration_entitlement(duration, &input.features));
    }

    violations
}

/// Run the check command
///
/// # Returns
/// Exit code: 0 if every value is acceptable, 1 otherwise
pub fn run(registry: &Registry, input: &FormInput, json_output: bool) -> Result<ExitCode> {
    let violations = collect_violations(registry, input);

    if json_output {
        let output = CheckOutput {
            ok: violations.is_empty(),
            mode: input.mode.clone(),
            tier: input.tier.to_string(),
            violations: violations.iter().map(JsonDiagnostic::from).collect(),
        };
        print_json(&output)?;
    } else {
        println!(
            "{} mode {} as {}",
            "Checking:".cyan().bold(),
            input.mode,
            input.tier
        );
        reporting::print_violations(&violations);
        if violations.is_empty() {
            println!("\n{} All values are acceptable", "SUCCESS".green().bold());
        } else {
            println!(
                "\n{} {} problem(s) found",
                "FAILED".red().bold(),
                violations.len()
            );
        }
    }

    Ok(if violations.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use songform_spec::{Catalog, Tier, ViolationCode};

    fn input(tier: Option<Tier>, sets: &[&str]) -> FormInput {
        let sets: Vec<String> = sets.iter().map(|s| s.to_string()).collect();
        FormInput::from_args("inspiration", tier, &[], &sets, None).unwrap()
    }

    const COMPLETE: &[&str] = &[
        "modelId=Chirp v4.0",
        "musicName=Night Drive",
        "musicDescription=neon synthwave at 2am",
        "musicStyle=electronic",
        "mood=calm",
        "duration=\"60\"",
        "tempo=slow",
    ];

    #[test]
    fn test_long_duration_needs_paid_tier() {
        let registry = Registry::builtin(&Catalog::builtin());

        let free = collect_violations(&registry, &input(None, COMPLETE));
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].code, ViolationCode::NotEntitled);

        let paid = collect_violations(&registry, &input(Some(Tier::Standard), COMPLETE));
        assert!(paid.is_empty(), "{:?}", paid);
    }

    #[test]
    fn test_unusual_durations_still_gated() {
        let registry = Registry::builtin(&Catalog::builtin());
        for duration in ["duration=60", "duration=60.0", "duration=\"60s\"", "duration=\"60.0\""] {
            let mut sets = COMPLETE.to_vec();
            sets.retain(|s| !s.starts_with("duration="));
            sets.push(duration);
            let violations = collect_violations(&registry, &input(None, &sets));
            assert_eq!(violations.len(), 1, "{}: {:?}", duration, violations);
            assert_eq!(violations[0].param_id, "duration");
        }
    }

    #[test]
    fn test_free_user_cannot_pick_premium_model() {
        let registry = Registry::builtin(&Catalog::builtin());
        let mut sets = COMPLETE.to_vec();
        sets[0] = "modelId=Chirp v5.5";
        sets[5] = "duration=\"15\"";
        let violations = collect_violations(&registry, &input(None, &sets));
        assert_eq!(violations.len(), 1, "{:?}", violations);
        assert_eq!(violations[0].param_id, "modelId");
        assert_eq!(violations[0].code, ViolationCode::NotEntitled);

        let premium = collect_violations(&registry, &input(Some(Tier::Premium), &sets));
        assert!(premium.is_empty(), "{:?}", premium);
    }

    #[test]
    fn test_unknown_style_rejected() {
        let registry = Registry::builtin(&Catalog::builtin());
        let mut sets = COMPLETE.to_vec();
        sets[3] = "musicStyle=polka";
        let violations = collect_violations(&registry, &input(Some(Tier::Premium), &sets));
        assert_eq!(violations.len(), 1, "{:?}", violations);
        assert_eq!(violations[0].param_id, "musicStyle");
        assert_eq!(violations[0].code, ViolationCode::UnknownOption);
    }

    #[test]
    fn test_missing_required_fields() {
        let registry = Registry::builtin(&Catalog::builtin());
        let violations = collect_violations(&registry, &input(None, &["musicName=Hi"]));
        let fields: Vec<&str> = violations.iter().map(|v| v.param_id.as_str()).collect();
        assert_eq!(
            fields,
            vec!["modelId", "musicDescription", "musicStyle", "mood", "duration", "tempo"]
        );
    }

    #[test]
    fn test_run_exit_codes() {
        let registry = Registry::builtin(&Catalog::builtin());
        let ok = run(&registry, &input(Some(Tier::Premium), COMPLETE), true).unwrap();
        assert_eq!(ok, ExitCode::SUCCESS);

        let failed = run(&registry, &input(None, &[]), true).unwrap();
        assert_eq!(failed, ExitCode::from(1));
    }
}
