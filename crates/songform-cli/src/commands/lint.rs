//! Lint command implementation
//!
//! Checks a registry for configuration mistakes.

use anyhow::Result;
use colored::Colorize;
use songform_spec::validation::validate_registry;
use songform_spec::Registry;
use std::process::ExitCode;

use super::json_output::{print_json, JsonDiagnostic, LintOutput};
use super::reporting;

/// Run the lint command
///
/// # Arguments
/// * `registry` - Registry to lint
/// * `source` - Where the registry came from, for display
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if the registry has no errors (warnings allowed), 1 otherwise
pub fn run(registry: &Registry, source: &str, json_output: bool) -> Result<ExitCode> {
    let result = validate_registry(registry);

    if json_output {
        let output = LintOutput {
            ok: result.is_ok(),
            source: source.to_string(),
            errors: result.errors.iter().map(JsonDiagnostic::from).collect(),
            warnings: result.warnings.iter().map(JsonDiagnostic::from).collect(),
        };
        print_json(&output)?;
    } else {
        println!("{} {}", "Linting:".cyan().bold(), source);
        println!(
            "{} {} parameter(s), {} mode(s), {} group(s)",
            "Registry:".dimmed(),
            registry.parameters().len(),
            registry.modes().len(),
            registry.groups().len()
        );

        reporting::print_issues(&result.errors, &result.warnings);

        if result.is_ok() {
            println!("\n{} Registry is valid", "SUCCESS".green().bold());
        } else {
            println!(
                "\n{} Registry has {} error(s)",
                "FAILED".red().bold(),
                result.errors.len()
            );
        }
    }

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
