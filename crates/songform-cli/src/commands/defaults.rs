//! Defaults command implementation
//!
//! Prints the initial value map for a mode.

use anyhow::Result;
use colored::Colorize;
use songform_spec::{initial_values, ModeDefault, Registry};
use std::process::ExitCode;

use super::json_output::print_json;

/// Run the defaults command
pub fn run(registry: &Registry, mode: &str, json_output: bool) -> Result<ExitCode> {
    let values = initial_values(registry, mode);

    if json_output {
        print_json(&values)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Defaults for mode:".cyan().bold(), mode);
    if registry.mode(mode).is_none() {
        println!(
            "  {} mode '{}' is not declared; using parameter defaults",
            "!".yellow(),
            mode
        );
    }
    for (id, value) in &values {
        println!("  {} = {}", id, value);
    }

    let cleared: Vec<&str> = registry
        .mode(mode)
        .map(|m| {
            m.default_overrides
                .iter()
                .filter(|(_, d)| matches!(d, ModeDefault::Cleared))
                .map(|(id, _)| id.as_str())
                .collect()
        })
        .unwrap_or_default();
    if !cleared.is_empty() {
        println!("{} {}", "Cleared:".dimmed(), cleared.join(", "));
    }

    Ok(ExitCode::SUCCESS)
}
