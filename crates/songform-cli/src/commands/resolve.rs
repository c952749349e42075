//! Resolve command implementation
//!
//! Prints the parameters a user would see, grouped for rendering.

use anyhow::Result;
use colored::Colorize;
use songform_spec::{group_visible, resolve_visible, Registry};
use std::process::ExitCode;

use super::json_output::{print_json, JsonGroup, JsonParameter, ResolveOutput};
use crate::input::FormInput;

/// Builds the JSON view of the visible parameters.
pub fn resolve_output(registry: &Registry, input: &FormInput) -> ResolveOutput {
    let visible = resolve_visible(registry, &input.context());
    let groups = group_visible(registry, &visible)
        .into_iter()
        .map(|cluster| JsonGroup {
            id: cluster.group_id.to_string(),
            label: cluster
                .group
                .map_or_else(|| cluster.group_id.to_string(), |g| g.label.clone()),
            collapsible: cluster.group.map_or(false, |g| g.collapsible),
            parameters: cluster
                .parameters
                .iter()
                .map(|p| JsonParameter {
                    id: p.id.clone(),
                    label: p.label.clone(),
                    kind: p.kind.to_string(),
                    required: p.required,
                    value: input.values.get(&p.id).cloned(),
                })
                .collect(),
        })
        .collect();

    ResolveOutput {
        mode: input.mode.clone(),
        tier: input.tier.to_string(),
        groups,
    }
}

/// Run the resolve command
pub fn run(registry: &Registry, input: &FormInput, json_output: bool) -> Result<ExitCode> {
    if registry.mode(&input.mode).is_none() {
        tracing::warn!(mode = %input.mode, "mode is not declared in the registry");
    }

    let output = resolve_output(registry, input);
    if json_output {
        print_json(&output)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} mode {} as {}",
        "Resolving:".cyan().bold(),
        output.mode,
        output.tier
    );

    let mut count = 0;
    for group in &output.groups {
        let marker = if group.collapsible { " (collapsible)" } else { "" };
        println!("\n{}{}", group.label.bold(), marker.dimmed());
        for param in &group.parameters {
            count += 1;
            let required = if param.required { "*" } else { " " };
            let value = param
                .value
                .as_ref()
                .map(|v| format!(" = {}", v))
                .unwrap_or_default();
            println!(
                "  {}{} {} {}{}",
                required.red(),
                param.id,
                format!("[{}]", param.kind).dimmed(),
                param.label,
                value.dimmed()
            );
        }
    }

    println!("\n{} {} visible parameter(s)", "Total:".dimmed(), count);
    Ok(ExitCode::SUCCESS)
}
