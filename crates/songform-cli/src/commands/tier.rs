//! Tier command implementation
//!
//! Shows the tier a set of entitlements resolves to.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use songform_spec::{tier_for, FeatureSet};
use std::process::ExitCode;

use super::json_output::print_json;

/// Run the tier command
pub fn run(features: &[String], json_output: bool) -> Result<ExitCode> {
    let granted: FeatureSet = features.iter().map(String::as_str).collect();
    let tier = tier_for(&granted);

    if json_output {
        print_json(&json!({
            "tier": tier,
            "features": granted,
        }))?;
    } else {
        let listed: Vec<&str> = granted.iter().collect();
        let listed = if listed.is_empty() {
            "(none)".to_string()
        } else {
            listed.join(", ")
        };
        println!("{} {}", "Entitlements:".dimmed(), listed);
        println!("{} {}", "Tier:".cyan().bold(), tier.to_string().bold());
    }

    Ok(ExitCode::SUCCESS)
}
