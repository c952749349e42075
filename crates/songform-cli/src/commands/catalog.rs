//! Catalog command implementation
//!
//! Lists models and options, optionally narrowed to what a tier may pick.

use anyhow::Result;
use colored::Colorize;
use songform_spec::{Catalog, OptionItem, Tier};
use std::process::ExitCode;

use super::json_output::print_json;

/// Returns the catalog as seen by `tier`, or the whole catalog.
pub fn catalog_for(catalog: &Catalog, tier: Option<Tier>) -> Catalog {
    let Some(tier) = tier else {
        return catalog.clone();
    };
    Catalog {
        models: catalog.models_for_tier(tier).cloned().collect(),
        durations: catalog.durations_for_tier(tier).cloned().collect(),
        ..catalog.clone()
    }
}

/// Run the catalog command
pub fn run(catalog: &Catalog, tier: Option<Tier>, json_output: bool) -> Result<ExitCode> {
    let view = catalog_for(catalog, tier);

    if json_output {
        print_json(&view)?;
        return Ok(ExitCode::SUCCESS);
    }

    match tier {
        Some(tier) => println!("{} {}", "Catalog for tier:".cyan().bold(), tier),
        None => println!("{}", "Catalog (all tiers):".cyan().bold()),
    }

    println!("\n{}", "Models".bold());
    for model in &view.models {
        println!(
            "  {} {} {}",
            model.id,
            format!("[{}+]", model.minimum_tier).dimmed(),
            model.description
        );
    }

    print_options("Styles", &view.styles);
    print_options("Moods", &view.moods);
    print_options("Tempos", &view.tempos);
    print_options("Durations", &view.durations);
    print_options("Voices", &view.voices);

    Ok(ExitCode::SUCCESS)
}

fn print_options(title: &str, options: &[OptionItem]) {
    println!("\n{}", title.bold());
    for option in options {
        let mut extra = Vec::new();
        if let Some(ref bpm) = option.bpm_range {
            extra.push(format!("{} bpm", bpm));
        }
        if let Some(tier) = option.eligible_from {
            extra.push(format!("{}+", tier));
        }
        let extra = if extra.is_empty() {
            String::new()
        } else {
            format!(" ({})", extra.join(", "))
        };
        println!("  {} {}{}", option.value, option.label, extra.dimmed());
    }
}
