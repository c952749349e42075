//! Shared human-readable diagnostic printing.

use colored::Colorize;
use songform_spec::{FieldViolation, LintWarning, RegistryIssue};

pub(super) fn print_issues(errors: &[RegistryIssue], warnings: &[LintWarning]) {
    if !errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            );
        }
    }

    if !warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            );
        }
    }
}

pub(super) fn print_violations(violations: &[FieldViolation]) {
    if violations.is_empty() {
        return;
    }
    println!("\n{}", "Problems:".red().bold());
    for violation in violations {
        println!(
            "  {} [{}] {}: {}",
            "x".red(),
            violation.code.to_string().red(),
            violation.param_id.bold(),
            violation.message
        );
    }
}
