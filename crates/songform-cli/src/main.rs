//! Songform CLI - inspect and submit music generation forms
//!
//! This binary resolves which form fields are visible, prints defaults and
//! payloads, lints registries, and submits generation requests.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use songform_cli::commands;
use songform_cli::config::CliConfig;
use songform_cli::input::{load_registry, FormInput};
use songform_spec::{Catalog, Tier};

/// Songform - music generation form engine
#[derive(Parser)]
#[command(name = "songform")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Registry file (JSON or YAML) to use instead of the built-in registry
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    /// Config file (YAML) layered over the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Mode, entitlements, and values shared by the form commands.
#[derive(Args, Debug)]
struct FormArgs {
    /// Generation mode (inspiration, custom, instrumental)
    #[arg(short, long)]
    mode: String,

    /// Subscription tier (free, standard, premium); derived from --feature when omitted
    #[arg(short, long)]
    tier: Option<Tier>,

    /// Granted entitlement or feature flag (repeatable)
    #[arg(short, long = "feature")]
    features: Vec<String>,

    /// Set a value as key=value; JSON values are parsed, anything else is a string (repeatable)
    #[arg(short, long = "set")]
    sets: Vec<String>,

    /// JSON or YAML file with initial values
    #[arg(long)]
    values: Option<PathBuf>,
}

impl FormArgs {
    fn into_input(self) -> Result<FormInput> {
        FormInput::from_args(
            &self.mode,
            self.tier,
            &self.features,
            &self.sets,
            self.values.as_deref(),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the visible parameters for a mode and tier, grouped
    Resolve {
        #[command(flatten)]
        form: FormArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show the initial values for a mode
    Defaults {
        /// Generation mode
        #[arg(short, long)]
        mode: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the request payload for a mode and values
    Format {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Check values against the visible parameters
    Check {
        #[command(flatten)]
        form: FormArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Lint a registry for configuration mistakes
    Lint {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List models and options, optionally for one tier
    Catalog {
        /// Only show what this tier may pick
        #[arg(short, long)]
        tier: Option<Tier>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show the tier a set of entitlements resolves to
    Tier {
        /// Granted entitlement (repeatable)
        #[arg(short, long = "feature")]
        features: Vec<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check, format, and send a generation request
    Submit {
        #[command(flatten)]
        form: FormArgs,

        /// Print the payload instead of sending it
        #[arg(long)]
        dry_run: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    // A second init (e.g. in tests) is harmless, so the error is ignored.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let catalog = Catalog::builtin();

    let registry_path: Option<&Path> = cli.registry.as_deref().or(config.registry.as_deref());
    let registry = load_registry(registry_path, &catalog)?;

    match cli.command {
        Commands::Resolve { form, json } => {
            commands::resolve::run(&registry, &form.into_input()?, json)
        }
        Commands::Defaults { mode, json } => commands::defaults::run(&registry, &mode, json),
        Commands::Format { form } => commands::format::run(&registry, &form.into_input()?),
        Commands::Check { form, json } => {
            commands::check::run(&registry, &form.into_input()?, json)
        }
        Commands::Lint { json } => {
            let source = registry_path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "builtin".to_string());
            commands::lint::run(&registry, &source, json)
        }
        Commands::Catalog { tier, json } => commands::catalog::run(&catalog, tier, json),
        Commands::Tier { features, json } => commands::tier::run(&features, json),
        Commands::Submit {
            form,
            dry_run,
            json,
        } => commands::submit::run(&registry, &config, &form.into_input()?, dry_run, json),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_resolve() {
        let cli = Cli::try_parse_from([
            "songform",
            "resolve",
            "--mode",
            "custom",
            "--tier",
            "premium",
            "--set",
            "lyrics=hello",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Resolve { form, json } => {
                assert_eq!(form.mode, "custom");
                assert_eq!(form.tier, Some(Tier::Premium));
                assert_eq!(form.sets, vec!["lyrics=hello".to_string()]);
                assert!(json);
            }
            _ => panic!("expected resolve command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_tier() {
        let err = Cli::try_parse_from(["songform", "catalog", "--tier", "gold"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("unknown tier"));
    }

    #[test]
    fn test_cli_requires_mode() {
        assert!(Cli::try_parse_from(["songform", "check"]).is_err());
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "songform",
            "lint",
            "--registry",
            "registry.yaml",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.registry, Some(PathBuf::from("registry.yaml")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Lint { json: false }));
    }

    #[test]
    fn test_cli_parses_repeated_features() {
        let cli = Cli::try_parse_from([
            "songform",
            "tier",
            "--feature",
            "high-quality",
            "-f",
            "custom-parameters",
        ])
        .unwrap();
        match cli.command {
            Commands::Tier { features, json } => {
                assert_eq!(features, vec!["high-quality", "custom-parameters"]);
                assert!(!json);
            }
            _ => panic!("expected tier command"),
        }
    }

    #[test]
    fn test_cli_parses_submit_dry_run() {
        let cli = Cli::try_parse_from([
            "songform",
            "submit",
            "-m",
            "instrumental",
            "--values",
            "values.json",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Submit {
                form,
                dry_run,
                json,
            } => {
                assert_eq!(form.mode, "instrumental");
                assert_eq!(form.values, Some(PathBuf::from("values.json")));
                assert!(dry_run);
                assert!(!json);
            }
            _ => panic!("expected submit command"),
        }
    }
}
