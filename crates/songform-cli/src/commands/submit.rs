//! Submit command implementation
//!
//! Checks the form, builds the payload, and posts it to the generation backend.

use colored::Colorize;
use serde_json::Value;
use songform_spec::{format_payload, ApiResponse, Payload, Registry};
use std::process::ExitCode;
use std::time::Duration;
use thiserror::Error;

use super::check::collect_violations;
use super::json_output::{print_json, JsonDiagnostic, SubmitOutput};
use super::reporting;
use crate::config::CliConfig;
use crate::input::FormInput;

/// How long to wait for the backend before giving up.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Errors from talking to the generation backend.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no API token configured (set SONGFORM_TOKEN or `token` in the config file)")]
    MissingToken,

    #[error("unauthorized: the backend rejected the API token")]
    Unauthorized,

    #[error("generation request failed: {0}")]
    Backend(String),

    #[error("unexpected response from backend: {0}")]
    InvalidResponse(String),

    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Maps a backend response to its data or an error.
///
/// 401 is always `Unauthorized`. Other non-2xx statuses use the body's
/// `error` or `message` field when present, else the status code. A 2xx body
/// must be an [`ApiResponse`] envelope.
pub fn interpret_response(status: u16, body: &str) -> Result<Option<Value>, SubmitError> {
    if status == 401 {
        return Err(SubmitError::Unauthorized);
    }

    if !(200..300).contains(&status) {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|v| {
                v.get("error")
                    .and_then(Value::as_str)
                    .or_else(|| v.get("message").and_then(Value::as_str))
            })
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Err(SubmitError::Backend(message));
    }

    let envelope: ApiResponse<Value> =
        serde_json::from_str(body).map_err(|e| SubmitError::InvalidResponse(e.to_string()))?;
    envelope.into_result().map_err(SubmitError::Backend)
}

/// Posts a payload to the configured endpoint.
pub fn send(config: &CliConfig, payload: &Payload) -> Result<Option<Value>, SubmitError> {
    let token = config.token.as_deref().ok_or(SubmitError::MissingToken)?;
    let url = config.generate_url();

    tracing::info!(%url, fields = payload.len(), "submitting generation request");

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    let response = client.post(&url).bearer_auth(token).json(payload).send()?;

    let status = response.status().as_u16();
    let body = response.text()?;
    tracing::debug!(status, bytes = body.len(), "backend responded");

    interpret_response(status, &body)
}

/// Run the submit command
///
/// # Returns
/// Exit code: 0 if the request was accepted (or printed with `--dry-run`),
/// 1 if the form has problems or the backend refused it
pub fn run(
    registry: &Registry,
    config: &CliConfig,
    input: &FormInput,
    dry_run: bool,
    json_output: bool,
) -> anyhow::Result<ExitCode> {
    let violations = collect_violations(registry, input);
    let payload = format_payload(registry, &input.values, &input.mode);
    let payload_json = serde_json::to_value(&payload)?;

    if !violations.is_empty() {
        if json_output {
            print_json(&SubmitOutput {
                ok: false,
                dry_run,
                payload: payload_json,
                response: None,
                violations: violations.iter().map(JsonDiagnostic::from).collect(),
                error: None,
            })?;
        } else {
            reporting::print_violations(&violations);
            println!(
                "\n{} Not submitted: {} problem(s) found",
                "FAILED".red().bold(),
                violations.len()
            );
        }
        return Ok(ExitCode::from(1));
    }

    if dry_run {
        if json_output {
            print_json(&SubmitOutput {
                ok: true,
                dry_run,
                payload: payload_json,
                response: None,
                violations: Vec::new(),
                error: None,
            })?;
        } else {
            println!("{} {}", "Would POST to:".cyan().bold(), config.generate_url());
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = send(config, &payload);

    if json_output {
        let (ok, response, error) = match outcome {
            Ok(data) => (true, data, None),
            Err(e) => (false, None, Some(e.to_string())),
        };
        print_json(&SubmitOutput {
            ok,
            dry_run,
            payload: payload_json,
            response,
            violations: Vec::new(),
            error,
        })?;
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::from(1) });
    }

    let data = outcome?;
    println!("{} Generation request accepted", "SUCCESS".green().bold());
    if let Some(data) = data {
        println!("{}", serde_json::to_string_pretty(&data)?);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use songform_spec::{Catalog, Tier};

    #[test]
    fn test_unauthorized() {
        let err = interpret_response(401, r#"{"error": "token expired"}"#).unwrap_err();
        assert!(matches!(err, SubmitError::Unauthorized));
    }

    #[test]
    fn test_backend_error_message() {
        let err = interpret_response(402, r#"{"error": "quota exceeded"}"#).unwrap_err();
        assert_eq!(err.to_string(), "generation request failed: quota exceeded");

        let err = interpret_response(500, r#"{"message": "model offline"}"#).unwrap_err();
        assert_eq!(err.to_string(), "generation request failed: model offline");

        let err = interpret_response(503, "<html>Service Unavailable</html>").unwrap_err();
        assert_eq!(err.to_string(), "generation request failed: HTTP 503");
    }

    #[test]
    fn test_success_envelope() {
        let data = interpret_response(200, r#"{"success": true, "data": {"taskId": "t-1"}}"#)
            .unwrap();
        assert_eq!(data, Some(json!({"taskId": "t-1"})));

        let err = interpret_response(200, r#"{"success": false, "error": "busy"}"#).unwrap_err();
        assert!(matches!(err, SubmitError::Backend(ref m) if m == "busy"));

        let err = interpret_response(200, "not json").unwrap_err();
        assert!(matches!(err, SubmitError::InvalidResponse(_)));
    }

    #[test]
    fn test_missing_token() {
        let err = send(&CliConfig::default(), &Payload::new()).unwrap_err();
        assert!(matches!(err, SubmitError::MissingToken));
    }

    fn complete_input() -> FormInput {
        let sets: Vec<String> = [
            "modelId=Chirp v4.0",
            "musicName=Paper Boats",
            "lyrics=folding paper boats in the rain",
            "musicStyle=folk",
            "mood=calm",
            "duration=\"30\"",
            "tempo=slow",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        FormInput::from_args("custom", Some(Tier::Free), &[], &sets, None).unwrap()
    }

    #[test]
    fn test_dry_run_skips_network() {
        let registry = Registry::builtin(&Catalog::builtin());
        let code = run(&registry, &CliConfig::default(), &complete_input(), true, true).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_violations_block_submission() {
        let registry = Registry::builtin(&Catalog::builtin());
        let input = FormInput::from_args("custom", None, &[], &[], None).unwrap();
        let code = run(&registry, &CliConfig::default(), &input, false, true).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_missing_token_reported_in_json() {
        let registry = Registry::builtin(&Catalog::builtin());
        let code = run(&registry, &CliConfig::default(), &complete_input(), false, true).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
