//! Format command implementation
//!
//! Prints the request body that would be sent to the backend.

use anyhow::Result;
use songform_spec::{format_payload, Registry};
use std::process::ExitCode;

use super::json_output::print_json;
use crate::input::FormInput;

/// Run the format command
///
/// The payload is JSON either way; tier and features on the input are ignored
/// because payload formatting does not depend on them.
pub fn run(registry: &Registry, input: &FormInput) -> Result<ExitCode> {
    let payload = format_payload(registry, &input.values, &input.mode);
    print_json(&payload)?;
    Ok(ExitCode::SUCCESS)
}
