//! CLI command implementations

pub mod catalog;
pub mod check;
pub mod defaults;
pub mod format;
pub mod json_output;
pub mod lint;
pub mod resolve;
pub mod submit;
pub mod tier;

mod reporting;
