//! Songform Integration Test Infrastructure
//!
//! Shared fixtures for the integration and property tests:
//!
//! - Built-in registry and catalog construction
//! - Value map helpers
//! - Registry files on disk (`fixtures/`)
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p songform-tests
//! ```

pub mod fixtures;
