//! Songform CLI library.
//!
//! This crate provides the core functionality for the Songform CLI,
//! including configuration loading, form input parsing, and the commands.

pub mod commands;
pub mod config;
pub mod input;
